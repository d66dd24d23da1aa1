use crate::config::Config;
use crate::error::FetchError;
use crate::flight::{Direction, FlightNumber, FlightRecord};
use crate::normalize::normalize_day;
use crate::payload::{RawFlightEntry, parse_day};
use chrono::{Days, NaiveDate};
use reqwest::blocking::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, info, warn};


/// Consecutive calendar days ending on (and including) a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    dates: Vec<NaiveDate>,
}

impl Window {
    /// Most recent day first.
    pub fn ending(today: NaiveDate, days: u32) -> Window {
        let dates = (0..days)
            .map_while(|i| today.checked_sub_days(Days::new(u64::from(i))))
            .collect();
        Window { dates }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Where one day of flight history comes from.
pub trait FlightSource {
    fn fetch_day(&self, date: NaiveDate, direction: Direction) -> Result<Vec<RawFlightEntry>, FetchError>;
}

pub struct HttpSource {
    client: Client,
    base_url: String,
    lang: String,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<HttpSource, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(HttpSource {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            lang: config.lang.clone(),
        })
    }

    /// `GET {base_url}?date=YYYY-MM-DD&lang=..&cargo=false&arrival=true|false`
    fn request(&self, date: NaiveDate, direction: Direction) -> RequestBuilder {
        let date_param = date.format("%Y-%m-%d").to_string();
        self.client.get(&self.base_url).query(&[
            ("date", date_param.as_str()),
            ("lang", self.lang.as_str()),
            ("cargo", "false"),
            ("arrival", direction.arrival_param()),
        ])
    }
}

impl FlightSource for HttpSource {
    fn fetch_day(&self, date: NaiveDate, direction: Direction) -> Result<Vec<RawFlightEntry>, FetchError> {
        let body = self
            .request(date, direction)
            .send()?
            .error_for_status()?
            .text()?;
        let payload = serde_json::from_str(&body)?;
        parse_day(payload, date)
    }
}

/// Queries every day of the window in turn and keeps the records for the
/// requested flight. A failed day is logged and contributes nothing.
pub fn collect(
    source: &impl FlightSource,
    flight_number: &FlightNumber,
    direction: Direction,
    window: &Window,
) -> Vec<FlightRecord> {
    if window.is_empty() {
        return Vec::new();
    }
    info!(%flight_number, %direction, days = window.len(), "collecting flight history");

    let mut records = Vec::new();
    for &date in window.dates() {
        match source.fetch_day(date, direction) {
            Ok(entries) => {
                let matched = normalize_day(&entries, direction, date, flight_number);
                debug!(%date, entries = entries.len(), matched = matched.len(), "fetched day");
                records.extend(matched);
            }
            Err(e) => warn!(%date, error = %e, "failed to fetch flights, skipping day"),
        }
    }
    records
}
