use crate::time::{Verdict, classify_optional};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the airport a query concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[value(name = "a", alias = "arrival")]
    #[serde(alias = "a")]
    Arrival,
    #[value(name = "d", alias = "departure")]
    #[serde(alias = "d")]
    Departure,
}

impl Direction {
    /// Value of the upstream `arrival` query parameter.
    pub fn arrival_param(self) -> &'static str {
        match self {
            Direction::Arrival => "true",
            Direction::Departure => "false",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Arrival => "Arrival",
            Direction::Departure => "Departure",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Direction::Arrival => "Arrivals",
            Direction::Departure => "Departures",
        }
    }

    /// Label of the place on the other end of the flight.
    pub fn location_label(self) -> &'static str {
        match self {
            Direction::Arrival => "Origin",
            Direction::Departure => "Destination",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A requested flight code with whitespace removed and letters uppercased,
/// so `"cx 418"` and `"CX418"` are the same flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightNumber(String);

impl FlightNumber {
    pub fn new(raw: &str) -> Option<FlightNumber> {
        let code = Self::normalize(raw);
        if code.is_empty() { None } else { Some(FlightNumber(code)) }
    }

    fn normalize(raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Codeshare alias comparison under the same normalization.
    pub fn matches(&self, alias: &str) -> bool {
        Self::normalize(alias) == self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields that only make sense for one direction. Terminal exists on both
/// sides but is reported per direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Details {
    Arrival {
        baggage: Option<String>,
        hall: Option<String>,
        stand: Option<String>,
        terminal: Option<String>,
    },
    Departure {
        terminal: Option<String>,
        aisle: Option<String>,
        gate: Option<String>,
    },
}

impl Details {
    pub fn direction(&self) -> Direction {
        match self {
            Details::Arrival { .. } => Direction::Arrival,
            Details::Departure { .. } => Direction::Departure,
        }
    }
}

/// One observation of the requested flight on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRecord {
    date: NaiveDate,
    flight_number: FlightNumber,
    location: Option<String>,
    scheduled_time: Option<String>,
    actual_time: Option<String>,
    status: Option<String>,
    details: Details,
}

impl FlightRecord {
    pub fn new(
        date: NaiveDate,
        flight_number: FlightNumber,
        location: Option<String>,
        scheduled_time: Option<String>,
        actual_time: Option<String>,
        status: Option<String>,
        details: Details,
    ) -> FlightRecord {
        FlightRecord {
            date,
            flight_number,
            location,
            scheduled_time,
            actual_time,
            status,
            details,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn flight_number(&self) -> &FlightNumber {
        &self.flight_number
    }

    pub fn direction(&self) -> Direction {
        self.details.direction()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn scheduled_time(&self) -> Option<&str> {
        self.scheduled_time.as_deref()
    }

    pub fn actual_time(&self) -> Option<&str> {
        self.actual_time.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn verdict(&self) -> Verdict {
        classify_optional(self.scheduled_time(), self.actual_time())
    }
}
