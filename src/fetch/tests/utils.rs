use crate::error::FetchError;
use crate::fetch::FlightSource;
use crate::flight::{Direction, FlightNumber};
use crate::payload::{RawFlightEntry, parse_day};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::HashMap;

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

pub fn code(s: &str) -> FlightNumber {
    FlightNumber::new(s).unwrap()
}

pub fn departure(codes: &[&str], scheduled: &str, status: &str, destination: &str) -> Value {
    let flight: Vec<Value> = codes.iter().map(|c| json!({ "no": c })).collect();
    json!({
        "time": scheduled,
        "flight": flight,
        "status": status,
        "destination": [destination],
        "terminal": "T1",
        "aisle": "A",
        "gate": "68"
    })
}

pub fn arrival(codes: &[&str], scheduled: &str, status: &str, origin: &str) -> Value {
    let flight: Vec<Value> = codes.iter().map(|c| json!({ "no": c })).collect();
    json!({
        "time": scheduled,
        "flight": flight,
        "status": status,
        "origin": [origin],
        "baggage": "12",
        "hall": "B",
        "stand": "D219"
    })
}

/// Wraps entries in the upstream group layout.
pub fn day_payload(entries: Vec<Value>) -> Value {
    json!([{ "date": "2025-06-12", "arrival": false, "cargo": false, "list": entries }])
}

enum Canned {
    Payload(Value),
    Failure(&'static str),
}

/// Canned per-date responses. Dates without a response return an empty day.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<NaiveDate, Canned>,
    pub calls: RefCell<Vec<(NaiveDate, Direction)>>,
}

impl FakeSource {
    pub fn with_day(mut self, date: NaiveDate, payload: Value) -> Self {
        self.responses.insert(date, Canned::Payload(payload));
        self
    }

    pub fn with_failure(mut self, date: NaiveDate, reason: &'static str) -> Self {
        self.responses.insert(date, Canned::Failure(reason));
        self
    }
}

impl FlightSource for FakeSource {
    fn fetch_day(&self, date: NaiveDate, direction: Direction) -> Result<Vec<RawFlightEntry>, FetchError> {
        self.calls.borrow_mut().push((date, direction));
        match self.responses.get(&date) {
            Some(Canned::Payload(payload)) => parse_day(payload.clone(), date),
            Some(Canned::Failure(reason)) => Err(FetchError::Malformed(reason.to_string())),
            None => Ok(vec![]),
        }
    }
}
