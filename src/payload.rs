//! Upstream JSON shape for one day of flight history.
//!
//! The endpoint answers with an array of groups, each holding a `list` of
//! flight entries. Every entry field is optional; text fields tolerate
//! numbers and booleans as well as strings.

use crate::error::FetchError;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFlightEntry {
    #[serde(default, deserialize_with = "lenient_records")]
    pub flight: Vec<FlightAlias>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub schedule_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub actual_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub origin: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub destination: Vec<String>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub list_airport: Vec<AirportRef>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub baggage: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub hall: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub stand: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub terminal: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub aisle: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gate: Option<String>,
}

/// One airline code for the physical flight.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FlightAlias {
    #[serde(default, deserialize_with = "lenient_text")]
    pub no: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AirportRef {
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(text_of))
}

/// Keeps the array elements that read as `T`; any other shape is empty.
fn lenient_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let records = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(records)
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(text_of).collect(),
        Some(other) => text_of(other).into_iter().collect(),
        None => Vec::new(),
    };
    Ok(items)
}

/// Flattens one day's response into flight entries, skipping (and logging)
/// whatever does not fit. Only a non-array top level fails the whole date.
pub fn parse_day(payload: Value, date: NaiveDate) -> Result<Vec<RawFlightEntry>, FetchError> {
    let groups = match payload {
        Value::Array(groups) => groups,
        other => {
            return Err(FetchError::Malformed(format!(
                "expected a list of groups for {date}, got {}",
                kind_of(&other)
            )));
        }
    };

    let mut entries = Vec::new();
    for group in groups {
        let list = match group {
            Value::Object(mut fields) => match fields.remove("list") {
                Some(Value::Array(list)) => list,
                Some(other) => {
                    warn!(%date, kind = kind_of(&other), "skipping group whose list is not an array");
                    continue;
                }
                None => {
                    warn!(%date, "skipping group without a flight list");
                    continue;
                }
            },
            other => {
                warn!(%date, kind = kind_of(&other), "skipping group that is not an object");
                continue;
            }
        };

        for item in list {
            match serde_json::from_value::<RawFlightEntry>(item) {
                Ok(entry) if entry.flight.is_empty() => {
                    warn!(%date, "skipping flight entry without flight codes");
                }
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(%date, error = %e, "skipping unreadable flight entry"),
            }
        }
    }
    Ok(entries)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
