use crate::flight::{Details, Direction, FlightNumber, FlightRecord};
use crate::payload::RawFlightEntry;
use chrono::NaiveDate;

const AT_GATE: &str = "At gate ";
const DEPARTED: &str = "Dep ";

/// Extracts an actual time from a status string, if the status carries one.
pub type StatusRule = fn(&str) -> Option<&str>;

/// `"At gate 01:00"` -> `"01:00"`. Takes the text after the last marker.
pub fn arrival_status_time(status: &str) -> Option<&str> {
    status
        .rfind(AT_GATE)
        .map(|idx| status[idx + AT_GATE.len()..].trim())
        .filter(|time| !time.is_empty())
}

/// `"Dep 14:22"` -> `"14:22"`. The second whitespace-separated token.
pub fn departure_status_time(status: &str) -> Option<&str> {
    if !status.starts_with(DEPARTED) {
        return None;
    }
    status.split_whitespace().nth(1)
}

pub fn status_rule(direction: Direction) -> StatusRule {
    match direction {
        Direction::Arrival => arrival_status_time,
        Direction::Departure => departure_status_time,
    }
}

/// True when any of the entry's codeshare aliases is the requested flight.
pub fn matches(entry: &RawFlightEntry, requested: &FlightNumber) -> bool {
    entry
        .flight
        .iter()
        .filter_map(|alias| alias.no.as_deref())
        .any(|code| requested.matches(code))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn location(entry: &RawFlightEntry, direction: Direction) -> Option<String> {
    let places = match direction {
        Direction::Arrival => &entry.origin,
        Direction::Departure => &entry.destination,
    };
    present(places.first().map(String::as_str))
        .or_else(|| present(entry.list_airport.first().and_then(|a| a.city.as_deref())))
        .map(str::to_string)
}

fn scheduled_time(entry: &RawFlightEntry) -> Option<String> {
    present(entry.time.as_deref())
        .or_else(|| present(entry.schedule_time.as_deref()))
        .map(str::to_string)
}

fn actual_time(entry: &RawFlightEntry, direction: Direction) -> Option<String> {
    entry
        .status
        .as_deref()
        .and_then(status_rule(direction))
        .or_else(|| present(entry.actual_time.as_deref()))
        .map(str::to_string)
}

fn details(entry: &RawFlightEntry, direction: Direction) -> Details {
    match direction {
        Direction::Arrival => Details::Arrival {
            baggage: entry.baggage.clone(),
            hall: entry.hall.clone(),
            stand: entry.stand.clone(),
            terminal: entry.terminal.clone(),
        },
        Direction::Departure => Details::Departure {
            terminal: entry.terminal.clone(),
            aisle: entry.aisle.clone(),
            gate: entry.gate.clone(),
        },
    }
}

/// Builds the canonical record for an entry already known to match.
pub fn normalize(
    entry: &RawFlightEntry,
    direction: Direction,
    date: NaiveDate,
    requested: &FlightNumber,
) -> FlightRecord {
    FlightRecord::new(
        date,
        requested.clone(),
        location(entry, direction),
        scheduled_time(entry),
        actual_time(entry, direction),
        entry.status.clone(),
        details(entry, direction),
    )
}

/// Filters one day's entries down to the requested flight, in fetch order.
pub fn normalize_day(
    entries: &[RawFlightEntry],
    direction: Direction,
    date: NaiveDate,
    requested: &FlightNumber,
) -> Vec<FlightRecord> {
    entries
        .iter()
        .filter(|entry| matches(entry, requested))
        .map(|entry| normalize(entry, direction, date, requested))
        .collect()
}
