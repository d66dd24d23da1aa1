use crate::flight::{Details, Direction, FlightNumber, FlightRecord};
use crate::summary::{Report, Summary};
use crate::time::Verdict;
use colored::Colorize;
use serde_json::{Value, json};
use std::fmt::Write;
use tabled::Tabled;
use tabled::settings::{Alignment, Style};

const NA: &str = "N/A";

/// What the user asked for; the renderer needs it even when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub flight_number: FlightNumber,
    pub direction: Direction,
    pub window_days: u32,
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NA).to_string()
}

fn painted(verdict: Verdict) -> String {
    let label = verdict.to_string();
    let label = label.as_str();
    match verdict {
        Verdict::OnTime => label.green().to_string(),
        Verdict::Delayed => label.red().bold().to_string(),
        Verdict::Unknown => label.yellow().to_string(),
    }
}

#[derive(Tabled)]
struct ArrivalRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Actual Time")]
    actual_time: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Baggage")]
    baggage: String,
    #[tabled(rename = "Hall")]
    hall: String,
    #[tabled(rename = "Stand")]
    stand: String,
    #[tabled(rename = "Terminal")]
    terminal: String,
    #[tabled(rename = "On Time")]
    on_time: String,
}

#[derive(Tabled)]
struct DepartureRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Actual Time")]
    actual_time: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Terminal")]
    terminal: String,
    #[tabled(rename = "Aisle")]
    aisle: String,
    #[tabled(rename = "Gate")]
    gate: String,
    #[tabled(rename = "On Time")]
    on_time: String,
}

fn styled(mut table: tabled::Table) -> String {
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

fn table(direction: Direction, records: &[FlightRecord]) -> String {
    match direction {
        Direction::Arrival => {
            let rows = records.iter().filter_map(|r| match r.details() {
                Details::Arrival { baggage, hall, stand, terminal } => Some(ArrivalRow {
                    date: r.date().to_string(),
                    actual_time: or_na(r.actual_time()),
                    status: or_na(r.status()),
                    baggage: or_na(baggage.as_deref()),
                    hall: or_na(hall.as_deref()),
                    stand: or_na(stand.as_deref()),
                    terminal: or_na(terminal.as_deref()),
                    on_time: painted(r.verdict()),
                }),
                Details::Departure { .. } => None,
            });
            styled(tabled::Table::new(rows))
        }
        Direction::Departure => {
            let rows = records.iter().filter_map(|r| match r.details() {
                Details::Departure { terminal, aisle, gate } => Some(DepartureRow {
                    date: r.date().to_string(),
                    actual_time: or_na(r.actual_time()),
                    status: or_na(r.status()),
                    terminal: or_na(terminal.as_deref()),
                    aisle: or_na(aisle.as_deref()),
                    gate: or_na(gate.as_deref()),
                    on_time: painted(r.verdict()),
                }),
                Details::Arrival { .. } => None,
            });
            styled(tabled::Table::new(rows))
        }
    }
}

fn found(query: &Query, report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} found for {} in the past {} days:",
        query.direction.plural(),
        query.flight_number,
        query.window_days
    );
    let _ = writeln!(
        out,
        "Flight Number: {} | {}: {}",
        query.flight_number,
        query.direction.location_label(),
        report.location
    );
    let _ = writeln!(out, "Scheduled Time: {}", report.scheduled_time);
    let _ = writeln!(out, "{}", table(query.direction, &report.records));
    let tally = report.tally;
    let _ = writeln!(
        out,
        "{} of {} on time, {} delayed, {} unknown",
        tally.on_time,
        tally.total(),
        tally.delayed,
        tally.unknown
    );
    out
}

pub fn render(query: &Query, summary: &Summary) -> String {
    match summary {
        Summary::NotFound => format!(
            "No {} found for flight number {} in the past {} days.\n",
            query.direction.plural().to_lowercase(),
            query.flight_number,
            query.window_days
        ),
        Summary::Found(report) => found(query, report),
    }
}

/// Number of table rows [`render`] prints, used to decide on paging.
pub fn row_count(summary: &Summary) -> usize {
    match summary {
        Summary::NotFound => 0,
        Summary::Found(report) => report.records.len(),
    }
}

fn record_json(record: &FlightRecord) -> Value {
    let mut value = json!({
        "date": record.date().to_string(),
        "flight_number": record.flight_number().as_str(),
        "direction": record.direction(),
        "location": record.location(),
        "scheduled_time": record.scheduled_time(),
        "actual_time": record.actual_time(),
        "status": record.status(),
        "on_time": record.verdict().to_string(),
    });
    let details = match record.details() {
        Details::Arrival { baggage, hall, stand, terminal } => json!({
            "baggage": baggage, "hall": hall, "stand": stand, "terminal": terminal,
        }),
        Details::Departure { terminal, aisle, gate } => json!({
            "terminal": terminal, "aisle": aisle, "gate": gate,
        }),
    };
    if let (Value::Object(fields), Value::Object(extra)) = (&mut value, details) {
        fields.extend(extra);
    }
    value
}

pub fn render_json(query: &Query, summary: &Summary) -> serde_json::Result<String> {
    let body = match summary {
        Summary::NotFound => json!({
            "flight_number": query.flight_number.as_str(),
            "direction": query.direction,
            "window_days": query.window_days,
            "found": false,
            "records": [],
        }),
        Summary::Found(report) => json!({
            "flight_number": query.flight_number.as_str(),
            "direction": query.direction,
            "window_days": query.window_days,
            "found": true,
            "location": report.location.to_string(),
            "scheduled_time": report.scheduled_time.to_string(),
            "on_time": report.tally.on_time,
            "delayed": report.tally.delayed,
            "unknown": report.tally.unknown,
            "records": report.records.iter().map(record_json).collect::<Vec<_>>(),
        }),
    };
    serde_json::to_string_pretty(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::aggregate;
    use chrono::NaiveDate;

    fn query(direction: Direction) -> Query {
        Query {
            flight_number: FlightNumber::new("cx418").unwrap(),
            direction,
            window_days: 10,
        }
    }

    fn departure(day: u32, actual: Option<&str>, gate: Option<&str>) -> FlightRecord {
        FlightRecord::new(
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            FlightNumber::new("CX418").unwrap(),
            Some("ICN".to_string()),
            Some("14:25".to_string()),
            actual.map(str::to_string),
            actual.map(|a| format!("Dep {a}")),
            Details::Departure {
                terminal: Some("T1".to_string()),
                aisle: Some("A".to_string()),
                gate: gate.map(str::to_string),
            },
        )
    }

    #[test]
    fn test_not_found_message() {
        let text = render(&query(Direction::Arrival), &Summary::NotFound);
        assert_eq!("No arrivals found for flight number CX418 in the past 10 days.\n", text);
    }

    #[test]
    fn test_departure_report() {
        colored::control::set_override(false);
        let summary = aggregate(vec![departure(11, Some("14:27"), Some("65")), departure(12, None, None)]);
        let text = render(&query(Direction::Departure), &summary);

        assert!(text.starts_with("Departures found for CX418 in the past 10 days:\n"));
        assert!(text.contains("Flight Number: CX418 | Destination: ICN"));
        assert!(text.contains("Scheduled Time: 14:25"));
        assert!(text.contains("Gate"));
        assert!(!text.contains("Baggage"));
        assert!(text.contains("Dep 14:27"));
        assert!(text.contains("On Time"));
        assert!(text.contains("Unknown"));
        assert!(text.contains("1 of 2 on time, 0 delayed, 1 unknown"));

        let newest = text.find("2025-06-12").unwrap();
        let older = text.find("2025-06-11").unwrap();
        assert!(newest < older);
    }

    #[test]
    fn test_json_report() {
        let summary = aggregate(vec![departure(12, Some("14:22"), None)]);
        let text = render_json(&query(Direction::Departure), &summary).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json!(true), value["found"]);
        assert_eq!(json!("ICN"), value["location"]);
        assert_eq!(json!("departure"), value["direction"]);
        let record = &value["records"][0];
        assert_eq!(json!("2025-06-12"), record["date"]);
        assert_eq!(json!("On Time"), record["on_time"]);
        assert_eq!(json!("T1"), record["terminal"]);
        assert_eq!(Value::Null, record["gate"]);
        assert!(record.get("baggage").is_none());
    }

    #[test]
    fn test_json_not_found() {
        let text = render_json(&query(Direction::Arrival), &Summary::NotFound).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json!(false), value["found"]);
        assert_eq!(json!([]), value["records"]);
    }
}
