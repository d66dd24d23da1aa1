use crate::flight::FlightRecord;
use crate::time::Verdict;
use std::collections::BTreeSet;
use std::fmt;

/// Whether a field stayed the same across the whole window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consensus {
    Uniform(Option<String>),
    Varies,
}

impl Consensus {
    fn of<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Consensus {
        let mut distinct = values.collect::<BTreeSet<_>>();
        match (distinct.pop_first(), distinct.is_empty()) {
            (Some(value), true) => Consensus::Uniform(value.map(str::to_string)),
            _ => Consensus::Varies,
        }
    }
}

impl fmt::Display for Consensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consensus::Uniform(Some(value)) => f.write_str(value),
            Consensus::Uniform(None) => f.write_str("N/A"),
            Consensus::Varies => f.write_str("Varies"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub on_time: usize,
    pub delayed: usize,
    pub unknown: usize,
}

impl Tally {
    fn count(records: &[FlightRecord]) -> Tally {
        records.iter().fold(Tally::default(), |mut tally, record| {
            match record.verdict() {
                Verdict::OnTime => tally.on_time += 1,
                Verdict::Delayed => tally.delayed += 1,
                Verdict::Unknown => tally.unknown += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> usize {
        self.on_time + self.delayed + self.unknown
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub location: Consensus,
    pub scheduled_time: Consensus,
    /// Most recent date first; same-day records keep fetch order.
    pub records: Vec<FlightRecord>,
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    NotFound,
    Found(Report),
}

pub fn aggregate(mut records: Vec<FlightRecord>) -> Summary {
    if records.is_empty() {
        return Summary::NotFound;
    }

    let location = Consensus::of(records.iter().map(FlightRecord::location));
    let scheduled_time = Consensus::of(records.iter().map(FlightRecord::scheduled_time));
    records.sort_by(|a, b| b.date().cmp(&a.date()));
    let tally = Tally::count(&records);

    Summary::Found(Report {
        location,
        scheduled_time,
        records,
        tally,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::{Details, FlightNumber};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn record(day: u32, location: Option<&str>, scheduled: &str, actual: &str) -> FlightRecord {
        FlightRecord::new(
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            FlightNumber::new("CX418").unwrap(),
            location.map(str::to_string),
            Some(scheduled.to_string()),
            Some(actual.to_string()),
            Some(format!("Dep {actual}")),
            Details::Departure { terminal: None, aisle: None, gate: None },
        )
    }

    fn found(summary: Summary) -> Report {
        match summary {
            Summary::Found(report) => report,
            Summary::NotFound => panic!("expected records"),
        }
    }

    #[test]
    fn test_uniform_location() {
        let records = vec![
            record(10, Some("ICN"), "14:25", "14:22"),
            record(11, Some("ICN"), "14:25", "14:27"),
            record(12, Some("ICN"), "14:25", "14:30"),
        ];
        let report = found(aggregate(records));
        assert_eq!(Consensus::Uniform(Some("ICN".to_string())), report.location);
        assert_eq!(Consensus::Uniform(Some("14:25".to_string())), report.scheduled_time);
        assert_eq!("ICN", report.location.to_string());
    }

    #[test]
    fn test_varying_location_and_schedule() {
        let records = vec![
            record(10, Some("ICN"), "14:25", "14:22"),
            record(11, Some("NRT"), "14:30", "14:27"),
        ];
        let report = found(aggregate(records));
        assert_eq!(Consensus::Varies, report.location);
        assert_eq!(Consensus::Varies, report.scheduled_time);
        assert_eq!("Varies", report.scheduled_time.to_string());
    }

    #[test]
    fn test_absent_location_counts_as_distinct() {
        let report = found(aggregate(vec![record(10, None, "14:25", "14:22")]));
        assert_eq!(Consensus::Uniform(None), report.location);
        assert_eq!("N/A", report.location.to_string());

        let mixed = vec![record(10, None, "14:25", "14:22"), record(11, Some("ICN"), "14:25", "14:22")];
        assert_eq!(Consensus::Varies, found(aggregate(mixed)).location);
    }

    #[test]
    fn test_empty_window_is_not_found() {
        assert_eq!(Summary::NotFound, aggregate(vec![]));
    }

    #[test]
    fn test_same_day_keeps_fetch_order() {
        let records = vec![
            record(10, Some("ICN"), "14:25", "14:20"),
            record(12, Some("ICN"), "14:25", "14:21"),
            record(12, Some("ICN"), "14:25", "14:22"),
            record(11, Some("ICN"), "14:25", "14:23"),
        ];
        let report = found(aggregate(records));
        let actual: Vec<_> = report.records.iter().map(|r| r.actual_time().unwrap()).collect();
        assert_eq!(vec!["14:21", "14:22", "14:23", "14:20"], actual);
    }

    #[test]
    fn test_tally() {
        let records = vec![
            record(10, Some("ICN"), "14:25", "14:22"),
            record(11, Some("ICN"), "14:25", "14:41"),
            record(12, Some("ICN"), "14:25", "N/A"),
            record(13, Some("ICN"), "14:25", "14:40"),
        ];
        let tally = found(aggregate(records)).tally;
        assert_eq!(Tally { on_time: 2, delayed: 1, unknown: 1 }, tally);
        assert_eq!(4, tally.total());
    }

    proptest! {
        #[test]
        fn test_records_sorted_descending(days in prop::collection::vec(1..=30u32, 1..20)) {
            let records = days.iter().map(|d| record(*d, Some("ICN"), "14:25", "14:22")).collect();
            let report = found(aggregate(records));
            prop_assert_eq!(days.len(), report.records.len());
            prop_assert!(report.records.windows(2).all(|pair| pair[0].date() >= pair[1].date()));
        }
    }
}
