use std::fmt;
use std::ops::Add;

/// Minutes past midnight on a 24-hour clock.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash)]
pub struct ClockTime(pub u16);

impl ClockTime {
    /// Minutes after the schedule that still count as on time (inclusive).
    pub const ON_TIME_TOLERANCE: u16 = 15;

    /// Strict `H:MM` / `HH:MM` parsing. `N/A`, seconds, signs and out of range
    /// values are all rejected.
    pub fn parse(text: &str) -> Option<ClockTime> {
        let (hours, minutes) = text.trim().split_once(':')?;
        let hours = Self::digits(hours, 1..=2)?;
        let minutes = Self::digits(minutes, 2..=2)?;
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(ClockTime(hours * 60 + minutes))
    }

    fn digits(raw: &str, len: std::ops::RangeInclusive<usize>) -> Option<u16> {
        if !len.contains(&raw.len()) || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Add<u16> for ClockTime {
    type Output = Self;

    fn add(self, rhs: u16) -> Self::Output {
        ClockTime(self.0 + rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    OnTime,
    Delayed,
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::OnTime => "On Time",
            Verdict::Delayed => "Delayed",
            Verdict::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Classifies a `(scheduled, actual)` pair of `HH:MM` strings. `N/A` or anything
/// that is not a clock time gives `Unknown`. No day rollover is modelled.
pub fn classify(scheduled: &str, actual: &str) -> Verdict {
    match (ClockTime::parse(scheduled), ClockTime::parse(actual)) {
        (Some(scheduled), Some(actual)) => {
            if actual <= scheduled + ClockTime::ON_TIME_TOLERANCE {
                Verdict::OnTime
            } else {
                Verdict::Delayed
            }
        }
        _ => Verdict::Unknown,
    }
}

/// Same as [`classify`] with absent values standing in for `N/A`.
pub fn classify_optional(scheduled: Option<&str>, actual: Option<&str>) -> Verdict {
    match (scheduled, actual) {
        (Some(scheduled), Some(actual)) => classify(scheduled, actual),
        _ => Verdict::Unknown,
    }
}
