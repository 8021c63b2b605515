//! Day-range selection used to scope attendance statistics.
//!
//! Day numbers are plain integers; no calendar validation is performed, so
//! day 31 is accepted for every month.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AttendanceError;

/// First day of any period.
pub const FIRST_DAY: u32 = 1;
/// Last day of the first half of a month.
pub const MID_MONTH: u32 = 15;
/// Upper bound for the full-month range.
pub const LAST_DAY: u32 = 31;

/// Inclusive day-number range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub start: u32,
    pub end: u32,
}

impl DayRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// `true` when `day` lies within the range. A range whose start is past
    /// its end contains nothing.
    pub fn contains(&self, day: u32) -> bool {
        self.start <= day && day <= self.end
    }
}

/// A caller-selected period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    #[default]
    Full,
    FirstHalf,
    SecondHalf,
    Custom { start: u32, end: u32 },
}

impl Period {
    pub fn range(&self) -> DayRange {
        match *self {
            Period::Full => DayRange::new(FIRST_DAY, LAST_DAY),
            Period::FirstHalf => DayRange::new(FIRST_DAY, MID_MONTH),
            Period::SecondHalf => DayRange::new(MID_MONTH + 1, LAST_DAY),
            Period::Custom { start, end } => DayRange::new(start, end),
        }
    }

    /// Short label used in report headings, e.g. `"1-15"`.
    pub fn label(&self) -> String {
        let range = self.range();
        format!("{}-{}", range.start, range.end)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Full => f.write_str("full"),
            Period::FirstHalf => f.write_str("first-half"),
            Period::SecondHalf => f.write_str("second-half"),
            Period::Custom { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

impl FromStr for Period {
    type Err = AttendanceError;

    /// Accepts `full`, `first-half`, `second-half`, `START-END` and
    /// `custom:START-END` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "full" | "month" => return Ok(Period::Full),
            "first-half" | "first_half" | "first" => return Ok(Period::FirstHalf),
            "second-half" | "second_half" | "second" => return Ok(Period::SecondHalf),
            _ => {}
        }

        let body = lower.strip_prefix("custom:").unwrap_or(&lower);
        let (start, end) = body
            .split_once('-')
            .ok_or_else(|| AttendanceError::InvalidPeriod(s.to_string()))?;
        let start: u32 = start
            .trim()
            .parse()
            .map_err(|_| AttendanceError::InvalidPeriod(s.to_string()))?;
        let end: u32 = end
            .trim()
            .parse()
            .map_err(|_| AttendanceError::InvalidPeriod(s.to_string()))?;
        Ok(Period::Custom { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_ranges() {
        assert_eq!(Period::Full.range(), DayRange::new(1, 31));
        assert_eq!(Period::FirstHalf.range(), DayRange::new(1, 15));
        assert_eq!(Period::SecondHalf.range(), DayRange::new(16, 31));
        assert_eq!(
            Period::Custom { start: 3, end: 9 }.range(),
            DayRange::new(3, 9)
        );
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let r = DayRange::new(1, 15);
        assert!(r.contains(1));
        assert!(r.contains(15));
        assert!(!r.contains(16));
        assert!(!r.contains(0));
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let r = DayRange::new(10, 5);
        assert!((0..=40).all(|d| !r.contains(d)));
    }

    #[test]
    fn test_parse_named_periods() {
        assert_eq!("full".parse::<Period>().unwrap(), Period::Full);
        assert_eq!("First-Half".parse::<Period>().unwrap(), Period::FirstHalf);
        assert_eq!("second-half".parse::<Period>().unwrap(), Period::SecondHalf);
    }

    #[test]
    fn test_parse_custom_period() {
        assert_eq!(
            "5-20".parse::<Period>().unwrap(),
            Period::Custom { start: 5, end: 20 }
        );
        assert_eq!(
            "custom:2-4".parse::<Period>().unwrap(),
            Period::Custom { start: 2, end: 4 }
        );
    }

    #[test]
    fn test_parse_invalid_period() {
        assert!("monthly".parse::<Period>().is_err());
        assert!("a-b".parse::<Period>().is_err());
        assert!("".parse::<Period>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for period in [
            Period::Full,
            Period::FirstHalf,
            Period::SecondHalf,
            Period::Custom { start: 7, end: 12 },
        ] {
            assert_eq!(period.to_string().parse::<Period>().unwrap(), period);
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(Period::FirstHalf.label(), "1-15");
        assert_eq!(Period::SecondHalf.label(), "16-31");
    }
}
