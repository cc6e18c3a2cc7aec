//! Calendar month identifier.
//!
//! This module defines the [`YearMonth`] type used to key payroll and
//! evaluation records. The wire format is the six-digit `YYYYMM` string
//! used throughout the persistence layer.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// A calendar month identifier: year and month only, no day component.
///
/// Ordered chronologically, so it can key ordered collections directly.
///
/// # Example
///
/// ```
/// use personnel_engine::models::YearMonth;
///
/// let month: YearMonth = "202406".parse().unwrap();
/// assert_eq!(month.year(), 2024);
/// assert_eq!(month.month(), 6);
/// assert_eq!(month.to_string(), "202406");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month, returning `None` unless the year is in
    /// `1..=9999` and the month in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=9999).contains(&year) && (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Returns the calendar month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The year component.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month component (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The previous calendar month; January wraps to December of the
    /// prior year.
    ///
    /// # Example
    ///
    /// ```
    /// use personnel_engine::models::YearMonth;
    ///
    /// let january: YearMonth = "202401".parse().unwrap();
    /// assert_eq!(january.pred().to_string(), "202312");
    /// ```
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next calendar month; December wraps to January of the next year.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // year/month are range-checked on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated year-month")
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.succ()
            .first_day()
            .pred_opt()
            .expect("validated year-month")
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::Validation {
            field: "month".to_string(),
            message: format!("'{s}' is not a YYYYMM month"),
        };

        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = s[..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[4..].parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid_month() {
        let month = ym("202406");
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 6);
    }

    #[test]
    fn test_parse_rejects_bad_month_component() {
        assert!("202413".parse::<YearMonth>().is_err());
        assert!("202400".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!("2024-06".parse::<YearMonth>().is_err());
        assert!("20246".parse::<YearMonth>().is_err());
        assert!("abcdef".parse::<YearMonth>().is_err());
        assert!("".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(ym("202401").to_string(), "202401");
        assert_eq!(YearMonth::new(800, 3).unwrap().to_string(), "080003");
    }

    #[test]
    fn test_pred_mid_year() {
        assert_eq!(ym("202406").pred(), ym("202405"));
    }

    #[test]
    fn test_pred_january_wraps_to_prior_december() {
        assert_eq!(ym("202401").pred(), ym("202312"));
    }

    #[test]
    fn test_succ_december_wraps_to_next_january() {
        assert_eq!(ym("202312").succ(), ym("202401"));
    }

    #[test]
    fn test_first_and_last_day() {
        let june = ym("202406");
        assert_eq!(june.first_day(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(june.last_day(), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn test_last_day_of_leap_february() {
        assert_eq!(
            ym("202402").last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            ym("202302").last_day(),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(ym("202312") < ym("202401"));
        assert!(ym("202401") < ym("202402"));
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(YearMonth::from_date(date), ym("202406"));
    }

    #[test]
    fn test_serde_round_trip() {
        let month = ym("202406");
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"202406\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        assert!(serde_json::from_str::<YearMonth>("\"2024-06\"").is_err());
    }
}
