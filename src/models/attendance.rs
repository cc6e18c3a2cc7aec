//! Attendance and leave day records.
//!
//! This module defines the [`AttendanceDay`] and [`LeaveDay`] records and
//! the [`LeaveType`] codes. For a given `(employee_id, date)` key at most
//! one of the two record kinds may exist.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The defined leave categories, wire codes 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual paid leave (code 1).
    Annual,
    /// Pre-natal leave (code 2).
    PreNatal,
    /// Post-natal leave (code 3).
    PostNatal,
    /// Childcare leave (code 4).
    Childcare,
    /// Family-care leave (code 5).
    FamilyCare,
    /// Leave to nurse a sick child (code 6).
    ChildSickCare,
    /// Menstrual leave (code 7).
    Menstrual,
    /// Maternal-health leave (code 8).
    MaternalHealth,
}

impl LeaveType {
    /// Resolves a wire code to a leave type, `None` for undefined codes.
    ///
    /// # Example
    ///
    /// ```
    /// use personnel_engine::models::LeaveType;
    ///
    /// assert_eq!(LeaveType::from_code(1), Some(LeaveType::Annual));
    /// assert_eq!(LeaveType::from_code(9), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(LeaveType::Annual),
            2 => Some(LeaveType::PreNatal),
            3 => Some(LeaveType::PostNatal),
            4 => Some(LeaveType::Childcare),
            5 => Some(LeaveType::FamilyCare),
            6 => Some(LeaveType::ChildSickCare),
            7 => Some(LeaveType::Menstrual),
            8 => Some(LeaveType::MaternalHealth),
            _ => None,
        }
    }

    /// The wire code for this leave type.
    pub fn code(&self) -> u8 {
        match self {
            LeaveType::Annual => 1,
            LeaveType::PreNatal => 2,
            LeaveType::PostNatal => 3,
            LeaveType::Childcare => 4,
            LeaveType::FamilyCare => 5,
            LeaveType::ChildSickCare => 6,
            LeaveType::Menstrual => 7,
            LeaveType::MaternalHealth => 8,
        }
    }
}

/// A worked day. Exists only for days the employee actually worked;
/// absence of a row means no attendance was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The employee this record belongs to.
    pub employee_id: u32,
    /// The worked calendar date.
    pub date: NaiveDate,
    /// Clock-in time, if recorded.
    pub start_time: Option<NaiveTime>,
    /// Clock-out time, if recorded.
    pub end_time: Option<NaiveTime>,
}

impl AttendanceDay {
    /// Minutes worked past the standard end-of-day boundary.
    ///
    /// Zero when no end time was recorded or the employee left at or
    /// before the boundary.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{NaiveDate, NaiveTime};
    /// use personnel_engine::models::AttendanceDay;
    ///
    /// let day = AttendanceDay {
    ///     employee_id: 12345,
    ///     date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(9, 0, 0),
    ///     end_time: NaiveTime::from_hms_opt(20, 30, 0),
    /// };
    /// let standard_end = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
    /// assert_eq!(day.overtime_minutes(standard_end), 150);
    /// ```
    pub fn overtime_minutes(&self, standard_end: NaiveTime) -> i64 {
        self.end_time
            .map(|end| (end - standard_end).num_minutes().max(0))
            .unwrap_or(0)
    }
}

/// A leave day. Mutually exclusive with [`AttendanceDay`] for the same
/// `(employee_id, date)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDay {
    /// The employee this record belongs to.
    pub employee_id: u32,
    /// The calendar date of the leave.
    pub date: NaiveDate,
    /// The category of leave taken.
    pub leave_type: LeaveType,
}
