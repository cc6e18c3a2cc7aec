//! Request types for the personnel engine API.
//!
//! This module defines the JSON request structures and their fallible
//! conversions into engine types. Dates arrive as `YYYY-MM-DD` strings
//! and clock times as `HH:MM`, matching the persistence layer's formats;
//! both are validated here before anything reaches the engine.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::engine::{DayRecord, EvaluationUpdate};
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveType, YearMonth};

/// Request body for `PUT /attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// The employee whose day is being recorded.
    pub employee_id: u32,
    /// The worked date, `YYYY-MM-DD`.
    pub date: String,
    /// Clock-in time, `HH:MM`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Clock-out time, `HH:MM`.
    #[serde(default)]
    pub end_time: Option<String>,
}

impl AttendanceRequest {
    /// Validates and converts into the reconciler's arguments.
    pub fn into_parts(self) -> EngineResult<(u32, NaiveDate, DayRecord)> {
        let date = parse_date("date", &self.date)?;
        let start_time = self
            .start_time
            .as_deref()
            .map(|raw| parse_time("start_time", raw))
            .transpose()?;
        let end_time = self
            .end_time
            .as_deref()
            .map(|raw| parse_time("end_time", raw))
            .transpose()?;
        Ok((
            self.employee_id,
            date,
            DayRecord::Attendance {
                start_time,
                end_time,
            },
        ))
    }
}

/// Request body for `PUT /leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The employee taking leave.
    pub employee_id: u32,
    /// The leave date, `YYYY-MM-DD`.
    pub date: String,
    /// Leave category code, 1 through 8.
    pub leave_type: u8,
}

impl LeaveRequest {
    /// Validates and converts into the reconciler's arguments.
    pub fn into_parts(self) -> EngineResult<(u32, NaiveDate, DayRecord)> {
        let date = parse_date("date", &self.date)?;
        let leave_type =
            LeaveType::from_code(self.leave_type).ok_or_else(|| EngineError::Validation {
                field: "leave_type".to_string(),
                message: format!("code {} is not a defined leave type", self.leave_type),
            })?;
        Ok((self.employee_id, date, DayRecord::Leave { leave_type }))
    }
}

/// Request body for `POST /payroll/run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPayrollRequest {
    /// The employee to run payroll for.
    pub employee_id: u32,
    /// The payroll month, `YYYYMM`.
    pub month: YearMonth,
}

/// Request body for `POST /performance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRequest {
    /// The evaluated employee.
    pub employee_id: u32,
    /// The evaluation month, `YYYYMM`.
    pub month: YearMonth,
    /// The employee's own goal/self-assessment text.
    #[serde(default)]
    pub comment: Option<String>,
    /// Manager-assessed skill score, 1-5.
    #[serde(default)]
    pub skill_score: Option<u8>,
    /// Manager-assessed behavior score, 1-5.
    #[serde(default)]
    pub behavior_score: Option<u8>,
    /// Manager-assessed attitude score, 1-5.
    #[serde(default)]
    pub attitude_score: Option<u8>,
    /// The manager's free-text assessment.
    #[serde(default)]
    pub manager_comment: Option<String>,
}

impl From<PerformanceRequest> for EvaluationUpdate {
    fn from(request: PerformanceRequest) -> Self {
        EvaluationUpdate {
            employee_id: request.employee_id,
            year_month: request.month,
            comment: request.comment,
            skill_score: request.skill_score,
            behavior_score: request.behavior_score,
            attitude_score: request.attitude_score,
            manager_comment: request.manager_comment,
        }
    }
}

fn parse_date(field: &str, raw: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| EngineError::Validation {
        field: field.to_string(),
        message: format!("'{raw}' is not a YYYY-MM-DD calendar date"),
    })
}

fn parse_time(field: &str, raw: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| EngineError::Validation {
            field: field.to_string(),
            message: format!("'{raw}' is not an HH:MM time"),
        })
}
