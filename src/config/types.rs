//! Configuration types for the reconciliation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use chrono::NaiveTime;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Where [`run_payroll`](crate::engine::PayrollCalculator::run_payroll)
/// takes the basic salary from.
///
/// The original system was inconsistent between carrying the prior
/// record's salary forward and using a fixed default, so the choice is
/// explicit configuration here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicSalarySource {
    /// Use the most recent prior payroll record, falling back to the
    /// configured default when no prior record exists.
    PriorRecord,
    /// Always use the configured default.
    ConfiguredDefault,
}

/// Payroll computation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Basic salary used when the configured source yields nothing.
    #[serde(default)]
    pub default_basic_salary: Option<i64>,
    /// Where the basic salary comes from.
    pub basic_salary_source: BasicSalarySource,
    /// End-of-day boundary; minutes worked past it count toward overtime.
    pub standard_end_time: NaiveTime,
    /// Pay per whole completed overtime hour, in yen.
    pub overtime_hourly_rate: i64,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            default_basic_salary: Some(250_000),
            basic_salary_source: BasicSalarySource::PriorRecord,
            standard_end_time: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time literal"),
            overtime_hourly_rate: 1_500,
        }
    }
}

/// Submission-window settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// How many trailing days of the prior month stay editable into the
    /// next month.
    pub edit_buffer_days: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            edit_buffer_days: 7,
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Payroll computation settings.
    #[serde(default)]
    pub payroll: PayrollConfig,
    /// Submission-window settings.
    #[serde(default)]
    pub calendar: CalendarConfig,
}

impl EngineConfig {
    /// Checks cross-field consistency after deserialization.
    pub fn validate(&self) -> EngineResult<()> {
        if self.payroll.overtime_hourly_rate < 0 {
            return Err(EngineError::Validation {
                field: "overtime_hourly_rate".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if let Some(salary) = self.payroll.default_basic_salary {
            if salary < 0 {
                return Err(EngineError::Validation {
                    field: "default_basic_salary".to_string(),
                    message: "must not be negative".to_string(),
                });
            }
        }
        Ok(())
    }
}
