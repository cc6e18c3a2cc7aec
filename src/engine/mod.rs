//! Core reconciliation components.
//!
//! This module contains the five business-rule components: the calendar
//! policy computing closing windows and submission deadlines, the pure
//! statutory deduction schedule, the attendance/leave reconciler keeping
//! the two record kinds mutually exclusive per employee-day, the payroll
//! calculator deriving a month's record from attendance, and the
//! evaluation authorizer applying field-level write permissions.

mod attendance;
mod calendar;
mod evaluation;
mod payroll;
mod tax;

pub use attendance::{AttendanceReconciler, DayRecord};
pub use calendar::{CalendarPolicy, ClosingWindow};
pub use evaluation::{EvaluationAuthorizer, EvaluationUpdate};
pub use payroll::PayrollCalculator;
pub use tax::{Deductions, deductions, income_tax_rate};

use crate::error::{EngineError, EngineResult};

/// Employee ids are positive integers; zero marks an unset id upstream.
pub(crate) fn validate_employee_id(employee_id: u32) -> EngineResult<()> {
    if employee_id == 0 {
        return Err(EngineError::Validation {
            field: "employee_id".to_string(),
            message: "must be a positive integer".to_string(),
        });
    }
    Ok(())
}
