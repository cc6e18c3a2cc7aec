//! Core data models for the Personnel Reconciliation Engine.
//!
//! This module contains all the domain records used throughout the engine.

mod attendance;
mod employee;
mod evaluation;
mod payroll;
mod year_month;

pub use attendance::{AttendanceDay, LeaveDay, LeaveType};
pub use employee::{AuthContext, Employee, Role};
pub use evaluation::{EvaluationHistory, EvaluationRecord};
pub use payroll::{PayrollRecord, SalaryStatement};
pub use year_month::YearMonth;
