//! HTTP API module for the Personnel Reconciliation Engine.
//!
//! This module provides the REST endpoints over the engine: attendance
//! and leave submission, day listings, payroll runs, salary statements,
//! and performance evaluations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AttendanceRequest, LeaveRequest, PerformanceRequest, RunPayrollRequest};
pub use response::{ApiError, DaysResponse};
pub use state::AppState;
