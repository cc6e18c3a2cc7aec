//! Attendance/leave reconciliation.
//!
//! For a given employee-day at most one of an attendance row or a leave
//! row may exist. [`AttendanceReconciler::record_day`] maintains that
//! invariant by deleting the opposite kind and upserting the requested
//! kind inside one transaction.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceDay, LeaveDay, LeaveType, YearMonth};
use crate::store::MemoryStore;

use super::CalendarPolicy;
use super::validate_employee_id;

/// The day record being submitted: a worked day or a leave day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRecord {
    /// A worked day with optional clock times.
    Attendance {
        /// Clock-in time, if recorded.
        start_time: Option<NaiveTime>,
        /// Clock-out time, if recorded.
        end_time: Option<NaiveTime>,
    },
    /// A leave day of the given category.
    Leave {
        /// The category of leave taken.
        leave_type: LeaveType,
    },
}

/// Enforces attendance/leave mutual exclusivity and the submission window.
pub struct AttendanceReconciler<'a> {
    store: &'a MemoryStore,
    calendar: CalendarPolicy,
}

impl<'a> AttendanceReconciler<'a> {
    /// Creates a reconciler over the given store and calendar policy.
    pub fn new(store: &'a MemoryStore, calendar: CalendarPolicy) -> Self {
        Self { store, calendar }
    }

    /// Records a worked day or a leave day for `(employee_id, date)`.
    ///
    /// Rejects with [`EngineError::OutOfWindow`] when `date` is no longer
    /// editable at `now`. On success exactly one record kind exists for
    /// the day: writing leave removes any attendance row for the same key
    /// and vice versa, atomically.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] for a non-positive employee id or an
    ///   attendance submission carrying neither clock time.
    /// - [`EngineError::OutOfWindow`] when the date is outside the
    ///   editable window, reporting the window bounds and deadline.
    pub fn record_day(
        &self,
        employee_id: u32,
        date: NaiveDate,
        record: DayRecord,
        now: NaiveDate,
    ) -> EngineResult<()> {
        validate_employee_id(employee_id)?;
        if let DayRecord::Attendance {
            start_time: None,
            end_time: None,
        } = record
        {
            return Err(EngineError::Validation {
                field: "attendance".to_string(),
                message: "at least one of start_time and end_time is required".to_string(),
            });
        }

        if !self.calendar.is_within_submission_window(date, now) {
            let (window_start, window_end) = self.calendar.submission_window(now);
            return Err(EngineError::OutOfWindow {
                date,
                window_start,
                window_end,
                deadline: self.calendar.deadline_for(YearMonth::from_date(date)),
            });
        }

        self.store.with_transaction(|tx| {
            match record {
                DayRecord::Attendance {
                    start_time,
                    end_time,
                } => {
                    tx.delete_leave(employee_id, date);
                    tx.upsert_attendance(AttendanceDay {
                        employee_id,
                        date,
                        start_time,
                        end_time,
                    });
                }
                DayRecord::Leave { leave_type } => {
                    tx.delete_attendance(employee_id, date);
                    tx.upsert_leave(LeaveDay {
                        employee_id,
                        date,
                        leave_type,
                    });
                }
            }
            Ok(())
        })
    }

    /// Lists the month's attendance and leave rows, both date ascending.
    ///
    /// The two lists are disjoint per day by the mutual-exclusivity
    /// invariant, so callers may merge them without conflict checks.
    pub fn list_days(
        &self,
        employee_id: u32,
        month: YearMonth,
    ) -> EngineResult<(Vec<AttendanceDay>, Vec<LeaveDay>)> {
        validate_employee_id(employee_id)?;
        self.store.with_view(|view| {
            Ok((
                view.attendance_in_month(employee_id, month),
                view.leave_in_month(employee_id, month),
            ))
        })
    }
}
