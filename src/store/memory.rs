//! In-process transactional store.
//!
//! Tables are ordered maps keyed exactly like the persistent schema:
//! attendance and leave by `(employee_id, date)`, payroll and evaluations
//! by `(employee_id, year_month)`. Ordered keys give the date-ascending
//! query guarantees for free.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceDay, Employee, EvaluationRecord, LeaveDay, PayrollRecord, YearMonth,
};

#[derive(Debug, Default, Clone)]
struct Tables {
    employees: BTreeMap<u32, Employee>,
    attendance: BTreeMap<(u32, NaiveDate), AttendanceDay>,
    leave: BTreeMap<(u32, NaiveDate), LeaveDay>,
    payroll: BTreeMap<(u32, YearMonth), PayrollRecord>,
    evaluations: BTreeMap<(u32, YearMonth), EvaluationRecord>,
}

impl Tables {
    fn employee(&self, id: u32) -> Option<Employee> {
        self.employees.get(&id).cloned()
    }

    fn attendance_day(&self, employee_id: u32, date: NaiveDate) -> Option<AttendanceDay> {
        self.attendance.get(&(employee_id, date)).copied()
    }

    fn leave_day(&self, employee_id: u32, date: NaiveDate) -> Option<LeaveDay> {
        self.leave.get(&(employee_id, date)).copied()
    }

    fn attendance_in_month(&self, employee_id: u32, month: YearMonth) -> Vec<AttendanceDay> {
        self.attendance
            .range((employee_id, month.first_day())..=(employee_id, month.last_day()))
            .map(|(_, day)| *day)
            .collect()
    }

    fn leave_in_month(&self, employee_id: u32, month: YearMonth) -> Vec<LeaveDay> {
        self.leave
            .range((employee_id, month.first_day())..=(employee_id, month.last_day()))
            .map(|(_, day)| *day)
            .collect()
    }

    fn payroll_record(&self, employee_id: u32, month: YearMonth) -> Option<PayrollRecord> {
        self.payroll.get(&(employee_id, month)).copied()
    }

    fn latest_payroll_before(&self, employee_id: u32, month: YearMonth) -> Option<PayrollRecord> {
        self.payroll
            .values()
            .filter(|record| record.employee_id == employee_id && record.year_month < month)
            .last()
            .copied()
    }

    fn payroll_records(&self, employee_id: u32) -> Vec<PayrollRecord> {
        self.payroll
            .values()
            .filter(|record| record.employee_id == employee_id)
            .copied()
            .collect()
    }

    fn evaluation(&self, employee_id: u32, month: YearMonth) -> Option<EvaluationRecord> {
        self.evaluations.get(&(employee_id, month)).cloned()
    }
}

/// A read-only view of the store, held under a shared lock.
pub struct View<'a> {
    tables: &'a Tables,
}

impl View<'_> {
    /// Looks up an employee by id.
    pub fn employee(&self, id: u32) -> Option<Employee> {
        self.tables.employee(id)
    }

    /// Looks up the attendance row for one employee-day.
    pub fn attendance_day(&self, employee_id: u32, date: NaiveDate) -> Option<AttendanceDay> {
        self.tables.attendance_day(employee_id, date)
    }

    /// Looks up the leave row for one employee-day.
    pub fn leave_day(&self, employee_id: u32, date: NaiveDate) -> Option<LeaveDay> {
        self.tables.leave_day(employee_id, date)
    }

    /// All attendance rows for the employee in the month, date ascending.
    pub fn attendance_in_month(&self, employee_id: u32, month: YearMonth) -> Vec<AttendanceDay> {
        self.tables.attendance_in_month(employee_id, month)
    }

    /// All leave rows for the employee in the month, date ascending.
    pub fn leave_in_month(&self, employee_id: u32, month: YearMonth) -> Vec<LeaveDay> {
        self.tables.leave_in_month(employee_id, month)
    }

    /// The payroll record for the given month, if computed.
    pub fn payroll_record(&self, employee_id: u32, month: YearMonth) -> Option<PayrollRecord> {
        self.tables.payroll_record(employee_id, month)
    }

    /// The most recent payroll record strictly before the given month.
    pub fn latest_payroll_before(
        &self,
        employee_id: u32,
        month: YearMonth,
    ) -> Option<PayrollRecord> {
        self.tables.latest_payroll_before(employee_id, month)
    }

    /// All payroll records for the employee, month ascending.
    pub fn payroll_records(&self, employee_id: u32) -> Vec<PayrollRecord> {
        self.tables.payroll_records(employee_id)
    }

    /// The evaluation record for the given month, if any.
    pub fn evaluation(&self, employee_id: u32, month: YearMonth) -> Option<EvaluationRecord> {
        self.tables.evaluation(employee_id, month)
    }
}

/// A transactional handle over the store's tables.
///
/// Handed to the closure passed to [`MemoryStore::with_transaction`];
/// every mutation made through it is applied atomically or not at all.
pub struct Transaction<'a> {
    tables: &'a mut Tables,
}

impl Transaction<'_> {
    /// Looks up an employee by id.
    pub fn employee(&self, id: u32) -> Option<Employee> {
        self.tables.employee(id)
    }

    /// Looks up the attendance row for one employee-day.
    pub fn attendance_day(&self, employee_id: u32, date: NaiveDate) -> Option<AttendanceDay> {
        self.tables.attendance_day(employee_id, date)
    }

    /// Looks up the leave row for one employee-day.
    pub fn leave_day(&self, employee_id: u32, date: NaiveDate) -> Option<LeaveDay> {
        self.tables.leave_day(employee_id, date)
    }

    /// All attendance rows for the employee in the month, date ascending.
    pub fn attendance_in_month(&self, employee_id: u32, month: YearMonth) -> Vec<AttendanceDay> {
        self.tables.attendance_in_month(employee_id, month)
    }

    /// The most recent payroll record strictly before the given month.
    pub fn latest_payroll_before(
        &self,
        employee_id: u32,
        month: YearMonth,
    ) -> Option<PayrollRecord> {
        self.tables.latest_payroll_before(employee_id, month)
    }

    /// The evaluation record for the given month, if any.
    pub fn evaluation(&self, employee_id: u32, month: YearMonth) -> Option<EvaluationRecord> {
        self.tables.evaluation(employee_id, month)
    }

    /// Inserts or overwrites the attendance row for the record's key.
    pub fn upsert_attendance(&mut self, record: AttendanceDay) {
        self.tables
            .attendance
            .insert((record.employee_id, record.date), record);
    }

    /// Deletes the attendance row for the key, returning whether it existed.
    pub fn delete_attendance(&mut self, employee_id: u32, date: NaiveDate) -> bool {
        self.tables.attendance.remove(&(employee_id, date)).is_some()
    }

    /// Inserts or overwrites the leave row for the record's key.
    pub fn upsert_leave(&mut self, record: LeaveDay) {
        self.tables
            .leave
            .insert((record.employee_id, record.date), record);
    }

    /// Deletes the leave row for the key, returning whether it existed.
    pub fn delete_leave(&mut self, employee_id: u32, date: NaiveDate) -> bool {
        self.tables.leave.remove(&(employee_id, date)).is_some()
    }

    /// Inserts or overwrites the payroll record for its key.
    pub fn upsert_payroll(&mut self, record: PayrollRecord) {
        self.tables
            .payroll
            .insert((record.employee_id, record.year_month), record);
    }

    /// Inserts or overwrites the evaluation record for its key.
    pub fn upsert_evaluation(&mut self, record: EvaluationRecord) {
        self.tables
            .evaluations
            .insert((record.employee_id, record.year_month), record);
    }
}

/// The in-process store backing the engine.
///
/// Writers serialize on one lock; a snapshot taken at transaction entry is
/// restored if the closure returns an error, so a failed operation leaves
/// prior persisted state untouched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an employee. Onboarding glue: the engine itself never
    /// creates employees.
    pub fn insert_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        tables.employees.insert(employee.id, employee);
        Ok(())
    }

    /// Runs `f` inside a transaction.
    ///
    /// If `f` returns an error the tables are rolled back to their state
    /// at entry before the error propagates; partial application of a
    /// multi-step operation is never observable.
    pub fn with_transaction<T, F>(&self, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut Transaction<'_>) -> EngineResult<T>,
    {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let snapshot = tables.clone();
        let outcome = {
            let mut transaction = Transaction {
                tables: &mut *tables,
            };
            f(&mut transaction)
        };
        match outcome {
            Ok(value) => Ok(value),
            Err(error) => {
                *tables = snapshot;
                Err(error)
            }
        }
    }

    /// Runs `f` against a read-only view of the tables.
    pub fn with_view<T, F>(&self, f: F) -> EngineResult<T>
    where
        F: FnOnce(&View<'_>) -> EngineResult<T>,
    {
        let tables = self.tables.read().map_err(poisoned)?;
        let view = View { tables: &*tables };
        f(&view)
    }
}

fn poisoned<E>(_: E) -> EngineError {
    EngineError::StoreFailure {
        message: "store lock poisoned".to_string(),
    }
}
