//! Monthly payroll derivation.
//!
//! [`PayrollCalculator::run_payroll`] aggregates a month's attendance into
//! overtime pay, applies the deduction schedule and upserts the resulting
//! record. Re-running a month with unchanged attendance overwrites the
//! record with identical values; nothing is ever added twice.

use crate::config::{BasicSalarySource, PayrollConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollRecord, SalaryStatement, YearMonth};
use crate::store::{MemoryStore, Transaction};

use super::tax;
use super::validate_employee_id;

/// Derives payroll records from attendance and serves salary statements.
pub struct PayrollCalculator<'a> {
    store: &'a MemoryStore,
    config: &'a PayrollConfig,
}

impl<'a> PayrollCalculator<'a> {
    /// Creates a calculator over the given store and payroll configuration.
    pub fn new(store: &'a MemoryStore, config: &'a PayrollConfig) -> Self {
        Self { store, config }
    }

    /// Computes and upserts the payroll record for `(employee_id, month)`.
    ///
    /// The basic salary comes from the most recent prior record or the
    /// configured default, per [`BasicSalarySource`]. Overtime counts the
    /// minutes each attendance day ran past the standard end-of-day
    /// boundary, converted to whole completed hours.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] when no basic-salary source yields a
    /// value for this employee.
    pub fn run_payroll(
        &self,
        employee_id: u32,
        month: YearMonth,
    ) -> EngineResult<PayrollRecord> {
        validate_employee_id(employee_id)?;
        self.store.with_transaction(|tx| {
            let basic_salary = self.resolve_basic_salary(tx, employee_id, month)?;

            let overtime_minutes: i64 = tx
                .attendance_in_month(employee_id, month)
                .iter()
                .map(|day| day.overtime_minutes(self.config.standard_end_time))
                .sum();
            let overtime_pay = (overtime_minutes / 60) * self.config.overtime_hourly_rate;

            let deductions = tax::deductions(basic_salary);
            let record = PayrollRecord {
                employee_id,
                year_month: month,
                basic_salary,
                overtime_pay,
                health_insurance: deductions.health_insurance,
                nursing_care_insurance: deductions.nursing_care_insurance,
                pension: deductions.pension,
                employment_insurance: deductions.employment_insurance,
                income_tax: deductions.income_tax,
                resident_tax: deductions.resident_tax,
            };
            tx.upsert_payroll(record);
            Ok(record)
        })
    }

    /// The salary statement for one month, totals recomputed on read.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] when payroll has not been run for the
    /// month.
    pub fn get_salary(
        &self,
        employee_id: u32,
        month: YearMonth,
    ) -> EngineResult<SalaryStatement> {
        validate_employee_id(employee_id)?;
        self.store.with_view(|view| {
            view.payroll_record(employee_id, month)
                .map(|record| record.statement())
                .ok_or_else(|| EngineError::NotFound {
                    entity: "payroll record",
                    key: format!("employee {employee_id} month {month}"),
                })
        })
    }

    /// Every computed salary statement for the employee, month ascending.
    ///
    /// An employee with no payroll history yields an empty list, not an
    /// error.
    pub fn get_salaries(&self, employee_id: u32) -> EngineResult<Vec<SalaryStatement>> {
        validate_employee_id(employee_id)?;
        self.store.with_view(|view| {
            Ok(view
                .payroll_records(employee_id)
                .iter()
                .map(|record| record.statement())
                .collect())
        })
    }

    fn resolve_basic_salary(
        &self,
        tx: &Transaction<'_>,
        employee_id: u32,
        month: YearMonth,
    ) -> EngineResult<i64> {
        let prior = match self.config.basic_salary_source {
            BasicSalarySource::PriorRecord => tx
                .latest_payroll_before(employee_id, month)
                .map(|record| record.basic_salary),
            BasicSalarySource::ConfiguredDefault => None,
        };
        prior
            .or(self.config.default_basic_salary)
            .ok_or_else(|| EngineError::NotFound {
                entity: "basic salary",
                key: format!("employee {employee_id} month {month}"),
            })
    }
}
