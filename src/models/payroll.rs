//! Payroll records and read-time salary statements.
//!
//! This module defines the stored [`PayrollRecord`] and the
//! [`SalaryStatement`] view whose totals are recomputed on every read and
//! never persisted.

use serde::{Deserialize, Serialize};

use super::YearMonth;

/// A month's computed payroll for one employee. Amounts are integer yen.
///
/// Only the components are stored; `total_deduction` and `net_salary` are
/// derived on read so they always equal the sum/difference of the stored
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// The employee this record belongs to.
    pub employee_id: u32,
    /// The payroll month.
    pub year_month: YearMonth,
    /// Basic monthly salary.
    pub basic_salary: i64,
    /// Overtime pay for the month.
    pub overtime_pay: i64,
    /// Health insurance deduction.
    pub health_insurance: i64,
    /// Nursing-care insurance deduction.
    pub nursing_care_insurance: i64,
    /// Pension deduction.
    pub pension: i64,
    /// Employment insurance deduction.
    pub employment_insurance: i64,
    /// Withheld income tax.
    pub income_tax: i64,
    /// Withheld resident tax.
    pub resident_tax: i64,
}

impl PayrollRecord {
    /// Sum of the six deduction components.
    pub fn total_deduction(&self) -> i64 {
        self.health_insurance
            + self.nursing_care_insurance
            + self.pension
            + self.employment_insurance
            + self.income_tax
            + self.resident_tax
    }

    /// Take-home pay: basic salary plus overtime minus all deductions.
    pub fn net_salary(&self) -> i64 {
        self.basic_salary + self.overtime_pay - self.total_deduction()
    }

    /// Builds the read-time statement for this record.
    pub fn statement(&self) -> SalaryStatement {
        SalaryStatement {
            total_deduction: self.total_deduction(),
            net_salary: self.net_salary(),
            record: *self,
        }
    }
}

/// A payroll record together with its derived totals.
///
/// Produced on read; the totals are recomputed from the record every time
/// and are never trusted from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStatement {
    /// The stored payroll components.
    #[serde(flatten)]
    pub record: PayrollRecord,
    /// Sum of the six deduction fields.
    pub total_deduction: i64,
    /// Basic salary plus overtime minus total deductions.
    pub net_salary: i64,
}
