//! Statutory deduction schedule.
//!
//! Pure functions mapping a monthly basic salary to its deduction
//! amounts: four flat-rate insurance premiums, progressive income tax
//! selected by annualized salary bracket, and flat resident tax. All
//! amounts are integer yen, truncated toward zero exactly like integer
//! division; identical inputs always yield identical outputs, which is
//! what makes payroll re-runs idempotent.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Health insurance premium rate: 5% of monthly basic salary.
const HEALTH_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// Nursing-care insurance premium rate: 1.8%.
const NURSING_CARE_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 3);
/// Pension premium rate: 9.15%.
const PENSION_RATE: Decimal = Decimal::from_parts(915, 0, 0, false, 4);
/// Employment insurance premium rate: 0.5%.
const EMPLOYMENT_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);
/// Resident tax rate: flat 10%.
const RESIDENT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Progressive income-tax brackets over annualized salary, evaluated
/// lowest threshold first with inclusive upper bounds.
const INCOME_TAX_BRACKETS: [(i64, Decimal); 6] = [
    (1_950_000, Decimal::from_parts(5, 0, 0, false, 2)),
    (3_300_000, Decimal::from_parts(10, 0, 0, false, 2)),
    (6_950_000, Decimal::from_parts(20, 0, 0, false, 2)),
    (9_000_000, Decimal::from_parts(23, 0, 0, false, 2)),
    (18_000_000, Decimal::from_parts(33, 0, 0, false, 2)),
    (40_000_000, Decimal::from_parts(40, 0, 0, false, 2)),
];

/// Income-tax rate above the highest bracket threshold: 45%.
const TOP_INCOME_TAX_RATE: Decimal = Decimal::from_parts(45, 0, 0, false, 2);

/// The six deduction components withheld from one month's salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Health insurance premium.
    pub health_insurance: i64,
    /// Nursing-care insurance premium.
    pub nursing_care_insurance: i64,
    /// Pension premium.
    pub pension: i64,
    /// Employment insurance premium.
    pub employment_insurance: i64,
    /// Withheld income tax.
    pub income_tax: i64,
    /// Withheld resident tax.
    pub resident_tax: i64,
}

impl Deductions {
    /// Sum of all six components.
    pub fn total(&self) -> i64 {
        self.health_insurance
            + self.nursing_care_insurance
            + self.pension
            + self.employment_insurance
            + self.income_tax
            + self.resident_tax
    }
}

/// Selects the income-tax rate for an annualized salary.
///
/// Brackets are evaluated from the lowest threshold upward; each upper
/// bound is inclusive, so an annual salary exactly on a threshold still
/// uses that bracket's rate.
///
/// # Example
///
/// ```
/// use personnel_engine::engine::income_tax_rate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(income_tax_rate(3_000_000), Decimal::new(10, 2));
/// assert_eq!(income_tax_rate(1_950_000), Decimal::new(5, 2));
/// assert_eq!(income_tax_rate(1_950_001), Decimal::new(10, 2));
/// ```
pub fn income_tax_rate(annual_salary: i64) -> Decimal {
    INCOME_TAX_BRACKETS
        .iter()
        .find(|(upper_bound, _)| annual_salary <= *upper_bound)
        .map(|(_, rate)| *rate)
        .unwrap_or(TOP_INCOME_TAX_RATE)
}

/// Computes the statutory deductions for a monthly basic salary.
///
/// Total and side-effect-free.
///
/// # Example
///
/// ```
/// use personnel_engine::engine::deductions;
///
/// let d = deductions(250_000);
/// assert_eq!(d.health_insurance, 12_500);
/// assert_eq!(d.pension, 22_875);
/// assert_eq!(d.income_tax, 25_000);
/// ```
pub fn deductions(basic_salary: i64) -> Deductions {
    let annual_salary = basic_salary.saturating_mul(12);
    Deductions {
        health_insurance: apply_rate(basic_salary, HEALTH_RATE),
        nursing_care_insurance: apply_rate(basic_salary, NURSING_CARE_RATE),
        pension: apply_rate(basic_salary, PENSION_RATE),
        employment_insurance: apply_rate(basic_salary, EMPLOYMENT_RATE),
        income_tax: apply_rate(basic_salary, income_tax_rate(annual_salary)),
        resident_tax: apply_rate(basic_salary, RESIDENT_RATE),
    }
}

/// Multiplies a yen amount by a fractional rate, truncating the result
/// toward zero.
fn apply_rate(amount: i64, rate: Decimal) -> i64 {
    (Decimal::from(amount) * rate)
        .trunc()
        .to_i64()
        .unwrap_or(i64::MAX)
}
