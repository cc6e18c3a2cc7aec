//! Performance evaluation records.
//!
//! One record per `(employee_id, year_month)`. The employee authors the
//! `comment` field; the manager authors the three scores and the manager
//! comment. Neither party's writes may null the other party's fields.

use serde::{Deserialize, Serialize};

use super::YearMonth;

/// A performance evaluation for one employee and month.
///
/// Created on first write by either party; every field starts unset and
/// is only ever filled in by the party permitted to author it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// The evaluated employee.
    pub employee_id: u32,
    /// The evaluation month.
    pub year_month: YearMonth,
    /// The employee's own goal/self-assessment text.
    pub comment: Option<String>,
    /// Manager-assessed skill score, 1-5.
    pub skill_score: Option<u8>,
    /// Manager-assessed behavior score, 1-5.
    pub behavior_score: Option<u8>,
    /// Manager-assessed attitude score, 1-5.
    pub attitude_score: Option<u8>,
    /// The manager's free-text assessment.
    pub manager_comment: Option<String>,
}

impl EvaluationRecord {
    /// An empty record for the given key, every field unset.
    pub fn empty(employee_id: u32, year_month: YearMonth) -> Self {
        Self {
            employee_id,
            year_month,
            comment: None,
            skill_score: None,
            behavior_score: None,
            attitude_score: None,
            manager_comment: None,
        }
    }
}

/// An evaluation together with the prior period's record, if any.
///
/// The previous period is the preceding calendar month; its absence is a
/// valid empty result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationHistory {
    /// The record for the requested month, if one exists.
    pub current: Option<EvaluationRecord>,
    /// The record for the preceding month, if one exists.
    pub previous: Option<EvaluationRecord>,
}
