//! Role-scoped evaluation updates.
//!
//! The employee authors the comment field; the manager authors the three
//! scores and the manager comment. A submission may carry fields its
//! caller is not permitted to set — those are silently ignored, so one
//! party can never null out or overwrite the other party's fields.

use crate::error::{EngineError, EngineResult};
use crate::models::{AuthContext, EvaluationHistory, EvaluationRecord, YearMonth};
use crate::store::MemoryStore;

use super::validate_employee_id;

/// A submitted evaluation update. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationUpdate {
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

/// Applies field-level write permissions to evaluation records.
pub struct EvaluationAuthorizer<'a> {
    store: &'a MemoryStore,
}

impl<'a> EvaluationAuthorizer<'a> {
    /// Creates an authorizer over the given store.
    pub fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// Creates or updates the evaluation for the update's key.
    ///
    /// The caller must be a manager or the record's own employee. The
    /// comment applies only when the caller is the record's own employee;
    /// the scores and manager comment apply only when the caller is a
    /// manager. Submitted fields outside the caller's scope are ignored
    /// without error, and stored values are never replaced with empty
    /// ones. A record absent from the store is created carrying only the
    /// authorized fields.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] for a non-positive employee id or a
    ///   score outside 1-5.
    /// - [`EngineError::Forbidden`] when the caller is neither a manager
    ///   nor the record's own employee.
    pub fn upsert_evaluation(
        &self,
        caller: &AuthContext,
        update: EvaluationUpdate,
    ) -> EngineResult<EvaluationRecord> {
        validate_employee_id(update.employee_id)?;
        validate_scores(&update)?;

        let own_record = caller.employee_id == update.employee_id;
        if !caller.is_manager && !own_record {
            return Err(EngineError::Forbidden {
                employee_id: caller.employee_id,
            });
        }

        self.store.with_transaction(|tx| {
            let mut record = tx
                .evaluation(update.employee_id, update.year_month)
                .unwrap_or_else(|| {
                    EvaluationRecord::empty(update.employee_id, update.year_month)
                });

            if own_record {
                if let Some(comment) = update.comment {
                    record.comment = Some(comment);
                }
            }
            if caller.is_manager {
                if let Some(score) = update.skill_score {
                    record.skill_score = Some(score);
                }
                if let Some(score) = update.behavior_score {
                    record.behavior_score = Some(score);
                }
                if let Some(score) = update.attitude_score {
                    record.attitude_score = Some(score);
                }
                if let Some(comment) = update.manager_comment {
                    record.manager_comment = Some(comment);
                }
            }

            tx.upsert_evaluation(record.clone());
            Ok(record)
        })
    }

    /// The evaluation for the month together with the prior period's
    /// record.
    ///
    /// The previous period key decrements the month, wrapping January to
    /// December of the prior year. Either record may be absent; absence
    /// is an empty result, not an error.
    pub fn get_evaluation_with_history(
        &self,
        employee_id: u32,
        month: YearMonth,
    ) -> EngineResult<EvaluationHistory> {
        validate_employee_id(employee_id)?;
        self.store.with_view(|view| {
            Ok(EvaluationHistory {
                current: view.evaluation(employee_id, month),
                previous: view.evaluation(employee_id, month.pred()),
            })
        })
    }
}

fn validate_scores(update: &EvaluationUpdate) -> EngineResult<()> {
    let scores = [
        ("skill_score", update.skill_score),
        ("behavior_score", update.behavior_score),
        ("attitude_score", update.attitude_score),
    ];
    for (field, value) in scores {
        if let Some(score) = value {
            if !(1..=5).contains(&score) {
                return Err(EngineError::Validation {
                    field: field.to_string(),
                    message: format!("score {score} must be between 1 and 5"),
                });
            }
        }
    }
    Ok(())
}
