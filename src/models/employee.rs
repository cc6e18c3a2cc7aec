//! Employee model and authentication context.
//!
//! This module defines the Employee struct, the Role enum and the
//! AuthContext handed to the engine by the authentication collaborator.

use serde::{Deserialize, Serialize};

/// The role an employee holds within the organisation.
///
/// Role is an explicit attribute, resolved once when the authentication
/// collaborator builds the [`AuthContext`]; it is never re-derived from
/// the id at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular staff member.
    Staff,
    /// A manager, permitted to author evaluation scores.
    Manager,
}

impl Role {
    /// Returns true for [`Role::Manager`].
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }

    /// Resolves the role from the legacy onboarding convention, where ids
    /// in `20000..30000` were issued to managers.
    ///
    /// Only the onboarding path that seeds employees uses this; everything
    /// downstream reads the stored role.
    ///
    /// # Example
    ///
    /// ```
    /// use personnel_engine::models::Role;
    ///
    /// assert_eq!(Role::from_legacy_id_range(20001), Role::Manager);
    /// assert_eq!(Role::from_legacy_id_range(12345), Role::Staff);
    /// ```
    pub fn from_legacy_id_range(id: u32) -> Self {
        if (20000..30000).contains(&id) {
            Role::Manager
        } else {
            Role::Staff
        }
    }
}

/// Represents an employee known to the personnel system.
///
/// Employees are created by an onboarding process outside this engine and
/// are immutable here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique positive identifier for the employee.
    pub id: u32,
    /// The employee's display name.
    pub name: String,
    /// Hash of the employee's login credential. Verified by the
    /// authentication collaborator, never by this engine.
    pub credential_hash: String,
    /// The employee's role.
    pub role: Role,
}

/// The caller identity resolved by the authentication collaborator before
/// any engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// The calling employee's id.
    pub employee_id: u32,
    /// Whether the caller holds the manager role.
    pub is_manager: bool,
}

impl AuthContext {
    /// Builds the context for an authenticated employee.
    pub fn for_employee(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id,
            is_manager: employee.role.is_manager(),
        }
    }
}
