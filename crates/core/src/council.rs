//! Council composition rules and lock-toggle planning.
//!
//! A council is a panel of at most [`MAX_COUNCIL_ASSIGNMENTS`] lecturers.
//! Chairman, secretary and debater are unique per council; the member role
//! may be held by up to [`MAX_MEMBER_ASSIGNMENTS`] lecturers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rules::RuleViolation;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of role assignments (lecturers) per council.
pub const MAX_COUNCIL_ASSIGNMENTS: usize = 5;

/// Maximum number of assignments with the `member` role per council.
pub const MAX_MEMBER_ASSIGNMENTS: usize = 2;

/// Maximum number of theses a council may grade.
pub const MAX_THESES_PER_COUNCIL: usize = 5;

pub const ROLE_CHAIRMAN: &str = "chairman";
pub const ROLE_SECRETARY: &str = "secretary";
pub const ROLE_DEBATER: &str = "debater";
pub const ROLE_MEMBER: &str = "member";

/// All valid council role strings.
pub const VALID_COUNCIL_ROLES: &[&str] = &[ROLE_CHAIRMAN, ROLE_SECRETARY, ROLE_DEBATER, ROLE_MEMBER];

// ---------------------------------------------------------------------------
// CouncilRole
// ---------------------------------------------------------------------------

/// A lecturer's role within a council.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouncilRole {
    Chairman,
    Secretary,
    Debater,
    Member,
}

impl CouncilRole {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_CHAIRMAN => Ok(Self::Chairman),
            ROLE_SECRETARY => Ok(Self::Secretary),
            ROLE_DEBATER => Ok(Self::Debater),
            ROLE_MEMBER => Ok(Self::Member),
            _ => Err(format!(
                "Invalid council role '{s}'. Must be one of: {}",
                VALID_COUNCIL_ROLES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chairman => ROLE_CHAIRMAN,
            Self::Secretary => ROLE_SECRETARY,
            Self::Debater => ROLE_DEBATER,
            Self::Member => ROLE_MEMBER,
        }
    }

    /// Human-readable title used in notifications and reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Chairman => "Council Chairman",
            Self::Secretary => "Council Secretary",
            Self::Debater => "Reviewing Lecturer",
            Self::Member => "Council Member",
        }
    }

    /// How many times this role may appear in one council.
    pub fn max_per_council(&self) -> usize {
        match self {
            Self::Member => MAX_MEMBER_ASSIGNMENTS,
            _ => 1,
        }
    }
}

impl fmt::Display for CouncilRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// An existing role assignment within a council.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub role: CouncilRole,
    pub lecturer_id: DbId,
}

/// Check that `role` can be given to `lecturer_id` in a council whose current
/// active assignments are `existing`.
///
/// Checks run in a fixed order: council capacity, then the role limit
/// (member) or role uniqueness (every other role), then lecturer uniqueness.
pub fn validate_council_detail_assignment(
    existing: &[Assignment],
    role: CouncilRole,
    lecturer_id: DbId,
) -> Result<(), RuleViolation> {
    if existing.len() >= MAX_COUNCIL_ASSIGNMENTS {
        return Err(RuleViolation::CouncilCapacityExceeded {
            max: MAX_COUNCIL_ASSIGNMENTS,
        });
    }

    let same_role = existing.iter().filter(|a| a.role == role).count();
    if role == CouncilRole::Member {
        if same_role >= MAX_MEMBER_ASSIGNMENTS {
            return Err(RuleViolation::RoleLimitExceeded {
                role,
                max: MAX_MEMBER_ASSIGNMENTS,
            });
        }
    } else if same_role > 0 {
        return Err(RuleViolation::RoleAlreadyAssigned { role });
    }

    if existing.iter().any(|a| a.lecturer_id == lecturer_id) {
        return Err(RuleViolation::LecturerAlreadyAssigned { lecturer_id });
    }

    Ok(())
}

/// Reject any change to a locked council.
pub fn ensure_unlocked(council_id: DbId, is_blocked: bool) -> Result<(), RuleViolation> {
    if is_blocked {
        Err(RuleViolation::CouncilLocked { council_id })
    } else {
        Ok(())
    }
}

/// Check that one more thesis fits into a council holding `current` theses.
pub fn validate_thesis_capacity(current: usize) -> Result<(), RuleViolation> {
    if current >= MAX_THESES_PER_COUNCIL {
        Err(RuleViolation::CouncilThesisLimitExceeded {
            max: MAX_THESES_PER_COUNCIL,
        })
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Lock toggle
// ---------------------------------------------------------------------------

/// True iff every thesis total is positive. A council without theses is
/// trivially fully scored.
pub fn is_council_fully_scored(totals: &[f64]) -> bool {
    totals.iter().all(|total| *total > 0.0)
}

/// Compute the next `is_blocked` value for a lock toggle.
///
/// `theses` holds `(thesis_id, total_score)` for every thesis the council
/// owns, read from the current persisted state. Unlocking always succeeds;
/// locking requires every thesis to be scored. The caller writes the returned
/// value only on `Ok`, so a rejected lock leaves the flag untouched.
pub fn plan_lock_toggle(is_blocked: bool, theses: &[(DbId, f64)]) -> Result<bool, RuleViolation> {
    if is_blocked {
        return Ok(false);
    }

    let unscored: Vec<DbId> = theses
        .iter()
        .filter(|(_, total)| *total <= 0.0)
        .map(|(id, _)| *id)
        .collect();

    if unscored.is_empty() {
        Ok(true)
    } else {
        Err(RuleViolation::IncompleteScoring { unscored })
    }
}
