//! Typed rule violations raised by council composition, thesis and score checks.
//!
//! Every violation is user-correctable. [`RuleViolation::kind`] separates
//! input problems (`ValidationFailure`, HTTP 400) from conflicts with the
//! current persisted state (`StateConflict`, HTTP 409).

use serde::Serialize;

use crate::council::CouncilRole;
use crate::types::DbId;

/// Broad category of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Capacity, uniqueness or range violations in the submitted data.
    ValidationFailure,
    /// The request is valid but conflicts with current state (locked council,
    /// thesis graded elsewhere, incomplete scoring).
    StateConflict,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleViolation {
    #[error("A council may have at most {max} lecturers")]
    CouncilCapacityExceeded { max: usize },

    #[error("Role '{role}' may be assigned at most {max} times in one council")]
    RoleLimitExceeded { role: CouncilRole, max: usize },

    #[error("Role '{role}' is already assigned in this council")]
    RoleAlreadyAssigned { role: CouncilRole },

    #[error("Lecturer {lecturer_id} already holds a role in this council")]
    LecturerAlreadyAssigned { lecturer_id: DbId },

    #[error("A council may hold at most {max} theses")]
    CouncilThesisLimitExceeded { max: usize },

    #[error("Score {value} is outside the allowed range [{min}, {max}]")]
    ScoreOutOfRange { value: f64, min: f64, max: f64 },

    #[error("A score for this thesis, criteria and council member already exists")]
    DuplicateScoreEntry,

    #[error("This thesis has already been graded by council {council_id}")]
    ThesisAlreadyGradedByOtherCouncil { council_id: DbId },

    #[error("Thesis {thesis_id} is not assigned to council {council_id}")]
    ThesisNotInCouncil { thesis_id: DbId, council_id: DbId },

    #[error("Council {council_id} is locked; scores can no longer be edited")]
    CouncilLocked { council_id: DbId },

    #[error("Council cannot be locked while {} thesis(es) have no score", unscored.len())]
    IncompleteScoring { unscored: Vec<DbId> },

    #[error("A thesis needs between {min} and {max} {field}, got {actual}")]
    ParticipantCount {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Duplicate entries in {field}")]
    DuplicateParticipant { field: &'static str },

    #[error("The study period must span at least {min_years} years")]
    StudyPeriodTooShort { min_years: i32 },
}

impl RuleViolation {
    /// Whether this is an input problem or a conflict with persisted state.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::CouncilLocked { .. }
            | Self::ThesisAlreadyGradedByOtherCouncil { .. }
            | Self::IncompleteScoring { .. } => ViolationKind::StateConflict,
            _ => ViolationKind::ValidationFailure,
        }
    }

    /// The request field the violation is scoped to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::CouncilCapacityExceeded { .. } | Self::CouncilThesisLimitExceeded { .. } => {
                "council"
            }
            Self::RoleLimitExceeded { .. } | Self::RoleAlreadyAssigned { .. } => "role",
            Self::LecturerAlreadyAssigned { .. } => "lecturer",
            Self::ScoreOutOfRange { .. } => "score",
            Self::DuplicateScoreEntry => "non_field_errors",
            Self::ThesisAlreadyGradedByOtherCouncil { .. } | Self::ThesisNotInCouncil { .. } => {
                "thesis"
            }
            Self::CouncilLocked { .. } | Self::IncompleteScoring { .. } => "is_blocked",
            Self::ParticipantCount { field, .. } | Self::DuplicateParticipant { field } => *field,
            Self::StudyPeriodTooShort { .. } => "end_study",
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CouncilCapacityExceeded { .. } => "COUNCIL_CAPACITY_EXCEEDED",
            Self::RoleLimitExceeded { .. } => "ROLE_LIMIT_EXCEEDED",
            Self::RoleAlreadyAssigned { .. } => "ROLE_ALREADY_ASSIGNED",
            Self::LecturerAlreadyAssigned { .. } => "LECTURER_ALREADY_ASSIGNED",
            Self::CouncilThesisLimitExceeded { .. } => "COUNCIL_THESIS_LIMIT_EXCEEDED",
            Self::ScoreOutOfRange { .. } => "SCORE_OUT_OF_RANGE",
            Self::DuplicateScoreEntry => "DUPLICATE_SCORE_ENTRY",
            Self::ThesisAlreadyGradedByOtherCouncil { .. } => {
                "THESIS_ALREADY_GRADED_BY_OTHER_COUNCIL"
            }
            Self::ThesisNotInCouncil { .. } => "THESIS_NOT_IN_COUNCIL",
            Self::CouncilLocked { .. } => "COUNCIL_LOCKED",
            Self::IncompleteScoring { .. } => "INCOMPLETE_SCORING",
            Self::ParticipantCount { .. } => "PARTICIPANT_COUNT",
            Self::DuplicateParticipant { .. } => "DUPLICATE_PARTICIPANT",
            Self::StudyPeriodTooShort { .. } => "STUDY_PERIOD_TOO_SHORT",
        }
    }
}
