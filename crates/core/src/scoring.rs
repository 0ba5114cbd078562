//! Score entry validation.
//!
//! A score is one council member's grade for one criterion of one thesis.
//! The composite key (thesis, criteria, council detail) is unique, and every
//! score of a thesis must come from the same council.

use crate::rules::RuleViolation;
use crate::types::DbId;

/// Lowest value a single criterion score may take.
pub const MIN_SCORE: f64 = 0.0;

/// Highest value a single criterion score may take.
pub const MAX_SCORE: f64 = 2.0;

/// An already-persisted score of the thesis being graded, resolved to the
/// council its council detail belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExistingScore {
    pub id: DbId,
    pub criteria_id: DbId,
    pub council_detail_id: DbId,
    pub council_id: DbId,
}

/// A proposed score insert or update, with the state it depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWrite {
    /// `Some(id)` when updating an existing score row.
    pub record_id: Option<DbId>,
    pub thesis_id: DbId,
    pub criteria_id: DbId,
    pub council_detail_id: DbId,
    /// Council of `council_detail_id`.
    pub council_id: DbId,
    /// Lock flag of `council_id`.
    pub council_is_blocked: bool,
    /// Council that owns `thesis_id`.
    pub thesis_council_id: DbId,
    pub value: f64,
}

/// Check that a score value lies within `[MIN_SCORE, MAX_SCORE]`.
pub fn validate_score_value(value: f64) -> Result<(), RuleViolation> {
    if value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(RuleViolation::ScoreOutOfRange {
            value,
            min: MIN_SCORE,
            max: MAX_SCORE,
        })
    }
}

/// Validate a score write against the thesis's existing scores.
///
/// Checks, in order:
/// 1. the value is in range;
/// 2. no other row has the same (thesis, criteria, council detail) key;
/// 3. no other row of the thesis was entered by a different council;
/// 4. the grading council is not locked;
/// 5. the grading council owns the thesis.
///
/// The row identified by `write.record_id` is ignored in checks 2 and 3 so
/// an update never collides with itself.
pub fn validate_score_write(
    write: &ScoreWrite,
    existing: &[ExistingScore],
) -> Result<(), RuleViolation> {
    validate_score_value(write.value)?;

    let others = existing
        .iter()
        .filter(|s| Some(s.id) != write.record_id);

    if others.clone().any(|s| {
        s.criteria_id == write.criteria_id && s.council_detail_id == write.council_detail_id
    }) {
        return Err(RuleViolation::DuplicateScoreEntry);
    }

    if let Some(other) = others.clone().find(|s| s.council_id != write.council_id) {
        return Err(RuleViolation::ThesisAlreadyGradedByOtherCouncil {
            council_id: other.council_id,
        });
    }

    if write.council_is_blocked {
        return Err(RuleViolation::CouncilLocked {
            council_id: write.council_id,
        });
    }

    if write.thesis_council_id != write.council_id {
        return Err(RuleViolation::ThesisNotInCouncil {
            thesis_id: write.thesis_id,
            council_id: write.council_id,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn write(value: f64) -> ScoreWrite {
        ScoreWrite {
            record_id: None,
            thesis_id: 1,
            criteria_id: 10,
            council_detail_id: 100,
            council_id: 7,
            council_is_blocked: false,
            thesis_council_id: 7,
            value,
        }
    }

    fn existing(id: DbId, criteria_id: DbId, council_detail_id: DbId, council_id: DbId) -> ExistingScore {
        ExistingScore {
            id,
            criteria_id,
            council_detail_id,
            council_id,
        }
    }

    #[test]
    fn boundary_values_accepted() {
        assert!(validate_score_value(0.0).is_ok());
        assert!(validate_score_value(2.0).is_ok());
        assert!(validate_score_value(1.25).is_ok());
    }

    #[test]
    fn out_of_range_rejected() {
        assert_matches!(
            validate_score_value(2.01),
            Err(RuleViolation::ScoreOutOfRange { .. })
        );
        assert_matches!(
            validate_score_value(-0.5),
            Err(RuleViolation::ScoreOutOfRange { .. })
        );
        assert_matches!(
            validate_score_value(f64::NAN),
            Err(RuleViolation::ScoreOutOfRange { .. })
        );
    }

    #[test]
    fn first_score_for_thesis_is_accepted() {
        assert!(validate_score_write(&write(1.5), &[]).is_ok());
    }

    #[test]
    fn range_is_checked_before_duplicates() {
        let rows = [existing(5, 10, 100, 7)];
        assert_matches!(
            validate_score_write(&write(3.0), &rows),
            Err(RuleViolation::ScoreOutOfRange { .. })
        );
    }

    #[test]
    fn duplicate_key_rejected_on_insert() {
        let rows = [existing(5, 10, 100, 7)];
        assert_matches!(
            validate_score_write(&write(1.0), &rows),
            Err(RuleViolation::DuplicateScoreEntry)
        );
    }

    #[test]
    fn updating_the_same_record_is_not_a_duplicate() {
        let rows = [existing(5, 10, 100, 7)];
        let mut w = write(1.0);
        w.record_id = Some(5);
        assert!(validate_score_write(&w, &rows).is_ok());
    }

    #[test]
    fn update_colliding_with_another_record_is_a_duplicate() {
        let rows = [existing(5, 10, 100, 7), existing(6, 11, 100, 7)];
        let mut w = write(1.0);
        w.record_id = Some(6);
        assert_matches!(
            validate_score_write(&w, &rows),
            Err(RuleViolation::DuplicateScoreEntry)
        );
    }

    #[test]
    fn different_council_rejected() {
        let rows = [existing(5, 10, 200, 8)];
        assert_matches!(
            validate_score_write(&write(1.0), &rows),
            Err(RuleViolation::ThesisAlreadyGradedByOtherCouncil { council_id: 8 })
        );
    }

    #[test]
    fn another_member_of_same_council_may_grade() {
        let rows = [existing(5, 10, 101, 7), existing(6, 11, 102, 7)];
        assert!(validate_score_write(&write(1.0), &rows).is_ok());
    }

    #[test]
    fn locked_council_rejected() {
        let mut w = write(1.0);
        w.council_is_blocked = true;
        assert_matches!(
            validate_score_write(&w, &[]),
            Err(RuleViolation::CouncilLocked { council_id: 7 })
        );
    }

    #[test]
    fn council_must_own_thesis() {
        let mut w = write(1.0);
        w.thesis_council_id = 9;
        assert_matches!(
            validate_score_write(&w, &[]),
            Err(RuleViolation::ThesisNotInCouncil {
                thesis_id: 1,
                council_id: 7
            })
        );
    }
}
