//! Thesis and student registration rules.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::rules::RuleViolation;
use crate::types::DbId;

/// A thesis has one or two advisors.
pub const MIN_ADVISORS: usize = 1;
pub const MAX_ADVISORS: usize = 2;

/// A thesis is written by one or two students.
pub const MIN_STUDENTS: usize = 1;
pub const MAX_STUDENTS: usize = 2;

/// Minimum span, in calendar years, of a student's study period.
pub const MIN_STUDY_YEARS: i32 = 4;

fn validate_participant_list(
    field: &'static str,
    ids: &[DbId],
    min: usize,
    max: usize,
) -> Result<(), RuleViolation> {
    if ids.len() < min || ids.len() > max {
        return Err(RuleViolation::ParticipantCount {
            field,
            min,
            max,
            actual: ids.len(),
        });
    }
    let unique: HashSet<&DbId> = ids.iter().collect();
    if unique.len() != ids.len() {
        return Err(RuleViolation::DuplicateParticipant { field });
    }
    Ok(())
}

/// Validate the advisor and student lists of a new thesis.
pub fn validate_participants(advisors: &[DbId], students: &[DbId]) -> Result<(), RuleViolation> {
    validate_participant_list("advisors", advisors, MIN_ADVISORS, MAX_ADVISORS)?;
    validate_participant_list("students", students, MIN_STUDENTS, MAX_STUDENTS)
}

/// Validate that a study period spans at least [`MIN_STUDY_YEARS`] calendar years.
pub fn validate_study_period(start: NaiveDate, end: NaiveDate) -> Result<(), RuleViolation> {
    if end.year() - start.year() < MIN_STUDY_YEARS || end <= start {
        return Err(RuleViolation::StudyPeriodTooShort {
            min_years: MIN_STUDY_YEARS,
        });
    }
    Ok(())
}
