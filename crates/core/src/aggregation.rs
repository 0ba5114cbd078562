//! Thesis total computation.
//!
//! The total is derived from the per-criterion scores of the single council
//! grading the thesis. Recomputing from unchanged inputs always yields the
//! same value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Upper bound of a thesis total.
pub const MAX_TOTAL_SCORE: f64 = 10.0;

pub const METHOD_CAPPED_SUM: &str = "capped_sum";
pub const METHOD_LECTURER_MEAN: &str = "lecturer_mean";

/// All valid aggregation method strings.
pub const VALID_METHODS: &[&str] = &[METHOD_CAPPED_SUM, METHOD_LECTURER_MEAN];

/// How criterion scores are folded into a thesis total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalScoreMethod {
    /// Sum of every score row, capped at [`MAX_TOTAL_SCORE`].
    #[default]
    CappedSum,
    /// Each grader's scores are summed, then the sums are averaged over
    /// graders and capped at [`MAX_TOTAL_SCORE`].
    LecturerMean,
}

impl TotalScoreMethod {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            METHOD_CAPPED_SUM => Ok(Self::CappedSum),
            METHOD_LECTURER_MEAN => Ok(Self::LecturerMean),
            _ => Err(format!(
                "Invalid total score method '{s}'. Must be one of: {}",
                VALID_METHODS.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CappedSum => METHOD_CAPPED_SUM,
            Self::LecturerMean => METHOD_LECTURER_MEAN,
        }
    }
}

/// One score row of a thesis, keyed by the council detail that entered it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradedScore {
    pub council_detail_id: DbId,
    pub value: f64,
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute a thesis total from its score rows.
pub fn compute_thesis_total(scores: &[GradedScore], method: TotalScoreMethod) -> f64 {
    let raw = match method {
        TotalScoreMethod::CappedSum => scores.iter().map(|s| s.value).sum::<f64>(),
        TotalScoreMethod::LecturerMean => {
            let mut per_grader: BTreeMap<DbId, f64> = BTreeMap::new();
            for s in scores {
                *per_grader.entry(s.council_detail_id).or_default() += s.value;
            }
            if per_grader.is_empty() {
                0.0
            } else {
                per_grader.values().sum::<f64>() / per_grader.len() as f64
            }
        }
    };
    round2(raw.clamp(0.0, MAX_TOTAL_SCORE))
}
