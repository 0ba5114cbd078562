//! Score report assembly.
//!
//! Turns the raw score rows of one thesis into the table handed to a report
//! renderer: rows grouped by criterion with merged-cell labels, followed by
//! an average row.

use indexmap::IndexMap;
use serde::Serialize;

use crate::aggregation::round2;

/// Label of the trailing summary row.
pub const AVERAGE_LABEL: &str = "Average";

/// A score row resolved to display names.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub criteria_title: String,
    pub lecturer_name: String,
    pub score: f64,
}

/// One table row of a score report.
///
/// `label` is empty for every row of a criterion group after the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub score: Option<f64>,
    pub lecturer: String,
}

/// The assembled report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Criterion rows followed by the average row.
    pub rows: Vec<ReportRow>,
    /// `None` when no lecturer has entered a score.
    pub average_score: Option<f64>,
    /// Number of rows that carry a lecturer name.
    pub lecturer_count: usize,
}

impl ScoreReport {
    /// Rows without the trailing average row.
    pub fn criteria_rows(&self) -> &[ReportRow] {
        &self.rows[..self.rows.len().saturating_sub(1)]
    }
}

/// Build a report from score entries in retrieval order.
///
/// The average is the sum of every score divided by the number of entries
/// that name a lecturer. With no such entries the average is `None` rather
/// than a division by zero.
pub fn build_score_report(entries: &[ReportEntry]) -> ScoreReport {
    let mut groups: IndexMap<&str, Vec<&ReportEntry>> = IndexMap::new();
    let mut total = 0.0;
    let mut lecturer_count = 0usize;

    for entry in entries {
        if !entry.lecturer_name.is_empty() {
            lecturer_count += 1;
        }
        total += entry.score;
        groups
            .entry(entry.criteria_title.as_str())
            .or_default()
            .push(entry);
    }

    let mut rows = Vec::with_capacity(entries.len() + 1);
    for (title, group) in &groups {
        for (i, entry) in group.iter().enumerate() {
            rows.push(ReportRow {
                label: if i == 0 { (*title).to_string() } else { String::new() },
                score: Some(entry.score),
                lecturer: entry.lecturer_name.clone(),
            });
        }
    }

    let average_score = (lecturer_count > 0).then(|| round2(total / lecturer_count as f64));
    rows.push(ReportRow {
        label: AVERAGE_LABEL.to_string(),
        score: average_score,
        lecturer: String::new(),
    });

    ScoreReport {
        rows,
        average_score,
        lecturer_count,
    }
}

/// Human-readable file name for an exported report.
///
/// Path separators and control characters in the title are replaced so the
/// name is safe to use as a single path component.
pub fn report_file_name(thesis_title: &str, extension: &str) -> String {
    let safe: String = thesis_title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("Thesis report {safe}.{extension}")
}
