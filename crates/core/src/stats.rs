//! Dashboard statistics over theses.

use serde::Serialize;

use crate::aggregation::round2;

/// Raw per-major thesis count as grouped by the database.
///
/// Counting is per (thesis, student) pair: a thesis with two students of the
/// same major contributes two to that major. Percentages are computed over
/// the sum of these counts, so the shares always add up to 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorTally {
    pub major_code: String,
    pub major_name: String,
    pub count: i64,
}

/// A major's thesis count with its percentage share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorShare {
    pub major_code: String,
    pub major_name: String,
    pub count: i64,
    pub percentage: f64,
}

/// Attach percentage shares (two decimals) to per-major counts.
///
/// Output is ordered by count descending, then major name.
pub fn thesis_counts_by_major(tallies: Vec<MajorTally>) -> Vec<MajorShare> {
    let total: i64 = tallies.iter().map(|t| t.count).sum();
    if total <= 0 {
        return Vec::new();
    }

    let mut shares: Vec<MajorShare> = tallies
        .into_iter()
        .map(|t| MajorShare {
            percentage: round2(t.count as f64 / total as f64 * 100.0),
            major_code: t.major_code,
            major_name: t.major_name,
            count: t.count,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.major_name.cmp(&b.major_name))
    });
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(code: &str, count: i64) -> MajorTally {
        MajorTally {
            major_code: code.to_string(),
            major_name: code.to_string(),
            count,
        }
    }

    #[test]
    fn two_to_one_split() {
        let shares = thesis_counts_by_major(vec![tally("EE", 1), tally("CS", 2)]);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].major_code, "CS");
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[0].percentage, 66.67);
        assert_eq!(shares[1].major_code, "EE");
        assert_eq!(shares[1].percentage, 33.33);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(thesis_counts_by_major(Vec::new()).is_empty());
    }

    #[test]
    fn single_major_is_whole() {
        let shares = thesis_counts_by_major(vec![tally("CS", 4)]);
        assert_eq!(shares[0].percentage, 100.0);
    }

    #[test]
    fn ties_ordered_by_name() {
        let shares = thesis_counts_by_major(vec![tally("ME", 1), tally("CE", 1)]);
        assert_eq!(shares[0].major_code, "CE");
        assert_eq!(shares[0].percentage, 50.0);
    }
}
