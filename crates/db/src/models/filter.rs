//! Shared list filter for catalog tables.

/// Resolved list filter: the name pattern is already an `ILIKE` pattern and
/// limit/offset are already clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub pattern: Option<String>,
    pub code: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
