//! Score report rendering and storage.
//!
//! The table itself is assembled in `thesis_core::report`. This module turns
//! it into bytes through a [`ReportRenderer`] and persists those bytes
//! through a [`ReportStore`].

pub mod renderer;
pub mod store;

pub use renderer::{CsvRenderer, ReportRenderer};
pub use store::{LocalReportStore, ReportStore};

/// Failures while exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report rendering error: {0}")]
    Render(#[from] csv::Error),

    #[error("Invalid report file name '{0}'")]
    InvalidName(String),
}
