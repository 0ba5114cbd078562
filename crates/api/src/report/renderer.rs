use csv::{Terminator, WriterBuilder};
use thesis_core::report::ScoreReport;

use super::ReportError;

/// Renders an assembled score report into a document.
pub trait ReportRenderer: Send + Sync {
    /// File extension of the produced document, without the dot.
    fn extension(&self) -> &'static str;

    /// MIME type of the produced document.
    fn content_type(&self) -> &'static str;

    fn render(&self, thesis_title: &str, report: &ScoreReport) -> Result<Vec<u8>, ReportError>;
}

/// Renders a report as a three-column CSV table (criteria, score, lecturer)
/// preceded by a two-column title line.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn content_type(&self) -> &'static str {
        "text/csv"
    }

    fn render(&self, thesis_title: &str, report: &ScoreReport) -> Result<Vec<u8>, ReportError> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(["Thesis", thesis_title])?;
        writer.write_record(["Criteria", "Score", "Lecturer"])?;
        for row in &report.rows {
            let score = row.score.map(|s| s.to_string()).unwrap_or_default();
            writer.write_record([row.label.as_str(), score.as_str(), row.lecturer.as_str()])?;
        }

        writer
            .into_inner()
            .map_err(|e| ReportError::Render(e.into_error().into()))
    }
}
