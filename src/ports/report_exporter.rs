//! Report Exporter Port - Renders an analysis report for output.

use thiserror::Error;

use crate::domain::ahp::AnalysisReport;

/// Errors raised while rendering a report
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize report: {0}")]
    SerializationFailed(String),
}

/// Port for turning an [`AnalysisReport`] into a text document.
///
/// Implementations are pure: same report in, same text out.
pub trait ReportExporter: Send + Sync {
    /// Short name of the produced format (`csv`, `json`).
    fn format_name(&self) -> &'static str;

    /// Render the report.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the report cannot be encoded.
    fn export(&self, report: &AnalysisReport) -> Result<String, ExportError>;
}
