//! JSON report exporter.

use crate::domain::ahp::AnalysisReport;
use crate::ports::{ExportError, ReportExporter};

/// Writes the whole report as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportExporter;

impl ReportExporter for JsonReportExporter {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn export(&self, report: &AnalysisReport) -> Result<String, ExportError> {
        serde_json::to_string_pretty(report)
            .map_err(|e| ExportError::SerializationFailed(e.to_string()))
    }
}
