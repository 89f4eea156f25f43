//! Export Adapters
//!
//! Implementations of the ReportExporter port.
//!
//! - **CsvReportExporter** - Sectioned CSV (weights, rankings, consistency)
//! - **JsonReportExporter** - The whole report as pretty-printed JSON

mod csv_exporter;
mod json_exporter;

pub use csv_exporter::CsvReportExporter;
pub use json_exporter::JsonReportExporter;

use crate::ports::ReportExporter;

/// Looks up an exporter by format name.
pub fn exporter_for(format: &str) -> Option<Box<dyn ReportExporter>> {
    match format.to_ascii_lowercase().as_str() {
        "csv" => Some(Box::new(CsvReportExporter)),
        "json" => Some(Box::new(JsonReportExporter)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exporter_lookup() {
        assert_eq!(exporter_for("csv").unwrap().format_name(), "csv");
        assert_eq!(exporter_for("JSON").unwrap().format_name(), "json");
        assert!(exporter_for("xml").is_none());
    }
}
