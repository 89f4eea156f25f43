//! CSV report exporter.
//!
//! Layout:
//!
//! ```text
//! AHP Analysis Results
//!
//! Criteria Weights
//! Criterion,Weight,Percentage
//! "<name>",<weight>,<pct>%
//!
//! Final Rankings
//! Rank,Alternative,Score,Percentage
//! <rank>,"<name>",<score>,<pct>%
//!
//! Consistency Results
//! Matrix,Lambda Max,CI,CR,Status
//! "<label>",<lambda>,<ci>,<cr>,"<status>"
//! ```
//!
//! Numbers are written at full precision; percentages with two decimals.

use std::fmt::Write;

use crate::domain::ahp::AnalysisReport;
use crate::ports::{ExportError, ReportExporter};

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportExporter;

impl ReportExporter for CsvReportExporter {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn export(&self, report: &AnalysisReport) -> Result<String, ExportError> {
        render(report).map_err(|e| ExportError::SerializationFailed(e.to_string()))
    }
}

fn render(report: &AnalysisReport) -> Result<String, std::fmt::Error> {
    let mut csv = String::from("AHP Analysis Results\n\n");

    csv.push_str("Criteria Weights\n");
    csv.push_str("Criterion,Weight,Percentage\n");
    for (name, weight) in report.criteria.iter().zip(report.criteria_weights.iter()) {
        writeln!(csv, "{},{},{}", quoted(name), weight, percentage(weight))?;
    }

    csv.push_str("\nFinal Rankings\n");
    csv.push_str("Rank,Alternative,Score,Percentage\n");
    for ranked in &report.ranking {
        writeln!(
            csv,
            "{},{},{},{}",
            ranked.rank,
            quoted(&ranked.name),
            ranked.score,
            percentage(ranked.score)
        )?;
    }

    csv.push_str("\nConsistency Results\n");
    csv.push_str("Matrix,Lambda Max,CI,CR,Status\n");
    for matrix in &report.consistency {
        let result = &matrix.result;
        writeln!(
            csv,
            "{},{},{},{},{}",
            quoted(&matrix.label),
            result.lambda_max,
            result.consistency_index,
            result.consistency_ratio,
            quoted(result.status.label())
        )?;
    }

    Ok(csv)
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}
