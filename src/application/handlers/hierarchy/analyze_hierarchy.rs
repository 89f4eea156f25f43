//! AnalyzeHierarchyHandler - Validates a stored hierarchy and runs the AHP analysis.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::ahp::{AhpAnalyzer, AhpError, AnalysisReport, Hierarchy, HierarchyLimits};
use crate::domain::foundation::{DomainError, HierarchyId};
use crate::ports::HierarchyRepository;

/// Command to analyze a stored hierarchy.
#[derive(Debug, Clone)]
pub struct AnalyzeHierarchyCommand {
    pub hierarchy_id: HierarchyId,
}

/// Error type for analysis.
#[derive(Debug, Clone)]
pub enum AnalyzeHierarchyError {
    /// No hierarchy stored under the id.
    NotFound(HierarchyId),
    /// Structural validation failed; every violation is listed.
    Invalid(Vec<String>),
    /// Numeric failure inside the engine.
    Analysis(AhpError),
    /// Storage failure.
    Domain(DomainError),
}

impl std::fmt::Display for AnalyzeHierarchyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeHierarchyError::NotFound(id) => write!(f, "Hierarchy not found: {}", id),
            AnalyzeHierarchyError::Invalid(errors) => {
                write!(f, "Hierarchy is invalid: {}", errors.join("; "))
            }
            AnalyzeHierarchyError::Analysis(err) => write!(f, "Analysis failed: {}", err),
            AnalyzeHierarchyError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AnalyzeHierarchyError {}

impl From<DomainError> for AnalyzeHierarchyError {
    fn from(err: DomainError) -> Self {
        AnalyzeHierarchyError::Domain(err)
    }
}

impl From<AhpError> for AnalyzeHierarchyError {
    fn from(err: AhpError) -> Self {
        AnalyzeHierarchyError::Analysis(err)
    }
}

/// Handler for running analyses.
pub struct AnalyzeHierarchyHandler {
    repository: Arc<dyn HierarchyRepository>,
    analyzer: AhpAnalyzer,
    limits: HierarchyLimits,
}

impl AnalyzeHierarchyHandler {
    pub fn new(
        repository: Arc<dyn HierarchyRepository>,
        analyzer: AhpAnalyzer,
        limits: HierarchyLimits,
    ) -> Self {
        Self {
            repository,
            analyzer,
            limits,
        }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeHierarchyCommand,
    ) -> Result<AnalysisReport, AnalyzeHierarchyError> {
        // 1. Load hierarchy
        let stored = self
            .repository
            .find_by_id(cmd.hierarchy_id)
            .await
            .map_err(DomainError::from)?
            .ok_or(AnalyzeHierarchyError::NotFound(cmd.hierarchy_id))?;

        // 2. Validate and analyze
        let report = self.analyze(stored.hierarchy)?;

        info!(
            hierarchy_id = %cmd.hierarchy_id,
            analysis_id = %report.analysis_id,
            "Hierarchy analyzed"
        );
        Ok(report)
    }

    /// Validates against the configured limits, then analyzes.
    pub fn analyze(&self, hierarchy: Hierarchy) -> Result<AnalysisReport, AnalyzeHierarchyError> {
        let hierarchy = hierarchy.with_limits(self.limits);

        let validation = hierarchy.validate();
        if !validation.is_valid {
            warn!(violations = validation.errors.len(), "Hierarchy failed validation");
            return Err(AnalyzeHierarchyError::Invalid(validation.errors));
        }

        let report = self.analyzer.analyze(&hierarchy)?;
        let inconsistent = report.inconsistent_matrices();
        if !inconsistent.is_empty() {
            warn!(matrices = ?inconsistent, "Analysis includes inconsistent judgments");
        }
        Ok(report)
    }
}
