//! CreateHierarchyHandler - Command handler for creating and importing hierarchies.

use std::sync::Arc;
use tracing::info;

use crate::domain::ahp::reference::{default_hierarchy, reference_hierarchy};
use crate::domain::ahp::{Hierarchy, HierarchyLimits};
use crate::domain::foundation::{DomainError, HierarchyId};
use crate::ports::{HierarchyRepository, StoredHierarchy};

/// Starting content of a new hierarchy.
#[derive(Debug, Clone)]
pub enum HierarchyTemplate {
    /// Reference names with every judgment neutral.
    Default,
    /// The bundled reference dataset.
    Reference,
    /// An existing hierarchy, e.g. read from a file.
    Imported(Hierarchy),
}

/// Command to create a new hierarchy.
#[derive(Debug, Clone)]
pub struct CreateHierarchyCommand {
    pub template: HierarchyTemplate,
}

/// Result of successful hierarchy creation.
#[derive(Debug, Clone)]
pub struct CreateHierarchyResult {
    pub id: HierarchyId,
    pub stored: StoredHierarchy,
}

/// Handler for creating hierarchies.
pub struct CreateHierarchyHandler {
    repository: Arc<dyn HierarchyRepository>,
    limits: HierarchyLimits,
}

impl CreateHierarchyHandler {
    pub fn new(repository: Arc<dyn HierarchyRepository>, limits: HierarchyLimits) -> Self {
        Self { repository, limits }
    }

    pub async fn handle(
        &self,
        cmd: CreateHierarchyCommand,
    ) -> Result<CreateHierarchyResult, DomainError> {
        // 1. Build hierarchy from template
        let hierarchy = match cmd.template {
            HierarchyTemplate::Default => default_hierarchy()?,
            HierarchyTemplate::Reference => reference_hierarchy()?,
            HierarchyTemplate::Imported(hierarchy) => hierarchy,
        }
        .with_limits(self.limits);

        // 2. Persist under a fresh id
        let id = HierarchyId::new();
        let stored = self.repository.save(id, &hierarchy).await?;

        info!(
            hierarchy_id = %id,
            criteria = hierarchy.criteria().len(),
            alternatives = hierarchy.alternatives().len(),
            "Hierarchy created"
        );

        Ok(CreateHierarchyResult { id, stored })
    }
}
