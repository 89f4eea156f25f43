//! EditHierarchyHandler - Applies one structural or judgment edit to a stored hierarchy.
//!
//! Load, mutate and save run under the hierarchy's exclusive lock, so
//! concurrent edits to the same hierarchy are serialized and none is lost.

use std::sync::Arc;
use tracing::{debug, error, info};

use super::HierarchyLocks;
use crate::domain::ahp::{
    AhpError, EntityKind, Hierarchy, HierarchyLimits, MatrixRef, ValidationResult,
};
use crate::domain::foundation::{DomainError, HierarchyId};
use crate::ports::{HierarchyRepository, StoredHierarchy};

/// One edit to a hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyEdit {
    SetGoal {
        goal: String,
    },
    AddEntity {
        kind: EntityKind,
        name: String,
    },
    RemoveEntity {
        kind: EntityKind,
        index: usize,
    },
    RenameEntity {
        kind: EntityKind,
        index: usize,
        new_name: String,
    },
    SetJudgment {
        matrix: MatrixRef,
        row: usize,
        col: usize,
        value: f64,
    },
}

/// Command to edit a stored hierarchy.
#[derive(Debug, Clone)]
pub struct EditHierarchyCommand {
    pub hierarchy_id: HierarchyId,
    pub edit: HierarchyEdit,
}

/// What the edit did.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    GoalSet,
    Added { index: usize },
    Removed { name: String },
    Renamed,
    JudgmentSet,
}

/// Result of a successful edit.
#[derive(Debug, Clone)]
pub struct EditHierarchyResult {
    pub stored: StoredHierarchy,
    pub outcome: EditOutcome,
    /// Structural check of the edited hierarchy.
    pub validation: ValidationResult,
}

/// Error type for hierarchy edits.
#[derive(Debug, Clone)]
pub enum EditHierarchyError {
    /// No hierarchy stored under the id.
    NotFound(HierarchyId),
    /// The edit violated a hierarchy rule; nothing was saved.
    Rejected(AhpError),
    /// Storage failure, or a stored hierarchy the engine cannot work on.
    Domain(DomainError),
}

impl std::fmt::Display for EditHierarchyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditHierarchyError::NotFound(id) => write!(f, "Hierarchy not found: {}", id),
            EditHierarchyError::Rejected(err) => write!(f, "Edit rejected: {}", err),
            EditHierarchyError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for EditHierarchyError {}

impl From<DomainError> for EditHierarchyError {
    fn from(err: DomainError) -> Self {
        EditHierarchyError::Domain(err)
    }
}

impl From<AhpError> for EditHierarchyError {
    /// Input mistakes are rejections; anything else means the stored
    /// hierarchy itself is broken.
    fn from(err: AhpError) -> Self {
        if err.is_structural() {
            EditHierarchyError::Rejected(err)
        } else {
            EditHierarchyError::Domain(err.into())
        }
    }
}

/// Handler for hierarchy edits.
pub struct EditHierarchyHandler {
    repository: Arc<dyn HierarchyRepository>,
    locks: HierarchyLocks,
    limits: HierarchyLimits,
}

impl EditHierarchyHandler {
    pub fn new(
        repository: Arc<dyn HierarchyRepository>,
        locks: HierarchyLocks,
        limits: HierarchyLimits,
    ) -> Self {
        Self {
            repository,
            locks,
            limits,
        }
    }

    pub async fn handle(
        &self,
        cmd: EditHierarchyCommand,
    ) -> Result<EditHierarchyResult, EditHierarchyError> {
        // 1. Serialize with other edits of this hierarchy
        let _guard = self.locks.acquire(cmd.hierarchy_id).await;

        // 2. Load hierarchy
        let mut hierarchy = self
            .repository
            .find_by_id(cmd.hierarchy_id)
            .await
            .map_err(DomainError::from)?
            .ok_or(EditHierarchyError::NotFound(cmd.hierarchy_id))?
            .hierarchy
            .with_limits(self.limits);

        // 3. Apply edit (all-or-nothing)
        let outcome = match apply_edit(&mut hierarchy, &cmd.edit) {
            Ok(outcome) => outcome,
            Err(err) if err.is_structural() => {
                debug!(hierarchy_id = %cmd.hierarchy_id, error = %err, "Edit rejected");
                return Err(err.into());
            }
            Err(err) => {
                error!(
                    hierarchy_id = %cmd.hierarchy_id,
                    error = %err,
                    "Stored hierarchy is malformed"
                );
                return Err(err.into());
            }
        };

        // 4. Persist
        let stored = self
            .repository
            .save(cmd.hierarchy_id, &hierarchy)
            .await
            .map_err(DomainError::from)?;

        info!(hierarchy_id = %cmd.hierarchy_id, outcome = ?outcome, "Hierarchy edited");

        Ok(EditHierarchyResult {
            validation: hierarchy.validate(),
            stored,
            outcome,
        })
    }
}

fn apply_edit(hierarchy: &mut Hierarchy, edit: &HierarchyEdit) -> Result<EditOutcome, AhpError> {
    match edit {
        HierarchyEdit::SetGoal { goal } => {
            hierarchy.set_goal(goal.as_str());
            Ok(EditOutcome::GoalSet)
        }
        HierarchyEdit::AddEntity { kind, name } => hierarchy
            .add_entity(*kind, name)
            .map(|index| EditOutcome::Added { index }),
        HierarchyEdit::RemoveEntity { kind, index } => hierarchy
            .remove_entity(*kind, *index)
            .map(|name| EditOutcome::Removed { name }),
        HierarchyEdit::RenameEntity {
            kind,
            index,
            new_name,
        } => hierarchy
            .rename_entity(*kind, *index, new_name)
            .map(|_| EditOutcome::Renamed),
        HierarchyEdit::SetJudgment {
            matrix,
            row,
            col,
            value,
        } => hierarchy
            .set_matrix_entry(matrix, *row, *col, *value)
            .map(|_| EditOutcome::JudgmentSet),
    }
}
