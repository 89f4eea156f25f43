//! Hierarchy repository port.
//!
//! Defines the contract for persisting and retrieving hierarchies.
//! Implementations handle the actual storage (memory, files).
//!
//! # Design
//!
//! - **Document-oriented**: a hierarchy is stored whole, keyed by its id
//! - **Last write wins**: callers serialize writers per id (see the edit handler)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ahp::Hierarchy;
use crate::domain::foundation::{DomainError, ErrorCode, HierarchyId, Timestamp};

/// A hierarchy as stored, with its identity and last write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredHierarchy {
    pub id: HierarchyId,
    pub updated_at: Timestamp,
    pub hierarchy: Hierarchy,
}

impl StoredHierarchy {
    pub fn new(id: HierarchyId, hierarchy: Hierarchy) -> Self {
        Self {
            id,
            updated_at: Timestamp::now(),
            hierarchy,
        }
    }
}

/// Errors that can occur during hierarchy storage operations
#[derive(Debug, Error)]
pub enum HierarchyStorageError {
    #[error("Hierarchy not found: {0}")]
    NotFound(HierarchyId),

    #[error("Failed to serialize hierarchy: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize hierarchy: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<HierarchyStorageError> for DomainError {
    fn from(err: HierarchyStorageError) -> Self {
        let code = match err {
            HierarchyStorageError::NotFound(_) => ErrorCode::HierarchyNotFound,
            _ => ErrorCode::StorageError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Repository port for hierarchy persistence.
#[async_trait]
pub trait HierarchyRepository: Send + Sync {
    /// Insert or replace the hierarchy stored under `id`.
    ///
    /// # Errors
    ///
    /// - `SerializationFailed` or `IoError` on persistence failure
    async fn save(
        &self,
        id: HierarchyId,
        hierarchy: &Hierarchy,
    ) -> Result<StoredHierarchy, HierarchyStorageError>;

    /// Find a hierarchy by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(
        &self,
        id: HierarchyId,
    ) -> Result<Option<StoredHierarchy>, HierarchyStorageError>;

    /// All stored ids, sorted.
    async fn list_ids(&self) -> Result<Vec<HierarchyId>, HierarchyStorageError>;

    /// Delete a hierarchy.
    ///
    /// # Errors
    ///
    /// - `NotFound` if nothing is stored under `id`
    async fn delete(&self, id: HierarchyId) -> Result<(), HierarchyStorageError>;

    /// Check if a hierarchy exists.
    async fn exists(&self, id: HierarchyId) -> Result<bool, HierarchyStorageError>;
}
