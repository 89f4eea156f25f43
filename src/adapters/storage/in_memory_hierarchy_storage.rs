//! In-Memory Hierarchy Storage Adapter
//!
//! Stores hierarchies in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ahp::Hierarchy;
use crate::domain::foundation::HierarchyId;
use crate::ports::{HierarchyRepository, HierarchyStorageError, StoredHierarchy};

/// In-memory storage for hierarchies
#[derive(Debug, Clone)]
pub struct InMemoryHierarchyStorage {
    hierarchies: Arc<RwLock<HashMap<HierarchyId, StoredHierarchy>>>,
}

impl InMemoryHierarchyStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            hierarchies: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.hierarchies.write().await.clear();
    }

    /// Get the number of stored hierarchies
    pub async fn hierarchy_count(&self) -> usize {
        self.hierarchies.read().await.len()
    }
}

impl Default for InMemoryHierarchyStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HierarchyRepository for InMemoryHierarchyStorage {
    async fn save(
        &self,
        id: HierarchyId,
        hierarchy: &Hierarchy,
    ) -> Result<StoredHierarchy, HierarchyStorageError> {
        let stored = StoredHierarchy::new(id, hierarchy.clone());
        self.hierarchies.write().await.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: HierarchyId,
    ) -> Result<Option<StoredHierarchy>, HierarchyStorageError> {
        Ok(self.hierarchies.read().await.get(&id).cloned())
    }

    async fn list_ids(&self) -> Result<Vec<HierarchyId>, HierarchyStorageError> {
        let mut ids: Vec<HierarchyId> = self.hierarchies.read().await.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    async fn delete(&self, id: HierarchyId) -> Result<(), HierarchyStorageError> {
        self.hierarchies
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(HierarchyStorageError::NotFound(id))
    }

    async fn exists(&self, id: HierarchyId) -> Result<bool, HierarchyStorageError> {
        Ok(self.hierarchies.read().await.contains_key(&id))
    }
}
