//! File-based Hierarchy Storage Adapter
//!
//! Stores each hierarchy as one YAML or JSON document named after its id.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::config::StorageFormat;
use crate::domain::ahp::Hierarchy;
use crate::domain::foundation::HierarchyId;
use crate::ports::{HierarchyRepository, HierarchyStorageError, StoredHierarchy};

/// File-based storage for hierarchies
#[derive(Debug, Clone)]
pub struct FileHierarchyStorage {
    base_path: PathBuf,
    format: StorageFormat,
}

impl FileHierarchyStorage {
    /// Create a new file storage with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileHierarchyStorage::new("./data/hierarchies", StorageFormat::Yaml);
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, format: StorageFormat) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the document path for a hierarchy
    fn file_path(&self, id: HierarchyId) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", id, self.format.extension()))
    }

    /// Ensure directory exists
    async fn ensure_dir(&self) -> Result<(), HierarchyStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| HierarchyStorageError::IoError(e.to_string()))
    }

    fn encode(&self, stored: &StoredHierarchy) -> Result<String, HierarchyStorageError> {
        match self.format {
            StorageFormat::Yaml => serde_yaml::to_string(stored)
                .map_err(|e| HierarchyStorageError::SerializationFailed(e.to_string())),
            StorageFormat::Json => serde_json::to_string_pretty(stored)
                .map_err(|e| HierarchyStorageError::SerializationFailed(e.to_string())),
        }
    }

    fn decode(&self, content: &str) -> Result<StoredHierarchy, HierarchyStorageError> {
        match self.format {
            StorageFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| HierarchyStorageError::DeserializationFailed(e.to_string())),
            StorageFormat::Json => serde_json::from_str(content)
                .map_err(|e| HierarchyStorageError::DeserializationFailed(e.to_string())),
        }
    }
}

#[async_trait]
impl HierarchyRepository for FileHierarchyStorage {
    async fn save(
        &self,
        id: HierarchyId,
        hierarchy: &Hierarchy,
    ) -> Result<StoredHierarchy, HierarchyStorageError> {
        self.ensure_dir().await?;

        let stored = StoredHierarchy::new(id, hierarchy.clone());
        let content = self.encode(&stored)?;
        let file_path = self.file_path(id);

        fs::write(&file_path, content)
            .await
            .map_err(|e| HierarchyStorageError::IoError(e.to_string()))?;

        debug!(hierarchy_id = %id, path = %file_path.display(), "Saved hierarchy");
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: HierarchyId,
    ) -> Result<Option<StoredHierarchy>, HierarchyStorageError> {
        let file_path = self.file_path(id);

        if !file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&file_path)
            .await
            .map_err(|e| HierarchyStorageError::IoError(e.to_string()))?;

        self.decode(&content).map(Some)
    }

    async fn list_ids(&self) -> Result<Vec<HierarchyId>, HierarchyStorageError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| HierarchyStorageError::IoError(e.to_string()))?;

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| HierarchyStorageError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.format.extension()) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match stem.parse::<HierarchyId>() {
                Ok(id) => ids.push(id),
                Err(_) => {
                    warn!(path = %path.display(), "Skipping file without a hierarchy id name")
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    async fn delete(&self, id: HierarchyId) -> Result<(), HierarchyStorageError> {
        let file_path = self.file_path(id);

        if !file_path.exists() {
            return Err(HierarchyStorageError::NotFound(id));
        }

        fs::remove_file(&file_path)
            .await
            .map_err(|e| HierarchyStorageError::IoError(e.to_string()))
    }

    async fn exists(&self, id: HierarchyId) -> Result<bool, HierarchyStorageError> {
        Ok(self.file_path(id).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::reference::reference_hierarchy;
    use crate::domain::ahp::MatrixRef;
    use tempfile::TempDir;

    fn storage(format: StorageFormat) -> (TempDir, FileHierarchyStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileHierarchyStorage::new(temp_dir.path().join("hierarchies"), format);
        (temp_dir, storage)
    }

    #[tokio::test]
    async fn test_save_and_load_yaml() {
        let (_temp_dir, storage) = storage(StorageFormat::Yaml);
        let id = HierarchyId::new();
        let hierarchy = reference_hierarchy().unwrap();

        storage.save(id, &hierarchy).await.unwrap();

        let path = storage.base_path().join(format!("{}.yaml", id));
        assert!(path.exists());

        let loaded = storage.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.hierarchy, hierarchy);
    }

    #[tokio::test]
    async fn test_save_and_load_json() {
        let (_temp_dir, storage) = storage(StorageFormat::Json);
        let id = HierarchyId::new();
        let mut hierarchy = reference_hierarchy().unwrap();
        hierarchy
            .set_matrix_entry(&MatrixRef::Criteria, 0, 3, 2.0)
            .unwrap();

        storage.save(id, &hierarchy).await.unwrap();

        let path = storage.base_path().join(format!("{}.json", id));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("\"goal\""));

        let loaded = storage.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.hierarchy, hierarchy);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let (_temp_dir, storage) = storage(StorageFormat::Yaml);
        assert!(storage.find_by_id(HierarchyId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_to_deserialize() {
        let (_temp_dir, storage) = storage(StorageFormat::Json);
        let id = HierarchyId::new();
        std::fs::create_dir_all(storage.base_path()).unwrap();
        let path = storage.base_path().join(format!("{}.json", id));
        std::fs::write(path, "{ not json").unwrap();

        let result = storage.find_by_id(id).await;
        assert!(matches!(result, Err(HierarchyStorageError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn test_list_ids_ignores_foreign_files() {
        let (_temp_dir, storage) = storage(StorageFormat::Yaml);
        let hierarchy = reference_hierarchy().unwrap();
        let first = HierarchyId::new();
        let second = HierarchyId::new();
        storage.save(first, &hierarchy).await.unwrap();
        storage.save(second, &hierarchy).await.unwrap();
        std::fs::write(storage.base_path().join("notes.yaml"), "x: 1").unwrap();
        std::fs::write(storage.base_path().join("readme.txt"), "hello").unwrap();

        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(storage.list_ids().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_list_ids_without_directory_is_empty() {
        let (_temp_dir, storage) = storage(StorageFormat::Yaml);
        assert!(storage.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_temp_dir, storage) = storage(StorageFormat::Yaml);
        let id = HierarchyId::new();
        storage.save(id, &reference_hierarchy().unwrap()).await.unwrap();

        assert!(storage.exists(id).await.unwrap());
        storage.delete(id).await.unwrap();
        assert!(!storage.exists(id).await.unwrap());
        assert!(matches!(
            storage.delete(id).await,
            Err(HierarchyStorageError::NotFound(_))
        ));
    }
}
