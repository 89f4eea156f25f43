//! Standalone hierarchy documents (one file, format from its extension).
//!
//! Unlike the repository adapters these files carry no id or timestamp:
//! they are the plain hierarchy fields, for hand editing and exchange.

use std::path::Path;
use tokio::fs;

use crate::config::StorageFormat;
use crate::domain::ahp::Hierarchy;
use crate::ports::HierarchyStorageError;

/// Reads a hierarchy from a `.json`, `.yaml` or `.yml` file.
pub async fn read_hierarchy_file(path: &Path) -> Result<Hierarchy, HierarchyStorageError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| io_error(path, e))?;

    match StorageFormat::from_path(path) {
        StorageFormat::Json => serde_json::from_str(&content)
            .map_err(|e| HierarchyStorageError::DeserializationFailed(e.to_string())),
        StorageFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| HierarchyStorageError::DeserializationFailed(e.to_string())),
    }
}

/// Writes a hierarchy, creating parent directories as needed.
pub async fn write_hierarchy_file(
    path: &Path,
    hierarchy: &Hierarchy,
) -> Result<(), HierarchyStorageError> {
    let content = match StorageFormat::from_path(path) {
        StorageFormat::Json => serde_json::to_string_pretty(hierarchy)
            .map_err(|e| HierarchyStorageError::SerializationFailed(e.to_string()))?,
        StorageFormat::Yaml => serde_yaml::to_string(hierarchy)
            .map_err(|e| HierarchyStorageError::SerializationFailed(e.to_string()))?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| HierarchyStorageError::IoError(e.to_string()))?;
    }

    fs::write(path, content)
        .await
        .map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, err: std::io::Error) -> HierarchyStorageError {
    HierarchyStorageError::IoError(format!("{}: {}", path.display(), err))
}
