//! Hierarchy storage configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;

/// Where and how hierarchies are persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one file per hierarchy
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Serialization format of stored files
    #[serde(default)]
    pub format: StorageFormat,
}

/// On-disk document format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Yaml,
    Json,
}

impl StorageFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            StorageFormat::Yaml => "yaml",
            StorageFormat::Json => "json",
        }
    }

    /// Picks the format from a file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => StorageFormat::Json,
            _ => StorageFormat::Yaml,
        }
    }
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.data_dir"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            format: StorageFormat::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/hierarchies")
}
