//! Storage Adapters
//!
//! Implementations of the HierarchyRepository port.
//!
//! ## Available Adapters
//!
//! - **FileHierarchyStorage** - One YAML or JSON document per hierarchy
//! - **InMemoryHierarchyStorage** - Stores hierarchies in memory (testing/development)
//!
//! `read_hierarchy_file` / `write_hierarchy_file` handle standalone documents
//! outside any repository.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileHierarchyStorage, InMemoryHierarchyStorage};
//!
//! // Production: file-based storage
//! let storage = FileHierarchyStorage::new("./data/hierarchies", StorageFormat::Yaml);
//!
//! // Testing: in-memory storage
//! let storage = InMemoryHierarchyStorage::new();
//! ```

mod file_hierarchy_storage;
mod hierarchy_document;
mod in_memory_hierarchy_storage;

pub use file_hierarchy_storage::FileHierarchyStorage;
pub use hierarchy_document::{read_hierarchy_file, write_hierarchy_file};
pub use in_memory_hierarchy_storage::InMemoryHierarchyStorage;
