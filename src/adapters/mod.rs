//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Hierarchy repositories (in-memory, files)
//! - `export` - Report renderers (CSV, JSON)

pub mod export;
pub mod storage;

pub use export::{exporter_for, CsvReportExporter, JsonReportExporter};
pub use storage::{
    read_hierarchy_file, write_hierarchy_file, FileHierarchyStorage, InMemoryHierarchyStorage,
};
