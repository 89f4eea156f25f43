//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `HierarchyRepository` - Persistence of hierarchies keyed by id
//! - `ReportExporter` - Rendering of analysis reports (CSV, JSON)

mod hierarchy_repository;
mod report_exporter;

pub use hierarchy_repository::{HierarchyRepository, HierarchyStorageError, StoredHierarchy};
pub use report_exporter::{ExportError, ReportExporter};
