//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnalyzeHierarchyCommand, AnalyzeHierarchyError, AnalyzeHierarchyHandler,
    CreateHierarchyCommand, CreateHierarchyHandler, CreateHierarchyResult, EditHierarchyCommand,
    EditHierarchyError, EditHierarchyHandler, EditHierarchyResult, EditOutcome, HierarchyEdit,
    HierarchyLocks, HierarchyTemplate,
};
