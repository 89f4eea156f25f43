//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod hierarchy;

pub use hierarchy::{
    AnalyzeHierarchyCommand, AnalyzeHierarchyError, AnalyzeHierarchyHandler,
    CreateHierarchyCommand, CreateHierarchyHandler, CreateHierarchyResult, EditHierarchyCommand,
    EditHierarchyError, EditHierarchyHandler, EditHierarchyResult, EditOutcome, HierarchyEdit,
    HierarchyLocks, HierarchyTemplate,
};
