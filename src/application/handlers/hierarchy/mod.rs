//! Hierarchy command handlers.
//!
//! Create, edit and analyze hierarchies held in a `HierarchyRepository`.

mod analyze_hierarchy;
mod create_hierarchy;
mod edit_hierarchy;
mod locks;

pub use analyze_hierarchy::{
    AnalyzeHierarchyCommand, AnalyzeHierarchyError, AnalyzeHierarchyHandler,
};
pub use create_hierarchy::{
    CreateHierarchyCommand, CreateHierarchyHandler, CreateHierarchyResult, HierarchyTemplate,
};
pub use edit_hierarchy::{
    EditHierarchyCommand, EditHierarchyError, EditHierarchyHandler, EditHierarchyResult,
    EditOutcome, HierarchyEdit,
};
pub use locks::HierarchyLocks;
