//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `ahp` - Pairwise comparison matrices, priorities, consistency and ranking

pub mod ahp;
pub mod foundation;
