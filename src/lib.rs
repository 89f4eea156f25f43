//! AHP Engine - Analytic Hierarchy Process priority engine
//!
//! This crate turns pairwise comparison judgments into priority weights,
//! measures how consistent the judgments are, and ranks alternatives
//! against a goal through a criteria hierarchy.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
