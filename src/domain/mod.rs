//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (scores, dimensions, IDs, errors, state machine trait)
//! - `catalog` - The ordered stage definitions and their prompt builders
//! - `analysis` - Session aggregate, score extraction and display text
//! - `navigation` - Result view state machine

pub mod analysis;
pub mod catalog;
pub mod foundation;
pub mod navigation;
