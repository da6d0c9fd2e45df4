//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the problem analysis domain.

mod dimension;
mod errors;
mod ids;
mod score;
mod state_machine;
mod timestamp;

pub use dimension::Dimension;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AnalysisId;
pub use score::{DifficultyLevel, Score};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
