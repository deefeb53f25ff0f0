//! Infrastructure layer for experiment enrollment
//!
//! Provides the deterministic enrollment hashing and the in-memory
//! experiments manager.

mod hashing;
mod in_memory;

pub use hashing::EnrollmentHasher;
pub use in_memory::{ExperimentStore, VisitorExperiments};
