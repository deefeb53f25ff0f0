//! Infrastructure layer - Concrete collaborator implementations

pub mod experiment;

pub use experiment::{EnrollmentHasher, ExperimentStore, VisitorExperiments};
