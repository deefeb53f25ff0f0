//! Experiment domain module for A/B testing
//!
//! Provides the experiment/variant naming types, the durable enrollment
//! record, and the `ExperimentsManager` contract the rendering directives
//! call into.

mod entity;
mod enrollment;
mod manager;
mod validation;

pub use entity::{Experiment, ExperimentName, Variant, VariantName};
pub use enrollment::Enrollment;
pub use manager::{EnrollError, ExperimentsManager};
pub use validation::{
    validate_experiment_name, validate_variant_name, ValidationError,
    MAX_EXPERIMENT_NAME_LENGTH, MAX_VARIANT_NAME_LENGTH,
};

#[cfg(test)]
pub use manager::mock::{FailingManager, FixedEnrollmentManager};
