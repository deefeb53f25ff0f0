//! The experiments manager collaborator contract

use std::fmt::Debug;
use thiserror::Error;

use super::entity::{ExperimentName, Variant, VariantName};
use super::validation::ValidationError;

/// Errors raised while declaring an experiment or enrolling a visitor
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnrollError {
    #[error("Experiment '{experiment}' declares no variants")]
    NoVariants { experiment: String },

    #[error(
        "Experiment '{experiment}' was already declared with variants {declared:?}, \
         redeclared with {requested:?}"
    )]
    VariantSetConflict {
        experiment: String,
        declared: Vec<String>,
        requested: Vec<String>,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Enrollment store error: {message}")]
    Store { message: String },
}

impl EnrollError {
    pub fn no_variants(experiment: impl Into<String>) -> Self {
        Self::NoVariants {
            experiment: experiment.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

/// The single operation the rendering core requires from its host
///
/// Declares the experiment's variant set (idempotent when redeclared with the
/// same set) and returns the variant the current visitor is enrolled in,
/// enrolling them first if needed. The manager owns durable enrollment state;
/// implementations are expected to be cheap to call once per declaration
/// directive and safe to share across requests.
pub trait ExperimentsManager: Debug {
    fn declare_and_enroll(
        &self,
        experiment: &ExperimentName,
        variants: &[VariantName],
    ) -> Result<Variant, EnrollError>;
}
