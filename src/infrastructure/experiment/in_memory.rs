//! In-memory experiments manager
//!
//! `ExperimentStore` holds the durable, cross-request state: declared
//! experiments and per-visitor enrollments. `manager_for` binds the store to
//! one visitor, producing the `ExperimentsManager` handle the host installs
//! on the request.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use super::hashing::EnrollmentHasher;
use crate::domain::experiment::{
    EnrollError, Enrollment, Experiment, ExperimentName, ExperimentsManager, Variant, VariantName,
};

#[derive(Debug, Default)]
struct StoreInner {
    experiments: HashMap<ExperimentName, Experiment>,
    enrollments: HashMap<(String, ExperimentName), Enrollment>,
}

/// Shared in-memory experiment and enrollment state
///
/// Cheap to clone; clones share the same underlying state. Safe to share
/// across request-handling threads.
#[derive(Debug, Clone, Default)]
pub struct ExperimentStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl ExperimentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the store to one visitor, producing their experiments manager
    pub fn manager_for(&self, visitor_id: impl Into<String>) -> VisitorExperiments {
        VisitorExperiments {
            store: self.clone(),
            visitor_id: visitor_id.into(),
        }
    }

    /// Get a declared experiment by name
    pub fn experiment(&self, name: &ExperimentName) -> Option<Experiment> {
        self.inner.read().ok()?.experiments.get(name).cloned()
    }

    /// Get a visitor's enrollment in an experiment
    pub fn enrollment(&self, visitor_id: &str, name: &ExperimentName) -> Option<Enrollment> {
        self.inner
            .read()
            .ok()?
            .enrollments
            .get(&(visitor_id.to_string(), name.clone()))
            .cloned()
    }

    /// Declare an experiment and enroll the visitor, both idempotently
    fn declare_and_enroll(
        &self,
        visitor_id: &str,
        experiment: &ExperimentName,
        variants: &[VariantName],
    ) -> Result<Variant, EnrollError> {
        if variants.is_empty() {
            return Err(EnrollError::no_variants(experiment.as_str()));
        }

        let mut inner = self
            .inner
            .write()
            .map_err(|e| EnrollError::store(format!("Failed to acquire write lock: {}", e)))?;

        // Register the experiment, or verify the redeclared variant set.
        match inner.experiments.get(experiment) {
            Some(existing) => {
                if !existing.has_variant_set(variants) {
                    return Err(EnrollError::VariantSetConflict {
                        experiment: experiment.as_str().to_string(),
                        declared: existing
                            .variants()
                            .iter()
                            .map(|v| v.as_str().to_string())
                            .collect(),
                        requested: variants.iter().map(|v| v.as_str().to_string()).collect(),
                    });
                }
            }
            None => {
                let declared = Experiment::new(experiment.clone(), variants.to_vec())?;
                info!(experiment = %experiment, variants = variants.len(), "Experiment declared");
                inner.experiments.insert(experiment.clone(), declared);
            }
        }

        // Return the stable enrollment if one exists.
        let key = (visitor_id.to_string(), experiment.clone());
        if let Some(existing) = inner.enrollments.get(&key) {
            debug!(
                visitor_id = %visitor_id,
                experiment = %experiment,
                variant = %existing.variant(),
                "Returning existing enrollment"
            );
            return Ok(existing.to_variant());
        }

        // First visit: hash the visitor into a bucket and persist it.
        let bucket = EnrollmentHasher::bucket(visitor_id, experiment.as_str(), variants.len());
        let variant_name = variants[bucket].clone();
        let enrollment = Enrollment::new(visitor_id, experiment.clone(), variant_name);

        info!(
            visitor_id = %visitor_id,
            experiment = %experiment,
            variant = %enrollment.variant(),
            "Visitor enrolled"
        );

        let variant = enrollment.to_variant();
        inner.enrollments.insert(key, enrollment);

        Ok(variant)
    }
}

/// Per-visitor handle onto an `ExperimentStore`
///
/// This is what the host wires into the request scope for each request.
#[derive(Debug, Clone)]
pub struct VisitorExperiments {
    store: ExperimentStore,
    visitor_id: String,
}

impl VisitorExperiments {
    /// Get the visitor this handle is bound to
    pub fn visitor_id(&self) -> &str {
        &self.visitor_id
    }
}

impl ExperimentsManager for VisitorExperiments {
    fn declare_and_enroll(
        &self,
        experiment: &ExperimentName,
        variants: &[VariantName],
    ) -> Result<Variant, EnrollError> {
        self.store
            .declare_and_enroll(&self.visitor_id, experiment, variants)
    }
}
