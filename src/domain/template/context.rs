//! Per-request render context and its enrollment lookup

use std::collections::HashMap;

use tracing::error;

use super::error::ConfigurationError;
use crate::domain::experiment::{ExperimentName, ExperimentsManager, Variant};

/// Reserved namespace prefix for enrollment entries in the render-scoped
/// lookup, keeping them apart from anything else a host might store
pub const ENROLLMENT_KEY_PREFIX: &str = "__experiment__";

/// The host request as seen by the rendering directives
///
/// Carries the experiments manager the host installed for the current
/// visitor, or `None` when that wiring is missing.
#[derive(Debug, Clone, Copy)]
pub struct RequestScope<'a> {
    manager: Option<&'a dyn ExperimentsManager>,
}

impl<'a> RequestScope<'a> {
    /// Create a request scope with an experiments manager installed
    pub fn new(manager: &'a dyn ExperimentsManager) -> Self {
        Self {
            manager: Some(manager),
        }
    }

    /// Create a request scope without an experiments manager
    ///
    /// Models a host that wired the request into the context but never
    /// installed the manager; rendering an experiment tag against it fails
    /// with [`ConfigurationError::MissingManager`].
    pub fn without_manager() -> Self {
        Self { manager: None }
    }

    /// Get the installed manager, if any
    pub fn manager(&self) -> Option<&'a dyn ExperimentsManager> {
        self.manager
    }
}

/// The ambient per-request rendering environment
///
/// Created per request and destroyed at the end of the render pass. Owns the
/// render-scoped enrollment lookup: written once per experiment by the
/// declaration directive, read any number of times by conditional directives
/// later in the same pass. The lookup is threaded explicitly through
/// rendering; it is never global state.
#[derive(Debug)]
pub struct RenderContext<'a> {
    request: Option<RequestScope<'a>>,
    enrollments: HashMap<String, Variant>,
}

impl<'a> RenderContext<'a> {
    /// Create a context with no request scope wired in
    pub fn new() -> Self {
        Self {
            request: None,
            enrollments: HashMap::new(),
        }
    }

    /// Create a context for the given request scope
    pub fn with_request(request: RequestScope<'a>) -> Self {
        Self {
            request: Some(request),
            enrollments: HashMap::new(),
        }
    }

    /// Resolve the experiments manager for this render pass
    ///
    /// Fails with a distinguishable kind for each missing layer: no request
    /// scope at all, or a request scope without a manager.
    pub fn manager(&self) -> Result<&'a dyn ExperimentsManager, ConfigurationError> {
        let request = self.request.as_ref().ok_or_else(|| {
            error!("{}", ConfigurationError::MissingRequest);
            ConfigurationError::MissingRequest
        })?;

        request.manager().ok_or_else(|| {
            error!("{}", ConfigurationError::MissingManager);
            ConfigurationError::MissingManager
        })
    }

    /// Record the enrolled variant for an experiment
    ///
    /// A later declaration for the same name overwrites the entry with the
    /// manager's authoritative return value.
    pub fn record_enrollment(&mut self, experiment: &ExperimentName, variant: Variant) {
        self.enrollments
            .insert(Self::enrollment_key(experiment), variant);
    }

    /// Look up the variant recorded for an experiment in this render pass
    pub fn enrolled_variant(&self, experiment: &ExperimentName) -> Option<&Variant> {
        self.enrollments.get(&Self::enrollment_key(experiment))
    }

    fn enrollment_key(experiment: &ExperimentName) -> String {
        format!("{ENROLLMENT_KEY_PREFIX}{experiment}")
    }
}

impl Default for RenderContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}
