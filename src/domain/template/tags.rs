//! The two experiment directives
//!
//! `ExperimentNode` declares an experiment and enrolls the current visitor;
//! `HypNode` renders its body only when the enrolled variant matches.

use tracing::debug;

use super::context::RenderContext;
use super::error::RenderError;
use super::node::NodeList;
use crate::domain::experiment::{ExperimentName, ValidationError, VariantName};

// ============================================================================
// ExperimentNode
// ============================================================================

/// Declaration directive: `{% experiment "name" variants "a,b,c" %}`
///
/// Renders to the empty string; its effect is declaring the experiment with
/// the manager, enrolling the visitor, and recording the returned variant in
/// the render-scoped lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentNode {
    experiment: ExperimentName,
    variants: Vec<VariantName>,
}

impl ExperimentNode {
    /// Create a declaration node
    pub fn new(experiment: ExperimentName, variants: Vec<VariantName>) -> Self {
        Self {
            experiment,
            variants,
        }
    }

    /// Parse a comma-separated variant list
    ///
    /// Splits on `,`, trims whitespace, drops empty entries, preserves order,
    /// and rejects duplicates: `"red, blue ,,green"` -> `[red, blue, green]`.
    pub fn parse_variants(csv: &str) -> Result<Vec<VariantName>, ValidationError> {
        let mut variants = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for piece in csv.split(',') {
            let trimmed = piece.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !seen.insert(trimmed) {
                return Err(ValidationError::DuplicateVariantName(trimmed.to_string()));
            }
            variants.push(VariantName::new(trimmed)?);
        }

        Ok(variants)
    }

    /// Get the experiment name
    pub fn experiment(&self) -> &ExperimentName {
        &self.experiment
    }

    /// Get the declared variant names
    pub fn variants(&self) -> &[VariantName] {
        &self.variants
    }

    /// Declare the experiment and enroll the visitor; render nothing
    ///
    /// Manager failures propagate as-is with no retry; they are fatal to the
    /// render pass.
    pub fn render(&self, context: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let manager = context.manager()?;

        let variant = manager.declare_and_enroll(&self.experiment, &self.variants)?;

        debug!(
            experiment = %self.experiment,
            variant = %variant.name(),
            "Declared experiment and enrolled visitor"
        );

        context.record_enrollment(&self.experiment, variant);
        Ok(String::new())
    }
}

// ============================================================================
// HypNode
// ============================================================================

/// Conditional directive: `{% hyp "name" "variant" %}...{% endhyp %}`
///
/// Renders its body only when the variant enrolled for the experiment matches
/// the target exactly; otherwise the body is skipped entirely, side effects
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypNode {
    experiment: ExperimentName,
    variant: VariantName,
    body: NodeList,
}

impl HypNode {
    /// Create a conditional node
    pub fn new(experiment: ExperimentName, variant: VariantName, body: NodeList) -> Self {
        Self {
            experiment,
            variant,
            body,
        }
    }

    /// Get the experiment name
    pub fn experiment(&self) -> &ExperimentName {
        &self.experiment
    }

    /// Get the target variant name
    pub fn variant(&self) -> &VariantName {
        &self.variant
    }

    /// Get the nested body
    pub fn body(&self) -> &NodeList {
        &self.body
    }

    /// Render the body if the enrolled variant matches, else nothing
    pub fn render(&self, context: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let enrolled = context
            .enrolled_variant(&self.experiment)
            .ok_or_else(|| RenderError::undeclared_experiment(self.experiment.as_str()))?
            .name()
            .clone();

        if enrolled == self.variant {
            self.body.render(context)
        } else {
            debug!(
                experiment = %self.experiment,
                target = %self.variant,
                enrolled = %enrolled,
                "Skipping hyp block for non-enrolled variant"
            );
            Ok(String::new())
        }
    }
}
