//! Experiment domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::{validate_experiment_name, validate_variant_name, ValidationError};

// ============================================================================
// ExperimentName
// ============================================================================

/// Unique name of an experiment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Create a new experiment name with validation
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_experiment_name(&name)?;
        Ok(Self(name))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExperimentName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExperimentName> for String {
    fn from(name: ExperimentName) -> Self {
        name.0
    }
}

impl fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ExperimentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// VariantName
// ============================================================================

/// Name of a variant within an experiment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariantName(String);

impl VariantName {
    /// Create a new variant name with validation
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_variant_name(&name)?;
        Ok(Self(name))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VariantName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VariantName> for String {
    fn from(name: VariantName) -> Self {
        name.0
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VariantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Variant
// ============================================================================

/// The enrollment handle returned by an experiments manager
///
/// Identifies one arm of one experiment. The conditional directive compares
/// `name()` against its target by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    experiment: ExperimentName,
    name: VariantName,
}

impl Variant {
    /// Create a new variant handle
    pub fn new(experiment: ExperimentName, name: VariantName) -> Self {
        Self { experiment, name }
    }

    /// Get the owning experiment's name
    pub fn experiment(&self) -> &ExperimentName {
        &self.experiment
    }

    /// Get the variant name
    pub fn name(&self) -> &VariantName {
        &self.name
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.experiment, self.name)
    }
}

// ============================================================================
// Experiment
// ============================================================================

/// A declared experiment: a name plus its ordered set of variant names
///
/// Variant order is declaration order only; it never biases enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    name: ExperimentName,
    variants: Vec<VariantName>,
    declared_at: DateTime<Utc>,
}

impl Experiment {
    /// Create a new experiment, validating the variant set
    pub fn new(
        name: ExperimentName,
        variants: Vec<VariantName>,
    ) -> Result<Self, ValidationError> {
        if variants.is_empty() {
            return Err(ValidationError::NoVariants);
        }

        let mut seen = std::collections::HashSet::new();
        for variant in &variants {
            if !seen.insert(variant.as_str()) {
                return Err(ValidationError::DuplicateVariantName(
                    variant.as_str().to_string(),
                ));
            }
        }

        Ok(Self {
            name,
            variants,
            declared_at: Utc::now(),
        })
    }

    /// Get the experiment name
    pub fn name(&self) -> &ExperimentName {
        &self.name
    }

    /// Get the declared variant names, in declaration order
    pub fn variants(&self) -> &[VariantName] {
        &self.variants
    }

    /// Get when the experiment was first declared
    pub fn declared_at(&self) -> DateTime<Utc> {
        self.declared_at
    }

    /// Check whether a variant set matches this experiment's declaration
    pub fn has_variant_set(&self, variants: &[VariantName]) -> bool {
        self.variants == variants
    }

    /// Get the variant handle at the given index
    pub fn variant_at(&self, index: usize) -> Option<Variant> {
        self.variants
            .get(index)
            .map(|v| Variant::new(self.name.clone(), v.clone()))
    }
}
