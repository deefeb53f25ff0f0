//! Durable enrollment records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{ExperimentName, Variant, VariantName};

/// A visitor's stable assignment to one variant of an experiment
///
/// Established once per (visitor, experiment) and kept stable across requests.
/// The render-scoped lookup caches the variant for one render pass; this record
/// is what outlives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    id: String,
    visitor_id: String,
    experiment: ExperimentName,
    variant: VariantName,
    enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    /// Create a new enrollment record with a generated id
    pub fn new(
        visitor_id: impl Into<String>,
        experiment: ExperimentName,
        variant: VariantName,
    ) -> Self {
        Self {
            id: format!("enr-{}", Uuid::new_v4()),
            visitor_id: visitor_id.into(),
            experiment,
            variant,
            enrolled_at: Utc::now(),
        }
    }

    /// Get the enrollment record id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the visitor id
    pub fn visitor_id(&self) -> &str {
        &self.visitor_id
    }

    /// Get the experiment name
    pub fn experiment(&self) -> &ExperimentName {
        &self.experiment
    }

    /// Get the enrolled variant name
    pub fn variant(&self) -> &VariantName {
        &self.variant
    }

    /// Get when the visitor was enrolled
    pub fn enrolled_at(&self) -> DateTime<Utc> {
        self.enrolled_at
    }

    /// Build the variant handle this enrollment resolves to
    pub fn to_variant(&self) -> Variant {
        Variant::new(self.experiment.clone(), self.variant.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_creation() {
        let enrollment = Enrollment::new(
            "visitor-1",
            ExperimentName::new("btn").unwrap(),
            VariantName::new("red").unwrap(),
        );

        assert!(enrollment.id().starts_with("enr-"));
        assert_eq!(enrollment.visitor_id(), "visitor-1");
        assert_eq!(enrollment.experiment().as_str(), "btn");
        assert_eq!(enrollment.variant().as_str(), "red");
    }

    #[test]
    fn test_to_variant() {
        let enrollment = Enrollment::new(
            "visitor-1",
            ExperimentName::new("btn").unwrap(),
            VariantName::new("blue").unwrap(),
        );

        let variant = enrollment.to_variant();
        assert_eq!(variant.experiment().as_str(), "btn");
        assert_eq!(variant.name().as_str(), "blue");
    }

    #[test]
    fn test_unique_ids() {
        let exp = ExperimentName::new("btn").unwrap();
        let var = VariantName::new("red").unwrap();

        let first = Enrollment::new("v", exp.clone(), var.clone());
        let second = Enrollment::new("v", exp, var);
        assert_ne!(first.id(), second.id());
    }
}
