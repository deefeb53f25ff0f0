//! Experiment and variant name validation

use thiserror::Error;

/// Maximum length for experiment names
pub const MAX_EXPERIMENT_NAME_LENGTH: usize = 100;

/// Maximum length for variant names
pub const MAX_VARIANT_NAME_LENGTH: usize = 100;

/// Validation errors for experiment and variant names
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Experiment name cannot be empty")]
    EmptyName,

    #[error("Experiment name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Experiment name cannot have leading or trailing whitespace")]
    UntrimmedName,

    #[error("Experiment name contains invalid character: {0:?}")]
    InvalidNameCharacter(char),

    #[error("Variant name cannot be empty")]
    EmptyVariantName,

    #[error("Variant name exceeds maximum length of {0} characters")]
    VariantNameTooLong(usize),

    #[error("Variant name cannot have leading or trailing whitespace")]
    UntrimmedVariantName,

    #[error("Variant name contains invalid character: {0:?}")]
    InvalidVariantNameCharacter(char),

    #[error("Experiment must declare at least one variant")]
    NoVariants,

    #[error("Duplicate variant name: '{0}'")]
    DuplicateVariantName(String),
}

/// Validate an experiment name
///
/// Names come straight out of template source, so the rules are deliberately
/// loose: non-empty, trimmed, no control characters, bounded length.
pub fn validate_experiment_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if name.len() > MAX_EXPERIMENT_NAME_LENGTH {
        return Err(ValidationError::NameTooLong(MAX_EXPERIMENT_NAME_LENGTH));
    }

    if name != name.trim() {
        return Err(ValidationError::UntrimmedName);
    }

    for ch in name.chars() {
        if ch.is_control() {
            return Err(ValidationError::InvalidNameCharacter(ch));
        }
    }

    Ok(())
}

/// Validate a variant name
pub fn validate_variant_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyVariantName);
    }

    if name.len() > MAX_VARIANT_NAME_LENGTH {
        return Err(ValidationError::VariantNameTooLong(MAX_VARIANT_NAME_LENGTH));
    }

    if name != name.trim() {
        return Err(ValidationError::UntrimmedVariantName);
    }

    for ch in name.chars() {
        if ch.is_control() {
            return Err(ValidationError::InvalidVariantNameCharacter(ch));
        }
    }

    Ok(())
}
