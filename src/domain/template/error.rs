//! Template compile-time and render-time errors
//!
//! All three families propagate to the caller of the render pass; nothing is
//! caught or downgraded internally, and there is no partial-render fallback.

use thiserror::Error;

use crate::domain::experiment::{EnrollError, ValidationError};

/// Errors raised while compiling template source, before any render occurs
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "'{tag}' tag requires exactly {expected} arguments, found {found}, \
         e.g. {{% experiment \"signup_button\" variants \"red,blue\" %}}"
    )]
    ArgumentCount {
        tag: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "'experiment' tag requires the literal keyword 'variants' before the \
         variant list, found '{found}'"
    )]
    ExpectedVariantsKeyword { found: String },

    #[error("Unknown tag '{0}'")]
    UnknownTag(String),

    #[error("Unexpected tag '{0}' outside of its block")]
    UnexpectedTag(String),

    #[error("Unclosed '{tag}' block: expected '{terminator}' before end of template")]
    UnclosedBlock { tag: String, terminator: String },

    #[error("Unterminated tag: '{{%' at offset {0} has no matching '%}}'")]
    UnterminatedTag(usize),

    #[error("Empty tag: '{{% %}}' contains no tag name")]
    EmptyTag,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Host wiring faults detected at render time
///
/// The two kinds are deliberately distinguishable so an operator can tell
/// which half of the wiring is missing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "Render context has no request scope. Wire the current request into \
         the context before rendering experiment tags."
    )]
    MissingRequest,

    #[error(
        "Request scope has no experiments manager. Install the experiments \
         manager on the request before rendering experiment tags."
    )]
    MissingManager,
}

/// Errors raised while rendering a compiled template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(
        "Experiment '{experiment}' has not been declared. Declare it and \
         supply variant names with an 'experiment' tag before using 'hyp' tags."
    )]
    UndeclaredExperiment { experiment: String },

    #[error(transparent)]
    Enroll(#[from] EnrollError),
}

impl RenderError {
    pub fn undeclared_experiment(experiment: impl Into<String>) -> Self {
        Self::UndeclaredExperiment {
            experiment: experiment.into(),
        }
    }
}
