//! Domain layer - Core enrollment and rendering logic

pub mod experiment;
pub mod template;

pub use experiment::{
    validate_experiment_name, validate_variant_name, EnrollError, Enrollment, Experiment,
    ExperimentName, ExperimentsManager, ValidationError, Variant, VariantName,
};
pub use template::{
    ConfigurationError, ExperimentNode, HypNode, Node, NodeList, ParseError, RenderContext,
    RenderError, RequestScope, Template,
};
