//! abtag - Server-side A/B experiment enrollment through template directives
//!
//! Templates declare an experiment and its variants with an `experiment` tag,
//! then branch on the visitor's enrolled variant with `hyp` blocks:
//!
//! ```text
//! {% experiment "signup_button" variants "red,blue" %}
//! {% hyp "signup_button" "red" %}<button class="red">{% endhyp %}
//! {% hyp "signup_button" "blue" %}<button class="blue">{% endhyp %}
//! ```
//!
//! The declaration enrolls the current visitor through the host's
//! [`ExperimentsManager`] and caches the chosen variant in the per-request
//! [`RenderContext`]; each `hyp` block renders only when its target variant
//! matches. Enrollment is deterministic and stable per visitor, so the same
//! visitor keeps seeing the same arm across requests.
//!
//! # Example
//!
//! ```
//! use abtag::{ExperimentStore, RenderContext, RequestScope, Template};
//!
//! let source = concat!(
//!     r#"{% experiment "btn" variants "red,blue" %}"#,
//!     r#"{% hyp "btn" "red" %}R{% endhyp %}"#,
//!     r#"{% hyp "btn" "blue" %}B{% endhyp %}"#,
//! );
//! let template = Template::parse(source)?;
//!
//! let store = ExperimentStore::new();
//! let manager = store.manager_for("visitor-1");
//! let mut context = RenderContext::with_request(RequestScope::new(&manager));
//!
//! let output = template.render(&mut context)?;
//! assert!(output == "R" || output == "B");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{
    ConfigurationError, EnrollError, Enrollment, Experiment, ExperimentName, ExperimentsManager,
    ParseError, RenderContext, RenderError, RequestScope, Template, ValidationError, Variant,
    VariantName,
};
pub use infrastructure::{EnrollmentHasher, ExperimentStore, VisitorExperiments};
