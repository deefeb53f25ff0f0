//! Template directives for experiment enrollment
//!
//! Two directives are exposed to template authors:
//!
//! - `{% experiment "name" variants "a,b,c" %}` declares an experiment,
//!   enrolls the current visitor through the host's experiments manager, and
//!   renders nothing;
//! - `{% hyp "name" "variant" %}...{% endhyp %}` renders its block only when
//!   the visitor's enrolled variant matches.
//!
//! A declaration must execute before any conditional for the same experiment
//! within one render pass; the enrollment is cached in the render context and
//! read by every conditional that follows.

mod context;
mod error;
mod node;
mod parser;
mod tags;
mod token;

pub use context::{RenderContext, RequestScope, ENROLLMENT_KEY_PREFIX};
pub use error::{ConfigurationError, ParseError, RenderError};
pub use node::{Node, NodeList, Template};
pub use tags::{ExperimentNode, HypNode};
pub use token::split_tag_contents;

#[cfg(test)]
mod scenario_tests {
    //! End-to-end render scenarios over the full parse-then-render path

    use super::*;
    use crate::domain::experiment::{
        EnrollError, ExperimentsManager, FailingManager, FixedEnrollmentManager,
    };

    const TWO_VARIANT_TEMPLATE: &str = concat!(
        r#"{% experiment "btn" variants "red,blue" %}"#,
        r#"{% hyp "btn" "red" %}R{% endhyp %}"#,
        r#"{% hyp "btn" "blue" %}B{% endhyp %}"#,
    );

    fn render_with(
        manager: &dyn ExperimentsManager,
        source: &str,
    ) -> Result<String, RenderError> {
        let template = Template::parse(source).expect("template should parse");
        let mut context = RenderContext::with_request(RequestScope::new(manager));
        template.render(&mut context)
    }

    #[test]
    fn test_enrolled_into_red_renders_r() {
        let manager = FixedEnrollmentManager::new("red");
        assert_eq!(render_with(&manager, TWO_VARIANT_TEMPLATE).unwrap(), "R");
    }

    #[test]
    fn test_enrolled_into_blue_renders_b() {
        let manager = FixedEnrollmentManager::new("blue");
        assert_eq!(render_with(&manager, TWO_VARIANT_TEMPLATE).unwrap(), "B");
    }

    #[test]
    fn test_hyp_before_declaration_fails() {
        let source = concat!(
            r#"{% hyp "btn" "red" %}R{% endhyp %}"#,
            r#"{% experiment "btn" variants "red,blue" %}"#,
        );
        let manager = FixedEnrollmentManager::new("red");

        assert_eq!(
            render_with(&manager, source).unwrap_err(),
            RenderError::undeclared_experiment("btn")
        );
    }

    #[test]
    fn test_missing_variants_clause_fails_at_parse_time() {
        let result = Template::parse(r#"{% experiment "x" %}"#);
        assert!(matches!(
            result.unwrap_err(),
            ParseError::ArgumentCount { .. }
        ));
    }

    #[test]
    fn test_missing_request_and_missing_manager_are_distinct() {
        let template = Template::parse(TWO_VARIANT_TEMPLATE).unwrap();

        let mut no_request = RenderContext::new();
        let missing_request = template.render(&mut no_request).unwrap_err();
        assert_eq!(
            missing_request,
            RenderError::Configuration(ConfigurationError::MissingRequest)
        );

        let mut no_manager = RenderContext::with_request(RequestScope::without_manager());
        let missing_manager = template.render(&mut no_manager).unwrap_err();
        assert_eq!(
            missing_manager,
            RenderError::Configuration(ConfigurationError::MissingManager)
        );

        assert_ne!(missing_request, missing_manager);
    }

    #[test]
    fn test_non_matching_block_skips_nested_directives() {
        // The losing branch contains a hyp for an experiment that is never
        // declared; skipping must be total, so no error surfaces.
        let source = concat!(
            r#"{% experiment "btn" variants "red,blue" %}"#,
            r#"{% hyp "btn" "blue" %}"#,
            r#"{% hyp "never-declared" "x" %}boom{% endhyp %}"#,
            r#"{% endhyp %}"#,
            "after",
        );
        let manager = FixedEnrollmentManager::new("red");

        assert_eq!(render_with(&manager, source).unwrap(), "after");
    }

    #[test]
    fn test_matching_block_renders_nested_content() {
        let source = concat!(
            r#"{% experiment "btn" variants "red,blue" %}"#,
            r#"{% experiment "banner" variants "tall,short" %}"#,
            r#"{% hyp "btn" "red" %}outer {% hyp "banner" "red" %}inner{% endhyp %}{% endhyp %}"#,
        );
        // The one mock enrolls every experiment into "red", so both blocks match.
        let manager = FixedEnrollmentManager::new("red");

        assert_eq!(render_with(&manager, source).unwrap(), "outer inner");
    }

    #[test]
    fn test_declaration_renders_nothing() {
        let manager = FixedEnrollmentManager::new("red");
        let output =
            render_with(&manager, r#"x{% experiment "btn" variants "red,blue" %}y"#).unwrap();
        assert_eq!(output, "xy");
    }

    #[test]
    fn test_redeclaration_overwrites_with_manager_value() {
        let source = concat!(
            r#"{% experiment "btn" variants "red,blue" %}"#,
            r#"{% experiment "btn" variants "red,blue" %}"#,
            r#"{% hyp "btn" "red" %}R{% endhyp %}"#,
        );
        let manager = FixedEnrollmentManager::new("red");

        assert_eq!(render_with(&manager, source).unwrap(), "R");
        assert_eq!(manager.calls().len(), 2);
    }

    #[test]
    fn test_manager_failure_aborts_render() {
        let manager = FailingManager::new(EnrollError::store("backend down"));

        assert_eq!(
            render_with(&manager, TWO_VARIANT_TEMPLATE).unwrap_err(),
            RenderError::Enroll(EnrollError::store("backend down"))
        );
    }

    #[test]
    fn test_surrounding_text_passes_through() {
        let source = concat!(
            "header ",
            r#"{% experiment "btn" variants "red,blue" %}"#,
            r#"{% hyp "btn" "blue" %}B{% endhyp %}"#,
            " footer",
        );
        let manager = FixedEnrollmentManager::new("blue");

        assert_eq!(render_with(&manager, source).unwrap(), "header B footer");
    }
}
