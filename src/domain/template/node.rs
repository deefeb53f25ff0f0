//! Compiled template nodes and the render driver

use super::context::RenderContext;
use super::error::{ParseError, RenderError};
use super::parser;
use super::tags::{ExperimentNode, HypNode};

/// One compiled template node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, passed through untouched
    Text(String),
    /// Declaration directive
    Experiment(ExperimentNode),
    /// Conditional-render directive with its nested body
    Hyp(HypNode),
}

impl Node {
    /// Render this node against the given context
    pub fn render(&self, context: &mut RenderContext<'_>) -> Result<String, RenderError> {
        match self {
            Node::Text(text) => Ok(text.clone()),
            Node::Experiment(node) => node.render(context),
            Node::Hyp(node) => node.render(context),
        }
    }
}

/// An ordered list of nodes rendered in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeList(Vec<Node>);

impl NodeList {
    /// Create a node list
    pub fn new(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }

    /// Get the nodes
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    /// Render every node in order, concatenating the output
    ///
    /// The first failing node aborts the pass; errors propagate untouched.
    pub fn render(&self, context: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let mut output = String::new();
        for node in &self.0 {
            output.push_str(&node.render(context)?);
        }
        Ok(output)
    }
}

/// A compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: NodeList,
}

impl Template {
    /// Compile template source
    ///
    /// All syntax faults, including directive arity, surface here, before any
    /// render occurs.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let nodes = parser::parse_template(source)?;
        Ok(Self { nodes })
    }

    /// Get the compiled node list
    pub fn nodes(&self) -> &NodeList {
        &self.nodes
    }

    /// Render the template against a per-request context
    pub fn render(&self, context: &mut RenderContext<'_>) -> Result<String, RenderError> {
        self.nodes.render(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_node_renders_verbatim() {
        let mut context = RenderContext::new();
        let node = Node::Text("hello".to_string());
        assert_eq!(node.render(&mut context).unwrap(), "hello");
    }

    #[test]
    fn test_node_list_concatenates_in_order() {
        let mut context = RenderContext::new();
        let list = NodeList::new(vec![
            Node::Text("a".to_string()),
            Node::Text("b".to_string()),
            Node::Text("c".to_string()),
        ]);
        assert_eq!(list.render(&mut context).unwrap(), "abc");
    }

    #[test]
    fn test_empty_node_list() {
        let mut context = RenderContext::new();
        assert_eq!(NodeList::default().render(&mut context).unwrap(), "");
    }

    #[test]
    fn test_plain_text_template() {
        let template = Template::parse("just text, no tags").unwrap();
        let mut context = RenderContext::new();
        assert_eq!(
            template.render(&mut context).unwrap(),
            "just text, no tags"
        );
    }
}
