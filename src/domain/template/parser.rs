//! Template source compilation
//!
//! Lexes `{% ... %}` tags out of the source, then builds the node tree. Block
//! directives collect nested content up to and including their terminator tag;
//! the terminator itself never reaches the compiled stream.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ParseError;
use super::node::{Node, NodeList};
use super::tags::{ExperimentNode, HypNode};
use super::token::split_tag_contents;
use crate::domain::experiment::{ExperimentName, VariantName};

/// Matches one `{% ... %}` tag, contents trimmed by the capture
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{%\s*(.*?)\s*%\}").unwrap());

/// Opening delimiter, used to detect tags that never close
const TAG_OPEN: &str = "{%";

/// A lexed segment of template source
#[derive(Debug, Clone)]
enum Segment {
    Text(String),
    Tag(String),
}

/// Compile template source into a node list
pub fn parse_template(source: &str) -> Result<NodeList, ParseError> {
    let segments = lex(source)?;
    let mut parser = TagParser::new(segments);
    let nodes = parser.parse_nodes(None)?;
    Ok(nodes)
}

/// Split source into literal text and tag segments
fn lex(source: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for captures in TAG_PATTERN.captures_iter(source) {
        let tag_match = captures.get(0).ok_or(ParseError::EmptyTag)?;
        let text = &source[cursor..tag_match.start()];

        push_text(&mut segments, text, cursor)?;

        let contents = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        segments.push(Segment::Tag(contents));

        cursor = tag_match.end();
    }

    push_text(&mut segments, &source[cursor..], cursor)?;

    Ok(segments)
}

/// Record a literal text segment, rejecting stray opening delimiters
fn push_text(segments: &mut Vec<Segment>, text: &str, offset: usize) -> Result<(), ParseError> {
    if let Some(open) = text.find(TAG_OPEN) {
        return Err(ParseError::UnterminatedTag(offset + open));
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
    Ok(())
}

/// Builds the node tree from lexed segments
struct TagParser {
    segments: Vec<Segment>,
    pos: usize,
}

impl TagParser {
    fn new(segments: Vec<Segment>) -> Self {
        Self { segments, pos: 0 }
    }

    /// Parse nodes until the end of input or the given terminator tag
    ///
    /// When a terminator is given, it is consumed and excluded from the
    /// returned list; running out of input first is an unclosed block.
    fn parse_nodes(&mut self, until: Option<&str>) -> Result<NodeList, ParseError> {
        let mut nodes = Vec::new();

        while self.pos < self.segments.len() {
            let segment = self.segments[self.pos].clone();
            self.pos += 1;

            match segment {
                Segment::Text(text) => nodes.push(Node::Text(text)),
                Segment::Tag(contents) => {
                    let args = split_tag_contents(&contents);
                    let head = args.first().ok_or(ParseError::EmptyTag)?.clone();

                    match head.as_str() {
                        "experiment" => {
                            nodes.push(Node::Experiment(parse_experiment(&args)?));
                        }
                        "hyp" => {
                            nodes.push(Node::Hyp(self.parse_hyp(&args)?));
                        }
                        "endhyp" => {
                            check_arity("endhyp", &args, 0)?;
                            if until == Some("endhyp") {
                                return Ok(NodeList::new(nodes));
                            }
                            return Err(ParseError::UnexpectedTag(head.clone()));
                        }
                        _ => return Err(ParseError::UnknownTag(head.clone())),
                    }
                }
            }
        }

        if let Some(terminator) = until {
            return Err(ParseError::UnclosedBlock {
                tag: "hyp".to_string(),
                terminator: terminator.to_string(),
            });
        }

        Ok(NodeList::new(nodes))
    }

    /// Parse a `hyp` tag and collect its body up to the matching `endhyp`
    fn parse_hyp(&mut self, args: &[String]) -> Result<HypNode, ParseError> {
        check_arity("hyp", args, 2)?;

        let experiment = ExperimentName::new(args[1].clone())?;
        let variant = VariantName::new(args[2].clone())?;
        let body = self.parse_nodes(Some("endhyp"))?;

        Ok(HypNode::new(experiment, variant, body))
    }
}

/// Parse an `experiment` tag: `experiment <name> variants <csv>`
fn parse_experiment(args: &[String]) -> Result<ExperimentNode, ParseError> {
    check_arity("experiment", args, 3)?;

    if args[2] != "variants" {
        return Err(ParseError::ExpectedVariantsKeyword {
            found: args[2].clone(),
        });
    }

    let experiment = ExperimentName::new(args[1].clone())?;
    let variants = ExperimentNode::parse_variants(&args[3])?;

    Ok(ExperimentNode::new(experiment, variants))
}

/// Enforce an exact argument count after the tag head
fn check_arity(tag: &str, args: &[String], expected: usize) -> Result<(), ParseError> {
    let found = args.len().saturating_sub(1);
    if found != expected {
        return Err(ParseError::ArgumentCount {
            tag: tag.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}
