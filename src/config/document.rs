//! Generic document parsing.
//!
//! Turns one configuration file into a [`RawNode`]: an ordered mapping from
//! element name to every value given under that name. Callers never see a
//! "sometimes a string, sometimes a list" value; [`RawNode::field`] reports
//! the occurrence count as a [`Field`] variant they can match on.
//!
//! Text is kept exactly as written; trimming is up to the field readers.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;

/// A single parsed value: either text or a nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Node(RawNode),
}

/// Parsed contents of one element, keyed by child name in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNode {
    entries: Vec<(String, Vec<Value>)>,
}

/// Occurrences of a named field inside one [`RawNode`].
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    Absent,
    One(&'a Value),
    Many(&'a [Value]),
}

impl<'a> Field<'a> {
    /// All occurrences in declaration order, regardless of arity.
    pub fn values(self) -> &'a [Value] {
        match self {
            Field::Absent => &[],
            Field::One(value) => std::slice::from_ref(value),
            Field::Many(values) => values,
        }
    }
}

static EMPTY: RawNode = RawNode { entries: Vec::new() };

impl RawNode {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared empty node, used where an empty element stands in for a block.
    pub fn empty_ref() -> &'static RawNode {
        &EMPTY
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn field(&self, name: &str) -> Field<'_> {
        match self.entries.iter().find(|(key, _)| key == name) {
            None => Field::Absent,
            Some((_, values)) if values.len() == 1 => Field::One(&values[0]),
            Some((_, values)) => Field::Many(values.as_slice()),
        }
    }

    /// Element names present in this node, in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn push(&mut self, name: &str, value: Value) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name.to_string(), vec![value])),
        }
    }
}

/// Read and parse a configuration document from disk.
pub fn parse_file(path: &Path) -> Result<RawNode, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_str(path, &text)
}

/// Parse document text. The root element's own name is not significant.
///
/// `path` is only used to label errors.
pub fn parse_str(path: &Path, text: &str) -> Result<RawNode, ConfigError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let document = match roxmltree::Document::parse_with_options(text, options) {
        Ok(document) => document,
        // Blank or comment-only input has nothing to process.
        Err(roxmltree::Error::NoRootNode) => return Ok(RawNode::empty()),
        Err(source) => {
            return Err(ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match convert(document.root_element()) {
        Value::Node(node) => Ok(node),
        Value::Text(text) if text.trim().is_empty() => Ok(RawNode::empty()),
        Value::Text(text) => Err(ConfigError::ExpectedBlock {
            file: path.to_path_buf(),
            element: "ircd",
            value: text.trim().to_string(),
        }),
    }
}

fn convert(element: roxmltree::Node<'_, '_>) -> Value {
    let mut children = element.children().filter(|n| n.is_element()).peekable();

    if children.peek().is_none() && element.attributes().next().is_none() {
        let text: String = element
            .children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();
        return Value::Text(text);
    }

    let mut node = RawNode::empty();
    for attribute in element.attributes() {
        node.push(attribute.name(), Value::Text(attribute.value().to_string()));
    }
    for child in children {
        node.push(child.tag_name().name(), convert(child));
    }
    Value::Node(node)
}
