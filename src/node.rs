//! Contains `Node`, the syntax tree produced by the parser.
//!
//! Every node knows where it came from: the source positions and the token
//! indices it covers. Nodes are built bottom-up and never mutated
//! afterwards; containers own their children.

use crate::token::Position;
use std::collections::BTreeMap;

/// The source extent of a node.
///
/// For containers `token_start` is the first token after the opening
/// bracket and `token_end` is the closing bracket. For a quoted string it
/// runs from the first body token to the closing quote. Scalars cover their
/// single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
    pub token_start: usize,
    pub token_end: usize,
}

impl Span {
    /// Whether `other` lies inside this span's token range.
    pub fn contains(&self, other: &Span) -> bool {
        self.token_start <= other.token_start && other.token_end <= self.token_end
    }
}

/// The payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Members keyed by string. Duplicate keys keep the last value.
    Object(BTreeMap<String, Node>),
    Array(Vec<Node>),
    String(String),
    Number(f64),
    /// The literal text, `"true"` or `"false"`.
    Boolean(String),
}

/// A parsed JSON value together with its span.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Node>> {
        match &self.kind {
            NodeKind::Object(members) => Some(members),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The boolean a `Boolean` node stands for.
    pub fn as_bool(&self) -> Option<bool> {
        match &self.kind {
            NodeKind::Boolean(text) => Some(text == "true"),
            _ => None,
        }
    }

    /// Looks up an object member.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|members| members.get(key))
    }

    /// The direct children of a container, in document order for arrays and
    /// key order for objects. Scalars have none.
    pub fn children(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        match &self.kind {
            NodeKind::Object(members) => Box::new(members.values()),
            NodeKind::Array(elements) => Box::new(elements.iter()),
            _ => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(token_start: usize, token_end: usize) -> Span {
        Span {
            start: Position::new(1, token_start),
            end: Position::new(1, token_end),
            token_start,
            token_end,
        }
    }

    #[test]
    fn test_accessors() {
        let number = Node::new(NodeKind::Number(1.5), span(2, 2));
        assert_eq!(number.as_f64(), Some(1.5));
        assert_eq!(number.as_str(), None);

        let flag = Node::new(NodeKind::Boolean("false".to_string()), span(3, 3));
        assert_eq!(flag.as_bool(), Some(false));

        let mut members = BTreeMap::new();
        members.insert("n".to_string(), number.clone());
        members.insert("f".to_string(), flag);
        let object = Node::new(NodeKind::Object(members), span(1, 4));
        assert_eq!(object.get("n"), Some(&number));
        assert!(object.get("missing").is_none());
        assert_eq!(object.children().count(), 2);
        assert_eq!(number.children().count(), 0);
    }

    #[test]
    fn test_span_contains() {
        assert!(span(1, 6).contains(&span(2, 3)));
        assert!(span(1, 6).contains(&span(1, 6)));
        assert!(!span(2, 6).contains(&span(1, 3)));
    }
}
