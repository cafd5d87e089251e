//! The query AST.
//!
//! A parsed query is a flat `Vec<Node>` whose members are implicitly
//! conjoined. Operators never hold fewer than two operands: [`new_operator`]
//! unwraps singletons and flattens nested operators of the same kind, so the
//! tree handed to callers is always in reduced form.

use crate::scanner::is_keyword;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Provenance of a pattern node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Labels: u8 {
        /// Emitted by the literal-tolerant parser.
        const LITERAL = 1 << 0;
        /// A parenthesized span was kept as pattern text instead of a group.
        const HEURISTIC_PARENS_AS_PATTERNS = 1 << 1;
        /// Produced while recovering from dangling parentheses.
        const HEURISTIC_DANGLING_PARENS = 1 << 2;
        /// Rewritten into its group by [`crate::hoist`].
        const HEURISTIC_HOISTED = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorKind {
    And,
    Or,
    /// Adjacent patterns that should match in sequence.
    Concat,
}

impl OperatorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperatorKind::And => "and",
            OperatorKind::Or => "or",
            OperatorKind::Concat => "concat",
        }
    }
}

/// Free text to search for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub value: String,
    pub negated: bool,
    pub labels: Labels,
}

impl Pattern {
    pub fn new(value: impl Into<String>, labels: Labels) -> Self {
        Self {
            value: value.into(),
            negated: false,
            labels,
        }
    }
}

/// A `field:value` filter such as `repo:foo` or `-file:test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub field: String,
    pub value: String,
    pub negated: bool,
}

impl Parameter {
    pub fn new(field: impl Into<String>, value: impl Into<String>, negated: bool) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            negated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub kind: OperatorKind,
    pub operands: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Node {
    Pattern(Pattern),
    Parameter(Parameter),
    Operator(Operator),
}

impl Node {
    pub fn pattern(value: impl Into<String>, labels: Labels) -> Self {
        Node::Pattern(Pattern::new(value, labels))
    }

    pub fn parameter(field: impl Into<String>, value: impl Into<String>, negated: bool) -> Self {
        Node::Parameter(Parameter::new(field, value, negated))
    }

    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Node::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Node::Pattern(_))
    }
}

/// Combines `nodes` under `kind`.
///
/// Operands that are already `kind` operators are spliced in place. No
/// operands yield an empty vector and a single operand is returned as is, so
/// the result never contains a degenerate operator.
pub fn new_operator(nodes: Vec<Node>, kind: OperatorKind) -> Vec<Node> {
    let mut operands = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Operator(operator) if operator.kind == kind => {
                operands.extend(operator.operands)
            }
            other => operands.push(other),
        }
    }
    match operands.len() {
        0 | 1 => operands,
        _ => vec![Node::Operator(Operator { kind, operands })],
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Pattern(pattern) if pattern.negated => {
                write!(f, "(not {:?})", pattern.value)
            }
            Node::Pattern(pattern) => write!(f, "{:?}", pattern.value),
            Node::Parameter(parameter) => {
                let text = if parameter.negated {
                    format!("-{}:{}", parameter.field, parameter.value)
                } else {
                    format!("{}:{}", parameter.field, parameter.value)
                };
                write!(f, "{text:?}")
            }
            Node::Operator(operator) => {
                write!(f, "({}", operator.kind.as_str())?;
                for operand in &operator.operands {
                    write!(f, " {operand}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// S-expression rendering of a whole query, top-level nodes separated by a
/// space.
pub fn nodes_to_string(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders `nodes` back into query syntax that parses to the same shape.
///
/// A pattern spelled `and` or `or` that would land between two spaces is
/// printed as `(and)`/`(or)`, which reads back as literal text.
pub fn to_query_string(nodes: &[Node]) -> String {
    join_query_strings(nodes, " ", false, Edges::BOTH)
}

/// Whether rendered text starts or ends at an input edge or a parenthesis,
/// where a keyword cannot be recognized.
#[derive(Clone, Copy)]
struct Edges {
    start: bool,
    end: bool,
}

impl Edges {
    const BOTH: Edges = Edges {
        start: true,
        end: true,
    };
}

fn join_query_strings(nodes: &[Node], separator: &str, nested: bool, edges: Edges) -> String {
    let last = nodes.len().saturating_sub(1);
    nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let edges = Edges {
                start: idx == 0 && edges.start,
                end: idx == last && edges.end,
            };
            query_string(node, nested, edges)
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn query_string(node: &Node, nested: bool, edges: Edges) -> String {
    match node {
        Node::Pattern(pattern) if pattern.negated => format!("-{}", pattern.value),
        Node::Pattern(pattern) if is_keyword(&pattern.value) && !edges.start && !edges.end => {
            format!("({})", pattern.value)
        }
        Node::Pattern(pattern) => pattern.value.clone(),
        Node::Parameter(parameter) => {
            let sign = if parameter.negated { "-" } else { "" };
            format!(
                "{sign}{}:{}",
                parameter.field,
                quote_value(&parameter.value)
            )
        }
        Node::Operator(operator) if operator.kind == OperatorKind::Concat => {
            join_query_strings(&operator.operands, " ", true, edges)
        }
        Node::Operator(operator) => {
            let separator = match operator.kind {
                OperatorKind::And => " and ",
                _ => " or ",
            };
            if nested {
                format!(
                    "({})",
                    join_query_strings(&operator.operands, separator, true, Edges::BOTH)
                )
            } else {
                join_query_strings(&operator.operands, separator, true, edges)
            }
        }
    }
}

fn quote_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '(' | ')'));
    if !needs_quotes {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(value: &str) -> Node {
        Node::pattern(value, Labels::LITERAL)
    }

    #[test]
    fn operator_of_nothing_is_empty() {
        assert!(new_operator(vec![], OperatorKind::And).is_empty());
    }

    #[test]
    fn operator_of_one_node_unwraps() {
        let nodes = new_operator(vec![pattern("x")], OperatorKind::Or);
        assert_eq!(nodes, vec![pattern("x")]);
    }

    #[test]
    fn operator_flattens_same_kind_only() {
        let inner_or = new_operator(vec![pattern("a"), pattern("b")], OperatorKind::Or);
        let inner_and = new_operator(vec![pattern("c"), pattern("d")], OperatorKind::And);
        let nodes = new_operator(
            inner_or.into_iter().chain(inner_and).collect(),
            OperatorKind::Or,
        );
        assert_eq!(
            nodes_to_string(&nodes),
            r#"(or "a" "b" (and "c" "d"))"#
        );
    }

    #[test]
    fn display_quotes_like_a_string_literal() {
        assert_eq!(pattern(r#""x\y"#).to_string(), r#""\"x\\y""#);
        assert_eq!(
            Node::parameter("repo", "foo", true).to_string(),
            r#""-repo:foo""#
        );
        let negated = Node::Pattern(Pattern {
            value: "x".into(),
            negated: true,
            labels: Labels::empty(),
        });
        assert_eq!(negated.to_string(), r#"(not "x")"#);
    }

    #[test]
    fn query_string_parenthesizes_nested_boolean_groups() {
        let or = new_operator(vec![pattern("a"), pattern("b")], OperatorKind::Or);
        let concat = new_operator(vec![pattern("c"), pattern("d")], OperatorKind::Concat);
        let nodes = new_operator(
            vec![Node::parameter("repo", "x", false)]
                .into_iter()
                .chain(or)
                .chain(concat)
                .collect(),
            OperatorKind::And,
        );
        assert_eq!(to_query_string(&nodes), "repo:x and (a or b) and c d");
    }

    #[test]
    fn query_string_keeps_keyword_patterns_off_keyword_positions() {
        let concat = new_operator(
            vec![pattern("b"), pattern("or"), pattern("and")],
            OperatorKind::Concat,
        );
        let nodes = new_operator(
            std::iter::once(pattern("And")).chain(concat).collect(),
            OperatorKind::Or,
        );
        assert_eq!(to_query_string(&nodes), "And or b (or) and");

        let nested = new_operator(
            std::iter::once(Node::parameter("repo", "x", false))
                .chain(nodes)
                .collect(),
            OperatorKind::And,
        );
        assert_eq!(to_query_string(&nested), "repo:x and (And or b (or) and)");
    }

    #[test]
    fn query_string_quotes_awkward_values() {
        let nodes = vec![
            Node::parameter("message", "fix the \"bug\"", false),
            Node::parameter("file", "", true),
            Node::parameter("lang", "go", false),
        ];
        assert_eq!(
            to_query_string(&nodes),
            r#"message:"fix the \"bug\"" -file:"" lang:go"#
        );
    }

    #[test]
    fn nodes_serialize_with_tag_and_flag_names() {
        let json = serde_json::to_value(pattern("x")).unwrap();
        assert_eq!(json["node"], "pattern");
        assert_eq!(json["value"], "x");
        assert_eq!(json["labels"], "LITERAL");
        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, pattern("x"));
    }
}
