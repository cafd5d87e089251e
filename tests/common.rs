#![allow(dead_code)]
//! Shared helpers for `search-query` integration tests.

use search_query::*;

pub fn parse_ok(input: &str) -> Vec<Node> {
    parse(input).unwrap_or_else(|err| panic!("{input:?} failed to parse: {err}"))
}

pub fn parse_err(input: &str) -> ParseError {
    match parse(input) {
        Ok(nodes) => panic!("{input:?} parsed to {}", nodes_to_string(&nodes)),
        Err(err) => err,
    }
}

/// S-expression of the parsed query.
pub fn sexp(input: &str) -> String {
    nodes_to_string(&parse_ok(input))
}

pub fn as_operator(node: &Node, kind: OperatorKind) -> &[Node] {
    match node {
        Node::Operator(operator) if operator.kind == kind => &operator.operands,
        other => panic!("expected {kind:?}, got: {other}"),
    }
}

pub fn pattern_is(node: &Node, expected: &str) -> Labels {
    match node {
        Node::Pattern(pattern) => {
            assert_eq!(pattern.value, expected);
            pattern.labels
        }
        other => panic!("expected pattern, got: {other}"),
    }
}

pub fn parameter_is(node: &Node, field: &str, value: &str, negated: bool) {
    match node {
        Node::Parameter(parameter) => {
            assert_eq!(parameter.field, field);
            assert_eq!(parameter.value, value);
            assert_eq!(parameter.negated, negated);
        }
        other => panic!("expected parameter, got: {other}"),
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("search_query=trace")
        .with_test_writer()
        .try_init();
}
