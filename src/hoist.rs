//! Regrouping of ambiguous top-level expressions.
//!
//! Without parentheses, `repo:foo a or b` parses as
//! `(or (and "repo:foo" "a") "b")`, which is rarely what anyone means. When
//! the parameters sit only at the edges of the expression and everything in
//! between is pattern text, [`hoist`] lifts them out so they scope the whole
//! expression: `(and "repo:foo" (or "a" "b"))`.

use crate::{
    node::{new_operator, Labels, Node, OperatorKind, Pattern},
    normalize::map_pattern,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoistError {
    #[error("hoisting requires exactly one top-level expression")]
    NotSingleExpression,
    #[error("hoisting requires a top-level and/or expression")]
    NotBooleanExpression,
    #[error("could not split the first or last operand into scope and pattern")]
    Unpartitionable,
    #[error("operand {0} is not a pure pattern expression")]
    ImpureOperand(String),
}

/// Lifts edge parameters of a single top-level `and`/`or` out of it.
///
/// The first and last operands may mix parameters and patterns (through an
/// `and`); every other operand must be pattern text only. On success the
/// parameters come first, followed by the patterns regrouped under the
/// original operator and labelled [`Labels::HEURISTIC_HOISTED`].
pub fn hoist(nodes: &[Node]) -> Result<Vec<Node>, HoistError> {
    let [node] = nodes else {
        return Err(HoistError::NotSingleExpression);
    };
    let operator = match node {
        Node::Operator(operator) if operator.kind != OperatorKind::Concat => operator,
        _ => return Err(HoistError::NotBooleanExpression),
    };

    let last = operator.operands.len().saturating_sub(1);
    let mut scope = Vec::new();
    let mut patterns = Vec::with_capacity(operator.operands.len());
    for (idx, operand) in operator.operands.iter().enumerate() {
        if idx == 0 || idx == last {
            let (parameters, pattern) = partition_search_pattern(operand)?;
            scope.extend(parameters);
            patterns.push(pattern);
        } else if is_pattern_expression(std::slice::from_ref(operand)) {
            patterns.push(operand.clone());
        } else {
            return Err(HoistError::ImpureOperand(operand.to_string()));
        }
    }

    let patterns = map_pattern(patterns, &mut |mut pattern: Pattern| {
        pattern.labels |= Labels::HEURISTIC_HOISTED;
        Node::Pattern(pattern)
    });
    debug!(scope = scope.len(), kind = operator.kind.as_str(), "hoisted parameters");
    scope.extend(new_operator(patterns, operator.kind));
    Ok(scope)
}

/// Splits `node` into its parameters and a single pattern node.
///
/// An `and` is split operand by operand; any other node is taken whole. Fails
/// if an operand is neither a parameter nor pattern text, or if no pattern is
/// left.
fn partition_search_pattern(node: &Node) -> Result<(Vec<Node>, Node), HoistError> {
    let operands = match node {
        Node::Operator(operator) if operator.kind == OperatorKind::And => {
            operator.operands.as_slice()
        }
        other => std::slice::from_ref(other),
    };
    let mut parameters = Vec::new();
    let mut patterns = Vec::new();
    for operand in operands {
        if is_pattern_expression(std::slice::from_ref(operand)) {
            patterns.push(operand.clone());
        } else if matches!(operand, Node::Parameter(_)) {
            parameters.push(operand.clone());
        } else {
            return Err(HoistError::Unpartitionable);
        }
    }
    match new_operator(patterns, OperatorKind::And).pop() {
        Some(pattern) => Ok((parameters, pattern)),
        None => Err(HoistError::Unpartitionable),
    }
}

/// Whether `nodes` consist of patterns only, at any depth.
pub fn is_pattern_expression(nodes: &[Node]) -> bool {
    nodes.iter().all(|node| match node {
        Node::Pattern(_) => true,
        Node::Parameter(_) => false,
        Node::Operator(operator) => is_pattern_expression(&operator.operands),
    })
}
