//! Read-only traversal of query nodes.
//!
//! [`Visitor`] carries one hook per node kind. The defaults walk into
//! operators and ignore leaves, so an implementation overrides only what it
//! cares about and calls [`walk_nodes`], [`walk_node`] or [`walk_operator`]
//! to keep descending. Traversal is depth-first, pre-order and left to right.
//!
//! [`Visitor::done`] is consulted before each sibling at every depth: once it
//! reports `true`, nothing else is visited, however deep the stop happened.

use crate::node::{Labels, Node, OperatorKind};

pub trait Visitor {
    /// Whether the walk should stop before the next node.
    fn done(&self) -> bool {
        false
    }

    fn visit_nodes(&mut self, nodes: &[Node]) {
        walk_nodes(self, nodes)
    }

    /// Called for every node before it is dispatched by kind.
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node)
    }

    fn visit_operator(&mut self, kind: OperatorKind, operands: &[Node]) {
        walk_operator(self, kind, operands)
    }

    fn visit_parameter(&mut self, _field: &str, _value: &str, _negated: bool) {}

    fn visit_pattern(&mut self, _value: &str, _negated: bool, _labels: Labels) {}
}

/// Dispatches each of `nodes` to its hook on `visitor`.
pub fn walk_nodes<V: Visitor + ?Sized>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        if visitor.done() {
            return;
        }
        visitor.visit_node(node);
    }
}

/// Descends into the operands of an operator.
pub fn walk_operator<V: Visitor + ?Sized>(visitor: &mut V, _kind: OperatorKind, operands: &[Node]) {
    visitor.visit_nodes(operands)
}

/// Hands `node` to the hook for its kind.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    match node {
        Node::Pattern(pattern) => {
            visitor.visit_pattern(&pattern.value, pattern.negated, pattern.labels)
        }
        Node::Parameter(parameter) => {
            visitor.visit_parameter(&parameter.field, &parameter.value, parameter.negated)
        }
        Node::Operator(operator) => visitor.visit_operator(operator.kind, &operator.operands),
    }
}

struct NodeVisitor<F> {
    callback: F,
    stopped: bool,
}

impl<F: FnMut(&Node) -> bool> Visitor for NodeVisitor<F> {
    fn done(&self) -> bool {
        self.stopped
    }

    fn visit_node(&mut self, node: &Node) {
        self.stopped = (self.callback)(node);
        if !self.stopped {
            walk_node(self, node)
        }
    }
}

struct OperatorVisitor<F> {
    callback: F,
    stopped: bool,
}

impl<F: FnMut(OperatorKind, &[Node]) -> bool> Visitor for OperatorVisitor<F> {
    fn done(&self) -> bool {
        self.stopped
    }

    fn visit_operator(&mut self, kind: OperatorKind, operands: &[Node]) {
        self.stopped = (self.callback)(kind, operands);
        walk_operator(self, kind, operands)
    }
}

struct ParameterVisitor<F> {
    callback: F,
    stopped: bool,
}

impl<F: FnMut(&str, &str, bool) -> bool> Visitor for ParameterVisitor<F> {
    fn done(&self) -> bool {
        self.stopped
    }

    fn visit_parameter(&mut self, field: &str, value: &str, negated: bool) {
        self.stopped = (self.callback)(field, value, negated);
    }
}

/// Visits every node, operators before their operands. The callback returns
/// `true` to stop. Returns whether the walk was stopped.
pub fn walk_until(nodes: &[Node], callback: impl FnMut(&Node) -> bool) -> bool {
    let mut visitor = NodeVisitor {
        callback,
        stopped: false,
    };
    visitor.visit_nodes(nodes);
    visitor.stopped
}

pub fn walk(nodes: &[Node], mut callback: impl FnMut(&Node)) {
    walk_until(nodes, |node| {
        callback(node);
        false
    });
}

/// Visits every operator with its kind and operands. The callback returns
/// `true` to stop. Returns whether the walk was stopped.
pub fn visit_operator_until(
    nodes: &[Node],
    callback: impl FnMut(OperatorKind, &[Node]) -> bool,
) -> bool {
    let mut visitor = OperatorVisitor {
        callback,
        stopped: false,
    };
    visitor.visit_nodes(nodes);
    visitor.stopped
}

pub fn visit_operator(nodes: &[Node], mut callback: impl FnMut(OperatorKind, &[Node])) {
    visit_operator_until(nodes, |kind, operands| {
        callback(kind, operands);
        false
    });
}

/// Visits every parameter as `(field, value, negated)`. The callback returns
/// `true` to stop. Returns whether the walk was stopped.
pub fn visit_parameter_until(
    nodes: &[Node],
    callback: impl FnMut(&str, &str, bool) -> bool,
) -> bool {
    let mut visitor = ParameterVisitor {
        callback,
        stopped: false,
    };
    visitor.visit_nodes(nodes);
    visitor.stopped
}

pub fn visit_parameter(nodes: &[Node], mut callback: impl FnMut(&str, &str, bool)) {
    visit_parameter_until(nodes, |field, value, negated| {
        callback(field, value, negated);
        false
    });
}

/// Visits the parameters whose field is exactly `field`, as
/// `(value, negated)`.
pub fn visit_field_until(
    nodes: &[Node],
    field: &str,
    mut callback: impl FnMut(&str, bool) -> bool,
) -> bool {
    visit_parameter_until(nodes, |candidate, value, negated| {
        candidate == field && callback(value, negated)
    })
}

pub fn visit_field(nodes: &[Node], field: &str, mut callback: impl FnMut(&str, bool)) {
    visit_field_until(nodes, field, |value, negated| {
        callback(value, negated);
        false
    });
}
