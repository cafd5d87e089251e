//! Structure-preserving rewrites over parsed nodes.

use crate::{
    node::{new_operator, Node, Parameter, Pattern},
    parameter::alias_target,
};

/// Applies each rewrite in turn.
pub fn map(nodes: Vec<Node>, rewrites: &[fn(Vec<Node>) -> Vec<Node>]) -> Vec<Node> {
    rewrites.iter().fold(nodes, |nodes, rewrite| rewrite(nodes))
}

/// Rebuilds `nodes`, replacing every parameter with `f(parameter)`.
pub fn map_parameter<F>(nodes: Vec<Node>, f: &mut F) -> Vec<Node>
where
    F: FnMut(Parameter) -> Node,
{
    let mut mapped = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Parameter(parameter) => mapped.push(f(parameter)),
            Node::Operator(operator) => mapped.extend(new_operator(
                map_parameter(operator.operands, &mut *f),
                operator.kind,
            )),
            pattern => mapped.push(pattern),
        }
    }
    mapped
}

/// Rebuilds `nodes`, replacing every pattern with `f(pattern)`.
pub fn map_pattern<F>(nodes: Vec<Node>, f: &mut F) -> Vec<Node>
where
    F: FnMut(Pattern) -> Node,
{
    let mut mapped = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Pattern(pattern) => mapped.push(f(pattern)),
            Node::Operator(operator) => mapped.extend(new_operator(
                map_pattern(operator.operands, &mut *f),
                operator.kind,
            )),
            parameter => mapped.push(parameter),
        }
    }
    mapped
}

pub fn lowercase_field_names(nodes: Vec<Node>) -> Vec<Node> {
    map_parameter(nodes, &mut |mut parameter: Parameter| {
        parameter.field.make_ascii_lowercase();
        Node::Parameter(parameter)
    })
}

/// Replaces alias fields such as `r` or `language` with their canonical
/// name. Expects lowercase field names.
pub fn substitute_aliases(nodes: Vec<Node>) -> Vec<Node> {
    map_parameter(nodes, &mut |mut parameter: Parameter| {
        if let Some(canonical) = alias_target(&parameter.field) {
            parameter.field = canonical.to_string();
        }
        Node::Parameter(parameter)
    })
}
