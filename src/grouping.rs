use crate::node::{new_operator, Node, OperatorKind};

/// Shapes the nodes of one whitespace-separated list.
///
/// Each run of adjacent patterns becomes a single `concat`, while parameters
/// and already-built operators stay where they are. The resulting siblings
/// are conjoined, so `lang:go func main` becomes
/// `(and "lang:go" (concat "func" "main"))`.
pub fn partition_parameters(nodes: Vec<Node>) -> Vec<Node> {
    let mut grouped = Vec::with_capacity(nodes.len());
    let mut run = Vec::new();
    for node in nodes {
        if node.is_pattern() {
            run.push(node);
        } else {
            grouped.extend(new_operator(std::mem::take(&mut run), OperatorKind::Concat));
            grouped.push(node);
        }
    }
    grouped.extend(new_operator(run, OperatorKind::Concat));
    new_operator(grouped, OperatorKind::And)
}
