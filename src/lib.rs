//! # Literal-tolerant search query parser
//!
//! `search-query` turns queries such as `repo:foo func( or main(` into a
//! small AST of [`Node`]s: `field:value` parameters, free-text patterns and
//! `and`/`or`/`concat` operators. Patterns are often code, so parentheses
//! are read as text whenever they do not clearly form a group, and input
//! that is not well formed is reparsed leniently instead of rejected.
//!
//! ## Example
//! ```
//! use search_query::{nodes_to_string, parse, visit_field};
//!
//! let nodes = parse("repo:foo foo( or bar(").unwrap();
//! assert_eq!(nodes_to_string(&nodes), r#"(and "repo:foo" (or "foo(" "bar("))"#);
//!
//! let mut repos = Vec::new();
//! visit_field(&nodes, "repo", |value, _negated| repos.push(value.to_string()));
//! assert_eq!(repos, ["foo"]);
//! ```

mod error;
mod grouping;
mod hoist;
mod node;
mod normalize;
mod parameter;
mod parser;
mod scanner;
mod validate;
pub mod visitor;

pub use error::{ParseError, ValidationError};
pub use grouping::partition_parameters;
pub use hoist::{hoist, is_pattern_expression, HoistError};
pub use node::{
    new_operator, nodes_to_string, to_query_string, Labels, Node, Operator, OperatorKind,
    Parameter, Pattern,
};
pub use normalize::{lowercase_field_names, map, map_parameter, map_pattern, substitute_aliases};
pub use parameter::{canonical_field, parse_parameter};
pub use parser::parse;
pub use scanner::{scan_any_pattern, scan_balanced_pattern};
pub use validate::validate;
pub use visitor::{
    visit_field, visit_field_until, visit_operator, visit_operator_until, visit_parameter,
    visit_parameter_until, walk, walk_until, Visitor,
};
