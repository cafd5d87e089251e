//! Semantic checks over parsed parameters.

use crate::{
    error::ValidationError,
    node::Node,
    parameter::is_known_field,
    visitor::visit_parameter_until,
};
use regex::Regex;
use std::collections::HashSet;

const NOT_NEGATABLE: &[&str] = &[
    "archived",
    "case",
    "count",
    "fork",
    "index",
    "patterntype",
    "stable",
    "timeout",
    "type",
    "visibility",
];

const SINGULAR: &[&str] = &[
    "archived",
    "case",
    "count",
    "fork",
    "index",
    "patterntype",
    "repogroup",
    "stable",
    "timeout",
    "visibility",
];

const REGEXP_FIELDS: &[&str] = &["author", "committer", "file", "message", "repo", "repohasfile"];

/// Checks field names, negation, repetition and values of every parameter.
///
/// Fields are expected in canonical form, i.e. after
/// [`crate::lowercase_field_names`] and [`crate::substitute_aliases`]. The
/// first problem found in document order is reported.
pub fn validate(nodes: &[Node]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let mut result = Ok(());
    visit_parameter_until(nodes, |field, value, negated| {
        result = check_parameter(field, value, negated, &mut seen);
        result.is_err()
    });
    result
}

fn check_parameter(
    field: &str,
    value: &str,
    negated: bool,
    seen: &mut HashSet<String>,
) -> Result<(), ValidationError> {
    if !is_known_field(field) {
        return Err(ValidationError::UnknownField {
            field: field.to_string(),
        });
    }
    if negated && NOT_NEGATABLE.contains(&field) {
        return Err(ValidationError::NegationUnsupported {
            field: field.to_string(),
        });
    }
    if SINGULAR.contains(&field) && !seen.insert(field.to_string()) {
        return Err(ValidationError::DuplicateField {
            field: field.to_string(),
        });
    }
    check_value(field, value).map_err(|reason| ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    })
}

fn check_value(field: &str, value: &str) -> Result<(), String> {
    match field {
        "case" | "stable" => one_of(value, &["yes", "no"]),
        "fork" | "archived" | "index" => one_of(value, &["yes", "no", "only"]),
        "patterntype" => one_of(value, &["literal", "regexp", "regex", "structural"]),
        "type" => one_of(value, &["commit", "diff", "symbol", "repo", "path", "file"]),
        "visibility" => one_of(value, &["any", "public", "private"]),
        "count" => match value.parse::<u32>() {
            Ok(count) if count > 0 => Ok(()),
            _ => Err("expected a positive integer".to_string()),
        },
        "timeout" => check_duration(value),
        field if REGEXP_FIELDS.contains(&field) => Regex::new(value)
            .map(|_| ())
            .map_err(|err| format!("invalid regular expression: {err}")),
        _ => Ok(()),
    }
}

fn one_of(value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
        Ok(())
    } else {
        Err(format!("expected one of {}", allowed.join(", ")))
    }
}

// `30s`, `1500ms`, `2m`, `1h`
fn check_duration(value: &str) -> Result<(), String> {
    let digits = value.bytes().take_while(u8::is_ascii_digit).count();
    let valid = digits > 0 && matches!(&value[digits..], "ms" | "s" | "m" | "h");
    if valid {
        Ok(())
    } else {
        Err("expected a duration such as 30s".to_string())
    }
}
