//! Recognition of `field:value` parameters.
//!
//! Only known fields (or their aliases) form a parameter; anything else that
//! merely looks like one, such as `a:b` or `-pattern:`, stays a pattern.

use crate::{error::ValidationError, node::Parameter};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

static FIELDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "after",
        "archived",
        "author",
        "before",
        "case",
        "committer",
        "content",
        "count",
        "file",
        "fork",
        "index",
        "lang",
        "message",
        "patterntype",
        "repo",
        "repogroup",
        "repohascommitafter",
        "repohasfile",
        "rev",
        "stable",
        "timeout",
        "type",
        "visibility",
    ]
    .into_iter()
    .collect()
});

static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("r", "repo"),
        ("g", "repogroup"),
        ("f", "file"),
        ("l", "lang"),
        ("language", "lang"),
        ("since", "after"),
        ("until", "before"),
        ("m", "message"),
        ("msg", "message"),
        ("revision", "rev"),
    ]
    .into_iter()
    .collect()
});

/// Canonical name of `field`, matched case-insensitively and through
/// aliases. `None` for unknown fields.
pub fn canonical_field(field: &str) -> Option<&'static str> {
    let lower = field.to_ascii_lowercase();
    if let Some(canonical) = ALIASES.get(lower.as_str()) {
        return Some(canonical);
    }
    FIELDS.get(lower.as_str()).copied()
}

/// The field `alias` stands for, if it is an alias.
pub fn alias_target(alias: &str) -> Option<&'static str> {
    ALIASES.get(alias).copied()
}

pub fn is_known_field(field: &str) -> bool {
    FIELDS.contains(field)
}

/// Tries to read a parameter at the start of `buf`.
///
/// `offset` is where `buf` starts in the whole query and only feeds error
/// positions. Returns the parameter and the bytes it spans, or `None` when
/// `buf` does not start with a known field.
pub fn parse_parameter(
    buf: &str,
    offset: usize,
) -> Result<Option<(Parameter, usize)>, ValidationError> {
    let Some((field, negated, field_len)) = scan_field(buf) else {
        return Ok(None);
    };
    let rest = &buf[field_len..];
    let (value, value_len) = match rest.chars().next() {
        Some(delimiter @ ('"' | '\'')) => scan_delimited(rest, delimiter).ok_or_else(|| {
            ValidationError::UnterminatedQuote {
                field: field.to_string(),
                position: offset + field_len,
            }
        })?,
        _ => scan_value(rest),
    };
    Ok(Some((
        Parameter::new(field, value, negated),
        field_len + value_len,
    )))
}

/// Reads `-?letters:` and returns the field as written, whether it was
/// negated and the bytes spanned including the colon.
fn scan_field(buf: &str) -> Option<(&str, bool, usize)> {
    let (negated, rest) = match buf.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, buf),
    };
    let len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
    if len == 0 || rest.as_bytes().get(len) != Some(&b':') {
        return None;
    }
    let field = &rest[..len];
    canonical_field(field)?;
    Some((field, negated, usize::from(negated) + len + 1))
}

// Bare values end at whitespace or at a `)` closing an enclosing group.
fn scan_value(buf: &str) -> (String, usize) {
    let mut depth = 0usize;
    let mut end = buf.len();
    for (idx, c) in buf.char_indices() {
        if c.is_whitespace() {
            end = idx;
            break;
        }
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => {
                end = idx;
                break;
            }
            ')' => depth -= 1,
            _ => {}
        }
    }
    (buf[..end].to_string(), end)
}

/// Reads a value quoted by `delimiter`, which `buf` starts with.
///
/// `\` escapes the delimiter and itself; any other escape is kept verbatim.
/// Returns `None` if the closing delimiter is missing.
fn scan_delimited(buf: &str, delimiter: char) -> Option<(String, usize)> {
    let mut value = String::new();
    let mut chars = buf.char_indices().skip(1);
    while let Some((idx, c)) = chars.next() {
        if c == '\\' {
            let (_, next) = chars.next()?;
            if next != delimiter && next != '\\' {
                value.push('\\');
            }
            value.push(next);
        } else if c == delimiter {
            return Some((value, idx + c.len_utf8()));
        } else {
            value.push(c);
        }
    }
    None
}
