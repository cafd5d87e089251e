//! Char-level scanners that decide where a free-text pattern ends.
//!
//! Both scanners are pure: they look at the unconsumed remainder of the
//! input and report how many bytes the caller should advance by.

use tracing::trace;

/// Scans up to, but not including, the first whitespace.
pub fn scan_any_pattern(buf: &str) -> (String, usize) {
    let end = buf
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map_or(buf.len(), |(idx, _)| idx);
    let value = buf[..end].to_string();
    trace!(%value, consumed = end, "scanned any pattern");
    (value, end)
}

/// Scans a pattern whose parentheses must balance.
///
/// Whitespace outside any parenthesis ends the pattern. Whitespace inside a
/// parenthesized span is folded into single spaces. A `)` with no matching
/// `(` ends the pattern just before it, leaving it to whatever group
/// encloses the pattern. The scan fails when parentheses remain open, or
/// when the result contains a free-standing `and`/`or`, since the text is
/// then boolean structure rather than a literal.
///
/// Returns the normalized literal, the bytes consumed and whether the scan
/// succeeded.
pub fn scan_balanced_pattern(buf: &str) -> (String, usize, bool) {
    let mut depth: usize = 0;
    let mut consumed = 0;
    let mut pieces: Vec<String> = Vec::new();
    let mut piece = String::new();

    for (idx, c) in buf.char_indices() {
        if c.is_whitespace() && depth == 0 {
            break;
        }
        if c == ')' {
            if depth == 0 {
                // Unmatched: stop before it and keep what precedes.
                break;
            }
            depth -= 1;
            piece.push(c);
        } else if c == '(' {
            depth += 1;
            piece.push(c);
        } else if c.is_whitespace() {
            if !piece.is_empty() {
                pieces.push(std::mem::take(&mut piece));
            }
        } else {
            piece.push(c);
        }
        consumed = idx + c.len_utf8();
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }

    if pieces.iter().any(|piece| is_keyword(piece)) {
        trace!(?pieces, "balanced scan rejected: contains keyword");
        return (String::new(), 0, false);
    }
    let value = pieces.join(" ");
    let balanced = depth == 0;
    trace!(%value, consumed, balanced, "scanned balanced pattern");
    (value, consumed, balanced)
}

pub(crate) fn is_keyword(piece: &str) -> bool {
    piece.eq_ignore_ascii_case("and") || piece.eq_ignore_ascii_case("or")
}
