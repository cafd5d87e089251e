//! Recursive-descent parser for `and`/`or` queries that tolerates literal
//! parentheses.
//!
//! ```text
//! Or   := And ("or" And)*
//! And  := List ("and" List)*
//! List := (Parameter | Group | Pattern)*
//! ```
//!
//! A `(` first tries to read a balanced pattern such as `(foo)` or
//! `bar(x)`; only when that fails does it open a group. Input that leaves a
//! group open or a `)` unmatched is reparsed once with dangling parentheses
//! treated as pattern text, so every query that is not pure boolean noise
//! yields nodes.

use crate::{
    error::ParseError,
    grouping::partition_parameters,
    hoist::hoist,
    node::{new_operator, Labels, Node, OperatorKind},
    normalize::{lowercase_field_names, map, substitute_aliases},
    parameter::parse_parameter,
    scanner::{scan_any_pattern, scan_balanced_pattern},
    validate::validate,
};
use tracing::debug;

/// Knobs and observations of a single parse pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Heuristics {
    /// Treat parentheses that do not form a group as pattern text.
    allow_dangling_parens: bool,
    /// Set once a parenthesized group was parsed, meaning the user spelled
    /// out the grouping and it must not be rearranged.
    disambiguated: bool,
}

#[derive(Debug, Clone, Copy)]
enum Keyword {
    And,
    Or,
}

impl Keyword {
    fn as_str(self) -> &'static str {
        match self {
            Keyword::And => "and",
            Keyword::Or => "or",
        }
    }
}

/// Parses `input` into nodes.
///
/// The result holds at most one top-level node, conjoining everything else.
/// Blank input gives no nodes. Field names come back lowercased with aliases
/// resolved, and every parameter has been validated.
pub fn parse(input: &str) -> Result<Vec<Node>, ParseError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut parser = Parser::new(input, Heuristics::default());
    let nodes = match parser.parse_or() {
        Ok(nodes) => nodes,
        Err(ParseError::ExpectedOperand { position }) => {
            debug!(position, "missing operand; reparsing as literal");
            return parse_literal_fallback(input);
        }
        Err(err) => return Err(err),
    };
    if !parser.is_complete() {
        debug!(
            balance = parser.balance,
            position = parser.pos,
            "unbalanced parentheses; reparsing as literal"
        );
        return parse_literal_fallback(input);
    }

    let nodes = if parser.heuristics.disambiguated {
        nodes
    } else {
        hoist_or_keep(nodes)
    };
    finish(nodes)
}

// Second and last pass: dangling parentheses become pattern text.
fn parse_literal_fallback(input: &str) -> Result<Vec<Node>, ParseError> {
    let mut parser = Parser::new(
        input,
        Heuristics {
            allow_dangling_parens: true,
            ..Heuristics::default()
        },
    );
    let nodes = parser.parse_or()?;
    finish(hoist_or_keep(nodes))
}

fn hoist_or_keep(nodes: Vec<Node>) -> Vec<Node> {
    match hoist(&nodes) {
        Ok(hoisted) => hoisted,
        Err(error) => {
            debug!(%error, "not hoisting");
            nodes
        }
    }
}

fn finish(nodes: Vec<Node>) -> Result<Vec<Node>, ParseError> {
    let nodes = map(nodes, &[lowercase_field_names, substitute_aliases]);
    validate(&nodes)?;
    Ok(new_operator(nodes, OperatorKind::And))
}

/// Groups nested deeper than this are not opened; the query is reparsed with
/// its parentheses read as pattern text.
const MAX_GROUP_DEPTH: usize = 128;

/// Byte offset of the first `)` in `text` without a matching `(`.
fn unmatched_close(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(idx),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    /// Open groups.
    balance: usize,
    heuristics: Heuristics,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, heuristics: Heuristics) -> Self {
        Self {
            input,
            pos: 0,
            balance: 0,
            heuristics,
        }
    }

    fn parse_or(&mut self) -> Result<Vec<Node>, ParseError> {
        let depth = self.balance;
        let mut operands = self.parse_and()?;
        while !self.closed_group(depth) && self.consume_keyword(Keyword::Or) {
            operands.extend(self.parse_and()?);
        }
        Ok(new_operator(operands, OperatorKind::Or))
    }

    fn parse_and(&mut self) -> Result<Vec<Node>, ParseError> {
        let depth = self.balance;
        let mut operands = self.parse_operand()?;
        while !self.closed_group(depth) && self.consume_keyword(Keyword::And) {
            operands.extend(self.parse_operand()?);
        }
        Ok(new_operator(operands, OperatorKind::And))
    }

    fn parse_operand(&mut self) -> Result<Vec<Node>, ParseError> {
        let nodes = self.parse_list()?;
        if nodes.is_empty() {
            return Err(self.expected_operand());
        }
        Ok(nodes)
    }

    // Whitespace-separated terms up to a keyword, a group close or the end.
    fn parse_list(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            self.skip_ws();
            let Some(ch) = self.peek_char() else {
                break;
            };
            match ch {
                '(' => {
                    let (value, consumed, balanced) = scan_balanced_pattern(self.remaining());
                    if balanced && consumed > 0 {
                        self.pos += consumed;
                        nodes.push(Node::pattern(
                            value,
                            Labels::LITERAL | Labels::HEURISTIC_PARENS_AS_PATTERNS,
                        ));
                    } else if self.heuristics.allow_dangling_parens {
                        nodes.push(self.parse_pattern_literal(Labels::HEURISTIC_DANGLING_PARENS));
                    } else if self.balance >= MAX_GROUP_DEPTH {
                        // Left unconsumed so the driver reparses with groups
                        // disabled.
                        debug!(position = self.pos, "group nesting limit reached");
                        break;
                    } else {
                        self.advance_char();
                        self.balance += 1;
                        self.heuristics.disambiguated = true;
                        nodes.extend(self.parse_or()?);
                    }
                }
                ')' if self.balance > 0 => {
                    self.advance_char();
                    self.balance -= 1;
                    self.heuristics.disambiguated = true;
                    if nodes.is_empty() {
                        nodes.push(Node::pattern(
                            "()",
                            Labels::LITERAL | Labels::HEURISTIC_PARENS_AS_PATTERNS,
                        ));
                    }
                    break;
                }
                ')' if self.heuristics.allow_dangling_parens => {
                    nodes.push(self.parse_pattern_literal(Labels::HEURISTIC_DANGLING_PARENS));
                }
                // Unmatched close in a strict pass: left unconsumed so the
                // driver notices and reparses.
                ')' => break,
                _ if self.at_keyword(Keyword::And) || self.at_keyword(Keyword::Or) => break,
                _ => match parse_parameter(self.remaining(), self.pos)? {
                    Some((parameter, consumed)) => {
                        self.pos += consumed;
                        nodes.push(Node::Parameter(parameter));
                    }
                    None => nodes.push(self.parse_pattern_literal(Labels::empty())),
                },
            }
        }
        Ok(partition_parameters(nodes))
    }

    // Always consumes at least one char: callers only invoke it on a
    // non-whitespace char.
    fn parse_pattern_literal(&mut self, labels: Labels) -> Node {
        let (value, consumed, balanced) = scan_balanced_pattern(self.remaining());
        let (value, consumed) = if balanced && consumed > 0 {
            (value, consumed)
        } else {
            let (value, consumed) = scan_any_pattern(self.remaining());
            // A keyword such as `or` in `(x or or)` fails the balanced scan;
            // the `)` after it still closes the open group.
            match unmatched_close(&value) {
                Some(end) if self.balance > 0 && end > 0 => (value[..end].to_string(), end),
                _ => (value, consumed),
            }
        };
        self.pos += consumed;
        Node::pattern(value, Labels::LITERAL | labels)
    }

    // A `)` closed the group this expression was parsed in; keywords after
    // it belong to the enclosing expression.
    fn closed_group(&self, depth: usize) -> bool {
        self.balance < depth
    }

    /// Whether `keyword` stands at the cursor as a whole word: preceded and
    /// followed by whitespace.
    fn at_keyword(&self, keyword: Keyword) -> bool {
        let preceded = self.input[..self.pos]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if !preceded {
            return false;
        }
        let text = keyword.as_str();
        let rest = self.remaining();
        rest.get(..text.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(text))
            && rest[text.len()..]
                .chars()
                .next()
                .is_some_and(char::is_whitespace)
    }

    fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        self.skip_ws();
        if !self.at_keyword(keyword) {
            return false;
        }
        self.pos += keyword.as_str().len();
        true
    }

    /// Input fully consumed with every group closed.
    fn is_complete(&mut self) -> bool {
        self.skip_ws();
        self.balance == 0 && self.eof()
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expected_operand(&self) -> ParseError {
        ParseError::ExpectedOperand { position: self.pos }
    }
}
