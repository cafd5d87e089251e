use thiserror::Error;

/// Failure to turn query text into nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An `and`/`or` had nothing on one side, even after the literal
    /// fallback reparse.
    #[error("expected operand at byte {position}")]
    ExpectedOperand { position: usize },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ParseError {
    /// Byte offset into the query the error refers to, when known.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::ExpectedOperand { position } => Some(*position),
            ParseError::Invalid(ValidationError::UnterminatedQuote { position, .. }) => {
                Some(*position)
            }
            ParseError::Invalid(_) => None,
        }
    }
}

/// A query that parsed but does not make sense.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unrecognized field {field:?}")]
    UnknownField { field: String },
    #[error("field {field:?} does not support negation")]
    NegationUnsupported { field: String },
    #[error("field {field:?} may only be used once")]
    DuplicateField { field: String },
    #[error("invalid value {value:?} for field {field:?}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    #[error("unterminated quoted value for field {field:?} at byte {position}")]
    UnterminatedQuote { field: String, position: usize },
}
