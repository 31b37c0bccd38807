//! Parser error types.
//!
//! Parse errors capture what went wrong and where. The parser records one
//! error per statement it could not complete and keeps going, so a caller
//! gets every broken statement in a file at once.

use crate::ast::Span;
use crate::lexer::LexError;
use thiserror::Error;

/// A parse error with location and description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Expected a specific token but found something else.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// What we expected to find.
        expected: String,
        /// The surface text we actually found.
        found: String,
        /// Location of the unexpected token.
        span: Span,
    },

    /// Reached end of input unexpectedly.
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof {
        /// What we expected to find.
        expected: String,
        /// Location of the end of input.
        span: Span,
    },

    /// A token that cannot start an expression.
    #[error("invalid expression: {message}")]
    InvalidExpression {
        /// Location of the invalid expression.
        span: Span,
        /// Additional context about what went wrong.
        message: String,
    },

    /// The left side of an assignment is not a variable or member access.
    #[error("invalid assignment target")]
    InvalidAssignmentTarget {
        /// Location of the target expression.
        span: Span,
    },

    /// The lexer could not make a token out of the source text here.
    #[error(transparent)]
    Lexical(#[from] LexError),

    /// Blocks or expressions nest deeper than the parser allows.
    #[error("nesting deeper than {} levels", super::MAX_NESTING)]
    NestingTooDeep {
        /// Location of the token that would open one level too many.
        span: Span,
    },

    /// An interpolated `${...}` expression failed to parse.
    #[error("in template literal: {message}")]
    Template {
        /// The nested parse error, rendered.
        message: String,
        /// Location of the whole template literal.
        span: Span,
    },
}

impl ParseError {
    /// Returns the span of this error.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::InvalidExpression { span, .. }
            | ParseError::InvalidAssignmentTarget { span }
            | ParseError::NestingTooDeep { span }
            | ParseError::Template { span, .. } => *span,
            ParseError::Lexical(err) => Span::new(err.span.start, err.span.end, err.line),
        }
    }

    /// Returns the 1-based source line the error refers to.
    pub fn line(&self) -> usize {
        self.span().line
    }

    /// Creates an "unexpected token" error.
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    /// Creates an "unexpected EOF" error.
    pub fn eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }
}
