//! Lexical error types.
//!
//! The lexer never stops at a bad character. Problems are recorded as
//! [`TokenKind::Invalid`](super::TokenKind::Invalid) tokens in the stream and
//! can be pulled back out as [`LexError`]s with [`lex_errors`](super::lex_errors).

use thiserror::Error;

/// What went wrong while scanning.
///
/// This is also the `logos` error type, so `Default` is what logos reports
/// for input that matches no token pattern at all.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,

    /// A `'` or `"` string that reaches end of line without its closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A backtick template that reaches end of input without its closing backtick.
    #[error("unterminated template literal")]
    UnterminatedTemplate,

    /// A number that could not be converted to a double.
    #[error("invalid number literal")]
    InvalidNumber,
}

/// A lexical error with its location.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} `{text}`")]
pub struct LexError {
    /// The kind of error.
    pub kind: LexErrorKind,
    /// The offending source text.
    pub text: String,
    /// 1-based line where the offending text starts.
    pub line: usize,
    /// Byte offsets of the offending text.
    pub span: std::ops::Range<usize>,
}
