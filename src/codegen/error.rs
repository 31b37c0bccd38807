//! Code generation error types.
//!
//! The parser only hands the generator trees it built itself, so a
//! generation error means the two disagree about the AST. These errors are
//! fatal: there is no partial output.

use crate::ast::Span;
use std::fmt;
use thiserror::Error;

/// An error that occurred during code generation.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeGenError {
    /// The kind of error.
    pub kind: CodeGenErrorKind,
    /// Source location where the error occurred.
    pub span: Option<Span>,
}

impl CodeGenError {
    /// Creates a new code generation error.
    pub fn new(kind: CodeGenErrorKind) -> Self {
        Self { kind, span: None }
    }

    /// Adds a source span to the error.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Creates an error for a node the backend cannot render.
    pub fn unsupported(node: impl Into<String>) -> Self {
        Self::new(CodeGenErrorKind::UnsupportedNode(node.into()))
    }

    /// Creates an internal error (compiler bug).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(CodeGenErrorKind::Internal(message.into()))
    }
}

impl fmt::Display for CodeGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code generation error: {}", self.kind)?;
        if let Some(span) = &self.span {
            write!(f, " on line {}", span.line)?;
        }
        Ok(())
    }
}

impl std::error::Error for CodeGenError {}

impl From<fmt::Error> for CodeGenError {
    fn from(_: fmt::Error) -> Self {
        Self::internal("failed to write generated code")
    }
}

/// The specific kind of code generation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodeGenErrorKind {
    /// A node that has no rendering in the target, such as the placeholder
    /// left for a statement that failed to parse.
    #[error("cannot generate code for {0}")]
    UnsupportedNode(String),

    /// Internal compiler error (indicates a bug).
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodeGenError::unsupported("a statement that failed to parse");
        assert_eq!(
            err.to_string(),
            "code generation error: cannot generate code for a statement that failed to parse"
        );
    }

    #[test]
    fn test_error_with_span() {
        let err = CodeGenError::unsupported("node").with_span(Span::new(10, 20, 4));
        assert!(err.to_string().ends_with("on line 4"));
    }

    #[test]
    fn test_write_failure_is_internal() {
        let err = CodeGenError::from(fmt::Error);
        assert!(matches!(err.kind, CodeGenErrorKind::Internal(_)));
        assert_eq!(err.span, None);
    }
}
