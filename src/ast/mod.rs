//! Abstract Syntax Tree (AST) definitions for dvibhasha.
//!
//! The AST represents the hierarchical structure of a program after parsing.
//! A program is an ordered list of top-level [`Statement`]s.
//!
//! # Structure
//!
//! ```text
//! Vec<Statement>
//!     ├── FunctionDecl { name, params, return_type, body, is_async }
//!     ├── ClassDecl { name, methods }
//!     ├── VariableDecl { mutable, name, initializer }
//!     ├── If / Try / Return / Block
//!     ├── Expression(Expr)
//!     │       ├── Binary { left, op, right }
//!     │       ├── Match { subject, cases }
//!     │       └── Template(parts)
//!     └── Error (placeholder for a statement that failed to parse)
//! ```
//!
//! # Design Decisions
//!
//! - **Owned nodes**: AST nodes own their children (no lifetimes), so the
//!   tree can outlive the token stream it was built from.
//! - **Span on every node**: every node records its byte range and line.
//! - **One variant per construct**: each variant carries only its own fields,
//!   so consumers match exhaustively and the compiler flags any node kind a
//!   backend forgets to handle.
//! - **Immutable once built**: the parser produces fully formed nodes; later
//!   phases only borrow them.

mod display;
mod expr;
mod stmt;

pub use expr::*;
pub use stmt::*;

/// A span representing a range in the source text.
///
/// `start` and `end` are byte offsets matching the lexer's token spans;
/// `line` is the 1-based line where the span starts.
///
/// # Example
///
/// ```
/// use dvibhasha::ast::Span;
///
/// let span = Span::new(0, 5, 1);
/// assert_eq!(span.start, 0);
/// assert_eq!(span.end, 5);
/// assert_eq!(span.line, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the start of the span (inclusive).
    pub start: usize,
    /// Byte offset of the end of the span (exclusive).
    pub end: usize,
    /// Line of the start of the span.
    pub line: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }

    /// Creates a span that covers both `self` and `other`.
    ///
    /// Useful for combining spans when building parent nodes from children.
    pub fn merge(&self, other: &Span) -> Span {
        let line = if self.start <= other.start {
            self.line
        } else {
            other.line
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line,
        }
    }
}
