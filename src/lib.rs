//! # dvibhasha
//!
//! A compiler front end for a small imperative language whose every keyword
//! and operator can be written in Devanagari or in romanized form, and whose
//! operators also have uppercase mnemonics (`YOGA` for `+`, `SAMA` for `==`).
//!
//! ## Architecture
//!
//! The compiler follows a traditional pipeline:
//!
//! ```text
//! Source → Lexer → Parser → AST → CodeGen → JavaScript
//! ```
//!
//! Each phase is implemented as a separate module:
//!
//! - [`lexer`] - Tokenizes source code into a stream of tokens
//! - [`parser`] - Builds an Abstract Syntax Tree from tokens, recovering from errors
//! - [`ast`] - AST type definitions
//! - [`codegen`] - Code generation backends (JavaScript backend implemented)
//! - [`lsp`] - Language Server Protocol implementation for IDE integration
//!
//! ## Example
//!
//! ```
//! let js = dvibhasha::compile("कार्य yoga(a, b = 10) { लौटाओ a YOGA b; }").unwrap();
//! assert_eq!(js, "function yoga(a, b = 10) {\n    return a + b;\n}\n");
//! ```

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod lsp;
pub mod parser;

use thiserror::Error;

use crate::codegen::{CodeGenError, CodeGenerator, JsBackend, JsOptions};
use crate::lexer::lex;
use crate::parser::{ParseError, ParseResult, Parser};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::ast::{Expr, ExprKind, Span, Statement, StatementKind};
    pub use crate::codegen::{CodeGenError, CodeGenerator, GeneratedOutput, JsBackend, JsOptions};
    pub use crate::lexer::{Lexer, Token, TokenKind};
    pub use crate::parser::{ParseError, ParseResult, Parser};
    pub use crate::{CompileError, compile, compile_with, parse_source};
}

/// Errors returned by the [`compile`] pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// The source did not parse. Holds every diagnostic, in source order.
    #[error("{} syntax error(s)", .0.len())]
    Syntax(Vec<ParseError>),

    /// The generator rejected the tree.
    #[error(transparent)]
    Generator(#[from] CodeGenError),
}

/// Lexes and parses `source` without generating code.
///
/// The result always carries a tree; statements that failed to parse are
/// present as placeholders and described in `errors`.
pub fn parse_source(source: &str) -> ParseResult {
    let tokens = lex(source);
    log::trace!("lexed {} tokens", tokens.len());
    let result = Parser::new(&tokens).parse();
    log::debug!(
        "parsed {} statements with {} errors",
        result.ast.len(),
        result.errors.len()
    );
    result
}

/// Compiles `source` to JavaScript with default formatting.
///
/// Any syntax error aborts generation; all of them are returned together.
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with(source, &JsOptions::default())
}

/// Compiles `source` to JavaScript with the given formatting options.
pub fn compile_with(source: &str, options: &JsOptions) -> Result<String, CompileError> {
    let result = parse_source(source);
    if !result.is_ok() {
        return Err(CompileError::Syntax(result.errors));
    }

    let output = JsBackend::with_options(*options).generate(&result.ast)?;
    log::debug!("generated {} bytes of {}", output.code.len(), output.format);
    Ok(output.code)
}
