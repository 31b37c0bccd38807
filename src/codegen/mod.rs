//! Code generation module for dvibhasha.
//!
//! This module renders the AST as source code for a target language. The
//! architecture uses a trait-based backend system; the one backend today
//! emits JavaScript.
//!
//! # Architecture
//!
//! ```text
//! &[Statement] → CodeGenerator → GeneratedOutput
//!                     ↑
//!                 JsBackend
//! ```
//!
//! Backends only borrow the tree. They never mutate it.
//!
//! # Example
//!
//! ```
//! use dvibhasha::codegen::{CodeGenerator, JsBackend};
//! use dvibhasha::lexer::lex;
//! use dvibhasha::parser::Parser;
//!
//! let tokens = lex("karya dugna(n) { lautao n GUNA 2; }");
//! let result = Parser::new(&tokens).parse();
//! assert!(result.is_ok());
//!
//! let output = JsBackend::new().generate(&result.ast).unwrap();
//! assert!(output.code.contains("function dugna(n) {"));
//! assert!(output.code.contains("return n * 2;"));
//! assert_eq!(output.extension, "js");
//! ```

mod error;
mod js_backend;

pub use error::{CodeGenError, CodeGenErrorKind};
pub use js_backend::{JsBackend, JsOptions};

use crate::ast::Statement;

/// Output from code generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedOutput {
    /// The generated source code.
    pub code: String,

    /// Human-readable description of the output format.
    pub format: String,

    /// Suggested file extension for the output.
    pub extension: String,
}

impl GeneratedOutput {
    /// Creates a new generated output for JavaScript code.
    pub fn javascript(code: String) -> Self {
        Self {
            code,
            format: "JavaScript".to_string(),
            extension: "js".to_string(),
        }
    }
}

/// Trait for code generation backends.
///
/// Adding a target means adding an implementation; the parser and AST do
/// not change.
///
/// # Backend Responsibilities
///
/// Each backend is responsible for:
/// - Translating every AST node kind it is given, or failing with a
///   [`CodeGenError`]
/// - Producing well-formatted, readable output
pub trait CodeGenerator {
    /// Generates code for a parsed program.
    ///
    /// # Arguments
    ///
    /// * `program` - Top-level statements as produced by the parser
    ///
    /// # Returns
    ///
    /// * `Ok(GeneratedOutput)` - Successfully generated code
    /// * `Err(CodeGenError)` - The tree contains a node the backend cannot render
    fn generate(&self, program: &[Statement]) -> Result<GeneratedOutput, CodeGenError>;

    /// Returns the name of this backend for diagnostics.
    fn backend_name(&self) -> &str;
}
