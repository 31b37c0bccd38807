//! JavaScript code generation backend.
//!
//! Renders the AST as modern JavaScript (async functions, classes, template
//! literals, arrow functions). Type annotations are dropped. Match
//! expressions have no JavaScript counterpart and are lowered to an
//! immediately invoked arrow function.
//!
//! # Module Structure
//!
//! - [`expr`] - Expression emission, including match lowering
//! - [`stmt`] - Statement emission and the shared emitter state
//!
//! # Generated Code Structure
//!
//! ```javascript
//! "use strict";            // only with JsOptions::strict_mode
//!
//! function yoga(a, b = 10) {
//!     return a + b;
//! }
//!
//! let total = yoga(1);
//! ```

mod expr;
mod stmt;

use crate::ast::{Statement, StatementKind};
use crate::codegen::error::CodeGenError;
use crate::codegen::{CodeGenerator, GeneratedOutput};

use self::stmt::JsEmitter;

/// Formatting options for the JavaScript backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Emit a `"use strict";` prologue.
    pub strict_mode: bool,
}

impl Default for JsOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            strict_mode: false,
        }
    }
}

/// JavaScript code generation backend.
///
/// # Example
///
/// ```
/// use dvibhasha::codegen::{CodeGenerator, JsBackend, JsOptions};
/// use dvibhasha::lexer::lex;
/// use dvibhasha::parser::Parser;
///
/// let tokens = lex("char x = 1;");
/// let program = Parser::new(&tokens).parse().ast;
///
/// let backend = JsBackend::with_options(JsOptions {
///     indent_width: 2,
///     strict_mode: true,
/// });
/// let output = backend.generate(&program).unwrap();
/// assert_eq!(output.code, "\"use strict\";\n\nlet x = 1;\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsBackend {
    options: JsOptions,
}

impl JsBackend {
    /// Creates a new JavaScript backend with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new JavaScript backend with the given options.
    pub fn with_options(options: JsOptions) -> Self {
        Self { options }
    }
}

impl CodeGenerator for JsBackend {
    fn generate(&self, program: &[Statement]) -> Result<GeneratedOutput, CodeGenError> {
        log::debug!(
            "generating JavaScript for {} top-level statements",
            program.len()
        );

        let mut emitter = JsEmitter::new(self.options.indent_width);
        let mut output = String::new();

        if self.options.strict_mode {
            output.push_str("\"use strict\";\n\n");
        }

        for (i, stmt) in program.iter().enumerate() {
            // Declarations get a blank line after them, unless they end the file.
            emitter.emit_stmt(stmt, &mut output)?;
            let is_declaration = matches!(
                stmt.kind,
                StatementKind::FunctionDecl(_) | StatementKind::ClassDecl { .. }
            );
            if is_declaration && i + 1 < program.len() {
                output.push('\n');
            }
        }

        Ok(GeneratedOutput::javascript(output))
    }

    fn backend_name(&self) -> &str {
        "JavaScript"
    }
}
