//! Statement code generation for the JavaScript backend.
//!
//! Statements are written line by line into a caller-supplied buffer at the
//! emitter's current indentation. Nested bodies raise the indentation by one
//! level for their duration.

use std::fmt::Write;

use crate::ast::{CatchClause, FunctionDecl, Parameter, Statement, StatementKind};
use crate::codegen::error::CodeGenError;

use super::expr::binding_name;

/// State required for statement and expression emission.
///
/// This is passed through recursive emission to track indentation and to
/// hand out unique names for match temporaries.
pub(super) struct JsEmitter {
    /// Counter for generating unique temporary names.
    pub match_counter: u32,
    /// Current indentation level.
    pub indent: usize,
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl JsEmitter {
    /// Creates a new emitter at indentation level zero.
    pub fn new(indent_width: usize) -> Self {
        Self {
            match_counter: 0,
            indent: 0,
            indent_width,
        }
    }

    /// Generates a unique temporary name.
    pub fn next_temp(&mut self, prefix: &str) -> String {
        let name = format!("${}_{}", prefix, self.match_counter);
        self.match_counter += 1;
        name
    }

    /// Returns the indentation string for the current level.
    pub fn indent_str(&self) -> String {
        " ".repeat(self.indent * self.indent_width)
    }

    /// Emits a single statement.
    pub fn emit_stmt(&mut self, stmt: &Statement, output: &mut String) -> Result<(), CodeGenError> {
        let indent = self.indent_str();

        match &stmt.kind {
            StatementKind::FunctionDecl(decl) => {
                let header = self.emit_signature(decl, true)?;
                writeln!(output, "{indent}{header} {{")?;
                self.emit_body(&decl.body, output)?;
                writeln!(output, "{indent}}}")?;
            }

            StatementKind::ClassDecl { name, methods } => {
                writeln!(output, "{indent}class {} {{", binding_name(name))?;
                self.indent += 1;
                let method_indent = self.indent_str();
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        writeln!(output)?;
                    }
                    let header = self.emit_signature(method, false)?;
                    writeln!(output, "{method_indent}{header} {{")?;
                    self.emit_body(&method.body, output)?;
                    writeln!(output, "{method_indent}}}")?;
                }
                self.indent -= 1;
                writeln!(output, "{indent}}}")?;
            }

            StatementKind::VariableDecl {
                mutable,
                name,
                initializer,
                ..
            } => {
                let keyword = if *mutable { "let" } else { "const" };
                let name = binding_name(name);
                match initializer {
                    Some(value) => {
                        let value = self.emit_expr(value)?;
                        writeln!(output, "{indent}{keyword} {name} = {value};")?;
                    }
                    None => writeln!(output, "{indent}{keyword} {name};")?,
                }
            }

            StatementKind::If { .. } => {
                output.push_str(&indent);
                self.emit_if(stmt, output)?;
            }

            StatementKind::Try {
                body,
                catch,
                finally,
            } => {
                writeln!(output, "{indent}try {{")?;
                self.emit_body(body, output)?;
                if let Some(CatchClause { binding, body }) = catch {
                    match binding {
                        Some(name) => {
                            writeln!(output, "{indent}}} catch ({}) {{", binding_name(name))?
                        }
                        None => writeln!(output, "{indent}}} catch {{")?,
                    }
                    self.emit_body(body, output)?;
                }
                if let Some(body) = finally {
                    writeln!(output, "{indent}}} finally {{")?;
                    self.emit_body(body, output)?;
                }
                writeln!(output, "{indent}}}")?;
            }

            StatementKind::Return(value) => match value {
                Some(value) => {
                    let value = self.emit_expr(value)?;
                    writeln!(output, "{indent}return {value};")?;
                }
                None => writeln!(output, "{indent}return;")?,
            },

            StatementKind::Block(statements) => {
                writeln!(output, "{indent}{{")?;
                self.emit_body(statements, output)?;
                writeln!(output, "{indent}}}")?;
            }

            StatementKind::Expression(expr) => {
                let expr = self.emit_expr(expr)?;
                writeln!(output, "{indent}{expr};")?;
            }

            StatementKind::Error => {
                return Err(
                    CodeGenError::unsupported("a statement that failed to parse")
                        .with_span(stmt.span),
                );
            }
        }

        Ok(())
    }

    /// Emits a list of statements one level deeper than the current one.
    pub fn emit_body(
        &mut self,
        statements: &[Statement],
        output: &mut String,
    ) -> Result<(), CodeGenError> {
        self.indent += 1;
        let result = statements
            .iter()
            .try_for_each(|stmt| self.emit_stmt(stmt, output));
        self.indent -= 1;
        result
    }

    /// Emits an if statement starting at the current column.
    ///
    /// An `else` holding another `if` is written as `else if` on the same
    /// line rather than as a nested block.
    fn emit_if(&mut self, stmt: &Statement, output: &mut String) -> Result<(), CodeGenError> {
        let StatementKind::If {
            condition,
            then_branch,
            else_branch,
        } = &stmt.kind
        else {
            return Err(CodeGenError::internal("emit_if called on a non-if statement")
                .with_span(stmt.span));
        };

        let indent = self.indent_str();
        let condition = self.emit_expr(condition)?;
        writeln!(output, "if ({condition}) {{")?;
        self.emit_body(then_branch, output)?;

        let Some(branch) = else_branch.as_deref() else {
            writeln!(output, "{indent}}}")?;
            return Ok(());
        };

        match &branch.kind {
            StatementKind::If { .. } => {
                write!(output, "{indent}}} else ")?;
                self.emit_if(branch, output)?;
            }
            StatementKind::Block(statements) => {
                writeln!(output, "{indent}}} else {{")?;
                self.emit_body(statements, output)?;
                writeln!(output, "{indent}}}")?;
            }
            _ => {
                writeln!(output, "{indent}}} else {{")?;
                self.emit_body(std::slice::from_ref(branch), output)?;
                writeln!(output, "{indent}}}")?;
            }
        }

        Ok(())
    }

    /// Emits `[async ]function name(params)`, or the method form without
    /// the `function` keyword.
    fn emit_signature(
        &mut self,
        decl: &FunctionDecl,
        with_keyword: bool,
    ) -> Result<String, CodeGenError> {
        let mut header = String::new();
        if decl.is_async {
            header.push_str("async ");
        }
        // Method names are property keys, where reserved words are allowed.
        let name = if with_keyword {
            header.push_str("function ");
            binding_name(&decl.name)
        } else {
            decl.name.as_str().into()
        };
        let params = self.emit_params(&decl.params)?;
        write!(header, "{}({})", name, params)?;
        Ok(header)
    }

    /// Emits a parameter list. Type annotations are dropped; defaults are
    /// kept in place.
    fn emit_params(&mut self, params: &[Parameter]) -> Result<String, CodeGenError> {
        let mut parts = Vec::with_capacity(params.len());
        for param in params {
            let name = binding_name(&param.name);
            match &param.default {
                Some(default) => {
                    let default = self.emit_expr(default)?;
                    parts.push(format!("{name} = {default}"));
                }
                None => parts.push(name.into_owned()),
            }
        }
        Ok(parts.join(", "))
    }
}
