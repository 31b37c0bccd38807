//! Statement parsing for the parser.
//!
//! This module contains the main statement dispatcher and parsing for
//! simple statements: `const`/`let`, `return`, blocks and expression
//! statements.
//!
//! More complex statements (control flow, procedures) are handled in their
//! respective modules.

use crate::ast::{ExprKind, Statement, StatementKind};
use crate::lexer::TokenKind;

use super::{ParseError, Parser};

impl<'a> Parser<'a> {
    // ==================== Statement Dispatcher ====================

    /// Parses a single statement.
    pub(super) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.nested(|parser| match parser.peek_kind() {
            // Declarations (delegated to procedures.rs)
            TokenKind::Function => parser.parse_function(false),
            TokenKind::Async => parser.parse_async_function(),
            TokenKind::Class => parser.parse_class(),

            // Variables
            TokenKind::Const | TokenKind::Let => parser.parse_variable_decl(),

            // Control flow (delegated to control_flow.rs)
            TokenKind::If => parser.parse_if(),
            TokenKind::Try => parser.parse_try(),
            TokenKind::Return => parser.parse_return(),

            TokenKind::LeftBrace => parser.parse_block_statement(),
            _ => parser.parse_expression_statement(),
        })
    }

    // ==================== Variable Declaration ====================

    /// Parses `const name [: type] = value;` or `let name [: type] [= value];`.
    fn parse_variable_decl(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_span();
        let mutable = self.advance().kind == TokenKind::Let;

        let name = self.expect_identifier("variable name")?;
        let type_annotation = self.parse_type_annotation()?;

        let initializer = if self.match_token(TokenKind::Equal) {
            Some(self.parse_expression()?)
        } else if !mutable {
            return Err(self.error_here("`=` (a constant needs a value)"));
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "`;` after variable declaration")?;

        let span = self.span_from(start);
        Ok(Statement::new(
            StatementKind::VariableDecl {
                mutable,
                name,
                type_annotation,
                initializer,
            },
            span,
        ))
    }

    /// Parses an optional `: type` annotation.
    pub(super) fn parse_type_annotation(&mut self) -> Result<Option<String>, ParseError> {
        if self.match_token(TokenKind::Colon) {
            Ok(Some(self.parse_type_name()?))
        } else {
            Ok(None)
        }
    }

    /// Parses a type name. Types are not checked, so any word will do.
    pub(super) fn parse_type_name(&mut self) -> Result<String, ParseError> {
        if self.check_any(&[TokenKind::Identifier, TokenKind::Null]) {
            Ok(self.advance().text.clone())
        } else {
            Err(self.error_here("type name"))
        }
    }

    // ==================== Return ====================

    /// Parses `return [value];`.
    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_span();
        self.advance(); // consume return

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "`;` after return")?;

        let span = self.span_from(start);
        Ok(Statement::new(StatementKind::Return(value), span))
    }

    // ==================== Blocks ====================

    /// Parses `{ statement* }` and returns the statements.
    pub(super) fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.expect(TokenKind::LeftBrace, "`{`")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RightBrace, "`}`")?;
        Ok(statements)
    }

    /// Parses a brace block as a [`StatementKind::Block`].
    pub(super) fn parse_block_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_span();
        let statements = self.parse_block()?;
        let span = self.span_from(start);
        Ok(Statement::new(StatementKind::Block(statements), span))
    }

    // ==================== Expression Statement ====================

    /// Parses `expression;`.
    ///
    /// A bare match expression may leave out the `;`, since its closing
    /// brace already ends it.
    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_span();
        let expr = self.parse_expression()?;

        let is_match = matches!(expr.kind, ExprKind::Match { .. });
        if !self.match_token(TokenKind::Semicolon) && !is_match {
            return Err(self.error_here("`;` after expression"));
        }

        let span = self.span_from(start);
        Ok(Statement::new(StatementKind::Expression(expr), span))
    }
}
