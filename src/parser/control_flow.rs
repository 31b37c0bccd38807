//! Control flow statement parsing.
//!
//! This module handles parsing of control flow constructs:
//! - `if` / `else if` / `else`
//! - `try` / `catch` / `finally`

use crate::ast::{CatchClause, Statement, StatementKind};
use crate::lexer::TokenKind;

use super::expressions::unwrap_grouping;
use super::{ParseError, Parser};

impl<'a> Parser<'a> {
    // ==================== If Statement ====================

    /// Parses an if statement.
    ///
    /// The condition may be parenthesized or bare; both give the same tree.
    pub(super) fn parse_if(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_span();
        self.advance(); // consume if

        let condition = unwrap_grouping(self.parse_expression()?);
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(TokenKind::Else) {
            // `else if` goes through the dispatcher so the chain counts as nesting.
            let branch = if self.check(TokenKind::If) {
                self.parse_statement()?
            } else {
                self.parse_block_statement()?
            };
            Some(Box::new(branch))
        } else {
            None
        };

        let span = self.span_from(start);
        Ok(Statement::new(
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    // ==================== Try Statement ====================

    /// Parses `try { } [catch [(name)] { }] [finally { }]`.
    ///
    /// At least one of `catch` and `finally` must follow the body.
    pub(super) fn parse_try(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_span();
        self.advance(); // consume try

        let body = self.parse_block()?;

        let catch = if self.match_token(TokenKind::Catch) {
            let binding = if self.match_token(TokenKind::LeftParen) {
                let name = self.expect_identifier("name of the caught value")?;
                self.expect(TokenKind::RightParen, "`)` after catch binding")?;
                Some(name)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause { binding, body })
        } else {
            None
        };

        let finally = if self.match_token(TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if catch.is_none() && finally.is_none() {
            return Err(self.error_here("`catch` or `finally` after try block"));
        }

        let span = self.span_from(start);
        Ok(Statement::new(
            StatementKind::Try {
                body,
                catch,
                finally,
            },
            span,
        ))
    }
}
