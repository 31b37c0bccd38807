//! Token navigation utilities for the parser.
//!
//! This module provides the low-level token stream operations that form
//! the foundation of the recursive descent parser:
//! - Peeking at tokens without consuming them
//! - Advancing through the token stream
//! - Matching and expecting specific tokens
//! - Error recovery (synchronization)

use crate::ast::Span;
use crate::lexer::{LexError, Token, TokenKind};

use super::{ParseError, Parser};

/// Converts a token's location into an AST span.
pub(super) fn span_of(token: &Token) -> Span {
    Span::new(token.span.start, token.span.end, token.line)
}

impl<'a> Parser<'a> {
    // ==================== Token Navigation ====================

    /// Returns the current token without consuming it.
    ///
    /// Past the end of the slice this keeps returning the end-of-input token.
    pub(super) fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    /// Returns the kind of the current token.
    pub(super) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Returns the most recently consumed token.
    pub(super) fn previous(&self) -> Option<&Token> {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
            if let Some(token) = self.tokens.get(self.current - 1) {
                return token;
            }
        }
        &self.eof
    }

    /// Returns true if we've reached the end of the token stream.
    pub(super) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Checks if the current token matches the expected kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Checks if the current token is one of the expected kinds.
    pub(super) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek_kind())
    }

    /// Consumes the current token if it matches, returns true if consumed.
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the expected kind, otherwise
    /// returns an error describing what was found instead.
    pub(super) fn expect(
        &mut self,
        kind: TokenKind,
        expected_desc: &str,
    ) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(expected_desc))
        }
    }

    /// Consumes an identifier and returns its text.
    pub(super) fn expect_identifier(&mut self, expected_desc: &str) -> Result<String, ParseError> {
        Ok(self.expect(TokenKind::Identifier, expected_desc)?.text.clone())
    }

    /// Builds the error for the current token not being `expected_desc`.
    ///
    /// An invalid token is reported as the lexical error it carries, so a bad
    /// character or unterminated string gets its own message.
    pub(super) fn error_here(&self, expected_desc: &str) -> ParseError {
        let token = self.peek();
        let span = span_of(token);
        match token.kind {
            TokenKind::Invalid(kind) => ParseError::Lexical(LexError {
                kind,
                text: token.text.clone(),
                line: token.line,
                span: token.span.clone(),
            }),
            TokenKind::Eof => ParseError::eof(expected_desc, span),
            _ => ParseError::unexpected(expected_desc, format!("`{}`", token.text), span),
        }
    }

    // ==================== Error Recovery ====================

    /// Skips past the statement that began at token index `start`.
    ///
    /// Stops after a `;` or before a token that begins a declaration, but
    /// only outside braces opened by the failed statement, so a broken
    /// function body is discarded as a whole. Always consumes at least one
    /// token.
    pub(super) fn synchronize(&mut self, start: usize) {
        if self.current == start {
            self.advance();
        }

        let mut depth = self.tokens[start..self.current.min(self.tokens.len())]
            .iter()
            .fold(0usize, |depth, token| match token.kind {
                TokenKind::LeftBrace => depth + 1,
                TokenKind::RightBrace => depth.saturating_sub(1),
                _ => depth,
            });

        if depth == 0 && self.previous().is_some_and(|t| t.kind == TokenKind::Semicolon) {
            return;
        }

        while !self.is_at_end() {
            match self.peek_kind() {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        if self.match_token(TokenKind::Semicolon) {
                            return;
                        }
                        // `} else {` and friends still belong to the statement.
                        let continues =
                            [TokenKind::Else, TokenKind::Catch, TokenKind::Finally];
                        if !self.check_any(&continues) {
                            return;
                        }
                        continue;
                    }
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                kind if depth == 0 && kind.starts_declaration() => return,
                _ => {}
            }
            self.advance();
        }
    }

    /// Returns the span of the current token.
    pub(super) fn current_span(&self) -> Span {
        span_of(self.peek())
    }

    /// Creates a span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: Span) -> Span {
        let end = self
            .previous()
            .map(|t| t.span.end)
            .unwrap_or(start.end)
            .max(start.start);
        Span::new(start.start, end, start.line)
    }
}
