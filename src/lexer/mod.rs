//! Lexical analysis for dvibhasha.
//!
//! This module converts source code into a stream of [`Token`]s.
//! It handles:
//!
//! - Keywords in Devanagari or romanized spelling, and uppercase operator
//!   mnemonics, all resolved to one canonical [`TokenKind`]
//! - Numbers with an optional decimal fraction
//! - `'`/`"` strings with backslash escapes, and backtick templates that
//!   keep their `${...}` spans for the parser
//! - `//` line comments
//!
//! ## Example
//!
//! ```
//! use dvibhasha::lexer::{lex, TokenKind};
//!
//! let tokens = lex("karya f() { lautao 1 YOGA 2; }");
//! assert_eq!(tokens[0].kind, TokenKind::Function);
//! assert_eq!(tokens[5].kind, TokenKind::Return);
//! assert_eq!(tokens[7].kind, TokenKind::Plus);
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! ```
//!
//! ## Design Notes
//!
//! Scanning is done by a `logos`-generated DFA over a private raw token
//! enum. The [`Lexer`] wrapper turns raw tokens into canonical ones:
//!
//! - words go through the keyword tables (see [`lookup_keyword`])
//! - literal values are parsed and attached to the token
//! - line numbers are computed from byte offsets
//! - scanning errors become [`TokenKind::Invalid`] tokens, so one bad
//!   character never stops the rest of the file from being lexed

mod error;
mod keywords;
mod raw;
mod token;

pub use error::{LexError, LexErrorKind};
pub use keywords::{Script, lookup_keyword, lookup_with_script, spellings_of};
pub use token::{Literal, Token, TokenKind};

use logos::Logos;

use self::raw::RawToken;

/// The lexer for dvibhasha source code.
///
/// Wraps a `logos` lexer and yields [`Token`]s, finishing with a single
/// [`TokenKind::Eof`] token.
///
/// ## Example
///
/// ```
/// use dvibhasha::lexer::{Lexer, TokenKind};
///
/// let kinds: Vec<_> = Lexer::new("yadi x").map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![TokenKind::If, TokenKind::Identifier, TokenKind::Eof]);
/// ```
pub struct Lexer<'source> {
    /// The underlying logos lexer
    inner: logos::Lexer<'source, RawToken>,
    /// The original source (for line counting)
    source: &'source str,
    /// Line number at `line_offset`
    line: usize,
    /// Byte offset up to which newlines have been counted
    line_offset: usize,
    /// Whether the end-of-input token has been produced
    finished: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: RawToken::lexer(source),
            source,
            line: 1,
            line_offset: 0,
            finished: false,
        }
    }

    /// Get the next token, if any.
    ///
    /// Returns `None` only after the [`TokenKind::Eof`] token has been
    /// returned.
    pub fn next_token(&mut self) -> Option<Token> {
        let Some(result) = self.inner.next() else {
            if self.finished {
                return None;
            }
            self.finished = true;
            let end = self.source.len();
            let line = self.line_at(end);
            return Some(Token::new(TokenKind::Eof, "", line, end..end));
        };

        let span = self.inner.span();
        let text = self.inner.slice();
        let line = self.line_at(span.start);

        let token = match result {
            Ok(RawToken::Symbol(kind)) => Token::new(kind, text, line, span),
            Ok(RawToken::Number) => match text.parse::<f64>() {
                Ok(value) => Token::new(TokenKind::NumberLiteral, text, line, span)
                    .with_literal(Literal::Number(value)),
                Err(_) => Token::new(
                    TokenKind::Invalid(LexErrorKind::InvalidNumber),
                    text,
                    line,
                    span,
                ),
            },
            Ok(RawToken::Str) => {
                let body = &text[1..text.len() - 1];
                Token::new(TokenKind::StringLiteral, text, line, span)
                    .with_literal(Literal::Str(raw::unescape(body)))
            }
            Ok(RawToken::Template) => {
                let body = &text[1..text.len() - 1];
                Token::new(TokenKind::TemplateLiteral, text, line, span)
                    .with_literal(Literal::Str(raw::unescape_template(body)))
            }
            Ok(RawToken::Word) => word_token(text, line, span),
            Err(kind) => Token::new(TokenKind::Invalid(kind), text, line, span),
        };

        Some(token)
    }

    /// Collect all remaining tokens into a vector.
    ///
    /// This consumes the lexer.
    pub fn collect_tokens(self) -> Vec<Token> {
        self.collect()
    }

    /// Returns the 1-based line containing byte `offset`.
    ///
    /// Offsets only move forward, so newlines are counted incrementally.
    fn line_at(&mut self, offset: usize) -> usize {
        if offset > self.line_offset {
            self.line += self.source[self.line_offset..offset]
                .bytes()
                .filter(|b| *b == b'\n')
                .count();
            self.line_offset = offset;
        }
        self.line
    }
}

/// Builds the token for an identifier-like word.
fn word_token(text: &str, line: usize, span: std::ops::Range<usize>) -> Token {
    match lookup_keyword(text) {
        Some(kind @ TokenKind::True) => {
            Token::new(kind, text, line, span).with_literal(Literal::Bool(true))
        }
        Some(kind @ TokenKind::False) => {
            Token::new(kind, text, line, span).with_literal(Literal::Bool(false))
        }
        Some(kind @ TokenKind::Null) => Token::new(kind, text, line, span).with_literal(Literal::Null),
        Some(kind) => Token::new(kind, text, line, span),
        None => Token::new(TokenKind::Identifier, text, line, span),
    }
}

/// Implement Iterator so the lexer can be used with for loops and iterator adapters.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Convenience function to lex source code directly.
///
/// The returned vector always ends with a [`TokenKind::Eof`] token.
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect_tokens()
}

/// Extracts the lexical errors recorded in a token stream.
///
/// # Example
///
/// ```
/// use dvibhasha::lexer::{lex, lex_errors, LexErrorKind};
///
/// let errors = lex_errors(&lex("let s = \"oops\nlet t = 1;"));
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].kind, LexErrorKind::UnterminatedString);
/// assert_eq!(errors[0].line, 1);
/// ```
pub fn lex_errors(tokens: &[Token]) -> Vec<LexError> {
    tokens
        .iter()
        .filter_map(|token| {
            token.lex_error().map(|kind| LexError {
                kind,
                text: token.text.clone(),
                line: token.line,
                span: token.span.clone(),
            })
        })
        .collect()
}
