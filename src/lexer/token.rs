//! Token definitions for the dvibhasha lexer.
//!
//! A [`Token`] pairs a canonical [`TokenKind`] with the surface spelling the
//! author actually wrote. Every keyword and operator can be written in more
//! than one script, so the kind is the identity the parser works with and the
//! text is only kept for diagnostics and tooling.
//!
//! ## Design Notes
//!
//! Kinds are dataless (apart from [`TokenKind::Invalid`]), which keeps them
//! `Copy` and cheap to compare. Parsed literal values travel separately in
//! [`Token::literal`].

use std::fmt;

use super::error::LexErrorKind;

/// A token with its location in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The canonical kind of token
    pub kind: TokenKind,
    /// The original surface spelling
    pub text: String,
    /// Parsed value for number, string, template, boolean and null tokens
    pub literal: Option<Literal>,
    /// 1-based source line where the token starts
    pub line: usize,
    /// Byte offsets of the token in the source
    pub span: std::ops::Range<usize>,
}

impl Token {
    /// Create a new token without a literal value.
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        line: usize,
        span: std::ops::Range<usize>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            literal: None,
            line,
            span,
        }
    }

    /// Attach a parsed literal value.
    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    /// Returns the lexical error carried by an [`TokenKind::Invalid`] token.
    pub fn lex_error(&self) -> Option<LexErrorKind> {
        match self.kind {
            TokenKind::Invalid(kind) => Some(kind),
            _ => None,
        }
    }
}

/// A literal value attached to a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    /// String contents with escapes resolved. For templates, `${...}` spans
    /// are kept verbatim.
    Str(String),
    Bool(bool),
    Null,
}

/// Canonical token kinds.
///
/// Every surface spelling of a keyword or operator maps onto exactly one of
/// these, whichever script it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ==================== Punctuation ====================
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    /// `;` or the danda `।`
    Semicolon,
    Colon,
    /// `->` return types and match arms
    Arrow,

    // ==================== Operators ====================
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Tilde,
    Caret,
    Ampersand,
    Pipe,
    AndAnd,
    OrOr,
    ShiftLeft,
    ShiftRight,
    Equal,
    EqualEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,

    // ==================== Literals ====================
    NumberLiteral,
    StringLiteral,
    TemplateLiteral,
    True,
    False,
    Null,
    Identifier,

    // ==================== Keywords ====================
    Function,
    Class,
    If,
    Else,
    Try,
    Catch,
    Finally,
    Return,
    Const,
    Let,
    Async,
    Await,
    Match,
    Default,

    // ==================== Special ====================
    /// Text the lexer could not turn into a token.
    Invalid(LexErrorKind),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns true for kinds that may begin a statement the parser
    /// synchronizes on after an error.
    pub fn starts_declaration(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Function
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::If
                | TokenKind::Try
                | TokenKind::Async
        )
    }

    /// Returns true for the assignment operators (`=` and compound forms).
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::StarEqual
                | TokenKind::SlashEqual
                | TokenKind::PercentEqual
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Arrow => "`->`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Bang => "`!`",
            TokenKind::Tilde => "`~`",
            TokenKind::Caret => "`^`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::AndAnd => "`&&`",
            TokenKind::OrOr => "`||`",
            TokenKind::ShiftLeft => "`<<`",
            TokenKind::ShiftRight => "`>>`",
            TokenKind::Equal => "`=`",
            TokenKind::EqualEqual => "`==`",
            TokenKind::BangEqual => "`!=`",
            TokenKind::Less => "`<`",
            TokenKind::LessEqual => "`<=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEqual => "`>=`",
            TokenKind::PlusEqual => "`+=`",
            TokenKind::MinusEqual => "`-=`",
            TokenKind::StarEqual => "`*=`",
            TokenKind::SlashEqual => "`/=`",
            TokenKind::PercentEqual => "`%=`",
            TokenKind::NumberLiteral => "number",
            TokenKind::StringLiteral => "string",
            TokenKind::TemplateLiteral => "template literal",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::Identifier => "identifier",
            TokenKind::Function => "`function`",
            TokenKind::Class => "`class`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::Try => "`try`",
            TokenKind::Catch => "`catch`",
            TokenKind::Finally => "`finally`",
            TokenKind::Return => "`return`",
            TokenKind::Const => "`const`",
            TokenKind::Let => "`let`",
            TokenKind::Async => "`async`",
            TokenKind::Await => "`await`",
            TokenKind::Match => "`match`",
            TokenKind::Default => "`default`",
            TokenKind::Invalid(_) => "invalid token",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}
