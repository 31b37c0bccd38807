//! Raw token patterns for the dvibhasha lexer.
//!
//! We use the `logos` crate to generate the scanner. Operators and
//! punctuation map straight onto their canonical [`TokenKind`]; words are
//! left as [`RawToken::Word`] so the wrapper can run them through the
//! keyword tables. Quoted literals are scanned by hand in callbacks because
//! they need escape handling and, for templates, brace matching.

use logos::Logos;

use super::{LexErrorKind, TokenKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub(super) enum RawToken {
    #[token("(", |_lex| TokenKind::LeftParen)]
    #[token(")", |_lex| TokenKind::RightParen)]
    #[token("{", |_lex| TokenKind::LeftBrace)]
    #[token("}", |_lex| TokenKind::RightBrace)]
    #[token(",", |_lex| TokenKind::Comma)]
    #[token(".", |_lex| TokenKind::Dot)]
    #[token(";", |_lex| TokenKind::Semicolon)]
    #[token("।", |_lex| TokenKind::Semicolon)]
    #[token(":", |_lex| TokenKind::Colon)]
    #[token("->", |_lex| TokenKind::Arrow)]
    #[token("+", |_lex| TokenKind::Plus)]
    #[token("-", |_lex| TokenKind::Minus)]
    #[token("*", |_lex| TokenKind::Star)]
    #[token("/", |_lex| TokenKind::Slash)]
    #[token("%", |_lex| TokenKind::Percent)]
    #[token("!", |_lex| TokenKind::Bang)]
    #[token("~", |_lex| TokenKind::Tilde)]
    #[token("^", |_lex| TokenKind::Caret)]
    #[token("&", |_lex| TokenKind::Ampersand)]
    #[token("|", |_lex| TokenKind::Pipe)]
    #[token("&&", |_lex| TokenKind::AndAnd)]
    #[token("||", |_lex| TokenKind::OrOr)]
    #[token("<<", |_lex| TokenKind::ShiftLeft)]
    #[token(">>", |_lex| TokenKind::ShiftRight)]
    #[token("=", |_lex| TokenKind::Equal)]
    #[token("==", |_lex| TokenKind::EqualEqual)]
    #[token("!=", |_lex| TokenKind::BangEqual)]
    #[token("<", |_lex| TokenKind::Less)]
    #[token("<=", |_lex| TokenKind::LessEqual)]
    #[token(">", |_lex| TokenKind::Greater)]
    #[token(">=", |_lex| TokenKind::GreaterEqual)]
    #[token("+=", |_lex| TokenKind::PlusEqual)]
    #[token("-=", |_lex| TokenKind::MinusEqual)]
    #[token("*=", |_lex| TokenKind::StarEqual)]
    #[token("/=", |_lex| TokenKind::SlashEqual)]
    #[token("%=", |_lex| TokenKind::PercentEqual)]
    Symbol(TokenKind),

    /// Digit run with an optional fraction: `42`, `3.14`
    #[regex(r"[0-9]+", scan_fraction)]
    Number,

    /// `'...'` or `"..."`
    #[token("\"", |lex| scan_quoted(lex, '"'))]
    #[token("'", |lex| scan_quoted(lex, '\''))]
    Str,

    /// `` `...` `` with `${...}` spans
    #[token("`", scan_template)]
    Template,

    /// Latin or Devanagari word. Devanagari digits and the dandas cannot
    /// start a word; the dandas are punctuation.
    #[regex(r"[A-Za-z_\x{0900}-\x{0963}\x{0970}-\x{097F}][A-Za-z0-9_\x{0900}-\x{0963}\x{0966}-\x{097F}]*")]
    Word,
}

/// Extends a digit run with a fraction when a `.` is followed by a digit.
fn scan_fraction(lex: &mut logos::Lexer<RawToken>) {
    let rest = lex.remainder();
    let mut chars = rest.chars();
    if chars.next() != Some('.') || !chars.next().is_some_and(|c| c.is_ascii_digit()) {
        return;
    }
    let digits = rest[1..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len() - 1);
    lex.bump(1 + digits);
}

/// Scans to the closing `quote` of a single-line string.
///
/// The opening quote has already been consumed. On success the whole
/// literal, quotes included, becomes the token slice. A string that hits the
/// end of its line first is an error covering the rest of the line.
fn scan_quoted(lex: &mut logos::Lexer<RawToken>, quote: char) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                // An escape never ends the string, but it cannot hide a newline.
                if let Some((j, '\n')) = chars.next() {
                    lex.bump(j);
                    return Err(LexErrorKind::UnterminatedString);
                }
            }
            '\n' => {
                lex.bump(i);
                return Err(LexErrorKind::UnterminatedString);
            }
            c if c == quote => {
                lex.bump(i + c.len_utf8());
                return Ok(());
            }
            _ => {}
        }
    }

    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedString)
}

/// Scans to the closing backtick of a template literal.
///
/// Templates may span lines. Inside `${...}` braces are counted so that a
/// nested block does not end the interpolation early, and `'`/`"` strings
/// are skipped whole so braces inside them do not count.
fn scan_template(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices().peekable();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            match c {
                '\\' => {
                    chars.next();
                }
                c if c == q => quote = None,
                _ => {}
            }
            continue;
        }

        match c {
            '\\' if depth == 0 => {
                chars.next();
            }
            '$' if depth == 0 && matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                depth = 1;
            }
            '{' if depth > 0 => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '"' | '\'' if depth > 0 => quote = Some(c),
            '`' if depth == 0 => {
                lex.bump(i + 1);
                return Ok(());
            }
            _ => {}
        }
    }

    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedTemplate)
}

/// Resolves backslash escapes in the body of a quoted string.
///
/// Unknown escapes pass the escaped character through unchanged.
pub(super) fn unescape(body: &str) -> String {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped) => value.push(resolve_escape(escaped)),
            None => value.push('\\'),
        }
    }

    value
}

/// Resolves escapes in the body of a template literal.
///
/// `${...}` spans are copied verbatim. `\$` and `\\` keep their backslash
/// so the parser can tell an escaped dollar from the start of an
/// interpolation.
pub(super) fn unescape_template(body: &str) -> String {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if depth > 0 {
            value.push(c);
            match (quote, c) {
                (Some(_), '\\') => {
                    if let Some(escaped) = chars.next() {
                        value.push(escaped);
                    }
                }
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '{') => depth += 1,
                (None, '}') => depth -= 1,
                (None, _) => {}
            }
            continue;
        }

        match c {
            '\\' => match chars.next() {
                Some('$') => value.push_str("\\$"),
                Some('\\') => value.push_str("\\\\"),
                Some(escaped) => value.push(resolve_escape(escaped)),
                None => value.push('\\'),
            },
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                value.push_str("${");
                depth = 1;
            }
            c => value.push(c),
        }
    }

    value
}

fn resolve_escape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        // \' \" \` \\ and anything unknown
        other => other,
    }
}
