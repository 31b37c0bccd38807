//! Expression parsing using Pratt (precedence climbing) parsing.
//!
//! Pratt parsing handles:
//! - Binary operators with correct precedence and associativity
//! - Right-associative assignment, with a check on the target
//! - Unary operators (`!`, `-`, `~`) and `await`
//! - Calls and member access as postfix operators
//! - Pattern matches and template literals as primaries
//!
//! # Precedence Levels (lowest to highest)
//!
//! 1. Assignment (`=`, `+=`, `-=`, `*=`, `/=`, `%=`)
//! 2. `||`
//! 3. `&&`
//! 4. `|`
//! 5. `^`
//! 6. `&`
//! 7. Shift (`<<`, `>>`)
//! 8. Equality (`==`, `!=`)
//! 9. Relational (`<`, `<=`, `>`, `>=`)
//! 10. Additive (`+`, `-`)
//! 11. Multiplicative (`*`, `/`, `%`)
//! 12. Unary (`!`, `-`, `~`, `await`)
//! 13. Postfix (calls, `.`)

use crate::ast::{
    AssignOp, BinaryOp, CasePattern, Expr, ExprKind, LiteralValue, MatchCase, Span, Statement,
    StatementKind, TemplatePart, UnaryOp,
};
use crate::lexer::{Literal, TokenKind, lex, lookup_keyword};

use super::tokens::span_of;
use super::{MAX_NESTING, ParseError, Parser, Precedence};

impl<'a> Parser<'a> {
    // ==================== Expression Parsing (Pratt Parser) ====================

    /// Parses an expression.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_precedence(Precedence::Lowest)
    }

    /// Parses an expression with the given minimum precedence.
    pub(super) fn parse_expr_precedence(
        &mut self,
        min_prec: Precedence,
    ) -> Result<Expr, ParseError> {
        self.nested(|parser| {
            // Parse prefix (primary expression or unary operator)
            let mut left = parser.parse_prefix()?;
            let mut height = left.depth();

            // Parse infix and postfix operators while they bind tighter than min_prec.
            // Each one wraps `left` a level deeper without recursing, so the
            // height of the chain is checked here.
            loop {
                let op_prec = Self::get_precedence(parser.peek_kind());
                if op_prec <= min_prec {
                    break;
                }
                let op_span = parser.current_span();
                left = parser.parse_infix(left, op_prec)?;
                height = chain_height(&left, height);
                if parser.depth + height > MAX_NESTING {
                    return Err(ParseError::NestingTooDeep { span: op_span });
                }
            }

            Ok(left)
        })
    }

    /// Parses a prefix expression (literal, identifier, unary op, or grouped).
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek();

        match token.kind {
            TokenKind::NumberLiteral
            | TokenKind::StringLiteral
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => self.parse_literal(),
            TokenKind::TemplateLiteral => self.parse_template(),
            TokenKind::Identifier => {
                let expr = Expr::new(ExprKind::Variable(token.text.clone()), span_of(token));
                self.advance();
                Ok(expr)
            }
            TokenKind::LeftParen => self.parse_grouped(),
            TokenKind::Match => self.parse_match(),
            TokenKind::Bang => self.parse_unary(UnaryOp::Not),
            TokenKind::Minus => self.parse_unary(UnaryOp::Negate),
            TokenKind::Tilde => self.parse_unary(UnaryOp::BitNot),
            TokenKind::Await => self.parse_await(),
            TokenKind::Invalid(_) | TokenKind::Eof => Err(self.error_here("expression")),
            _ => Err(ParseError::InvalidExpression {
                span: span_of(token),
                message: format!("`{}` cannot start an expression", token.text),
            }),
        }
    }

    /// Parses an infix or postfix operation whose left operand is `left`.
    fn parse_infix(&mut self, left: Expr, precedence: Precedence) -> Result<Expr, ParseError> {
        let op_token = self.advance();
        let op_kind = op_token.kind;
        let op_span = span_of(op_token);
        let op_text = op_token.text.clone();

        match op_kind {
            TokenKind::LeftParen => {
                let args = self.parse_argument_list()?;
                self.expect(TokenKind::RightParen, "`)` after arguments")?;
                let span = self.span_from(left.span);
                Ok(Expr::new(
                    ExprKind::Call {
                        callee: Box::new(left),
                        args,
                    },
                    span,
                ))
            }
            TokenKind::Dot => {
                let property = self.parse_property_name()?;
                let span = self.span_from(left.span);
                Ok(Expr::new(
                    ExprKind::Member {
                        object: Box::new(left),
                        property,
                    },
                    span,
                ))
            }
            kind if kind.is_assignment() => {
                if !matches!(left.kind, ExprKind::Variable(_) | ExprKind::Member { .. }) {
                    return Err(ParseError::InvalidAssignmentTarget { span: left.span });
                }
                let op = Self::token_to_assign_op(kind).unwrap_or(AssignOp::Assign);

                // Right-associative: parse the value below assignment level
                let value = self.parse_expr_precedence(Precedence::Lowest)?;
                let span = left.span.merge(&value.span);
                Ok(Expr::new(
                    ExprKind::Assignment {
                        target: Box::new(left),
                        op,
                        value: Box::new(value),
                    },
                    span,
                ))
            }
            kind => {
                let op = Self::token_to_binary_op(kind).ok_or_else(|| {
                    ParseError::unexpected("operator", format!("`{op_text}`"), op_span)
                })?;
                let right = self.parse_expr_precedence(precedence)?;
                let span = left.span.merge(&right.span);
                Ok(Expr::new(
                    ExprKind::Binary {
                        left: Box::new(left),
                        op,
                        right: Box::new(right),
                    },
                    span,
                ))
            }
        }
    }

    /// Parses a number, string, boolean or null literal.
    fn parse_literal(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance();
        let span = span_of(token);

        let value = match &token.literal {
            Some(Literal::Number(n)) => LiteralValue::Number(*n),
            Some(Literal::Str(s)) => LiteralValue::String(s.clone()),
            Some(Literal::Bool(b)) => LiteralValue::Bool(*b),
            Some(Literal::Null) => LiteralValue::Null,
            None => {
                return Err(ParseError::InvalidExpression {
                    span,
                    message: format!("`{}` has no literal value", token.text),
                });
            }
        };

        Ok(Expr::new(ExprKind::Literal(value), span))
    }

    /// Parses the name after a `.`.
    ///
    /// Keyword spellings are allowed here, so `promise.catch` is a member
    /// access rather than a syntax error.
    fn parse_property_name(&mut self) -> Result<String, ParseError> {
        let token = self.peek();
        if token.kind == TokenKind::Identifier || lookup_keyword(&token.text).is_some() {
            let name = token.text.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error_here("property name after `.`"))
        }
    }

    /// Parses a parenthesized expression.
    fn parse_grouped(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span();
        self.advance(); // consume (
        let inner = self.parse_expression()?;
        self.expect(TokenKind::RightParen, "`)`")?;
        let span = self.span_from(start);
        Ok(Expr::new(ExprKind::Grouping(Box::new(inner)), span))
    }

    /// Parses a unary expression.
    fn parse_unary(&mut self, op: UnaryOp) -> Result<Expr, ParseError> {
        let start = self.current_span();
        self.advance(); // consume operator
        let operand = self.parse_expr_precedence(Precedence::Unary)?;
        let span = self.span_from(start);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// Parses `await operand`.
    fn parse_await(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span();
        self.advance(); // consume await
        let operand = self.parse_expr_precedence(Precedence::Unary)?;
        let span = self.span_from(start);
        Ok(Expr::new(ExprKind::Await(Box::new(operand)), span))
    }

    /// Parses a comma-separated argument list.
    pub(super) fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if !self.check(TokenKind::RightParen) {
            args.push(self.parse_expression()?);

            while self.match_token(TokenKind::Comma) {
                args.push(self.parse_expression()?);
            }
        }

        Ok(args)
    }

    // ==================== Pattern Match ====================

    /// Parses `match subject { pattern -> body, ... }`.
    ///
    /// Arms may be separated by `,` or `;`, or not at all. An arm body is a
    /// brace block or a single expression.
    fn parse_match(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span();
        self.advance(); // consume match

        let subject = unwrap_grouping(self.parse_expression()?);
        self.expect(TokenKind::LeftBrace, "`{` after match subject")?;

        let mut cases = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let pattern = if self.match_token(TokenKind::Default) {
                CasePattern::Default
            } else {
                CasePattern::Value(self.parse_pattern()?)
            };
            self.expect(TokenKind::Arrow, "`->` after match pattern")?;

            let body = if self.check(TokenKind::LeftBrace) {
                self.parse_block_statement()?
            } else {
                let value = self.parse_expression()?;
                let span = value.span;
                Statement::new(StatementKind::Expression(value), span)
            };

            if !self.match_token(TokenKind::Comma) {
                self.match_token(TokenKind::Semicolon);
            }
            cases.push(MatchCase { pattern, body });
        }

        self.expect(TokenKind::RightBrace, "`}` to close match")?;
        let span = self.span_from(start);
        Ok(Expr::new(
            ExprKind::Match {
                subject: Box::new(subject),
                cases,
            },
            span,
        ))
    }

    /// Parses a match pattern: a literal, or a negated number.
    fn parse_pattern(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Minus) {
            let start = self.current_span();
            self.advance();
            if !self.check(TokenKind::NumberLiteral) {
                return Err(self.error_here("number after `-` in match pattern"));
            }
            let literal = self.parse_literal()?;
            let span = self.span_from(start);
            return match literal.kind {
                ExprKind::Literal(LiteralValue::Number(n)) => {
                    Ok(Expr::new(ExprKind::Literal(LiteralValue::Number(-n)), span))
                }
                _ => Err(ParseError::InvalidExpression {
                    span,
                    message: "expected a number after `-`".to_string(),
                }),
            };
        }

        match self.peek_kind() {
            TokenKind::NumberLiteral
            | TokenKind::StringLiteral
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => self.parse_literal(),
            _ => Err(self.error_here("literal pattern")),
        }
    }

    // ==================== Template Literals ====================

    /// Parses a template literal into text and interpolated expressions.
    ///
    /// Each `${...}` source is lexed and parsed on its own by a nested
    /// parser; any failure in it becomes one [`ParseError::Template`] for
    /// the whole literal.
    fn parse_template(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance();
        let span = span_of(token);
        let body = match &token.literal {
            Some(Literal::Str(body)) => body.clone(),
            _ => String::new(),
        };

        let mut parts = Vec::new();
        for segment in split_template(&body) {
            match segment {
                Segment::Text(text) => parts.push(TemplatePart::Text(text)),
                Segment::Source { text, offset } => {
                    // Positions are exact only when no escape precedes the
                    // interpolation.
                    let base = Span::new(
                        span.start + 1 + offset,
                        span.start + 1 + offset + text.len(),
                        span.line + body[..offset].matches('\n').count(),
                    );
                    let expr = parse_interpolation(&text, base, self.depth).map_err(|err| {
                        ParseError::Template {
                            message: err.to_string(),
                            span,
                        }
                    })?;
                    parts.push(TemplatePart::Expr(expr));
                }
            }
        }

        Ok(Expr::new(ExprKind::Template(parts), span))
    }

    // ==================== Operator Tables ====================

    /// Returns the precedence of a token (for infix and postfix operators).
    pub(super) fn get_precedence(kind: TokenKind) -> Precedence {
        match kind {
            kind if kind.is_assignment() => Precedence::Assignment,
            TokenKind::OrOr => Precedence::Or,
            TokenKind::AndAnd => Precedence::And,
            TokenKind::Pipe => Precedence::BitOr,
            TokenKind::Caret => Precedence::BitXor,
            TokenKind::Ampersand => Precedence::BitAnd,
            TokenKind::ShiftLeft | TokenKind::ShiftRight => Precedence::Shift,
            TokenKind::EqualEqual | TokenKind::BangEqual => Precedence::Equality,
            TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => Precedence::Relational,
            TokenKind::Plus | TokenKind::Minus => Precedence::Additive,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Multiplicative,
            TokenKind::LeftParen | TokenKind::Dot => Precedence::Postfix,
            _ => Precedence::Lowest,
        }
    }

    /// Converts a token kind to a binary operator.
    pub(super) fn token_to_binary_op(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Subtract),
            TokenKind::Star => Some(BinaryOp::Multiply),
            TokenKind::Slash => Some(BinaryOp::Divide),
            TokenKind::Percent => Some(BinaryOp::Modulo),
            TokenKind::EqualEqual => Some(BinaryOp::Equal),
            TokenKind::BangEqual => Some(BinaryOp::NotEqual),
            TokenKind::Less => Some(BinaryOp::Less),
            TokenKind::LessEqual => Some(BinaryOp::LessEqual),
            TokenKind::Greater => Some(BinaryOp::Greater),
            TokenKind::GreaterEqual => Some(BinaryOp::GreaterEqual),
            TokenKind::AndAnd => Some(BinaryOp::And),
            TokenKind::OrOr => Some(BinaryOp::Or),
            TokenKind::Ampersand => Some(BinaryOp::BitAnd),
            TokenKind::Pipe => Some(BinaryOp::BitOr),
            TokenKind::Caret => Some(BinaryOp::BitXor),
            TokenKind::ShiftLeft => Some(BinaryOp::ShiftLeft),
            TokenKind::ShiftRight => Some(BinaryOp::ShiftRight),
            _ => None,
        }
    }

    /// Converts a token kind to an assignment operator.
    pub(super) fn token_to_assign_op(kind: TokenKind) -> Option<AssignOp> {
        match kind {
            TokenKind::Equal => Some(AssignOp::Assign),
            TokenKind::PlusEqual => Some(AssignOp::AddAssign),
            TokenKind::MinusEqual => Some(AssignOp::SubtractAssign),
            TokenKind::StarEqual => Some(AssignOp::MultiplyAssign),
            TokenKind::SlashEqual => Some(AssignOp::DivideAssign),
            TokenKind::PercentEqual => Some(AssignOp::ModuloAssign),
            _ => None,
        }
    }
}

/// Strips one layer of parentheses, so `if (c)` and `if c` parse the same.
pub(super) fn unwrap_grouping(expr: Expr) -> Expr {
    match expr.kind {
        ExprKind::Grouping(inner) => *inner,
        _ => expr,
    }
}

/// A piece of template literal text before parsing.
#[derive(Debug, PartialEq)]
enum Segment {
    Text(String),
    /// Source of one `${...}`, starting `offset` bytes into the literal.
    Source { text: String, offset: usize },
}

/// Splits a template body (as produced by the lexer) into text and
/// interpolation sources. The lexer leaves `\$` and `\\` escaped; they are
/// resolved here.
fn split_template(body: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => text.push(escaped),
                None => text.push('\\'),
            },
            '$' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }

                let start = i + 2;
                let mut end = body.len();
                let mut depth = 1usize;
                let mut quote: Option<char> = None;
                while let Some((j, c)) = chars.next() {
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
                        '"' | '\'' => quote = Some(c),
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                end = j;
                                break;
                            }
                        }
                        _ => {}
                    }
                }

                segments.push(Segment::Source {
                    text: body[start..end].to_string(),
                    offset: start,
                });
            }
            c => text.push(c),
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

/// Height of a postfix or infix node whose leftmost operand is `left` high.
fn chain_height(node: &Expr, left: usize) -> usize {
    let rest = match &node.kind {
        ExprKind::Binary { right, .. } => right.depth(),
        ExprKind::Assignment { value, .. } => value.depth(),
        ExprKind::Call { args, .. } => args.iter().map(Expr::depth).max().unwrap_or(0),
        _ => 0,
    };
    1 + left.max(rest)
}

/// Lexes and parses one interpolation as a complete expression.
///
/// Token positions are moved to `base` so nested spans point into the
/// enclosing source. The nested parser starts at the enclosing `depth`.
fn parse_interpolation(source: &str, base: Span, depth: usize) -> Result<Expr, ParseError> {
    let mut tokens = lex(source);
    for token in &mut tokens {
        token.span = token.span.start + base.start..token.span.end + base.start;
        token.line += base.line - 1;
    }

    let mut parser = Parser::new(&tokens);
    parser.depth = depth;
    let expr = parser.parse_expression()?;
    if !parser.is_at_end() {
        return Err(parser.error_here("end of interpolation"));
    }
    Ok(expr)
}
