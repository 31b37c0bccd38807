//! Parser for dvibhasha.
//!
//! The parser transforms a stream of tokens into an Abstract Syntax Tree (AST).
//! It uses recursive descent for statements and Pratt parsing (precedence climbing)
//! for expressions.
//!
//! # Example
//!
//! ```
//! use dvibhasha::lexer::lex;
//! use dvibhasha::parser::Parser;
//!
//! let source = r#"
//!     चर x = 1 YOGA 2;
//!     karya dugna(n) { lautao n * 2; }
//! "#;
//!
//! let tokens = lex(source);
//! let result = Parser::new(&tokens).parse();
//!
//! assert!(result.errors.is_empty());
//! assert_eq!(result.ast.len(), 2);
//! ```
//!
//! # Module Structure
//!
//! The parser is split into focused modules:
//! - [`tokens`] - Token navigation utilities (peek, advance, match, expect)
//! - [`expressions`] - Pratt parser for expressions, match and templates
//! - [`statements`] - Statement dispatcher and simple statements
//! - [`control_flow`] - if/else and try/catch/finally parsing
//! - [`procedures`] - function and class definitions
//! - [`error`] - Parse error types
//!
//! # Error Recovery
//!
//! Every parsing function returns `Result<_, ParseError>` and failures bubble
//! up to the top-level statement loop. There the error is recorded, an
//! [`StatementKind::Error`] placeholder takes the statement's place, and the
//! parser skips ahead to the next statement boundary. One malformed statement
//! therefore costs exactly one diagnostic.
//!
//! Nesting is capped at [`MAX_NESTING`] levels, counting blocks, groupings,
//! unary operators and operator chains alike. Deeper input is reported as
//! [`ParseError::NestingTooDeep`] instead of exhausting the stack.

mod control_flow;
mod error;
mod expressions;
mod procedures;
mod statements;
mod tokens;

pub use error::ParseError;

use crate::ast::{Statement, StatementKind};
use crate::lexer::{Token, TokenKind};

/// Deepest nesting of statements and expressions the parser accepts.
pub const MAX_NESTING: usize = 256;

/// Parser for dvibhasha source code.
///
/// The parser consumes a slice of tokens and produces an AST.
/// Errors are collected and returned alongside the tree rather than
/// stopping at the first one.
pub struct Parser<'a> {
    /// The tokens to parse.
    tokens: &'a [Token],
    /// Current position in the token stream.
    current: usize,
    /// Collected parse errors.
    errors: Vec<ParseError>,
    /// Returned by `peek` once `tokens` runs out.
    eof: Token,
    /// Current nesting level, see [`MAX_NESTING`].
    depth: usize,
}

/// The outcome of parsing a token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Top-level statements, with an [`StatementKind::Error`] placeholder
    /// for each statement that failed to parse.
    pub ast: Vec<Statement>,
    /// One diagnostic per failed statement, in source order.
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if every statement parsed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given tokens.
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        let line = tokens.last().map(|t| t.line).unwrap_or(1);
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            eof: Token::new(TokenKind::Eof, "", line, end..end),
            depth: 0,
        }
    }

    /// Parses the token stream into a list of top-level statements.
    ///
    /// Never fails: problems are reported in [`ParseResult::errors`].
    pub fn parse(&mut self) -> ParseResult {
        let ast = self.parse_program();
        ParseResult {
            ast,
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// Parses a complete program (sequence of statements).
    fn parse_program(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            let start = self.current;
            let start_span = self.current_span();

            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    log::trace!("statement on line {} failed: {err}", start_span.line);
                    self.errors.push(err);
                    self.synchronize(start);
                    let span = self.span_from(start_span);
                    statements.push(Statement::new(StatementKind::Error, span));
                }
            }
        }

        statements
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                span: self.current_span(),
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }
}

/// Operator precedence levels for Pratt parsing.
///
/// Higher values mean higher precedence (bind tighter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub(crate) enum Precedence {
    Lowest = 0,
    Assignment = 1,      // = += -= *= /= %=
    Or = 2,              // ||
    And = 3,             // &&
    BitOr = 4,           // |
    BitXor = 5,          // ^
    BitAnd = 6,          // &
    Shift = 7,           // << >>
    Equality = 8,        // == !=
    Relational = 9,      // < <= > >=
    Additive = 10,       // + -
    Multiplicative = 11, // * / %
    Unary = 12,          // ! - ~ await
    Postfix = 13,        // calls, member access
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, ExprKind, LiteralValue};
    use crate::lexer::lex;

    fn parse(source: &str) -> ParseResult {
        let tokens = lex(source);
        Parser::new(&tokens).parse()
    }

    #[test]
    fn test_parse_empty_program() {
        let result = parse("");
        assert!(result.is_ok());
        assert!(result.ast.is_empty());
    }

    #[test]
    fn test_parse_without_eof_token() {
        let mut tokens = lex("x = 1;");
        tokens.pop();
        let result = Parser::new(&tokens).parse();
        assert!(result.is_ok());
        assert_eq!(result.ast.len(), 1);

        let result = Parser::new(&[]).parse();
        assert!(result.ast.is_empty());
    }

    #[test]
    fn test_parse_precedence() {
        // 1 + 2 * 3 should parse as 1 + (2 * 3)
        let result = parse("x = 1 + 2 * 3;");
        assert_eq!(result.ast[0].to_string(), "(= x (+ 1 (* 2 3)))");
    }

    #[test]
    fn test_parse_precedence_ladder() {
        let result = parse("a || b && c | d ^ e & f;");
        assert_eq!(
            result.ast[0].to_string(),
            "(|| a (&& b (| c (^ d (& e f)))))"
        );

        // Shift sits below equality, which sits below relational.
        let result = parse("a << b == c < d + e;");
        assert_eq!(result.ast[0].to_string(), "(<< a (== b (< c (+ d e))))");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let result = parse("a = b += 2;");
        assert_eq!(result.ast[0].to_string(), "(= a (+= b 2))");
    }

    #[test]
    fn test_left_associative_subtraction() {
        let result = parse("a - b - c;");
        assert_eq!(result.ast[0].to_string(), "(- (- a b) c)");
    }

    #[test]
    fn test_symbolic_operators_parse_like_symbols() {
        let symbolic = parse("x = a YOGA b GUNA c;");
        let plain = parse("x = a + b * c;");
        assert_eq!(symbolic.ast[0].to_string(), plain.ast[0].to_string());
    }

    #[test]
    fn test_parse_multiple_statements() {
        let result = parse("let a = 1;\nconst b = 'two';\na += 3;");
        assert!(result.is_ok());
        assert_eq!(result.ast.len(), 3);
        assert_eq!(result.ast[2].span.line, 3);
    }

    #[test]
    fn test_error_placeholder_per_failed_statement() {
        let result = parse("let a = ;\nlet b = 2;\nfoo(;\nlet c = 3;");
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.ast.len(), 4);
        assert!(matches!(result.ast[0].kind, StatementKind::Error));
        assert!(matches!(result.ast[1].kind, StatementKind::VariableDecl { .. }));
        assert!(matches!(result.ast[2].kind, StatementKind::Error));
        assert!(matches!(result.ast[3].kind, StatementKind::VariableDecl { .. }));
        assert_eq!(result.errors[0].line(), 1);
        assert_eq!(result.errors[1].line(), 3);
    }

    #[test]
    fn test_missing_semicolon_resyncs_at_declaration() {
        let result = parse("let a = 1\nlet b = 2;");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.ast.len(), 2);
        assert!(matches!(result.ast[1].kind, StatementKind::VariableDecl { .. }));
    }

    #[test]
    fn test_broken_function_body_is_one_error() {
        let result = parse("function f() {\n let x = ;\n return 1;\n}\nlet y = 2;");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.ast.len(), 2);
        assert!(matches!(result.ast[0].kind, StatementKind::Error));
        assert_eq!(result.errors[0].line(), 2);
    }

    #[test]
    fn test_broken_if_with_else_is_one_error() {
        let result = parse("if (x { a; } else { b; }\nc;");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.ast.len(), 2);
    }

    #[test]
    fn test_unterminated_string_recovery() {
        let result = parse("let a = 1;\nlet s = \"never closed\nlet b = 2;");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], ParseError::Lexical(_)));
        assert_eq!(result.errors[0].line(), 2);
        assert_eq!(result.ast.len(), 3);
        assert!(matches!(result.ast[2].kind, StatementKind::VariableDecl { .. }));
    }

    #[test]
    fn test_bad_character_costs_one_diagnostic() {
        let result = parse("x = 1 @ 2;\ny = 3;");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.ast.len(), 2);
    }

    #[test]
    fn test_error_count_matches_placeholders() {
        let sources = [
            "}}}",
            "let",
            "if { } else",
            "class { function",
            "match x { 1 -> }",
            "`${ 1 + }`;",
            "try { }",
            ";;;",
        ];
        for source in sources {
            let result = parse(source);
            let placeholders = result
                .ast
                .iter()
                .filter(|s| matches!(s.kind, StatementKind::Error))
                .count();
            assert_eq!(placeholders, result.errors.len(), "source: {source:?}");
            assert!(!result.errors.is_empty(), "source: {source:?}");
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let tokens = lex("karya f(a, b = 2) { yadi a { lautao b; } }\nf(1);");
        let first = Parser::new(&tokens).parse();
        let second = Parser::new(&tokens).parse();
        assert_eq!(first, second);
    }

    #[test]
    fn test_literal_values() {
        let result = parse("x = satya; y = shunya; z = 2.5;");
        let values: Vec<_> = result
            .ast
            .iter()
            .map(|stmt| match &stmt.kind {
                StatementKind::Expression(expr) => match &expr.kind {
                    ExprKind::Assignment { value, .. } => match &value.kind {
                        ExprKind::Literal(v) => v.clone(),
                        other => panic!("expected literal, got {other:?}"),
                    },
                    other => panic!("expected assignment, got {other:?}"),
                },
                other => panic!("expected expression, got {other:?}"),
            })
            .collect();
        assert_eq!(
            values,
            vec![
                LiteralValue::Bool(true),
                LiteralValue::Null,
                LiteralValue::Number(2.5)
            ]
        );
    }

    fn nesting_errors(result: &ParseResult) -> usize {
        result
            .errors
            .iter()
            .filter(|err| matches!(err, ParseError::NestingTooDeep { .. }))
            .count()
    }

    #[test]
    fn test_deep_parentheses_are_one_diagnostic() {
        let depth = 20_000;
        let source = format!("x = {}1{};\ny = 2;", "(".repeat(depth), ")".repeat(depth));
        let result = parse(&source);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(nesting_errors(&result), 1);
        assert_eq!(result.ast.len(), 2);
        assert_eq!(result.ast[1].to_string(), "(= y 2)");
    }

    #[test]
    fn test_deep_blocks_are_one_diagnostic() {
        let depth = 20_000;
        let source = format!("{}{}\nlet ok = 1;", "{".repeat(depth), "}".repeat(depth));
        let result = parse(&source);
        assert_eq!(nesting_errors(&result), 1);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            result.ast.last().map(|s| &s.kind),
            Some(StatementKind::VariableDecl { .. })
        ));
    }

    #[test]
    fn test_long_unary_and_else_if_chains_are_capped() {
        let unary = format!("x = {}y;", "- ".repeat(10_000));
        assert_eq!(nesting_errors(&parse(&unary)), 1);

        // Recovery restarts at each `if`, so a long chain costs several
        // diagnostics, all of them about nesting.
        let chain = format!("if a {{ }}{}", " else if a { }".repeat(10_000));
        let result = parse(&chain);
        assert!(!result.errors.is_empty());
        assert_eq!(nesting_errors(&result), result.errors.len());
    }

    #[test]
    fn test_long_operator_chain_is_capped() {
        let terms = vec!["a"; 10_000].join(" + ");
        let result = parse(&format!("x = {terms};"));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(nesting_errors(&result), 1);

        // A grouped chain as the left operand adds to the height of the
        // outer chain.
        let chain = vec!["a"; 150].join(" + ");
        let short = vec!["a"; 50].join(" + ");
        assert!(parse(&format!("x = ({chain}) + {short};")).is_ok());
        assert_eq!(nesting_errors(&parse(&format!("x = ({chain}) + {chain};"))), 1);
    }

    #[test]
    fn test_moderate_nesting_parses() {
        let source = format!("x = {}1{};", "(".repeat(100), ")".repeat(100));
        assert!(parse(&source).is_ok());

        let terms = vec!["a"; 200].join(" + ");
        assert!(parse(&format!("x = {terms};")).is_ok());
    }

    #[test]
    fn test_binary_span_covers_operands() {
        let result = parse("a YOGA bb;");
        match &result.ast[0].kind {
            StatementKind::Expression(expr) => {
                assert!(matches!(
                    expr.kind,
                    ExprKind::Binary {
                        op: BinaryOp::Add,
                        ..
                    }
                ));
                assert_eq!((expr.span.start, expr.span.end), (0, 9));
            }
            other => panic!("expected expression, got {other:?}"),
        }
    }
}
