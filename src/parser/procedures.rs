//! Function and class definition parsing.
//!
//! This module handles parsing of:
//! - function definitions, optionally `async`
//! - class definitions and their methods
//! - parameter lists with type annotations and default values

use crate::ast::{FunctionDecl, Parameter, Statement, StatementKind};
use crate::lexer::TokenKind;

use super::{ParseError, Parser, Precedence};

impl<'a> Parser<'a> {
    // ==================== Function Definition ====================

    /// Parses `function name(params) [-> type] { body }`.
    ///
    /// `is_async` is decided by the caller, which has already consumed the
    /// `async` keyword if there was one.
    pub(super) fn parse_function(&mut self, is_async: bool) -> Result<Statement, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::Function, "`function`")?;
        let decl = self.parse_function_rest(is_async)?;
        let span = self.span_from(start);
        Ok(Statement::new(StatementKind::FunctionDecl(decl), span))
    }

    /// Parses `async function ...`.
    pub(super) fn parse_async_function(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_span();
        self.advance(); // consume async
        let mut stmt = self.parse_function(true)?;
        stmt.span = self.span_from(start);
        Ok(stmt)
    }

    /// Parses everything after the `function` keyword.
    fn parse_function_rest(&mut self, is_async: bool) -> Result<FunctionDecl, ParseError> {
        let name = self.expect_identifier("function name")?;

        self.expect(TokenKind::LeftParen, "`(` after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect(TokenKind::RightParen, "`)` after parameters")?;

        let return_type = if self.match_token(TokenKind::Arrow) {
            Some(self.parse_type_name()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(FunctionDecl {
            name,
            params,
            return_type,
            body,
            is_async,
        })
    }

    // ==================== Parameter List ====================

    /// Parses a comma-separated parameter list: `name [: type] [= default]`.
    fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RightParen) {
            return Ok(params);
        }

        loop {
            let name = self.expect_identifier("parameter name")?;
            let type_annotation = self.parse_type_annotation()?;

            // Parse above assignment level so the default cannot swallow a
            // following `=`.
            let default = if self.match_token(TokenKind::Equal) {
                Some(self.parse_expr_precedence(Precedence::Assignment)?)
            } else {
                None
            };

            params.push(Parameter {
                name,
                type_annotation,
                default,
            });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    // ==================== Class Definition ====================

    /// Parses `class Name { method* }`.
    ///
    /// Inside a class body the `function` keyword before a method name is
    /// optional.
    pub(super) fn parse_class(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_span();
        self.advance(); // consume class

        let name = self.expect_identifier("class name")?;
        self.expect(TokenKind::LeftBrace, "`{` after class name")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            methods.push(self.parse_method()?);
        }

        self.expect(TokenKind::RightBrace, "`}` to close class")?;

        let span = self.span_from(start);
        Ok(Statement::new(StatementKind::ClassDecl { name, methods }, span))
    }

    /// Parses one method: `[async] [function] name(params) [-> type] { body }`.
    fn parse_method(&mut self) -> Result<FunctionDecl, ParseError> {
        let is_async = self.match_token(TokenKind::Async);
        self.match_token(TokenKind::Function);
        self.parse_function_rest(is_async)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, ExprKind, LiteralValue};
    use crate::lexer::lex;
    use crate::parser::ParseResult;

    fn parse(source: &str) -> ParseResult {
        let tokens = lex(source);
        Parser::new(&tokens).parse()
    }

    fn function(result: &ParseResult) -> &FunctionDecl {
        match &result.ast[0].kind {
            StatementKind::FunctionDecl(decl) => decl,
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_yoga_example() {
        let result =
            parse("function yoga(a: number, b: number = 10) -> number { return a + b; }");
        assert!(result.is_ok(), "{:?}", result.errors);
        assert_eq!(result.ast.len(), 1);

        let decl = function(&result);
        assert_eq!(decl.name, "yoga");
        assert_eq!(decl.params.len(), 2);
        assert!(decl.params[0].default.is_none());
        assert!(matches!(
            decl.params[1].default.as_ref().map(|e| &e.kind),
            Some(ExprKind::Literal(LiteralValue::Number(n))) if *n == 10.0
        ));
        assert_eq!(decl.return_type.as_deref(), Some("number"));
        assert_eq!(decl.body.len(), 1);
        match &decl.body[0].kind {
            StatementKind::Return(Some(value)) => assert!(matches!(
                value.kind,
                ExprKind::Binary {
                    op: BinaryOp::Add,
                    ..
                }
            )),
            other => panic!("expected return, got {other:?}"),
        }
    }

    #[test]
    fn test_native_spelling_gives_same_tree() {
        let native = parse("कार्य yoga(a: number, b: number = 10) -> number { लौटाओ a YOGA b; }");
        let english =
            parse("function yoga(a: number, b: number = 10) -> number { return a + b; }");
        assert!(native.is_ok(), "{:?}", native.errors);
        assert_eq!(native.ast[0].to_string(), english.ast[0].to_string());
    }

    #[test]
    fn test_async_function() {
        let result = parse("async function load(url) { return await fetch(url); }");
        assert!(result.is_ok(), "{:?}", result.errors);
        assert!(function(&result).is_async);
        assert_eq!(result.ast[0].span.start, 0);
    }

    #[test]
    fn test_async_requires_function() {
        let result = parse("async x;");
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_default_does_not_swallow_next_parameter() {
        let result = parse("function f(a = 1 + 2, b = g(3)) { }");
        assert!(result.is_ok(), "{:?}", result.errors);
        let decl = function(&result);
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.to_string(), "(function f (a=(+ 1 2) b=(call g 3)))");
    }

    #[test]
    fn test_class_with_methods() {
        let result = parse(
            "varga Counter {\n\
             karya constructor(start = 0) { this.n = start; }\n\
             increment() { this.n += 1; }\n\
             async function save() { await store(this.n); }\n\
             }",
        );
        assert!(result.is_ok(), "{:?}", result.errors);
        match &result.ast[0].kind {
            StatementKind::ClassDecl { name, methods } => {
                assert_eq!(name, "Counter");
                let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
                assert_eq!(names, vec!["constructor", "increment", "save"]);
                assert!(methods[2].is_async);
            }
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_parameter_name() {
        let result = parse("function f(, b) { }");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            result.errors[0],
            ParseError::UnexpectedToken { .. }
        ));
    }
}
