//! Expression code generation for the JavaScript backend.
//!
//! Groupings written in the source are kept. Beyond those, a binary operand
//! is only parenthesized when JavaScript would otherwise bind it
//! differently: shifts sit below equality and comparison here, but above
//! them in JavaScript.
//!
//! # Match Lowering
//!
//! ```javascript
//! (() => {
//!     const $match_0 = subject;
//!     if ($match_0 === 1) {
//!         return "one";
//!     } else if ($match_0 === 2) {
//!         log("two");
//!     } else {
//!         return "other";
//!     }
//! })()
//! ```
//!
//! The subject is evaluated once. Value arms are tested in source order as
//! one `if`/`else if` chain, so exactly one arm runs, and the default arm
//! (or a `throw` when there is none) sits in the final `else` wherever it
//! was written. A match that awaits anywhere in its subject or arms becomes
//! `await (async () => { ... })()`.
//!
//! # Names
//!
//! Source identifiers that are reserved in JavaScript are bound as
//! `$name`. Source identifiers cannot contain `$`, so neither these nor the
//! `$match_N` temporaries can collide with a name from the program.

use std::borrow::Cow;
use std::fmt::Write;

use crate::ast::{
    BinaryOp, CasePattern, Expr, ExprKind, LiteralValue, MatchCase, Span, Statement,
    StatementKind, TemplatePart, UnaryOp,
};
use crate::codegen::error::CodeGenError;

use super::stmt::JsEmitter;

impl JsEmitter {
    /// Emits an expression as a single JavaScript expression string.
    ///
    /// Match expressions span several lines; their inner lines are indented
    /// relative to the emitter's current level.
    pub fn emit_expr(&mut self, expr: &Expr) -> Result<String, CodeGenError> {
        match &expr.kind {
            ExprKind::Literal(value) => Ok(emit_literal(value)),

            ExprKind::Variable(name) => Ok(binding_name(name).into_owned()),

            ExprKind::Assignment { target, op, value } => {
                let target = self.emit_expr(target)?;
                let value = self.emit_expr(value)?;
                Ok(format!("{} {} {}", target, op.as_str(), value))
            }

            ExprKind::Binary { left, op, right } => {
                let parent = js_precedence(*op);
                let left = self.emit_operand(left, parent, false)?;
                let right = self.emit_operand(right, parent, true)?;
                Ok(format!("{} {} {}", left, js_binary_op(*op), right))
            }

            ExprKind::Unary { op, operand } => {
                let operand = self.emit_operand(operand, UNARY_PRECEDENCE, false)?;
                // `- -x` must not become the decrement operator.
                if *op == UnaryOp::Negate && operand.starts_with('-') {
                    Ok(format!("- {operand}"))
                } else {
                    Ok(format!("{}{}", js_unary_op(*op), operand))
                }
            }

            ExprKind::Grouping(inner) => Ok(format!("({})", self.emit_expr(inner)?)),

            ExprKind::Call { callee, args } => {
                let callee = self.emit_postfix_target(callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.emit_expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{}({})", callee, args.join(", ")))
            }

            ExprKind::Member { object, property } => {
                let object_text = self.emit_postfix_target(object)?;
                // `1.toString` would read as a malformed number.
                if matches!(object.kind, ExprKind::Literal(LiteralValue::Number(_))) {
                    Ok(format!("({object_text}).{property}"))
                } else {
                    Ok(format!("{object_text}.{property}"))
                }
            }

            ExprKind::Await(operand) => {
                let operand = self.emit_operand(operand, UNARY_PRECEDENCE, false)?;
                Ok(format!("await {operand}"))
            }

            ExprKind::Match { subject, cases } => self.emit_match(subject, cases, expr.span),

            ExprKind::Template(parts) => self.emit_template(parts),
        }
    }

    /// Emits the callee of a call or the object of a member access.
    ///
    /// An awaited match must be parenthesized there, or the call or member
    /// access would bind inside the `await`.
    fn emit_postfix_target(&mut self, target: &Expr) -> Result<String, CodeGenError> {
        let text = self.emit_expr(target)?;
        if matches!(target.kind, ExprKind::Match { .. }) && text.starts_with("await ") {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }

    /// Emits an operand of an operator binding at `parent`, adding
    /// parentheses where JavaScript would otherwise regroup it.
    ///
    /// Parentheses added here have no counterpart in the tree, so parsing
    /// the output back yields an extra [`ExprKind::Grouping`] around the
    /// operand: `a == b << c` comes back as `(a == b) << c`. Every other
    /// operator mix reads back as the tree it came from.
    fn emit_operand(
        &mut self,
        operand: &Expr,
        parent: u8,
        is_right: bool,
    ) -> Result<String, CodeGenError> {
        let text = self.emit_expr(operand)?;
        let needs_parens = match &operand.kind {
            ExprKind::Binary { op, .. } => {
                let child = js_precedence(*op);
                child < parent || (is_right && child == parent)
            }
            ExprKind::Assignment { .. } => true,
            _ => false,
        };

        if needs_parens {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }

    /// Lowers a match expression to an immediately invoked arrow function.
    fn emit_match(
        &mut self,
        subject: &Expr,
        cases: &[MatchCase],
        span: Span,
    ) -> Result<String, CodeGenError> {
        if cases.is_empty() {
            return Err(CodeGenError::unsupported("a match expression with no cases").with_span(span));
        }

        let temp = self.next_temp("match");
        let is_async = match_awaits(subject, cases);
        let subject = self.emit_expr(subject)?;
        let outer = self.indent_str();

        self.indent += 1;
        let body = self.emit_match_body(&temp, &subject, cases);
        self.indent -= 1;
        let body = body?;

        if is_async {
            Ok(format!("await (async () => {{\n{body}{outer}}})()"))
        } else {
            Ok(format!("(() => {{\n{body}{outer}}})()"))
        }
    }

    fn emit_match_body(
        &mut self,
        temp: &str,
        subject: &str,
        cases: &[MatchCase],
    ) -> Result<String, CodeGenError> {
        let indent = self.indent_str();
        let mut output = String::new();
        writeln!(output, "{indent}const {temp} = {subject};")?;

        let mut chained = false;
        for case in cases {
            let CasePattern::Value(pattern) = &case.pattern else {
                continue;
            };
            let pattern = self.emit_expr(pattern)?;
            let keyword = if chained { "} else if" } else { "if" };
            writeln!(output, "{indent}{keyword} ({temp} === {pattern}) {{")?;
            self.emit_nested_arm(Some(&case.body), temp, &mut output)?;
            chained = true;
        }

        let default = cases
            .iter()
            .find(|case| case.is_default())
            .map(|case| &case.body);
        if chained {
            writeln!(output, "{indent}}} else {{")?;
            self.emit_nested_arm(default, temp, &mut output)?;
            writeln!(output, "{indent}}}")?;
        } else {
            self.emit_arm(default, temp, &mut output)?;
        }

        Ok(output)
    }

    fn emit_nested_arm(
        &mut self,
        body: Option<&Statement>,
        temp: &str,
        output: &mut String,
    ) -> Result<(), CodeGenError> {
        self.indent += 1;
        let result = self.emit_arm(body, temp, output);
        self.indent -= 1;
        result
    }

    /// Emits an arm body at the current level. An expression arm returns
    /// its value; a block arm runs its statements. A missing default arm
    /// throws.
    fn emit_arm(
        &mut self,
        body: Option<&Statement>,
        temp: &str,
        output: &mut String,
    ) -> Result<(), CodeGenError> {
        let indent = self.indent_str();
        let Some(body) = body else {
            writeln!(
                output,
                "{indent}throw new Error(\"no match for value: \" + {temp});"
            )?;
            return Ok(());
        };

        match &body.kind {
            StatementKind::Expression(value) => {
                let value = self.emit_expr(value)?;
                writeln!(output, "{indent}return {value};")?;
                Ok(())
            }
            StatementKind::Block(statements) => statements
                .iter()
                .try_for_each(|stmt| self.emit_stmt(stmt, output)),
            _ => self.emit_stmt(body, output),
        }
    }

    /// Emits a template literal with `${}` interpolations.
    fn emit_template(&mut self, parts: &[TemplatePart]) -> Result<String, CodeGenError> {
        let mut output = String::from("`");
        for part in parts {
            match part {
                TemplatePart::Text(text) => output.push_str(&escape_template_text(text)),
                TemplatePart::Expr(expr) => {
                    let expr = self.emit_expr(expr)?;
                    write!(output, "${{{expr}}}")?;
                }
            }
        }
        output.push('`');
        Ok(output)
    }
}

/// Words JavaScript reserves that are plain identifiers in the source
/// language. `this` and `super` keep their JavaScript meaning.
const JS_RESERVED: &[&str] = &[
    "break",
    "case",
    "continue",
    "debugger",
    "delete",
    "do",
    "enum",
    "export",
    "extends",
    "for",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "switch",
    "throw",
    "typeof",
    "void",
    "while",
    "with",
    "yield",
];

/// The JavaScript name for a source identifier: `$` is prepended to
/// reserved words, everything else passes through.
pub(super) fn binding_name(name: &str) -> Cow<'_, str> {
    if JS_RESERVED.contains(&name) {
        Cow::Owned(format!("${name}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Whether evaluating `expr` may suspend on an `await`.
fn expr_awaits(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Await(_) => true,
        ExprKind::Literal(_) | ExprKind::Variable(_) => false,
        ExprKind::Assignment { target, value, .. } => expr_awaits(target) || expr_awaits(value),
        ExprKind::Binary { left, right, .. } => expr_awaits(left) || expr_awaits(right),
        ExprKind::Unary { operand, .. } | ExprKind::Grouping(operand) => expr_awaits(operand),
        ExprKind::Call { callee, args } => expr_awaits(callee) || args.iter().any(expr_awaits),
        ExprKind::Member { object, .. } => expr_awaits(object),
        ExprKind::Match { subject, cases } => match_awaits(subject, cases),
        ExprKind::Template(parts) => parts
            .iter()
            .any(|part| matches!(part, TemplatePart::Expr(e) if expr_awaits(e))),
    }
}

fn match_awaits(subject: &Expr, cases: &[MatchCase]) -> bool {
    expr_awaits(subject)
        || cases.iter().any(|case| {
            stmt_awaits(&case.body)
                || matches!(&case.pattern, CasePattern::Value(pattern) if expr_awaits(pattern))
        })
}

/// Whether running `stmt` may suspend on an `await`. Nested functions and
/// classes are their own scope and do not count.
fn stmt_awaits(stmt: &Statement) -> bool {
    match &stmt.kind {
        StatementKind::FunctionDecl(_) | StatementKind::ClassDecl { .. } => false,
        StatementKind::VariableDecl { initializer, .. } => {
            initializer.as_ref().is_some_and(expr_awaits)
        }
        StatementKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            expr_awaits(condition)
                || then_branch.iter().any(stmt_awaits)
                || else_branch.as_deref().is_some_and(stmt_awaits)
        }
        StatementKind::Try {
            body,
            catch,
            finally,
        } => {
            body.iter().any(stmt_awaits)
                || catch
                    .as_ref()
                    .is_some_and(|clause| clause.body.iter().any(stmt_awaits))
                || finally
                    .as_ref()
                    .is_some_and(|body| body.iter().any(stmt_awaits))
        }
        StatementKind::Return(value) => value.as_ref().is_some_and(expr_awaits),
        StatementKind::Block(body) => body.iter().any(stmt_awaits),
        StatementKind::Expression(expr) => expr_awaits(expr),
        StatementKind::Error => false,
    }
}

/// Binding strength of prefix operators in JavaScript.
const UNARY_PRECEDENCE: u8 = 14;

/// Binding strength of a binary operator in JavaScript (higher binds tighter).
fn js_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => 3,
        BinaryOp::And => 4,
        BinaryOp::BitOr => 5,
        BinaryOp::BitXor => 6,
        BinaryOp::BitAnd => 7,
        BinaryOp::Equal | BinaryOp::NotEqual => 8,
        BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => 9,
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight => 10,
        BinaryOp::Add | BinaryOp::Subtract => 11,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 12,
    }
}

/// JavaScript spelling of a binary operator.
fn js_binary_op(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        BinaryOp::Modulo => "%",
        BinaryOp::Equal => "==",
        BinaryOp::NotEqual => "!=",
        BinaryOp::Less => "<",
        BinaryOp::LessEqual => "<=",
        BinaryOp::Greater => ">",
        BinaryOp::GreaterEqual => ">=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::ShiftLeft => "<<",
        BinaryOp::ShiftRight => ">>",
    }
}

/// JavaScript spelling of a prefix operator.
fn js_unary_op(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Not => "!",
        UnaryOp::Negate => "-",
        UnaryOp::BitNot => "~",
    }
}

fn emit_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Number(n) => format_number(*n),
        LiteralValue::String(s) => escape_string(s),
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Null => "null".to_string(),
    }
}

/// Formats a number the way JavaScript source would write it: integral
/// values carry no fractional part.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        n.to_string()
    }
}

/// Quotes a string as a double-quoted JavaScript literal.
fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Escapes literal text for use between backticks.
fn escape_template_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '`' => result.push_str("\\`"),
            '\\' => result.push_str("\\\\"),
            '$' if chars.peek() == Some(&'{') => result.push_str("\\$"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::Parser;

    fn emit(source: &str) -> String {
        let tokens = lex(source);
        let expr = match Parser::new(&tokens).parse_expression() {
            Ok(expr) => expr,
            Err(err) => panic!("failed to parse {source:?}: {err}"),
        };
        match JsEmitter::new(4).emit_expr(&expr) {
            Ok(js) => js,
            Err(err) => panic!("emission failed: {err}"),
        }
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(3.25), "3.25");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(escape_string("hi"), "\"hi\"");
        assert_eq!(escape_string("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(escape_string("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_literals() {
        assert_eq!(emit("satya"), "true");
        assert_eq!(emit("असत्य"), "false");
        assert_eq!(emit("shunya"), "null");
        assert_eq!(emit("'it\\'s'"), "\"it's\"");
    }

    #[test]
    fn test_mnemonic_operators() {
        assert_eq!(emit("a YOGA b GUNA c"), "a + b * c");
        assert_eq!(emit("a SAMA b CHA NA c"), "a == b && !c");
        assert_eq!(emit("x LAGHUSAMA y VA x ADHIKA z"), "x <= y || x > z");
    }

    #[test]
    fn test_groupings_are_kept() {
        assert_eq!(emit("(a + b) * c"), "(a + b) * c");
        assert_eq!(emit("a - (b - c)"), "a - (b - c)");
    }

    #[test]
    fn test_shift_below_equality_is_parenthesized() {
        // Binds as (a == b) << c here, which JavaScript needs spelled out.
        assert_eq!(emit("a == b << c"), "(a == b) << c");
        assert_eq!(emit("a << b + c"), "a << b + c");
    }

    #[test]
    fn test_unary_forms() {
        assert_eq!(emit("-x"), "-x");
        assert_eq!(emit("- -x"), "- -x");
        assert_eq!(emit("~a & b"), "~a & b");
    }

    #[test]
    fn test_assignment_chain() {
        assert_eq!(emit("a = b += 2"), "a = b += 2");
    }

    #[test]
    fn test_call_member_await() {
        assert_eq!(
            emit("await fetch(url, 2).json()"),
            "await fetch(url, 2).json()"
        );
    }

    #[test]
    fn test_member_on_number_literal() {
        assert_eq!(emit("(1).toString()"), "(1).toString()");
    }

    #[test]
    fn test_match_with_default() {
        let js = emit("match x { 1 -> \"one\", 2 -> \"two\", default -> \"many\" }");
        assert_eq!(
            js,
            "(() => {\n\
             \x20   const $match_0 = x;\n\
             \x20   if ($match_0 === 1) {\n\
             \x20       return \"one\";\n\
             \x20   } else if ($match_0 === 2) {\n\
             \x20       return \"two\";\n\
             \x20   } else {\n\
             \x20       return \"many\";\n\
             \x20   }\n\
             })()"
        );
    }

    #[test]
    fn test_match_without_default_throws() {
        let js = emit("milan code { 200 -> ok() }");
        assert!(js.contains("    if ($match_0 === 200) {\n"), "{js}");
        assert!(
            js.contains(
                "    } else {\n        throw new Error(\"no match for value: \" + $match_0);\n    }\n"
            ),
            "{js}"
        );
    }

    #[test]
    fn test_match_default_runs_last() {
        let js = emit("match x { default -> 0, -1 -> 1 }");
        let test = js.find("=== -1").unwrap_or(usize::MAX);
        let fallback = js.find("return 0;").unwrap_or(0);
        assert!(test < fallback, "{js}");
    }

    #[test]
    fn test_match_block_arm() {
        let js = emit("match x { 1 -> { log(x); return 2; } default -> 3 }");
        assert!(js.contains("        log(x);\n        return 2;\n"), "{js}");
    }

    #[test]
    fn test_block_arms_without_return_do_not_fall_through() {
        let js = emit("match x { 1 -> { log(\"one\"); } default -> { log(\"other\"); } }");
        assert_eq!(
            js,
            "(() => {\n\
             \x20   const $match_0 = x;\n\
             \x20   if ($match_0 === 1) {\n\
             \x20       log(\"one\");\n\
             \x20   } else {\n\
             \x20       log(\"other\");\n\
             \x20   }\n\
             })()"
        );

        // Without a default, a matched block arm must not reach the throw.
        let js = emit("match y { 1 -> { log(\"b1\"); } 2 -> \"two\" }");
        assert!(js.contains("    } else if ($match_0 === 2) {\n"), "{js}");
        assert!(js.contains("    } else {\n        throw "), "{js}");
        assert_eq!(js.matches("if (").count(), 2, "{js}");
    }

    #[test]
    fn test_default_only_match_has_no_test() {
        let js = emit("match x { default -> 1 }");
        assert_eq!(js, "(() => {\n    const $match_0 = x;\n    return 1;\n})()");
    }

    #[test]
    fn test_nested_matches_get_distinct_temps() {
        let js = emit("match a { 1 -> match b { default -> 2 }, default -> 3 }");
        assert!(js.contains("const $match_0 = a;"));
        assert!(js.contains("const $match_1 = b;"));
    }

    #[test]
    fn test_awaiting_arm_makes_async_match() {
        let js = emit("match x { 1 -> await f(), default -> 0 }");
        assert!(js.starts_with("await (async () => {\n"), "{js}");
        assert!(js.contains("        return await f();\n"), "{js}");
        assert!(js.ends_with("})()"), "{js}");

        let js = emit("match await load() { default -> 0 }");
        assert!(js.starts_with("await (async () => {\n"), "{js}");
        assert!(js.contains("const $match_0 = await load();"), "{js}");
    }

    #[test]
    fn test_await_in_nested_match_makes_both_async() {
        let js = emit("match a { 1 -> match b { 1 -> await g(), default -> 0 }, default -> 3 }");
        assert_eq!(js.matches("await (async () => {").count(), 2, "{js}");
    }

    #[test]
    fn test_await_inside_nested_function_stays_sync() {
        let js = emit("match a { 1 -> { async function h() { await z(); } h(); } default -> 0 }");
        assert!(js.starts_with("(() => {\n"), "{js}");
    }

    #[test]
    fn test_member_on_async_match_is_parenthesized() {
        let js = emit("match x { default -> await f() }.value");
        assert!(js.starts_with("(await (async () => {\n"), "{js}");
        assert!(js.ends_with("})()).value"), "{js}");

        // The sync form needs no extra parentheses.
        let js = emit("match x { default -> f() }.value");
        assert!(js.ends_with("})().value"), "{js}");
    }

    #[test]
    fn test_reserved_words_are_renamed() {
        assert_eq!(emit("new + typeof"), "$new + $typeof");
        assert_eq!(emit("delete(obj.new)"), "$delete(obj.new)");
        assert_eq!(emit("this.x"), "this.x");
        assert_eq!(binding_name("yoga"), "yoga");
    }

    #[test]
    fn test_inserted_parentheses_reparse_as_grouping() {
        let js = emit("a == b << c");
        let tokens = lex(&js);
        let reparsed = match Parser::new(&tokens).parse_expression() {
            Ok(expr) => expr,
            Err(err) => panic!("failed to reparse {js:?}: {err}"),
        };
        assert_eq!(reparsed.to_string(), "(<< (group (== a b)) c)");
    }

    #[test]
    fn test_template_literal() {
        assert_eq!(emit("`Hello, ${name}!`"), "`Hello, ${name}!`");
        assert_eq!(emit("`sum ${a + b}`"), "`sum ${a + b}`");
        assert_eq!(emit(r"`cost \${x}`"), r"`cost \${x}`");
    }

    #[test]
    fn test_template_escapes_backticks() {
        assert_eq!(escape_template_text("a`b"), "a\\`b");
        assert_eq!(escape_template_text("$5 and ${"), "$5 and \\${");
    }

    #[test]
    fn test_empty_match_is_rejected() {
        let expr = Expr::new(
            ExprKind::Match {
                subject: Box::new(Expr::new(ExprKind::Variable("x".into()), Span::default())),
                cases: vec![],
            },
            Span::new(0, 10, 3),
        );
        let err = JsEmitter::new(4).emit_expr(&expr);
        assert!(matches!(err, Err(e) if e.span.map(|s| s.line) == Some(3)));
    }
}
