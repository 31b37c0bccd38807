//! S-expression rendering of the AST.
//!
//! Spans are left out, so two trees print the same exactly when they have the
//! same shape and the same names and literal values. The CLI's `--ast` flag
//! prints this form.

use std::fmt::{self, Display, Formatter};

use super::{
    CasePattern, CatchClause, Expr, ExprKind, FunctionDecl, LiteralValue, Parameter, Statement,
    StatementKind, TemplatePart,
};

/// Writes `items` separated by single spaces.
fn spaced<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn block(f: &mut Formatter<'_>, head: &str, body: &[Statement]) -> fmt::Result {
    write!(f, "({head}")?;
    for stmt in body {
        write!(f, " {stmt}")?;
    }
    f.write_str(")")
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StatementKind::FunctionDecl(decl) => write!(f, "{decl}"),
            StatementKind::ClassDecl { name, methods } => {
                write!(f, "(class {name}")?;
                for method in methods {
                    write!(f, " {method}")?;
                }
                f.write_str(")")
            }
            StatementKind::VariableDecl {
                mutable,
                name,
                type_annotation,
                initializer,
            } => {
                let keyword = if *mutable { "let" } else { "const" };
                write!(f, "({keyword} {name}")?;
                if let Some(ty) = type_annotation {
                    write!(f, ":{ty}")?;
                }
                if let Some(init) = initializer {
                    write!(f, " {init}")?;
                }
                f.write_str(")")
            }
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "(if {condition} ")?;
                block(f, "then", then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " (else {else_branch})")?;
                }
                f.write_str(")")
            }
            StatementKind::Try {
                body,
                catch,
                finally,
            } => {
                f.write_str("(try ")?;
                block(f, "block", body)?;
                if let Some(CatchClause { binding, body }) = catch {
                    f.write_str(" ")?;
                    match binding {
                        Some(name) => block(f, &format!("catch {name}"), body)?,
                        None => block(f, "catch", body)?,
                    }
                }
                if let Some(finally) = finally {
                    f.write_str(" ")?;
                    block(f, "finally", finally)?;
                }
                f.write_str(")")
            }
            StatementKind::Return(Some(value)) => write!(f, "(return {value})"),
            StatementKind::Return(None) => f.write_str("(return)"),
            StatementKind::Block(body) => block(f, "block", body),
            StatementKind::Expression(expr) => write!(f, "{expr}"),
            StatementKind::Error => f.write_str("(error)"),
        }
    }
}

impl Display for FunctionDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_async {
            f.write_str("(async ")?;
        } else {
            f.write_str("(")?;
        }
        write!(f, "function {} (", self.name)?;
        spaced(f, &self.params)?;
        f.write_str(")")?;
        if let Some(ty) = &self.return_type {
            write!(f, " -> {ty}")?;
        }
        for stmt in &self.body {
            write!(f, " {stmt}")?;
        }
        f.write_str(")")
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(ty) = &self.type_annotation {
            write!(f, ":{ty}")?;
        }
        if let Some(default) = &self.default {
            write!(f, "={default}")?;
        }
        Ok(())
    }
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{n}"),
            LiteralValue::String(s) => write!(f, "{s:?}"),
            LiteralValue::Bool(b) => write!(f, "{b}"),
            LiteralValue::Null => f.write_str("null"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(value) => write!(f, "{value}"),
            ExprKind::Variable(name) => f.write_str(name),
            ExprKind::Assignment { target, op, value } => {
                write!(f, "({} {target} {value})", op.as_str())
            }
            ExprKind::Binary { left, op, right } => {
                write!(f, "({} {left} {right})", op.as_str())
            }
            ExprKind::Unary { op, operand } => write!(f, "({} {operand})", op.as_str()),
            ExprKind::Grouping(inner) => write!(f, "(group {inner})"),
            ExprKind::Call { callee, args } => {
                write!(f, "(call {callee}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
            ExprKind::Member { object, property } => write!(f, "(. {object} {property})"),
            ExprKind::Await(operand) => write!(f, "(await {operand})"),
            ExprKind::Match { subject, cases } => {
                write!(f, "(match {subject}")?;
                for case in cases {
                    match &case.pattern {
                        CasePattern::Value(pattern) => write!(f, " ({pattern} {})", case.body)?,
                        CasePattern::Default => write!(f, " (default {})", case.body)?,
                    }
                }
                f.write_str(")")
            }
            ExprKind::Template(parts) => {
                f.write_str("(template")?;
                for part in parts {
                    match part {
                        TemplatePart::Text(text) => write!(f, " {text:?}")?,
                        TemplatePart::Expr(expr) => write!(f, " {expr}")?,
                    }
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Span};

    fn var(name: &str) -> Expr {
        Expr::new(ExprKind::Variable(name.to_string()), Span::default())
    }

    #[test]
    fn test_binary_display() {
        let expr = Expr::new(
            ExprKind::Binary {
                left: Box::new(var("a")),
                op: BinaryOp::Add,
                right: Box::new(var("b")),
            },
            Span::new(0, 5, 1),
        );
        assert_eq!(expr.to_string(), "(+ a b)");
    }

    #[test]
    fn test_spans_do_not_affect_display() {
        let a = Expr::new(ExprKind::Variable("x".into()), Span::new(0, 1, 1));
        let b = Expr::new(ExprKind::Variable("x".into()), Span::new(40, 41, 9));
        assert_ne!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_function_display() {
        let decl = FunctionDecl {
            name: "f".into(),
            params: vec![
                Parameter {
                    name: "a".into(),
                    type_annotation: None,
                    default: None,
                },
                Parameter {
                    name: "b".into(),
                    type_annotation: Some("number".into()),
                    default: Some(Expr::new(
                        ExprKind::Literal(LiteralValue::Number(10.0)),
                        Span::default(),
                    )),
                },
            ],
            return_type: None,
            body: vec![Statement::new(
                StatementKind::Return(Some(var("a"))),
                Span::default(),
            )],
            is_async: true,
        };
        assert_eq!(
            decl.to_string(),
            "(async function f (a b:number=10) (return a))"
        );
    }
}
