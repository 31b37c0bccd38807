//! Expression AST nodes.
//!
//! Expressions are constructs that evaluate to a value: literals, variables,
//! operators, calls, and the two structured forms that need lowering in the
//! backend, pattern matches and template literals.
//!
//! # Expression Precedence
//!
//! From lowest to highest (as implemented in the parser):
//!
//! 1. Assignment: `=`, `+=`, `-=`, `*=`, `/=`, `%=` (right-associative)
//! 2. Logical OR: `||`
//! 3. Logical AND: `&&`
//! 4. Bitwise OR: `|`
//! 5. Bitwise XOR: `^`
//! 6. Bitwise AND: `&`
//! 7. Shift: `<<`, `>>`
//! 8. Equality: `==`, `!=`
//! 9. Relational: `<`, `<=`, `>`, `>=`
//! 10. Additive: `+`, `-`
//! 11. Multiplicative: `*`, `/`, `%`
//! 12. Unary: `!`, `-`, `~`, `await`
//! 13. Postfix: calls `f(x)` and member access `a.b`
//! 14. Primary: literals, identifiers, `( )`, templates, `match`

use super::{Span, Statement};

/// An expression with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The kind of expression.
    pub kind: ExprKind,
    /// Source location of this expression.
    pub span: Span,
}

impl Expr {
    /// Creates a new expression with the given kind and span.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Height of this expression tree; a literal or variable is 1.
    ///
    /// Statements inside match arms count toward the height.
    pub fn depth(&self) -> usize {
        let children = match &self.kind {
            ExprKind::Literal(_) | ExprKind::Variable(_) => 0,
            ExprKind::Assignment { target, value, .. } => target.depth().max(value.depth()),
            ExprKind::Binary { left, right, .. } => left.depth().max(right.depth()),
            ExprKind::Unary { operand, .. } => operand.depth(),
            ExprKind::Grouping(inner) | ExprKind::Await(inner) => inner.depth(),
            ExprKind::Call { callee, args } => {
                args.iter().map(Expr::depth).fold(callee.depth(), usize::max)
            }
            ExprKind::Member { object, .. } => object.depth(),
            ExprKind::Match { subject, cases } => cases
                .iter()
                .map(|case| match &case.pattern {
                    CasePattern::Value(pattern) => pattern.depth().max(case.body.depth()),
                    CasePattern::Default => case.body.depth(),
                })
                .fold(subject.depth(), usize::max),
            ExprKind::Template(parts) => parts
                .iter()
                .map(|part| match part {
                    TemplatePart::Expr(expr) => expr.depth(),
                    TemplatePart::Text(_) => 0,
                })
                .max()
                .unwrap_or(0),
        };
        1 + children
    }
}

/// The different kinds of expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal value: `42`, `"hi"`, `true`, `null`
    Literal(LiteralValue),

    /// Variable reference: `x`, `गणना`
    Variable(String),

    /// Assignment: `target op value`
    ///
    /// The target is always a [`ExprKind::Variable`] or [`ExprKind::Member`].
    Assignment {
        target: Box<Expr>,
        op: AssignOp,
        value: Box<Expr>,
    },

    /// Binary operation: `left op right`
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// Unary operation: `op operand`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Parenthesized expression: `(expr)`
    ///
    /// Kept in the tree so the backend reproduces the author's grouping.
    Grouping(Box<Expr>),

    /// Call: `callee(args...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },

    /// Member access: `object.property`
    Member { object: Box<Expr>, property: String },

    /// `await operand`
    Await(Box<Expr>),

    /// `match subject { pattern -> body, ..., default -> body }`
    Match {
        subject: Box<Expr>,
        cases: Vec<MatchCase>,
    },

    /// Template literal: alternating text and interpolated expressions.
    Template(Vec<TemplatePart>),
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
}

/// One arm of a match expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    /// What the subject is compared against.
    pub pattern: CasePattern,
    /// The arm's body: a block, or an expression statement whose value is
    /// the result of the match.
    pub body: Statement,
}

/// The pattern side of a match arm.
#[derive(Debug, Clone, PartialEq)]
pub enum CasePattern {
    /// Compared with the subject by strict equality.
    Value(Expr),
    /// Taken when no value pattern matched.
    Default,
}

impl MatchCase {
    /// Returns true if this is the default arm.
    pub fn is_default(&self) -> bool {
        matches!(self.pattern, CasePattern::Default)
    }
}

/// A piece of a template literal.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// Literal text, escapes already resolved.
    Text(String),
    /// An interpolated `${...}` expression.
    Expr(Expr),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    // Comparison
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Logical
    And,
    Or,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
}

impl BinaryOp {
    /// Returns the canonical source spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
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
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
}

impl AssignOp {
    /// Returns the canonical source spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubtractAssign => "-=",
            AssignOp::MultiplyAssign => "*=",
            AssignOp::DivideAssign => "/=",
            AssignOp::ModuloAssign => "%=",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!` - Logical NOT
    Not,
    /// `-` - Numeric negation
    Negate,
    /// `~` - Bitwise NOT
    BitNot,
}

impl UnaryOp {
    /// Returns the canonical source spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
            UnaryOp::BitNot => "~",
        }
    }
}
