//! Statement AST nodes.
//!
//! Statements are constructs that perform actions but don't produce values:
//! declarations, control flow, and expression statements.
//!
//! # Statement Categories
//!
//! - **Declarations**: functions (optionally async), classes, `const`/`let`
//! - **Control flow**: `if`/`else`, `try`/`catch`/`finally`, `return`
//! - **Grouping**: brace blocks
//! - **Expressions**: any expression followed by `;`
//! - **Recovery**: [`StatementKind::Error`] stands in for a statement the
//!   parser could not complete

use super::{Expr, Span};

/// A statement with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The kind of statement.
    pub kind: StatementKind,
    /// Source location of this statement.
    pub span: Span,
}

impl Statement {
    /// Creates a new statement with the given kind and span.
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Height of this statement's tree, counting nested blocks and
    /// expressions.
    pub fn depth(&self) -> usize {
        let children = match &self.kind {
            StatementKind::FunctionDecl(decl) => decl.depth(),
            StatementKind::ClassDecl { methods, .. } => {
                methods.iter().map(FunctionDecl::depth).max().unwrap_or(0)
            }
            StatementKind::VariableDecl { initializer, .. } => {
                initializer.as_ref().map_or(0, Expr::depth)
            }
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => condition
                .depth()
                .max(block_depth(then_branch))
                .max(else_branch.as_ref().map_or(0, |branch| branch.depth())),
            StatementKind::Try {
                body,
                catch,
                finally,
            } => block_depth(body)
                .max(catch.as_ref().map_or(0, |clause| block_depth(&clause.body)))
                .max(finally.as_deref().map_or(0, block_depth)),
            StatementKind::Return(value) => value.as_ref().map_or(0, Expr::depth),
            StatementKind::Block(body) => block_depth(body),
            StatementKind::Expression(expr) => expr.depth(),
            StatementKind::Error => 0,
        };
        1 + children
    }
}

fn block_depth(body: &[Statement]) -> usize {
    body.iter().map(Statement::depth).max().unwrap_or(0)
}

/// The different kinds of statements.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `[async] function name(params) [-> type] { body }`
    FunctionDecl(FunctionDecl),

    /// `class Name { methods }`
    ClassDecl {
        /// Class name.
        name: String,
        /// Method definitions, in source order.
        methods: Vec<FunctionDecl>,
    },

    /// `const name [: type] = value;` or `let name [: type] [= value];`
    VariableDecl {
        /// `false` for `const`.
        mutable: bool,
        /// Variable name.
        name: String,
        /// Type annotation, if written. Not checked.
        type_annotation: Option<String>,
        /// Initial value.
        initializer: Option<Expr>,
    },

    /// `if condition { ... } [else { ... } | else if ...]`
    If {
        /// The condition to test.
        condition: Expr,
        /// Statements to execute if the condition holds.
        then_branch: Vec<Statement>,
        /// Either a [`StatementKind::Block`] or a chained [`StatementKind::If`].
        else_branch: Option<Box<Statement>>,
    },

    /// `try { ... } [catch [(name)] { ... }] [finally { ... }]`
    Try {
        /// The guarded statements.
        body: Vec<Statement>,
        /// Handler, if present.
        catch: Option<CatchClause>,
        /// Cleanup block, if present.
        finally: Option<Vec<Statement>>,
    },

    /// `return [value];`
    Return(Option<Expr>),

    /// `{ ... }`
    Block(Vec<Statement>),

    /// `expression;`
    Expression(Expr),

    /// Placeholder for a statement that failed to parse.
    ///
    /// The matching diagnostic is in the parse result's error list.
    Error,
}

/// A function or method definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,
    /// Parameters, in order.
    pub params: Vec<Parameter>,
    /// Return type annotation (`-> type`), if written. Not checked.
    pub return_type: Option<String>,
    /// Function body.
    pub body: Vec<Statement>,
    /// Whether the function was marked `async`.
    pub is_async: bool,
}

impl FunctionDecl {
    fn depth(&self) -> usize {
        self.params
            .iter()
            .filter_map(|param| param.default.as_ref())
            .map(Expr::depth)
            .fold(block_depth(&self.body), usize::max)
    }
}

/// A function parameter: `name [: type] [= default]`
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Type annotation, if written. Not checked.
    pub type_annotation: Option<String>,
    /// Default value used when the argument is omitted.
    pub default: Option<Expr>,
}

/// The `catch` part of a try statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// Name bound to the caught value, if any.
    pub binding: Option<String>,
    /// Handler statements.
    pub body: Vec<Statement>,
}
