//! Expression AST nodes for vSQL

use crate::{Args, BinaryOp, BoxExpr, Literal, OptBoxExpr, Spanned, UnaryOp};

/// All vSQL expression types
#[derive(Debug, Clone)]
pub enum Expr {
    /// Literal value (None, boolean, number, string, date, color, ...)
    Literal(Literal),

    /// Bare identifier (environment root such as `app`, `record`, `r`,
    /// `user` or `params`)
    Ident(String),

    /// List display (`[1, 2, 3]`)
    List(Vec<Spanned<Expr>>),

    /// Set display (`{1, 2, 3}`, `{/}` for the empty set)
    Set(Vec<Spanned<Expr>>),

    /// Attribute access (`expr.name`)
    Attr(AttrExpr),

    /// Indexing (`expr[index]`)
    Index(IndexExpr),

    /// Slicing (`expr[start:stop]`)
    Slice(SliceExpr),

    /// Binary operation
    BinaryOp(BinaryOpExpr),

    /// Unary operation
    UnaryOp(UnaryOpExpr),

    /// Conditional expression (`a if cond else b`)
    If(IfExpr),

    /// Function call (`len(x)`)
    Call(Box<CallExpr>),

    /// Method call (`expr.name(args)`)
    MethodCall(Box<MethodCallExpr>),
}

/// Attribute access
#[derive(Debug, Clone)]
pub struct AttrExpr {
    /// Object whose attribute is read
    pub object: BoxExpr,
    /// Attribute name
    pub name: String,
}

/// Indexing expression
#[derive(Debug, Clone)]
pub struct IndexExpr {
    /// Indexed object
    pub object: BoxExpr,
    /// Index value (negative values count from the end)
    pub index: BoxExpr,
}

/// Slicing expression
///
/// Either bound may be omitted in the source (`x[:3]`, `x[1:]`, `x[:]`).
#[derive(Debug, Clone)]
pub struct SliceExpr {
    /// Sliced object
    pub object: BoxExpr,
    /// Lower bound, if given
    pub start: OptBoxExpr,
    /// Upper bound, if given
    pub stop: OptBoxExpr,
}

/// Binary operation expression
#[derive(Debug, Clone)]
pub struct BinaryOpExpr {
    /// Left operand
    pub left: BoxExpr,
    /// Operator
    pub op: BinaryOp,
    /// Right operand
    pub right: BoxExpr,
}

/// Unary operation expression
#[derive(Debug, Clone)]
pub struct UnaryOpExpr {
    /// Operator
    pub op: UnaryOp,
    /// Operand
    pub operand: BoxExpr,
}

/// Conditional expression (`then_branch if condition else else_branch`)
#[derive(Debug, Clone)]
pub struct IfExpr {
    /// Condition deciding which branch is evaluated
    pub condition: BoxExpr,
    /// Result when the condition is truthy
    pub then_branch: BoxExpr,
    /// Result when the condition is falsy
    pub else_branch: BoxExpr,
}

/// Function call expression
#[derive(Debug, Clone)]
pub struct CallExpr {
    /// Function name
    pub name: String,
    /// Argument expressions
    pub args: Args,
}

/// Method call expression
#[derive(Debug, Clone)]
pub struct MethodCallExpr {
    /// Receiver object
    pub object: BoxExpr,
    /// Method name
    pub name: String,
    /// Argument expressions
    pub args: Args,
}
