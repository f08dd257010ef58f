//! vSQL abstract syntax tree definitions
//!
//! This crate defines the AST nodes for vSQL expressions. Nodes carry byte
//! spans into the original source so that errors can point back at the
//! offending piece of the expression.

mod expression;
mod literal;
mod operator;

pub use expression::*;
pub use literal::*;
pub use operator::*;

use smallvec::SmallVec;

/// A node with source span information
pub type Spanned<T> = vsql_diagnostics::Spanned<T>;

/// Type alias for boxed expressions
pub type BoxExpr = Box<Spanned<Expr>>;

/// Type alias for optional boxed expressions
pub type OptBoxExpr = Option<Box<Spanned<Expr>>>;

/// Argument lists for calls and method calls
///
/// Almost all vSQL calls take no more than four arguments, so the common case
/// stays inline.
pub type Args = SmallVec<[Spanned<Expr>; 4]>;
