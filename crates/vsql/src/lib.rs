//! vSQL - the embedded expression language of LivingApps view templates
//!
//! vSQL expressions compute values from application data: app parameters,
//! record fields, the logged-in user and request parameters. This crate is
//! the umbrella over the parser and the evaluator; most users only need the
//! items re-exported here.
//!
//! # Example
//!
//! ```ignore
//! use vsql::{Environment, VsqlEngine, parse_expression};
//!
//! let expr = parse_expression("2 * (17 + 4)")?;
//! let engine = VsqlEngine::new();
//! let value = engine.evaluate(&expr, &Environment::new())?;
//! assert_eq!(vsql::display_value(&value), "42");
//! ```
//!
//! Ordering specifications for record lists are plain strings like
//! `"r.v_lastname desc nulls first"`; [`parse_order`] turns them into
//! [`DataOrder`] keys for [`VsqlEngine::sort_records`].

// Crate re-exports
pub use vsql_ast as ast;
pub use vsql_diagnostics as diagnostics;
pub use vsql_eval as eval;
pub use vsql_parser as parser;

// Convenience re-exports of the items used by almost every caller
pub use vsql_diagnostics::{Result, SourceLocation, Span, Spanned, VsqlError};
pub use vsql_eval::{
    App, Color, DataOrder, Date, DateDelta, DateTime, DateTimeDelta, Direction, EnvValue,
    Environment, Geo, MonthDelta, Nulls, Record, RequestParams, User, VsqlEngine, VsqlValue,
    display_value, repr_value,
};
pub use vsql_parser::parse_expression;

use vsql_ast::Expr;

/// Parse and evaluate an expression in one step.
///
/// A fresh engine is created per call, so `seq()` restarts at zero each
/// time. Callers that evaluate many expressions against the same data
/// should hold a [`VsqlEngine`] and parse once instead.
pub fn evaluate(source: &str, env: &Environment) -> Result<VsqlValue> {
    let expr = parse_expression(source)?;
    log::debug!("evaluating {source:?}");
    VsqlEngine::new().evaluate(&expr, env)
}

/// Parse an ordering specification.
///
/// The syntax is an expression followed by an optional direction and an
/// optional Null placement:
///
/// ```text
/// expr [asc | desc] [nulls first | nulls last]
/// ```
///
/// Without an explicit placement ascending keys put Nulls first and
/// descending keys put Nulls last.
pub fn parse_order(source: &str) -> Result<DataOrder> {
    let (rest, nulls) = split_nulls_clause(source);
    let (rest, direction) = split_direction(rest);
    let expr = parse_expression(rest)?;
    let direction = direction.unwrap_or(Direction::Asc);
    let nulls = nulls.unwrap_or(match direction {
        Direction::Asc => Nulls::First,
        Direction::Desc => Nulls::Last,
    });
    Ok(DataOrder::new(expr, direction, nulls))
}

/// Parse a list of ordering specifications, one per element.
pub fn parse_orders<S: AsRef<str>>(sources: &[S]) -> Result<Vec<DataOrder>> {
    sources.iter().map(|s| parse_order(s.as_ref())).collect()
}

/// Strip a trailing keyword. The keyword must be preceded by whitespace so
/// that identifiers merely ending in it are left alone.
fn strip_keyword<'a>(source: &'a str, keyword: &str) -> Option<&'a str> {
    let head = source.trim_end().strip_suffix(keyword)?;
    head.ends_with(char::is_whitespace).then_some(head)
}

fn split_nulls_clause(source: &str) -> (&str, Option<Nulls>) {
    if let Some(head) = strip_keyword(source, "first").and_then(|h| strip_keyword(h, "nulls")) {
        (head, Some(Nulls::First))
    } else if let Some(head) = strip_keyword(source, "last").and_then(|h| strip_keyword(h, "nulls"))
    {
        (head, Some(Nulls::Last))
    } else {
        (source, None)
    }
}

fn split_direction(source: &str) -> (&str, Option<Direction>) {
    if let Some(head) = strip_keyword(source, "asc") {
        (head, Some(Direction::Asc))
    } else if let Some(head) = strip_keyword(source, "desc") {
        (head, Some(Direction::Desc))
    } else {
        (source, None)
    }
}

/// Render the parse tree of an expression, mainly for debugging.
pub fn dump_ast(source: &str) -> Result<String> {
    let expr: Spanned<Expr> = parse_expression(source)?;
    Ok(format!("{:#?}", expr.inner))
}
