//! vSQL expression parser using Winnow
//!
//! This crate provides a complete vSQL expression parser using Winnow with
//! recursive descent and precedence climbing for operator precedence. Parse
//! failures report the byte offset and line/column of the offending input.

mod combinators;
mod expression;

use crate::combinators::{new_input, ws};
use crate::expression::expression_parser;
use vsql_ast::{Expr, Spanned};
use vsql_diagnostics::{Result, SourceLocation, Span, VsqlError};
use winnow::combinator::terminated;
use winnow::prelude::*;

/// Parse a single vSQL expression into its AST
///
/// The whole input must be consumed; trailing content after a complete
/// expression is a syntax error.
pub fn parse_expression(source: &str) -> Result<Spanned<Expr>> {
    terminated(expression_parser, ws)
        .parse(new_input(source))
        .map_err(|err| {
            let offset = err.offset().min(source.len());
            let rest = &source[offset..];
            let message = match rest.chars().next() {
                Some(c) => format!("unexpected {c:?}"),
                None => "unexpected end of expression".to_string(),
            };
            let length = rest.chars().next().map_or(0, char::len_utf8);
            let location = SourceLocation::from_span(Span::new(offset, offset + length), source);
            VsqlError::syntax_at(message, source, location)
        })
}
