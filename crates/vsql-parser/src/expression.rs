//! Expression parser using recursive descent with precedence climbing
//!
//! One function per precedence level, loosest first:
//! conditional, `or`, `and`, `not`, comparisons, `|`, `^`, `&`, shifts,
//! additive, multiplicative, unary, postfix. Spans are tracked through the
//! location-carrying input stream.

use crate::combinators::{
    current_offset, identifier_parser, keyword, lit, literal_parser, padded_comma, padded_keyword,
    previous_end, ws, Input, PResult, MAX_DEPTH,
};
use vsql_ast::{
    Args, AttrExpr, BinaryOp, BinaryOpExpr, CallExpr, Expr, IfExpr, IndexExpr, MethodCallExpr,
    SliceExpr, Spanned, UnaryOp, UnaryOpExpr,
};
use vsql_diagnostics::Span;
use winnow::combinator::{alt, not, opt, separated, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::one_of;

/// Parse a vSQL expression (entry point for this module)
pub(crate) fn expression_parser<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    conditional_expression(input)
}

fn spanned(inner: Expr, start: usize, end: usize) -> Spanned<Expr> {
    Spanned::new(inner, Span::new(start, end))
}

fn binary(left: Spanned<Expr>, op: BinaryOp, right: Spanned<Expr>) -> Spanned<Expr> {
    let span = left.span.merge(right.span);
    Spanned::new(
        Expr::BinaryOp(BinaryOpExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }),
        span,
    )
}

/// Parse conditional expression (`a if cond else b`, loosest, right-associative)
///
/// Every nested expression re-enters here, so this is where the nesting depth
/// limit is enforced. Prefix chains (`not`, `-`, `~`) recurse on themselves
/// instead and repeat the check at their own recursion sites.
fn conditional_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    if input.state.depth >= MAX_DEPTH {
        return Err(ErrMode::Cut(ContextError::new()));
    }
    input.state.depth += 1;
    let result = conditional_inner(input);
    input.state.depth -= 1;
    result
}

fn conditional_inner<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let then_branch = or_expression(input)?;

    let checkpoint = *input;
    if padded_keyword("if").parse_next(input).is_ok() {
        let condition = or_expression(input)?;
        if padded_keyword("else").parse_next(input).is_err() {
            *input = checkpoint;
            return Ok(then_branch);
        }
        let else_branch = conditional_expression(input)?;
        let span = then_branch.span.merge(else_branch.span);
        return Ok(Spanned::new(
            Expr::If(IfExpr {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            }),
            span,
        ));
    }
    *input = checkpoint;
    Ok(then_branch)
}

/// Parse or expression
fn or_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let mut left = and_expression(input)?;

    loop {
        if padded_keyword("or").parse_next(input).is_ok() {
            let right = and_expression(input)?;
            left = binary(left, BinaryOp::Or, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse and expression
fn and_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let mut left = not_expression(input)?;

    loop {
        if padded_keyword("and").parse_next(input).is_ok() {
            let right = not_expression(input)?;
            left = binary(left, BinaryOp::And, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse not expression (`not` binds looser than comparisons)
fn not_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    ws.parse_next(input)?;
    let start = current_offset(input);
    if keyword("not").parse_next(input).is_ok() {
        if input.state.depth >= MAX_DEPTH {
            return Err(ErrMode::Cut(ContextError::new()));
        }
        input.state.depth += 1;
        let operand = not_expression(input);
        input.state.depth -= 1;
        let operand = operand?;
        let span = Span::new(start, operand.span.end);
        return Ok(Spanned::new(
            Expr::UnaryOp(UnaryOpExpr {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            }),
            span,
        ));
    }
    comparison_expression(input)
}

/// Parse one comparison operator token
///
/// `<` and `>` must not swallow the first half of a shift operator, and the
/// word operators must not run into identifiers.
fn comparison_op<'a>(input: &mut Input<'a>) -> PResult<BinaryOp> {
    alt((
        lit("==").value(BinaryOp::Eq),
        lit("!=").value(BinaryOp::Ne),
        lit("<=").value(BinaryOp::Le),
        lit(">=").value(BinaryOp::Ge),
        terminated(lit("<"), not(one_of(('<', '=')))).value(BinaryOp::Lt),
        terminated(lit(">"), not(one_of(('>', '=')))).value(BinaryOp::Gt),
        (keyword("is"), opt((ws, keyword("not"))))
            .map(|(_, negated)| match negated {
                Some(_) => BinaryOp::IsNot,
                None => BinaryOp::Is,
            }),
        keyword("in").value(BinaryOp::In),
        (keyword("not"), ws, keyword("in")).value(BinaryOp::NotIn),
    ))
    .parse_next(input)
}

/// Parse comparison chain (left-associative)
fn comparison_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let mut left = bitor_expression(input)?;

    loop {
        ws.parse_next(input)?;
        let checkpoint = *input;
        match comparison_op(input) {
            Ok(op) => {
                let right = bitor_expression(input)?;
                left = binary(left, op, right);
            }
            Err(_) => {
                *input = checkpoint;
                break;
            }
        }
    }

    Ok(left)
}

/// Parse bitwise or / set union expression
fn bitor_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let mut left = bitxor_expression(input)?;

    loop {
        ws.parse_next(input)?;
        if lit("|").parse_next(input).is_ok() {
            let right = bitxor_expression(input)?;
            left = binary(left, BinaryOp::BitOr, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse bitwise xor / symmetric difference expression
fn bitxor_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let mut left = bitand_expression(input)?;

    loop {
        ws.parse_next(input)?;
        if lit("^").parse_next(input).is_ok() {
            let right = bitand_expression(input)?;
            left = binary(left, BinaryOp::BitXor, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse bitwise and / set intersection expression
fn bitand_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let mut left = shift_expression(input)?;

    loop {
        ws.parse_next(input)?;
        if lit("&").parse_next(input).is_ok() {
            let right = shift_expression(input)?;
            left = binary(left, BinaryOp::BitAnd, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse shift expression
fn shift_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let mut left = additive_expression(input)?;

    loop {
        ws.parse_next(input)?;
        let op = if lit("<<").parse_next(input).is_ok() {
            Some(BinaryOp::Shl)
        } else if lit(">>").parse_next(input).is_ok() {
            Some(BinaryOp::Shr)
        } else {
            None
        };

        if let Some(op) = op {
            let right = additive_expression(input)?;
            left = binary(left, op, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse additive expression
fn additive_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let mut left = multiplicative_expression(input)?;

    loop {
        ws.parse_next(input)?;
        let op = if lit("+").parse_next(input).is_ok() {
            Some(BinaryOp::Add)
        } else if lit("-").parse_next(input).is_ok() {
            Some(BinaryOp::Sub)
        } else {
            None
        };

        if let Some(op) = op {
            let right = multiplicative_expression(input)?;
            left = binary(left, op, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse multiplicative expression (`//` before `/`)
fn multiplicative_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    let mut left = unary_expression(input)?;

    loop {
        ws.parse_next(input)?;
        let op = if lit("*").parse_next(input).is_ok() {
            Some(BinaryOp::Mul)
        } else if lit("//").parse_next(input).is_ok() {
            Some(BinaryOp::FloorDiv)
        } else if lit("/").parse_next(input).is_ok() {
            Some(BinaryOp::Div)
        } else if lit("%").parse_next(input).is_ok() {
            Some(BinaryOp::Mod)
        } else {
            None
        };

        if let Some(op) = op {
            let right = unary_expression(input)?;
            left = binary(left, op, right);
        } else {
            break;
        }
    }

    Ok(left)
}

/// Parse unary expression (`-`, `~`)
fn unary_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    ws.parse_next(input)?;
    let start = current_offset(input);

    let op = if lit("-").parse_next(input).is_ok() {
        Some(UnaryOp::Neg)
    } else if lit("~").parse_next(input).is_ok() {
        Some(UnaryOp::BitNot)
    } else {
        None
    };

    if let Some(op) = op {
        if input.state.depth >= MAX_DEPTH {
            return Err(ErrMode::Cut(ContextError::new()));
        }
        input.state.depth += 1;
        let operand = unary_expression(input);
        input.state.depth -= 1;
        let operand = operand?;
        let span = Span::new(start, operand.span.end);
        return Ok(Spanned::new(
            Expr::UnaryOp(UnaryOpExpr {
                op,
                operand: Box::new(operand),
            }),
            span,
        ));
    }

    postfix_expression(input)
}

/// Parse postfix operators: attribute access, method calls, indexing, slicing
fn postfix_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    ws.parse_next(input)?;
    let start = current_offset(input);
    let mut expr = primary_expression(input)?;

    loop {
        let checkpoint = *input;
        ws.parse_next(input)?;

        if lit(".").parse_next(input).is_ok() {
            ws.parse_next(input)?;
            let Ok(name) = identifier_parser(input) else {
                *input = checkpoint;
                break;
            };
            let name_end = previous_end(input);

            let call_checkpoint = *input;
            ws.parse_next(input)?;
            if lit("(").parse_next(input).is_ok() {
                let args = argument_list(input)?;
                let end = previous_end(input);
                expr = spanned(
                    Expr::MethodCall(Box::new(MethodCallExpr {
                        object: Box::new(expr),
                        name,
                        args,
                    })),
                    start,
                    end,
                );
            } else {
                *input = call_checkpoint;
                expr = spanned(
                    Expr::Attr(AttrExpr {
                        object: Box::new(expr),
                        name,
                    }),
                    start,
                    name_end,
                );
            }
            continue;
        }

        if lit("[").parse_next(input).is_ok() {
            expr = subscript(input, expr, start)?;
            continue;
        }

        *input = checkpoint;
        break;
    }

    Ok(expr)
}

/// Parse the bracketed part of an index or slice, `[` already consumed
fn subscript<'a>(
    input: &mut Input<'a>,
    object: Spanned<Expr>,
    start: usize,
) -> PResult<Spanned<Expr>> {
    ws.parse_next(input)?;

    // Omitted lower bound: x[:stop] or x[:]
    if lit(":").parse_next(input).is_ok() {
        let stop = slice_bound(input)?;
        let end = previous_end(input);
        return Ok(spanned(
            Expr::Slice(SliceExpr {
                object: Box::new(object),
                start: None,
                stop,
            }),
            start,
            end,
        ));
    }

    let first = conditional_expression(input)?;
    ws.parse_next(input)?;

    if lit(":").parse_next(input).is_ok() {
        let stop = slice_bound(input)?;
        let end = previous_end(input);
        return Ok(spanned(
            Expr::Slice(SliceExpr {
                object: Box::new(object),
                start: Some(Box::new(first)),
                stop,
            }),
            start,
            end,
        ));
    }

    lit("]").parse_next(input)?;
    let end = previous_end(input);
    Ok(spanned(
        Expr::Index(IndexExpr {
            object: Box::new(object),
            index: Box::new(first),
        }),
        start,
        end,
    ))
}

/// Parse an optional upper slice bound followed by `]`
fn slice_bound<'a>(input: &mut Input<'a>) -> PResult<Option<Box<Spanned<Expr>>>> {
    ws.parse_next(input)?;
    if lit("]").parse_next(input).is_ok() {
        return Ok(None);
    }
    let stop = conditional_expression(input)?;
    ws.parse_next(input)?;
    lit("]").parse_next(input)?;
    Ok(Some(Box::new(stop)))
}

/// Parse a call argument list, `(` already consumed
fn argument_list<'a>(input: &mut Input<'a>) -> PResult<Args> {
    let args: Vec<Spanned<Expr>> =
        separated(0.., conditional_expression, padded_comma).parse_next(input)?;
    ws.parse_next(input)?;
    lit(")").parse_next(input)?;
    Ok(args.into_iter().collect())
}

/// Parse the comma-separated body of a list or set display, up to `close`
fn display_elements<'a>(
    input: &mut Input<'a>,
    close: &'static str,
) -> PResult<Vec<Spanned<Expr>>> {
    let elems: Vec<Spanned<Expr>> =
        separated(0.., conditional_expression, padded_comma).parse_next(input)?;
    // Trailing comma is allowed in displays
    if !elems.is_empty() {
        let _ = padded_comma(input);
    }
    ws.parse_next(input)?;
    lit(close).parse_next(input)?;
    Ok(elems)
}

/// Parse primary expression: literals, displays, parentheses, calls, idents
fn primary_expression<'a>(input: &mut Input<'a>) -> PResult<Spanned<Expr>> {
    ws.parse_next(input)?;
    let start = current_offset(input);

    // Parenthesized expression
    if lit("(").parse_next(input).is_ok() {
        let inner = conditional_expression(input)?;
        ws.parse_next(input)?;
        lit(")").parse_next(input)?;
        return Ok(inner);
    }

    // List display
    if lit("[").parse_next(input).is_ok() {
        let elems = display_elements(input, "]")?;
        let end = previous_end(input);
        return Ok(spanned(Expr::List(elems), start, end));
    }

    // Set display; `{/}` and `{}` are the empty set
    if lit("{").parse_next(input).is_ok() {
        ws.parse_next(input)?;
        let checkpoint = *input;
        if lit("/").parse_next(input).is_ok() {
            ws.parse_next(input)?;
            if lit("}").parse_next(input).is_ok() {
                let end = previous_end(input);
                return Ok(spanned(Expr::Set(Vec::new()), start, end));
            }
            *input = checkpoint;
        }
        let elems = display_elements(input, "}")?;
        let end = previous_end(input);
        return Ok(spanned(Expr::Set(elems), start, end));
    }

    // Literals
    let checkpoint = *input;
    if let Ok(value) = literal_parser(input) {
        let end = previous_end(input);
        return Ok(spanned(Expr::Literal(value), start, end));
    }
    *input = checkpoint;

    // Function call or environment identifier
    let name = identifier_parser(input)?;
    let name_end = previous_end(input);

    let call_checkpoint = *input;
    ws.parse_next(input)?;
    if lit("(").parse_next(input).is_ok() {
        let args = argument_list(input)?;
        let end = previous_end(input);
        return Ok(spanned(
            Expr::Call(Box::new(CallExpr { name, args })),
            start,
            end,
        ));
    }
    *input = call_checkpoint;

    Ok(spanned(Expr::Ident(name), start, name_end))
}
