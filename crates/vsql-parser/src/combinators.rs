//! Common parser combinators for vSQL

use chrono::NaiveDate;
use vsql_ast::{ColorLiteral, DateLiteral, DateTimeLiteral, Literal};
use winnow::combinator::{alt, not, opt, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::stream::{LocatingSlice, Location, Stateful};
use winnow::token::{any, literal, one_of, take_while};

/// Nesting levels beyond this are rejected to keep recursion bounded
pub(crate) const MAX_DEPTH: usize = 200;

/// Mutable parser state threaded through the input stream
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ParserState {
    /// Current expression nesting depth
    pub depth: usize,
}

/// Parser input: a location-tracking slice plus nesting state
pub(crate) type Input<'a> = Stateful<LocatingSlice<&'a str>, ParserState>;

/// Result type for all sub-parsers
pub(crate) type PResult<T> = winnow::ModalResult<T>;

/// Wrap expression source into parser input
pub(crate) fn new_input(source: &str) -> Input<'_> {
    Stateful {
        input: LocatingSlice::new(source),
        state: ParserState::default(),
    }
}

/// Byte offset of the next unconsumed token
pub(crate) fn current_offset(input: &Input<'_>) -> usize {
    input.current_token_start()
}

/// Byte offset just past the last consumed token
pub(crate) fn previous_end(input: &Input<'_>) -> usize {
    input.previous_token_end()
}

/// Skip any amount of whitespace
pub(crate) fn ws<'a>(input: &mut Input<'a>) -> PResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Match an exact token
pub(crate) fn lit<'a>(s: &'static str) -> impl Parser<Input<'a>, &'a str, ErrMode<ContextError>> {
    literal(s)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Match a keyword that must not run into a following identifier character
///
/// Restores the input on failure so a partial match (`in` against `int`)
/// never leaves the stream mid-word.
pub(crate) fn keyword<'a>(kw: &'static str) -> impl Parser<Input<'a>, (), ErrMode<ContextError>> {
    move |input: &mut Input<'a>| {
        let checkpoint = *input;
        match terminated(literal(kw), not(one_of(is_ident_char)))
            .void()
            .parse_next(input)
        {
            Ok(()) => Ok(()),
            Err(e) => {
                *input = checkpoint;
                Err(e)
            }
        }
    }
}

/// Match a keyword surrounded by optional whitespace
pub(crate) fn padded_keyword<'a>(
    kw: &'static str,
) -> impl Parser<Input<'a>, (), ErrMode<ContextError>> {
    (ws, keyword(kw), ws).void()
}

/// Match a comma surrounded by optional whitespace
pub(crate) fn padded_comma<'a>(input: &mut Input<'a>) -> PResult<()> {
    (ws, literal(","), ws).void().parse_next(input)
}

/// Reserved words that can never be identifiers
pub(crate) fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "None" | "True" | "False" | "not" | "and" | "or" | "in" | "is" | "if" | "else"
    )
}

fn backtrack<T>() -> PResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Parse a vSQL identifier (not a keyword)
pub(crate) fn identifier_parser<'a>(input: &mut Input<'a>) -> PResult<String> {
    let checkpoint = *input;
    let word = (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_ident_char),
    )
        .take()
        .parse_next(input)?;
    if is_keyword(word) {
        *input = checkpoint;
        return backtrack();
    }
    Ok(word.to_string())
}

/// Parse any literal value
pub(crate) fn literal_parser<'a>(input: &mut Input<'a>) -> PResult<Literal> {
    alt((
        temporal_literal_parser,
        color_literal_parser,
        string_parser.map(Literal::Str),
        number_literal_parser,
        keyword("None").value(Literal::Null),
        keyword("True").value(Literal::Bool(true)),
        keyword("False").value(Literal::Bool(false)),
    ))
    .parse_next(input)
}

fn decimal_digits<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

fn exponent<'a>(input: &mut Input<'a>) -> PResult<()> {
    (
        one_of(('e', 'E')),
        opt(one_of(('+', '-'))),
        take_while(1.., |c: char| c.is_ascii_digit()),
    )
        .void()
        .parse_next(input)
}

/// Parse an integer or number literal
///
/// A numeric token is a Number when it contains a decimal point or an
/// exponent, an Int otherwise. `0x`, `0o` and `0b` prefixes give Ints in the
/// respective radix.
pub(crate) fn number_literal_parser<'a>(input: &mut Input<'a>) -> PResult<Literal> {
    alt((
        radix_int(("0x", "0X"), 16, |c: char| c.is_ascii_hexdigit()),
        radix_int(("0o", "0O"), 8, |c: char| matches!(c, '0'..='7')),
        radix_int(("0b", "0B"), 2, |c: char| matches!(c, '0' | '1')),
        // Number: digits '.' digits [exp]  |  digits exp
        (
            decimal_digits,
            alt(((literal("."), decimal_digits, opt(exponent)).void(), exponent)),
        )
            .take()
            .parse_to::<f64>()
            .map(Literal::Number),
        decimal_digits
            .try_map(|s: &str| s.parse::<i64>())
            .map(Literal::Int),
    ))
    .parse_next(input)
}

fn radix_int<'a>(
    prefixes: (&'static str, &'static str),
    radix: u32,
    digit: fn(char) -> bool,
) -> impl Parser<Input<'a>, Literal, ErrMode<ContextError>> {
    move |input: &mut Input<'a>| {
        alt((literal(prefixes.0), literal(prefixes.1))).parse_next(input)?;
        take_while(1.., digit)
            .try_map(|s: &str| i64::from_str_radix(s, radix))
            .map(Literal::Int)
            .parse_next(input)
    }
}

/// Parse a string literal (single or double quoted, backslash escapes)
pub(crate) fn string_parser<'a>(input: &mut Input<'a>) -> PResult<String> {
    let quote: char = one_of(('\'', '"')).parse_next(input)?;
    let mut out = String::new();
    loop {
        let c: char = any.parse_next(input)?;
        if c == quote {
            return Ok(out);
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape: char = any.parse_next(input)?;
        match escape {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            'b' => out.push('\x08'),
            'v' => out.push('\x0b'),
            '0' => out.push('\0'),
            '\\' | '\'' | '"' => out.push(escape),
            'x' => out.push(hex_escape(input, 2)?),
            'u' => out.push(hex_escape(input, 4)?),
            _ => return backtrack(),
        }
    }
}

fn hex_escape<'a>(input: &mut Input<'a>, len: usize) -> PResult<char> {
    let digits = take_while(len..=len, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    let Ok(value) = u32::from_str_radix(digits, 16) else {
        return backtrack();
    };
    match char::from_u32(value) {
        Some(c) => Ok(c),
        None => backtrack(),
    }
}

fn fixed_digits<'a>(input: &mut Input<'a>, len: usize) -> PResult<u32> {
    let digits = take_while(len..=len, |c: char| c.is_ascii_digit()).parse_next(input)?;
    match digits.parse() {
        Ok(n) => Ok(n),
        Err(_) => backtrack(),
    }
}

/// Parse a date or datetime literal: `@(YYYY-MM-DD)` with optional
/// `T[HH:MM[:SS]]` time part
///
/// A bare trailing `T` selects midnight. Calendar validity is checked here so
/// `@(2001-02-29)` is rejected at parse time.
pub(crate) fn temporal_literal_parser<'a>(input: &mut Input<'a>) -> PResult<Literal> {
    literal("@(").parse_next(input)?;
    let year = fixed_digits(input, 4)?;
    literal("-").parse_next(input)?;
    let month = fixed_digits(input, 2)?;
    literal("-").parse_next(input)?;
    let day = fixed_digits(input, 2)?;

    let year = year as i32;
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return backtrack();
    }
    let date = DateLiteral::new(year, month, day);

    if opt(literal("T")).parse_next(input)?.is_none() {
        literal(")").parse_next(input)?;
        return Ok(Literal::Date(date));
    }

    let mut hour = 0;
    let mut minute = 0;
    let mut second = 0;
    if opt(literal(")")).parse_next(input)?.is_none() {
        hour = fixed_digits(input, 2)?;
        literal(":").parse_next(input)?;
        minute = fixed_digits(input, 2)?;
        if opt(literal(":")).parse_next(input)?.is_some() {
            second = fixed_digits(input, 2)?;
        }
        if hour > 23 || minute > 59 || second > 59 {
            return backtrack();
        }
        literal(")").parse_next(input)?;
    }
    Ok(Literal::DateTime(DateTimeLiteral::new(
        date, hour, minute, second,
    )))
}

/// Parse a color literal: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
pub(crate) fn color_literal_parser<'a>(input: &mut Input<'a>) -> PResult<Literal> {
    literal("#").parse_next(input)?;
    let digits = take_while(1..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;

    fn nibble(digits: &str, index: usize) -> PResult<u8> {
        match u8::from_str_radix(&digits[index..=index], 16) {
            Ok(v) => Ok(v * 17),
            Err(_) => backtrack(),
        }
    }
    fn pair(digits: &str, index: usize) -> PResult<u8> {
        match u8::from_str_radix(&digits[index..index + 2], 16) {
            Ok(v) => Ok(v),
            Err(_) => backtrack(),
        }
    }

    let (r, g, b, a) = match digits.len() {
        3 => (nibble(digits, 0)?, nibble(digits, 1)?, nibble(digits, 2)?, 255),
        4 => (
            nibble(digits, 0)?,
            nibble(digits, 1)?,
            nibble(digits, 2)?,
            nibble(digits, 3)?,
        ),
        6 => (pair(digits, 0)?, pair(digits, 2)?, pair(digits, 4)?, 255),
        8 => (
            pair(digits, 0)?,
            pair(digits, 2)?,
            pair(digits, 4)?,
            pair(digits, 6)?,
        ),
        _ => return backtrack(),
    };
    Ok(Literal::Color(ColorLiteral::new(r, g, b, a)))
}
