//! Literal AST nodes for vSQL

use serde::{Deserialize, Serialize};

/// A literal value in a vSQL expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Null literal (`None`)
    Null,
    /// Boolean literal (`True`/`False`)
    Bool(bool),
    /// Integer literal (decimal, `0x`, `0o` or `0b`)
    Int(i64),
    /// Number literal (decimal point and/or exponent)
    Number(f64),
    /// String literal (single or double quoted)
    Str(String),
    /// Date literal (`@(2000-02-29)`)
    Date(DateLiteral),
    /// DateTime literal (`@(2000-02-29T12:34:56)`)
    DateTime(DateTimeLiteral),
    /// Color literal (`#369c`, `#3366cc`, ...)
    Color(ColorLiteral),
}

/// Date literal components
///
/// The parser guarantees the components form a valid calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateLiteral {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateLiteral {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

/// DateTime literal components
///
/// A trailing `T` with no time, and times without seconds, fill the missing
/// components with zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeLiteral {
    pub date: DateLiteral,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl DateTimeLiteral {
    pub const fn new(date: DateLiteral, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
        }
    }
}

/// Color literal components (8 bit per channel, straight alpha)
///
/// Three and four digit forms spread each nibble (`#369c` is `#3366cccc`);
/// three and six digit forms are fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorLiteral {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorLiteral {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}
