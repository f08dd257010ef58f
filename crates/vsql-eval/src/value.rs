//! vSQL runtime values

use crate::color::Color;
use crate::geo::Geo;
use crate::temporal::{Date, DateDelta, DateTime, DateTimeDelta, MonthDelta};
use serde::{Deserialize, Serialize};

/// vSQL runtime value
///
/// `PartialEq` here is structural (used by tests and container dedup
/// plumbing); the language-level `==` with cross-numeric promotion lives in
/// [`crate::operators::comparison`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VsqlValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Number(f64),
    /// String value
    Str(String),
    /// Calendar date
    Date(Date),
    /// Calendar date with time of day
    DateTime(DateTime),
    /// Whole-day duration
    DateDelta(DateDelta),
    /// Day and second duration
    DateTimeDelta(DateTimeDelta),
    /// Month-granular duration
    MonthDelta(MonthDelta),
    /// RGBA color
    Color(Color),
    /// Geographic position
    Geo(Geo),
    /// Ordered list
    List(Vec<VsqlValue>),
    /// Insertion-ordered set without duplicates
    Set(Vec<VsqlValue>),
}

impl VsqlValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// vSQL truthiness: Null, zero, empty strings, empty containers and
    /// zero-length deltas are falsy, everything else is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Number(n) => *n != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Date(_) | Self::DateTime(_) | Self::Color(_) | Self::Geo(_) => true,
            Self::DateDelta(d) => !d.is_zero(),
            Self::DateTimeDelta(d) => !d.is_zero(),
            Self::MonthDelta(d) => !d.is_zero(),
            Self::List(items) => !items.is_empty(),
            Self::Set(items) => !items.is_empty(),
        }
    }

    /// The type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Number(_) => "number",
            Self::Str(_) => "str",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::DateDelta(_) => "datedelta",
            Self::DateTimeDelta(_) => "datetimedelta",
            Self::MonthDelta(_) => "monthdelta",
            Self::Color(_) => "color",
            Self::Geo(_) => "geo",
            Self::List(_) => "list",
            Self::Set(_) => "set",
        }
    }

    /// Integer view with Bool promotion (`True` counts as 1)
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view with Bool and Int promotion
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Int(n) => Some(*n as f64),
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String view, without conversion
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// True for Bool, Int and Number
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Int(_) | Self::Number(_))
    }
}

impl From<bool> for VsqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for VsqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for VsqlValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for VsqlValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for VsqlValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}
