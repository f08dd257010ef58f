//! Equality and ordering
//!
//! `==`/`!=` are total over any two values. Ordering is total across Null
//! (which sorts before everything) and the numeric tower, partial elsewhere:
//! incomparable pairs and unordered types are a TypeError.

use crate::value::VsqlValue;
use std::cmp::Ordering;
use vsql_diagnostics::{Result, VsqlError};

/// Language-level `==`
///
/// Null equals only Null, numeric values compare after promotion
/// (`True == 1`, `1 == 1.0`), lists compare elementwise, sets compare as
/// unordered collections, and differently-typed non-numeric values are
/// simply unequal.
pub fn values_equal(left: &VsqlValue, right: &VsqlValue) -> bool {
    use VsqlValue::*;
    match (left, right) {
        (Null, Null) => true,
        (a, b) if a.is_numeric() && b.is_numeric() => numeric_equal(a, b),
        (Str(a), Str(b)) => a == b,
        (Date(a), Date(b)) => a == b,
        (DateTime(a), DateTime(b)) => a == b,
        (DateDelta(a), DateDelta(b)) => a == b,
        (DateTimeDelta(a), DateTimeDelta(b)) => a == b,
        (MonthDelta(a), MonthDelta(b)) => a == b,
        (Color(a), Color(b)) => a == b,
        (Geo(a), Geo(b)) => a == b,
        (List(a), List(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        (Set(a), Set(b)) => sets_equal(a, b),
        _ => false,
    }
}

/// Membership under promoted equality (the `in` operator, set dedup)
pub(crate) fn contains_value(items: &[VsqlValue], needle: &VsqlValue) -> bool {
    items.iter().any(|item| values_equal(item, needle))
}

fn numeric_equal(left: &VsqlValue, right: &VsqlValue) -> bool {
    match (left.as_int(), right.as_int()) {
        (Some(a), Some(b)) => a == b,
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

// Set elements are already deduplicated under promoted equality, so equal
// lengths plus one-sided inclusion decide equality.
fn sets_equal(a: &[VsqlValue], b: &[VsqlValue]) -> bool {
    a.len() == b.len() && a.iter().all(|item| contains_value(b, item))
}

/// Language-level ordering for `<`, `<=`, `>`, `>=` and sort keys
pub fn compare_values(left: &VsqlValue, right: &VsqlValue) -> Result<Ordering> {
    use VsqlValue::*;
    match (left, right) {
        (Null, Null) => Ok(Ordering::Equal),
        (Null, _) => Ok(Ordering::Less),
        (_, Null) => Ok(Ordering::Greater),
        (a, b) if a.is_numeric() && b.is_numeric() => Ok(numeric_compare(a, b)),
        (Str(a), Str(b)) => Ok(a.cmp(b)),
        (Date(a), Date(b)) => Ok(a.cmp(b)),
        (DateTime(a), DateTime(b)) => Ok(a.cmp(b)),
        (DateDelta(a), DateDelta(b)) => Ok(a.cmp(b)),
        (DateTimeDelta(a), DateTimeDelta(b)) => Ok(a.cmp(b)),
        (MonthDelta(a), MonthDelta(b)) => Ok(a.cmp(b)),
        (List(a), List(b)) => compare_lists(a, b),
        _ => Err(VsqlError::type_error(format!(
            "cannot order {} and {}",
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn numeric_compare(left: &VsqlValue, right: &VsqlValue) -> Ordering {
    match (left.as_int(), right.as_int()) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => {
            // is_numeric guarantees the promotion succeeds
            let a = left.as_number().unwrap_or(f64::NAN);
            let b = right.as_number().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
        }
    }
}

fn compare_lists(a: &[VsqlValue], b: &[VsqlValue]) -> Result<Ordering> {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = compare_values(x, y)?;
        if ord != Ordering::Equal {
            return Ok(ord);
        }
    }
    Ok(a.len().cmp(&b.len()))
}
