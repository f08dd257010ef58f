//! Arithmetic operators
//!
//! Numeric operands promote along Bool < Int < Number: two integer-like
//! operands stay in Int (with overflow checked into RangeError), any Number
//! operand pulls the result into Number. `+`, `-` and `*` additionally cover
//! the temporal matrix and sequence concatenation/repetition, `%` doubles as
//! color compositing. Null on either side propagates to Null.

use crate::temporal::{DateTimeDelta, SECONDS_PER_DAY};
use crate::value::VsqlValue;
use vsql_diagnostics::{Result, VsqlError};

/// Hard cap on `str`/`list` repetition results, in chars/elements.
const MAX_REPEAT_LEN: usize = 1 << 24;

// ============================================================================
// Addition
// ============================================================================

pub fn add(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    match (left, right) {
        // Numeric tower
        _ if both_int(left, right) => int_op(left, right, "+", i64::checked_add),
        _ if both_numeric(left, right) => number_op(left, right, |a, b| a + b),

        // Sequence concatenation
        (Str(a), Str(b)) => {
            let mut out = String::with_capacity(a.len() + b.len());
            out.push_str(a);
            out.push_str(b);
            Ok(Str(out))
        }
        (List(a), List(b)) => {
            let mut out = a.clone();
            out.extend(b.iter().cloned());
            Ok(List(out))
        }

        // Date/DateTime plus a delta, delta on either side
        (Date(d), DateDelta(delta)) | (DateDelta(delta), Date(d)) => d
            .checked_add_days(delta.days())
            .map(Date)
            .ok_or_else(date_overflow),
        (Date(d), MonthDelta(delta)) | (MonthDelta(delta), Date(d)) => d
            .checked_add_months(delta.months())
            .map(Date)
            .ok_or_else(date_overflow),
        (Date(d), DateTimeDelta(delta)) | (DateTimeDelta(delta), Date(d)) => d
            .midnight()
            .checked_add_seconds(delta.total_seconds())
            .map(DateTime)
            .ok_or_else(date_overflow),
        (DateTime(dt), DateDelta(delta)) | (DateDelta(delta), DateTime(dt)) => delta
            .days()
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|seconds| dt.checked_add_seconds(seconds))
            .map(DateTime)
            .ok_or_else(date_overflow),
        (DateTime(dt), DateTimeDelta(delta)) | (DateTimeDelta(delta), DateTime(dt)) => dt
            .checked_add_seconds(delta.total_seconds())
            .map(DateTime)
            .ok_or_else(date_overflow),
        (DateTime(dt), MonthDelta(delta)) | (MonthDelta(delta), DateTime(dt)) => dt
            .checked_add_months(delta.months())
            .map(DateTime)
            .ok_or_else(date_overflow),

        // Delta plus delta
        (DateDelta(a), DateDelta(b)) => a
            .days()
            .checked_add(b.days())
            .map(|days| DateDelta(crate::temporal::DateDelta::new(days)))
            .ok_or_else(|| overflow("+")),
        (DateDelta(a), DateTimeDelta(b)) | (DateTimeDelta(b), DateDelta(a)) => a
            .days()
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|total| total.checked_add(b.total_seconds()))
            .map(|total| DateTimeDelta(crate::temporal::DateTimeDelta::from_total_seconds(total)))
            .ok_or_else(|| overflow("+")),
        (DateTimeDelta(a), DateTimeDelta(b)) => a
            .total_seconds()
            .checked_add(b.total_seconds())
            .map(|total| DateTimeDelta(crate::temporal::DateTimeDelta::from_total_seconds(total)))
            .ok_or_else(|| overflow("+")),
        (MonthDelta(a), MonthDelta(b)) => a
            .months()
            .checked_add(b.months())
            .map(|months| MonthDelta(crate::temporal::MonthDelta::new(months)))
            .ok_or_else(|| overflow("+")),

        _ => Err(unsupported("+", left, right)),
    }
}

// ============================================================================
// Subtraction
// ============================================================================

pub fn subtract(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    match (left, right) {
        // Numeric tower
        _ if both_int(left, right) => int_op(left, right, "-", i64::checked_sub),
        _ if both_numeric(left, right) => number_op(left, right, |a, b| a - b),

        // Differences between points in time
        (Date(a), Date(b)) => Ok(DateDelta(a.days_since(b))),
        (DateTime(a), DateTime(b)) => Ok(DateTimeDelta(a.seconds_since(b))),

        // Date/DateTime minus a delta
        (Date(d), DateDelta(delta)) => delta
            .days()
            .checked_neg()
            .and_then(|days| d.checked_add_days(days))
            .map(Date)
            .ok_or_else(date_overflow),
        (Date(d), MonthDelta(delta)) => delta
            .months()
            .checked_neg()
            .and_then(|months| d.checked_add_months(months))
            .map(Date)
            .ok_or_else(date_overflow),
        (Date(d), DateTimeDelta(delta)) => delta
            .total_seconds()
            .checked_neg()
            .and_then(|seconds| d.midnight().checked_add_seconds(seconds))
            .map(DateTime)
            .ok_or_else(date_overflow),
        (DateTime(dt), DateDelta(delta)) => delta
            .days()
            .checked_mul(SECONDS_PER_DAY)
            .and_then(i64::checked_neg)
            .and_then(|seconds| dt.checked_add_seconds(seconds))
            .map(DateTime)
            .ok_or_else(date_overflow),
        (DateTime(dt), DateTimeDelta(delta)) => delta
            .total_seconds()
            .checked_neg()
            .and_then(|seconds| dt.checked_add_seconds(seconds))
            .map(DateTime)
            .ok_or_else(date_overflow),
        (DateTime(dt), MonthDelta(delta)) => delta
            .months()
            .checked_neg()
            .and_then(|months| dt.checked_add_months(months))
            .map(DateTime)
            .ok_or_else(date_overflow),

        // Delta minus delta
        (DateDelta(a), DateDelta(b)) => a
            .days()
            .checked_sub(b.days())
            .map(|days| DateDelta(crate::temporal::DateDelta::new(days)))
            .ok_or_else(|| overflow("-")),
        (DateDelta(a), DateTimeDelta(b)) => a
            .days()
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|total| total.checked_sub(b.total_seconds()))
            .map(|total| DateTimeDelta(crate::temporal::DateTimeDelta::from_total_seconds(total)))
            .ok_or_else(|| overflow("-")),
        (DateTimeDelta(a), DateDelta(b)) => b
            .days()
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|sub| a.total_seconds().checked_sub(sub))
            .map(|total| DateTimeDelta(crate::temporal::DateTimeDelta::from_total_seconds(total)))
            .ok_or_else(|| overflow("-")),
        (DateTimeDelta(a), DateTimeDelta(b)) => a
            .total_seconds()
            .checked_sub(b.total_seconds())
            .map(|total| DateTimeDelta(crate::temporal::DateTimeDelta::from_total_seconds(total)))
            .ok_or_else(|| overflow("-")),
        (MonthDelta(a), MonthDelta(b)) => a
            .months()
            .checked_sub(b.months())
            .map(|months| MonthDelta(crate::temporal::MonthDelta::new(months)))
            .ok_or_else(|| overflow("-")),

        _ => Err(unsupported("-", left, right)),
    }
}

// ============================================================================
// Multiplication
// ============================================================================

pub fn multiply(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    match (left, right) {
        // Numeric tower
        _ if both_int(left, right) => int_op(left, right, "*", i64::checked_mul),
        _ if both_numeric(left, right) => number_op(left, right, |a, b| a * b),

        // Sequence repetition, count on either side
        (Str(s), n) | (n, Str(s)) if n.as_int().is_some() => {
            repeat_str(s, n.as_int().unwrap_or(0))
        }
        (List(items), n) | (n, List(items)) if n.as_int().is_some() => {
            repeat_list(items, n.as_int().unwrap_or(0))
        }

        // Integer-scaled deltas
        (DateDelta(delta), n) | (n, DateDelta(delta)) if n.as_int().is_some() => delta
            .days()
            .checked_mul(n.as_int().unwrap_or(0))
            .map(|days| DateDelta(crate::temporal::DateDelta::new(days)))
            .ok_or_else(|| overflow("*")),
        (DateTimeDelta(delta), n) | (n, DateTimeDelta(delta)) if n.as_int().is_some() => delta
            .total_seconds()
            .checked_mul(n.as_int().unwrap_or(0))
            .map(|total| DateTimeDelta(crate::temporal::DateTimeDelta::from_total_seconds(total)))
            .ok_or_else(|| overflow("*")),
        (MonthDelta(delta), n) | (n, MonthDelta(delta)) if n.as_int().is_some() => delta
            .months()
            .checked_mul(n.as_int().unwrap_or(0))
            .map(|months| MonthDelta(crate::temporal::MonthDelta::new(months)))
            .ok_or_else(|| overflow("*")),

        // Only second-based deltas scale by a fraction
        (DateTimeDelta(delta), Number(f)) | (Number(f), DateTimeDelta(delta)) => {
            seconds_from_f64(delta.total_seconds() as f64 * f)
        }

        _ => Err(unsupported("*", left, right)),
    }
}

// ============================================================================
// True division
// ============================================================================

pub fn divide(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    match (left, right) {
        // `/` always produces a Number
        _ if both_numeric(left, right) => {
            let a = promote(left);
            let b = promote(right);
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Number(a / b))
        }

        (DateTimeDelta(delta), divisor) if divisor.is_numeric() => {
            let f = promote(divisor);
            if f == 0.0 {
                return Err(division_by_zero());
            }
            seconds_from_f64(delta.total_seconds() as f64 / f)
        }
        (DateDelta(delta), divisor) if divisor.is_numeric() => {
            let f = promote(divisor);
            if f == 0.0 {
                return Err(division_by_zero());
            }
            let total = delta
                .days()
                .checked_mul(SECONDS_PER_DAY)
                .ok_or_else(|| overflow("/"))?;
            seconds_from_f64(total as f64 / f)
        }

        _ => Err(unsupported("/", left, right)),
    }
}

// ============================================================================
// Floor division
// ============================================================================

pub fn floor_divide(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    match (left, right) {
        _ if both_int(left, right) => {
            let (a, b) = int_pair(left, right);
            if b == 0 {
                return Err(division_by_zero());
            }
            floor_div_i64(a, b).map(Int).ok_or_else(|| overflow("//"))
        }
        _ if both_numeric(left, right) => {
            let a = promote(left);
            let b = promote(right);
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Number((a / b).floor()))
        }

        // Deltas floor-divide by an integer count
        (DateDelta(delta), n) if n.as_int().is_some() => {
            let b = n.as_int().unwrap_or(0);
            if b == 0 {
                return Err(division_by_zero());
            }
            floor_div_i64(delta.days(), b)
                .map(|days| DateDelta(crate::temporal::DateDelta::new(days)))
                .ok_or_else(|| overflow("//"))
        }
        // Whole days of the quotient, fractional days dropped
        (DateTimeDelta(delta), n) if n.as_int().is_some() => {
            let b = n.as_int().unwrap_or(0);
            if b == 0 {
                return Err(division_by_zero());
            }
            let per_day = b.checked_mul(SECONDS_PER_DAY).ok_or_else(|| overflow("//"))?;
            floor_div_i64(delta.total_seconds(), per_day)
                .map(|days| DateDelta(crate::temporal::DateDelta::new(days)))
                .ok_or_else(|| overflow("//"))
        }
        (MonthDelta(delta), n) if n.as_int().is_some() => {
            let b = n.as_int().unwrap_or(0);
            if b == 0 {
                return Err(division_by_zero());
            }
            floor_div_i64(delta.months(), b)
                .map(|months| MonthDelta(crate::temporal::MonthDelta::new(months)))
                .ok_or_else(|| overflow("//"))
        }

        _ => Err(unsupported("//", left, right)),
    }
}

// ============================================================================
// Modulo
// ============================================================================

/// Floor-mod for numbers (result takes the sign of the divisor), color
/// compositing for `Color % Color`.
pub fn modulo(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    match (left, right) {
        _ if both_int(left, right) => {
            let (a, b) = int_pair(left, right);
            if b == 0 {
                return Err(division_by_zero());
            }
            Ok(Int(floor_mod_i64(a, b)))
        }
        _ if both_numeric(left, right) => {
            let a = promote(left);
            let b = promote(right);
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Number(a - b * (a / b).floor()))
        }

        // Alpha compositing: left blended over right
        (Color(fg), Color(bg)) => Ok(Color(fg.blend_over(bg))),

        _ => Err(unsupported("%", left, right)),
    }
}

// ============================================================================
// Unary minus
// ============================================================================

pub fn negate(value: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    match value {
        Null => Ok(Null),
        Bool(b) => Ok(Int(-i64::from(*b))),
        Int(n) => n.checked_neg().map(Int).ok_or_else(|| overflow("-")),
        Number(n) => Ok(Number(-n)),
        DateDelta(delta) => delta
            .days()
            .checked_neg()
            .map(|days| DateDelta(crate::temporal::DateDelta::new(days)))
            .ok_or_else(|| overflow("-")),
        DateTimeDelta(delta) => delta
            .total_seconds()
            .checked_neg()
            .map(|total| DateTimeDelta(crate::temporal::DateTimeDelta::from_total_seconds(total)))
            .ok_or_else(|| overflow("-")),
        MonthDelta(delta) => delta
            .months()
            .checked_neg()
            .map(|months| MonthDelta(crate::temporal::MonthDelta::new(months)))
            .ok_or_else(|| overflow("-")),
        other => Err(VsqlError::type_error(format!(
            "bad operand type for unary -: {}",
            other.type_name()
        ))),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn both_int(left: &VsqlValue, right: &VsqlValue) -> bool {
    left.as_int().is_some() && right.as_int().is_some()
}

fn both_numeric(left: &VsqlValue, right: &VsqlValue) -> bool {
    left.is_numeric() && right.is_numeric()
}

// Callers check both_int first.
fn int_pair(left: &VsqlValue, right: &VsqlValue) -> (i64, i64) {
    (left.as_int().unwrap_or(0), right.as_int().unwrap_or(0))
}

// Callers check both_numeric first.
fn promote(value: &VsqlValue) -> f64 {
    value.as_number().unwrap_or(f64::NAN)
}

fn int_op(
    left: &VsqlValue,
    right: &VsqlValue,
    op: &str,
    apply: fn(i64, i64) -> Option<i64>,
) -> Result<VsqlValue> {
    let (a, b) = int_pair(left, right);
    apply(a, b).map(VsqlValue::Int).ok_or_else(|| overflow(op))
}

fn number_op(left: &VsqlValue, right: &VsqlValue, apply: fn(f64, f64) -> f64) -> Result<VsqlValue> {
    Ok(VsqlValue::Number(apply(promote(left), promote(right))))
}

/// Floor division on i64 (rounds toward negative infinity).
pub(crate) fn floor_div_i64(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    let r = a.checked_rem(b)?;
    // q - 1 cannot overflow: q == i64::MIN forces b == 1 and r == 0
    Some(if r != 0 && (r < 0) != (b < 0) { q - 1 } else { q })
}

/// Floor modulo on i64 (result has the sign of the divisor). Caller rules
/// out b == 0.
fn floor_mod_i64(a: i64, b: i64) -> i64 {
    if b == -1 {
        // i64::MIN % -1 would overflow checked_rem; the result is always 0
        return 0;
    }
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) { r + b } else { r }
}

/// Round a fractional second count to the nearest whole second.
fn seconds_from_f64(scaled: f64) -> Result<VsqlValue> {
    let rounded = scaled.round();
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(overflow("*"));
    }
    Ok(VsqlValue::DateTimeDelta(DateTimeDelta::from_total_seconds(
        rounded as i64,
    )))
}

fn repeat_str(s: &str, count: i64) -> Result<VsqlValue> {
    if count <= 0 || s.is_empty() {
        return Ok(VsqlValue::Str(String::new()));
    }
    let count = usize::try_from(count).unwrap_or(usize::MAX);
    let chars = s.chars().count();
    match chars.checked_mul(count) {
        Some(total) if total <= MAX_REPEAT_LEN => Ok(VsqlValue::Str(s.repeat(count))),
        _ => Err(VsqlError::range("string repetition result too large")),
    }
}

fn repeat_list(items: &[VsqlValue], count: i64) -> Result<VsqlValue> {
    if count <= 0 || items.is_empty() {
        return Ok(VsqlValue::List(Vec::new()));
    }
    let count = usize::try_from(count).unwrap_or(usize::MAX);
    match items.len().checked_mul(count) {
        Some(total) if total <= MAX_REPEAT_LEN => {
            let mut out = Vec::with_capacity(total);
            for _ in 0..count {
                out.extend(items.iter().cloned());
            }
            Ok(VsqlValue::List(out))
        }
        _ => Err(VsqlError::range("list repetition result too large")),
    }
}

fn overflow(op: &str) -> VsqlError {
    VsqlError::range(format!("integer overflow in {op}"))
}

fn date_overflow() -> VsqlError {
    VsqlError::range("date result out of range")
}

fn division_by_zero() -> VsqlError {
    VsqlError::range("division by zero")
}

fn unsupported(op: &str, left: &VsqlValue, right: &VsqlValue) -> VsqlError {
    VsqlError::type_error(format!(
        "unsupported operand types for {}: {} and {}",
        op,
        left.type_name(),
        right.type_name()
    ))
}
