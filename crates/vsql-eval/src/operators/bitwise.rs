//! Bitwise and set operators
//!
//! `&`, `|` and `^` act on integer-like operands as two's-complement i64
//! operations (Bool promotes to Int, so `False & True` is `0`, not `False`)
//! and on two sets as intersection, union and symmetric difference. Shifts
//! are integer-only; a left shift that loses bits is a RangeError rather
//! than silent truncation.

use super::comparison::contains_value;
use crate::value::VsqlValue;
use vsql_diagnostics::{Result, VsqlError};

pub fn bit_and(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    match (left, right) {
        // Intersection keeps the left operand's order
        (Set(a), Set(b)) => Ok(Set(a
            .iter()
            .filter(|item| contains_value(b, item))
            .cloned()
            .collect())),
        _ => match (left.as_int(), right.as_int()) {
            (Some(a), Some(b)) => Ok(Int(a & b)),
            _ => Err(unsupported("&", left, right)),
        },
    }
}

pub fn bit_or(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    match (left, right) {
        // Union: left operand's elements first, then the right's new ones
        (Set(a), Set(b)) => {
            let mut out = a.clone();
            for item in b {
                if !contains_value(&out, item) {
                    out.push(item.clone());
                }
            }
            Ok(Set(out))
        }
        _ => match (left.as_int(), right.as_int()) {
            (Some(a), Some(b)) => Ok(Int(a | b)),
            _ => Err(unsupported("|", left, right)),
        },
    }
}

pub fn bit_xor(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    match (left, right) {
        // Symmetric difference: left-only elements, then right-only ones
        (Set(a), Set(b)) => {
            let mut out: Vec<VsqlValue> = a
                .iter()
                .filter(|item| !contains_value(b, item))
                .cloned()
                .collect();
            out.extend(b.iter().filter(|item| !contains_value(a, item)).cloned());
            Ok(Set(out))
        }
        _ => match (left.as_int(), right.as_int()) {
            (Some(a), Some(b)) => Ok(Int(a ^ b)),
            _ => Err(unsupported("^", left, right)),
        },
    }
}

pub fn shift_left(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    let (a, b) = int_operands("<<", left, right)?;
    if b < 0 {
        return Err(VsqlError::range("negative shift count"));
    }
    if b >= 64 {
        return if a == 0 {
            Ok(Int(0))
        } else {
            Err(shift_overflow())
        };
    }
    let shifted = a.wrapping_shl(b as u32);
    // The arithmetic right shift recovers the operand only when no
    // significant bits were lost
    if (shifted >> b) == a {
        Ok(Int(shifted))
    } else {
        Err(shift_overflow())
    }
}

pub fn shift_right(left: &VsqlValue, right: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if left.is_null() || right.is_null() {
        return Ok(Null);
    }
    let (a, b) = int_operands(">>", left, right)?;
    if b < 0 {
        return Err(VsqlError::range("negative shift count"));
    }
    // Arithmetic shift: sign-extends, so large counts saturate to 0 or -1
    if b >= 63 {
        return Ok(Int(if a < 0 { -1 } else { 0 }));
    }
    Ok(Int(a >> b))
}

pub fn bit_not(value: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    match value {
        Null => Ok(Null),
        other => match other.as_int() {
            Some(n) => Ok(Int(!n)),
            None => Err(VsqlError::type_error(format!(
                "bad operand type for unary ~: {}",
                other.type_name()
            ))),
        },
    }
}

fn int_operands(op: &str, left: &VsqlValue, right: &VsqlValue) -> Result<(i64, i64)> {
    match (left.as_int(), right.as_int()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(unsupported(op, left, right)),
    }
}

fn shift_overflow() -> VsqlError {
    VsqlError::range("integer overflow in <<")
}

fn unsupported(op: &str, left: &VsqlValue, right: &VsqlValue) -> VsqlError {
    VsqlError::type_error(format!(
        "unsupported operand types for {}: {} and {}",
        op,
        left.type_name(),
        right.type_name()
    ))
}
