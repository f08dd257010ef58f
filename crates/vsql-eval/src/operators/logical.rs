//! Boolean logic
//!
//! `and` and `or` short-circuit and return one of their operands unchanged,
//! so they live in the engine where lazy evaluation is possible. Only `not`
//! operates on an already-evaluated value.

use crate::value::VsqlValue;

/// Unary `not`: truthiness test, always a Bool (`not None` is True)
pub fn logical_not(value: &VsqlValue) -> VsqlValue {
    VsqlValue::Bool(!value.is_truthy())
}
