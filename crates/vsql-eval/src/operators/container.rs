//! Membership, indexing and slicing
//!
//! Indices are 0-based with negative wraparound. Out-of-range indexing is a
//! RangeError, except on lists whose elements are all Null (or empty), where
//! the element type is unknown and the result is Null. Slices never fail:
//! bounds clamp to the sequence the way they do in Python.

use super::comparison::contains_value;
use crate::value::VsqlValue;
use vsql_diagnostics::{Result, VsqlError};

/// Deduplicate set elements under promoted equality, keeping the first
/// occurrence of each.
pub fn dedup_set(items: Vec<VsqlValue>) -> Vec<VsqlValue> {
    let mut out: Vec<VsqlValue> = Vec::with_capacity(items.len());
    for item in items {
        if !contains_value(&out, &item) {
            out.push(item);
        }
    }
    out
}

/// The `in` operator: substring test on strings, element test on lists and
/// sets. A Null container (or a Null needle in a string) yields Null; a Null
/// needle is findable in lists and sets.
pub fn contains(needle: &VsqlValue, container: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    match container {
        Null => Ok(Null),
        Str(s) => match needle {
            Null => Ok(Null),
            Str(sub) => Ok(Bool(s.contains(sub.as_str()))),
            other => Err(VsqlError::type_error(format!(
                "'in <str>' requires a str, got {}",
                other.type_name()
            ))),
        },
        List(items) | Set(items) => Ok(Bool(contains_value(items, needle))),
        other => Err(VsqlError::type_error(format!(
            "'in' requires a str, list or set, got {}",
            other.type_name()
        ))),
    }
}

/// Subscripting: `x[i]`
pub fn index(object: &VsqlValue, index: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if object.is_null() || index.is_null() {
        return Ok(Null);
    }
    let i = index.as_int().ok_or_else(|| {
        VsqlError::type_error(format!("indices must be int, not {}", index.type_name()))
    })?;
    match object {
        Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let pos = normalize_index(i, chars.len())
                .ok_or_else(|| VsqlError::range("string index out of range"))?;
            Ok(Str(chars[pos].to_string()))
        }
        List(items) => match normalize_index(i, items.len()) {
            Some(pos) => Ok(items[pos].clone()),
            // The element type of an empty or all-Null list is unknown, so
            // an out-of-range access stays Null instead of failing
            None if items.iter().all(VsqlValue::is_null) => Ok(Null),
            None => Err(VsqlError::range("list index out of range")),
        },
        other => Err(VsqlError::type_error(format!(
            "{} is not indexable",
            other.type_name()
        ))),
    }
}

/// Subscripting with a range: `x[start:stop]`
pub fn slice(object: &VsqlValue, start: &VsqlValue, stop: &VsqlValue) -> Result<VsqlValue> {
    use VsqlValue::*;
    if object.is_null() {
        return Ok(Null);
    }
    let start = bound(start)?;
    let stop = bound(stop)?;
    match object {
        Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let (lo, hi) = resolve_bounds(chars.len(), start, stop);
            Ok(Str(chars[lo..hi].iter().collect()))
        }
        List(items) => {
            let (lo, hi) = resolve_bounds(items.len(), start, stop);
            Ok(List(items[lo..hi].to_vec()))
        }
        other => Err(VsqlError::type_error(format!(
            "{} is not sliceable",
            other.type_name()
        ))),
    }
}

// A slice bound: Null means open.
fn bound(value: &VsqlValue) -> Result<Option<i64>> {
    if value.is_null() {
        return Ok(None);
    }
    value.as_int().map(Some).ok_or_else(|| {
        VsqlError::type_error(format!(
            "slice bounds must be int, not {}",
            value.type_name()
        ))
    })
}

fn normalize_index(i: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let i = if i < 0 { i + len } else { i };
    (0..len).contains(&i).then_some(i as usize)
}

/// Clamp slice bounds to `0..=len`, resolving negatives from the end. The
/// result is always a valid, possibly empty, subrange.
pub(crate) fn resolve_bounds(len: usize, start: Option<i64>, stop: Option<i64>) -> (usize, usize) {
    let len_i = len as i64;
    let clamp = |i: i64| -> usize {
        let i = if i < 0 { i + len_i } else { i };
        i.clamp(0, len_i) as usize
    };
    let lo = start.map(clamp).unwrap_or(0);
    let hi = stop.map(clamp).unwrap_or(len);
    (lo, hi.max(lo))
}
