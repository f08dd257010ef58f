//! Value attributes and methods
//!
//! Attributes are field-like reads without parentheses (`d.year`,
//! `c.r`, `delta.total_seconds`); methods take an argument list
//! (`s.split(',')`, `c.lum()`). The engine short-circuits a Null receiver
//! to Null before dispatching here, so every receiver is concrete.

use crate::funcs::{check_arity, sequence_items};
use crate::operators::container::resolve_bounds;
use crate::temporal::SECONDS_PER_DAY;
use crate::value::VsqlValue;
use vsql_diagnostics::{Result, VsqlError};

pub(crate) fn attr(value: &VsqlValue, name: &str) -> Result<VsqlValue> {
    use VsqlValue::*;
    let found = match value {
        Date(d) => match name {
            "year" => Some(Int(d.year())),
            "month" => Some(Int(d.month())),
            "day" => Some(Int(d.day())),
            "weekday" => Some(Int(d.weekday())),
            "yearday" => Some(Int(d.yearday())),
            _ => None,
        },
        DateTime(dt) => match name {
            "year" => Some(Int(dt.year())),
            "month" => Some(Int(dt.month())),
            "day" => Some(Int(dt.day())),
            "hour" => Some(Int(dt.hour())),
            "minute" => Some(Int(dt.minute())),
            "second" => Some(Int(dt.second())),
            "weekday" => Some(Int(dt.weekday())),
            "yearday" => Some(Int(dt.yearday())),
            "date" => Some(Date(dt.date())),
            _ => None,
        },
        DateDelta(delta) => match name {
            "days" => Some(Int(delta.days())),
            _ => None,
        },
        DateTimeDelta(delta) => match name {
            "days" => Some(Int(delta.days())),
            "seconds" => Some(Int(delta.seconds())),
            "total_seconds" => Some(Int(delta.total_seconds())),
            "total_days" => Some(Number(delta.total_seconds() as f64 / SECONDS_PER_DAY as f64)),
            "total_hours" => Some(Number(delta.total_seconds() as f64 / 3600.0)),
            "total_minutes" => Some(Number(delta.total_seconds() as f64 / 60.0)),
            _ => None,
        },
        MonthDelta(delta) => match name {
            "months" => Some(Int(delta.months())),
            _ => None,
        },
        Color(color) => match name {
            "r" => Some(Int(i64::from(color.r))),
            "g" => Some(Int(i64::from(color.g))),
            "b" => Some(Int(i64::from(color.b))),
            "a" => Some(Int(i64::from(color.a))),
            _ => None,
        },
        Geo(geo) => match name {
            "lat" => Some(Number(geo.lat)),
            "long" => Some(Number(geo.long)),
            "info" => Some(match &geo.info {
                Some(info) => Str(info.clone()),
                None => Null,
            }),
            _ => None,
        },
        _ => None,
    };
    found.ok_or_else(|| no_attribute(value, name))
}

pub(crate) fn call(value: &VsqlValue, name: &str, args: &[VsqlValue]) -> Result<VsqlValue> {
    match value {
        VsqlValue::Str(s) => str_method(s, name, args),
        VsqlValue::Color(color) => match name {
            "lum" => {
                check_arity("lum", args, 0, 0)?;
                Ok(VsqlValue::Number(color.lum()))
            }
            _ => Err(no_method(value, name)),
        },
        VsqlValue::Date(d) => match name {
            "week" => {
                check_arity("week", args, 0, 0)?;
                Ok(VsqlValue::Int(d.week()))
            }
            _ => Err(no_method(value, name)),
        },
        VsqlValue::DateTime(dt) => match name {
            "week" => {
                check_arity("week", args, 0, 0)?;
                Ok(VsqlValue::Int(dt.week()))
            }
            _ => Err(no_method(value, name)),
        },
        other => Err(no_method(other, name)),
    }
}

fn no_attribute(value: &VsqlValue, name: &str) -> VsqlError {
    VsqlError::name(format!(
        "{} has no attribute {name:?}",
        value.type_name()
    ))
}

fn no_method(value: &VsqlValue, name: &str) -> VsqlError {
    VsqlError::name(format!("{} has no method {name:?}", value.type_name()))
}

// ============================================================================
// String methods
// ============================================================================

fn str_method(s: &str, name: &str, args: &[VsqlValue]) -> Result<VsqlValue> {
    use VsqlValue::*;
    match name {
        "lower" => {
            check_arity("lower", args, 0, 0)?;
            Ok(Str(s.to_lowercase()))
        }
        "upper" => {
            check_arity("upper", args, 0, 0)?;
            Ok(Str(s.to_uppercase()))
        }
        "startswith" => {
            check_arity("startswith", args, 1, 1)?;
            match &args[0] {
                Null => Ok(Null),
                Str(prefix) => Ok(Bool(s.starts_with(prefix.as_str()))),
                other => Err(str_argument("startswith", other)),
            }
        }
        "endswith" => {
            check_arity("endswith", args, 1, 1)?;
            match &args[0] {
                Null => Ok(Null),
                Str(suffix) => Ok(Bool(s.ends_with(suffix.as_str()))),
                other => Err(str_argument("endswith", other)),
            }
        }
        "strip" => {
            let stripped = match strip_set("strip", args)? {
                None => s.trim(),
                Some(set) => s.trim_matches(|c| set.contains(&c)),
            };
            Ok(Str(stripped.to_string()))
        }
        "lstrip" => {
            let stripped = match strip_set("lstrip", args)? {
                None => s.trim_start(),
                Some(set) => s.trim_start_matches(|c| set.contains(&c)),
            };
            Ok(Str(stripped.to_string()))
        }
        "rstrip" => {
            let stripped = match strip_set("rstrip", args)? {
                None => s.trim_end(),
                Some(set) => s.trim_end_matches(|c| set.contains(&c)),
            };
            Ok(Str(stripped.to_string()))
        }
        "find" => str_find(s, args),
        "replace" => {
            check_arity("replace", args, 2, 2)?;
            match (&args[0], &args[1]) {
                (Null, _) | (_, Null) => Ok(Null),
                (Str(old), Str(new)) => Ok(Str(s.replace(old.as_str(), new))),
                (old, new) => Err(VsqlError::type_error(format!(
                    "replace() requires two strs, got {} and {}",
                    old.type_name(),
                    new.type_name()
                ))),
            }
        }
        "split" => str_split(s, args),
        "join" => str_join(s, args),
        _ => Err(VsqlError::name(format!("str has no method {name:?}"))),
    }
}

fn str_argument(name: &str, got: &VsqlValue) -> VsqlError {
    VsqlError::type_error(format!(
        "{}() requires a str, got {}",
        name,
        got.type_name()
    ))
}

// The chars argument of strip/lstrip/rstrip: None or Null means whitespace.
fn strip_set(name: &str, args: &[VsqlValue]) -> Result<Option<Vec<char>>> {
    check_arity(name, args, 0, 1)?;
    match args.first() {
        None | Some(VsqlValue::Null) => Ok(None),
        Some(VsqlValue::Str(chars)) => Ok(Some(chars.chars().collect())),
        Some(other) => Err(str_argument(name, other)),
    }
}

/// `s.find(sub, start?, end?)`: char index of the first occurrence inside
/// the (clamped, Python-style) bounds, -1 when absent.
fn str_find(s: &str, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("find", args, 1, 3)?;
    let needle = match &args[0] {
        VsqlValue::Null => return Ok(VsqlValue::Null),
        VsqlValue::Str(sub) => sub,
        other => return Err(str_argument("find", other)),
    };
    let start = find_bound(args.get(1))?;
    let stop = find_bound(args.get(2))?;
    let chars: Vec<char> = s.chars().collect();
    let (lo, hi) = resolve_bounds(chars.len(), start, stop);
    let haystack: String = chars[lo..hi].iter().collect();
    match haystack.find(needle.as_str()) {
        Some(byte_pos) => {
            let char_pos = haystack[..byte_pos].chars().count();
            Ok(VsqlValue::Int((lo + char_pos) as i64))
        }
        None => Ok(VsqlValue::Int(-1)),
    }
}

fn find_bound(arg: Option<&VsqlValue>) -> Result<Option<i64>> {
    match arg {
        None | Some(VsqlValue::Null) => Ok(None),
        Some(value) => value.as_int().map(Some).ok_or_else(|| {
            VsqlError::type_error(format!(
                "find() bounds must be int, not {}",
                value.type_name()
            ))
        }),
    }
}

fn str_split(s: &str, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("split", args, 0, 2)?;
    let maxsplit = match args.get(1) {
        None | Some(VsqlValue::Null) => None,
        Some(value) => {
            let n = value.as_int().ok_or_else(|| {
                VsqlError::type_error(format!(
                    "split() maxsplit must be int, not {}",
                    value.type_name()
                ))
            })?;
            // Negative counts mean unlimited
            usize::try_from(n).ok()
        }
    };
    match args.first() {
        None | Some(VsqlValue::Null) => Ok(VsqlValue::List(split_whitespace(s, maxsplit))),
        Some(VsqlValue::Str(sep)) => {
            if sep.is_empty() {
                return Err(VsqlError::type_error("split() separator must not be empty"));
            }
            Ok(VsqlValue::List(split_separator(s, sep, maxsplit)))
        }
        Some(other) => Err(str_argument("split", other)),
    }
}

// Whitespace mode trims the whole string first, then splits on runs; the
// remainder after maxsplit keeps its internal whitespace.
fn split_whitespace(s: &str, maxsplit: Option<usize>) -> Vec<VsqlValue> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let Some(limit) = maxsplit else {
        return trimmed
            .split_whitespace()
            .map(|part| VsqlValue::Str(part.to_string()))
            .collect();
    };
    let mut parts = Vec::new();
    let mut rest = trimmed;
    while parts.len() < limit {
        match rest.find(char::is_whitespace) {
            Some(pos) => {
                parts.push(VsqlValue::Str(rest[..pos].to_string()));
                rest = rest[pos..].trim_start();
            }
            None => break,
        }
    }
    parts.push(VsqlValue::Str(rest.to_string()));
    parts
}

// Separator mode keeps every segment; empty segments become Null.
fn split_separator(s: &str, sep: &str, maxsplit: Option<usize>) -> Vec<VsqlValue> {
    let mut segments: Vec<&str> = Vec::new();
    let mut rest = s;
    loop {
        if maxsplit.is_some_and(|limit| segments.len() >= limit) {
            break;
        }
        match rest.find(sep) {
            Some(pos) => {
                segments.push(&rest[..pos]);
                rest = &rest[pos + sep.len()..];
            }
            None => break,
        }
    }
    segments.push(rest);
    segments
        .into_iter()
        .map(|segment| {
            if segment.is_empty() {
                VsqlValue::Null
            } else {
                VsqlValue::Str(segment.to_string())
            }
        })
        .collect()
}

/// `sep.join(iterable)`: Null elements are skipped, everything else must be
/// a str.
fn str_join(sep: &str, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("join", args, 1, 1)?;
    if args[0].is_null() {
        return Ok(VsqlValue::Null);
    }
    let items = sequence_items("join", &args[0])?;
    let mut parts: Vec<&str> = Vec::with_capacity(items.len());
    for item in &items {
        match item {
            VsqlValue::Null => continue,
            VsqlValue::Str(s) => parts.push(s),
            other => {
                return Err(VsqlError::type_error(format!(
                    "join() requires str elements, got {}",
                    other.type_name()
                )));
            }
        }
    }
    Ok(VsqlValue::Str(parts.join(sep)))
}
