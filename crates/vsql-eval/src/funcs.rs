//! Builtin functions
//!
//! Free functions available in every expression. Dispatch is by name via a
//! static table; unknown names are a NameError. Unless noted otherwise a
//! Null argument makes the call return Null without further checks (the
//! exceptions are `bool()` and `repr()`, which are total).

use crate::color::Color;
use crate::engine::VsqlEngine;
use crate::fmt;
use crate::geo::Geo;
use crate::operators::comparison::compare_values;
use crate::operators::container::dedup_set;
use crate::temporal::{Date, DateDelta, DateTime, DateTimeDelta, MonthDelta};
use crate::value::VsqlValue;
use chrono::Timelike;
use md5::{Digest, Md5};
use once_cell::sync::Lazy;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashMap;
use vsql_diagnostics::{Result, VsqlError};

type BuiltinFn = fn(&VsqlEngine, &[VsqlValue]) -> Result<VsqlValue>;

static BUILTINS: Lazy<HashMap<&'static str, BuiltinFn>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, BuiltinFn> = HashMap::new();
    map.insert("today", today_fn);
    map.insert("now", now_fn);
    map.insert("bool", bool_fn);
    map.insert("int", int_fn);
    map.insert("float", float_fn);
    map.insert("number", number_fn);
    map.insert("str", str_fn);
    map.insert("repr", repr_fn);
    map.insert("date", date_fn);
    map.insert("datetime", datetime_fn);
    map.insert("len", len_fn);
    map.insert("timedelta", timedelta_fn);
    map.insert("monthdelta", monthdelta_fn);
    map.insert("months", months_fn);
    map.insert("years", years_fn);
    map.insert("weeks", weeks_fn);
    map.insert("days", days_fn);
    map.insert("hours", hours_fn);
    map.insert("minutes", minutes_fn);
    map.insert("seconds", seconds_fn);
    map.insert("md5", md5_fn);
    map.insert("random", random_fn);
    map.insert("randrange", randrange_fn);
    map.insert("seq", seq_fn);
    map.insert("rgb", rgb_fn);
    map.insert("list", list_fn);
    map.insert("set", set_fn);
    map.insert("geo", geo_fn);
    map.insert("dist", dist_fn);
    map.insert("abs", abs_fn);
    map.insert("cos", cos_fn);
    map.insert("sin", sin_fn);
    map.insert("tan", tan_fn);
    map.insert("sqrt", sqrt_fn);
    map.insert("sorted", sorted_fn);
    map.insert("isfirst", isfirst_fn);
    map
});

pub(crate) fn call(engine: &VsqlEngine, name: &str, args: &[VsqlValue]) -> Result<VsqlValue> {
    match BUILTINS.get(name) {
        Some(func) => func(engine, args),
        None => Err(VsqlError::name(format!("unknown function {name:?}"))),
    }
}

pub(crate) fn check_arity(name: &str, args: &[VsqlValue], min: usize, max: usize) -> Result<()> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else if min == max {
        Err(VsqlError::type_error(format!(
            "{}() takes {} arguments, got {}",
            name,
            min,
            args.len()
        )))
    } else {
        Err(VsqlError::type_error(format!(
            "{}() takes {} to {} arguments, got {}",
            name,
            min,
            max,
            args.len()
        )))
    }
}

fn any_null(args: &[VsqlValue]) -> bool {
    args.iter().any(VsqlValue::is_null)
}

fn int_arg(name: &str, value: &VsqlValue) -> Result<i64> {
    value.as_int().ok_or_else(|| {
        VsqlError::type_error(format!(
            "{}() requires an int, got {}",
            name,
            value.type_name()
        ))
    })
}

fn number_arg(name: &str, value: &VsqlValue) -> Result<f64> {
    value.as_number().ok_or_else(|| {
        VsqlError::type_error(format!(
            "{}() requires a number, got {}",
            name,
            value.type_name()
        ))
    })
}

/// The elements of a str (as 1-char strings), list or set.
pub(crate) fn sequence_items(name: &str, value: &VsqlValue) -> Result<Vec<VsqlValue>> {
    match value {
        VsqlValue::Str(s) => Ok(s.chars().map(|c| VsqlValue::Str(c.to_string())).collect()),
        VsqlValue::List(items) | VsqlValue::Set(items) => Ok(items.clone()),
        other => Err(VsqlError::type_error(format!(
            "{}() requires a str, list or set, got {}",
            name,
            other.type_name()
        ))),
    }
}

// ============================================================================
// Date and time
// ============================================================================

fn today_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("today", args, 0, 0)?;
    Ok(VsqlValue::Date(Date::new(chrono::Local::now().date_naive())))
}

fn now_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("now", args, 0, 0)?;
    let now = chrono::Local::now().naive_local();
    // Second granularity, like datetime literals
    let now = now.with_nanosecond(0).unwrap_or(now);
    Ok(VsqlValue::DateTime(DateTime::new(now)))
}

fn date_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("date", args, 1, 3)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    match args.len() {
        1 => match &args[0] {
            VsqlValue::Date(d) => Ok(VsqlValue::Date(*d)),
            VsqlValue::DateTime(dt) => Ok(VsqlValue::Date(dt.date())),
            other => Err(VsqlError::type_error(format!(
                "date() cannot convert {}",
                other.type_name()
            ))),
        },
        3 => {
            let year = calendar_year(int_arg("date", &args[0])?)?;
            let month = calendar_part(int_arg("date", &args[1])?)?;
            let day = calendar_part(int_arg("date", &args[2])?)?;
            Date::from_ymd(year, month, day)
                .map(VsqlValue::Date)
                .ok_or_else(|| VsqlError::range("invalid date"))
        }
        _ => Err(VsqlError::type_error(format!(
            "date() takes 1 or 3 arguments, got {}",
            args.len()
        ))),
    }
}

fn datetime_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("datetime", args, 1, 6)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    match &args[0] {
        VsqlValue::DateTime(dt) => {
            check_arity("datetime", args, 1, 1)?;
            Ok(VsqlValue::DateTime(*dt))
        }
        VsqlValue::Date(d) => {
            check_arity("datetime", args, 1, 4)?;
            let (hour, minute, second) = clock_args("datetime", &args[1..])?;
            let year = calendar_year(d.year())?;
            let month = calendar_part(d.month())?;
            let day = calendar_part(d.day())?;
            DateTime::from_parts(year, month, day, hour, minute, second)
                .map(VsqlValue::DateTime)
                .ok_or_else(|| VsqlError::range("invalid datetime"))
        }
        _ => {
            if args.len() < 3 {
                return Err(VsqlError::type_error(format!(
                    "datetime() takes a date or at least 3 arguments, got {}",
                    args.len()
                )));
            }
            let year = calendar_year(int_arg("datetime", &args[0])?)?;
            let month = calendar_part(int_arg("datetime", &args[1])?)?;
            let day = calendar_part(int_arg("datetime", &args[2])?)?;
            let (hour, minute, second) = clock_args("datetime", &args[3..])?;
            DateTime::from_parts(year, month, day, hour, minute, second)
                .map(VsqlValue::DateTime)
                .ok_or_else(|| VsqlError::range("invalid datetime"))
        }
    }
}

fn calendar_year(value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| VsqlError::range("invalid date"))
}

fn calendar_part(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| VsqlError::range("invalid date"))
}

fn clock_args(name: &str, args: &[VsqlValue]) -> Result<(u32, u32, u32)> {
    let mut parts = [0u32; 3];
    for (slot, arg) in parts.iter_mut().zip(args.iter()) {
        *slot = calendar_part(int_arg(name, arg)?)?;
    }
    Ok((parts[0], parts[1], parts[2]))
}

// ============================================================================
// Delta constructors
// ============================================================================

fn timedelta_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("timedelta", args, 0, 2)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    let days = args.first().map(|v| int_arg("timedelta", v)).transpose()?;
    let seconds = args.get(1).map(|v| int_arg("timedelta", v)).transpose()?;
    DateTimeDelta::new(days.unwrap_or(0), seconds.unwrap_or(0))
        .map(VsqlValue::DateTimeDelta)
        .ok_or_else(|| VsqlError::range("timedelta out of range"))
}

fn month_delta(name: &str, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity(name, args, 0, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    let months = args.first().map(|v| int_arg(name, v)).transpose()?;
    Ok(VsqlValue::MonthDelta(MonthDelta::new(months.unwrap_or(0))))
}

fn monthdelta_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    month_delta("monthdelta", args)
}

fn months_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    month_delta("months", args)
}

fn years_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("years", args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    int_arg("years", &args[0])?
        .checked_mul(12)
        .map(|months| VsqlValue::MonthDelta(MonthDelta::new(months)))
        .ok_or_else(|| VsqlError::range("monthdelta out of range"))
}

fn weeks_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("weeks", args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    int_arg("weeks", &args[0])?
        .checked_mul(7)
        .map(|days| VsqlValue::DateDelta(DateDelta::new(days)))
        .ok_or_else(|| VsqlError::range("timedelta out of range"))
}

fn days_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("days", args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    Ok(VsqlValue::DateDelta(DateDelta::new(int_arg(
        "days", &args[0],
    )?)))
}

fn seconds_delta(name: &str, per_unit: i64, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity(name, args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    int_arg(name, &args[0])?
        .checked_mul(per_unit)
        .map(|total| VsqlValue::DateTimeDelta(DateTimeDelta::from_total_seconds(total)))
        .ok_or_else(|| VsqlError::range("timedelta out of range"))
}

fn hours_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    seconds_delta("hours", 3600, args)
}

fn minutes_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    seconds_delta("minutes", 60, args)
}

fn seconds_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    seconds_delta("seconds", 1, args)
}

// ============================================================================
// Conversions
// ============================================================================

fn bool_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("bool", args, 0, 1)?;
    // Total: bool(None) is False, not Null
    Ok(VsqlValue::Bool(
        args.first().is_some_and(VsqlValue::is_truthy),
    ))
}

fn int_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("int", args, 0, 1)?;
    let Some(arg) = args.first() else {
        return Ok(VsqlValue::Null);
    };
    match arg {
        VsqlValue::Null => Ok(VsqlValue::Null),
        VsqlValue::Bool(b) => Ok(VsqlValue::Int(i64::from(*b))),
        VsqlValue::Int(n) => Ok(VsqlValue::Int(*n)),
        VsqlValue::Number(n) => {
            let truncated = n.trunc();
            if !truncated.is_finite()
                || truncated < i64::MIN as f64
                || truncated >= i64::MAX as f64
            {
                return Err(VsqlError::range("int() result out of range"));
            }
            Ok(VsqlValue::Int(truncated as i64))
        }
        // Unparseable text converts to Null, not an error
        VsqlValue::Str(s) => Ok(s
            .trim()
            .parse::<i64>()
            .map(VsqlValue::Int)
            .unwrap_or(VsqlValue::Null)),
        other => Err(VsqlError::type_error(format!(
            "int() cannot convert {}",
            other.type_name()
        ))),
    }
}

fn to_number(name: &str, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity(name, args, 0, 1)?;
    let Some(arg) = args.first() else {
        return Ok(VsqlValue::Null);
    };
    match arg {
        VsqlValue::Null => Ok(VsqlValue::Null),
        VsqlValue::Bool(b) => Ok(VsqlValue::Number(if *b { 1.0 } else { 0.0 })),
        VsqlValue::Int(n) => Ok(VsqlValue::Number(*n as f64)),
        VsqlValue::Number(n) => Ok(VsqlValue::Number(*n)),
        VsqlValue::Str(s) => Ok(s
            .trim()
            .parse::<f64>()
            .map(VsqlValue::Number)
            .unwrap_or(VsqlValue::Null)),
        other => Err(VsqlError::type_error(format!(
            "{}() cannot convert {}",
            name,
            other.type_name()
        ))),
    }
}

fn float_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    to_number("float", args)
}

fn number_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    to_number("number", args)
}

fn str_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("str", args, 0, 1)?;
    match args.first() {
        None | Some(VsqlValue::Null) => Ok(VsqlValue::Null),
        Some(value) => Ok(VsqlValue::Str(fmt::display_value(value))),
    }
}

fn repr_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("repr", args, 1, 1)?;
    // Total: repr(None) is 'None'
    Ok(VsqlValue::Str(fmt::repr_value(&args[0])))
}

fn list_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("list", args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    Ok(VsqlValue::List(sequence_items("list", &args[0])?))
}

fn set_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("set", args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    Ok(VsqlValue::Set(dedup_set(sequence_items("set", &args[0])?)))
}

// ============================================================================
// Math
// ============================================================================

fn len_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("len", args, 1, 1)?;
    match &args[0] {
        VsqlValue::Null => Ok(VsqlValue::Null),
        VsqlValue::Str(s) => Ok(VsqlValue::Int(s.chars().count() as i64)),
        VsqlValue::List(items) | VsqlValue::Set(items) => Ok(VsqlValue::Int(items.len() as i64)),
        other => Err(VsqlError::type_error(format!(
            "len() requires a str, list or set, got {}",
            other.type_name()
        ))),
    }
}

fn abs_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("abs", args, 1, 1)?;
    match &args[0] {
        VsqlValue::Null => Ok(VsqlValue::Null),
        VsqlValue::Bool(b) => Ok(VsqlValue::Int(i64::from(*b))),
        VsqlValue::Int(n) => n
            .checked_abs()
            .map(VsqlValue::Int)
            .ok_or_else(|| VsqlError::range("integer overflow in abs()")),
        VsqlValue::Number(n) => Ok(VsqlValue::Number(n.abs())),
        other => Err(VsqlError::type_error(format!(
            "abs() requires a number, got {}",
            other.type_name()
        ))),
    }
}

fn trig(name: &str, args: &[VsqlValue], apply: fn(f64) -> f64) -> Result<VsqlValue> {
    check_arity(name, args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    Ok(VsqlValue::Number(apply(number_arg(name, &args[0])?)))
}

fn cos_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    trig("cos", args, f64::cos)
}

fn sin_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    trig("sin", args, f64::sin)
}

fn tan_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    trig("tan", args, f64::tan)
}

fn sqrt_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("sqrt", args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    let n = number_arg("sqrt", &args[0])?;
    // The root of a negative number is undefined, not an error
    if n < 0.0 {
        return Ok(VsqlValue::Null);
    }
    Ok(VsqlValue::Number(n.sqrt()))
}

// ============================================================================
// Randomness and counters
// ============================================================================

fn random_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("random", args, 0, 0)?;
    Ok(VsqlValue::Number(rand::rng().random::<f64>()))
}

fn randrange_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("randrange", args, 1, 2)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    let (start, stop) = match args {
        [stop] => (0, int_arg("randrange", stop)?),
        [start, stop] => (int_arg("randrange", start)?, int_arg("randrange", stop)?),
        _ => (0, 0),
    };
    if start >= stop {
        return Err(VsqlError::range("empty range for randrange()"));
    }
    Ok(VsqlValue::Int(rand::rng().random_range(start..stop)))
}

fn seq_fn(engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("seq", args, 0, 0)?;
    Ok(VsqlValue::Int(engine.next_seq()))
}

// ============================================================================
// Hashing
// ============================================================================

fn md5_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("md5", args, 1, 1)?;
    match &args[0] {
        VsqlValue::Null => Ok(VsqlValue::Null),
        VsqlValue::Str(s) => Ok(VsqlValue::Str(hex::encode(Md5::digest(s.as_bytes())))),
        other => Err(VsqlError::type_error(format!(
            "md5() requires a str, got {}",
            other.type_name()
        ))),
    }
}

// ============================================================================
// Colors and geography
// ============================================================================

fn rgb_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("rgb", args, 3, 4)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    let channel = |value: &VsqlValue| -> Result<u8> {
        let v = number_arg("rgb", value)?;
        Ok((v * 255.0).round().clamp(0.0, 255.0) as u8)
    };
    let r = channel(&args[0])?;
    let g = channel(&args[1])?;
    let b = channel(&args[2])?;
    let a = match args.get(3) {
        Some(alpha) => channel(alpha)?,
        None => 255,
    };
    Ok(VsqlValue::Color(Color::new(r, g, b, a)))
}

fn geo_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("geo", args, 2, 3)?;
    if args[0].is_null() || args[1].is_null() {
        return Ok(VsqlValue::Null);
    }
    let lat = number_arg("geo", &args[0])?;
    let long = number_arg("geo", &args[1])?;
    let info = match args.get(2) {
        None | Some(VsqlValue::Null) => None,
        Some(VsqlValue::Str(s)) => Some(s.clone()),
        Some(other) => {
            return Err(VsqlError::type_error(format!(
                "geo() info must be a str, got {}",
                other.type_name()
            )));
        }
    };
    Ok(VsqlValue::Geo(Geo::new(lat, long, info)))
}

fn dist_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("dist", args, 2, 2)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    match (&args[0], &args[1]) {
        (VsqlValue::Geo(a), VsqlValue::Geo(b)) => Ok(VsqlValue::Number(a.dist(b))),
        _ => Err(VsqlError::type_error(format!(
            "dist() requires two geo values, got {} and {}",
            args[0].type_name(),
            args[1].type_name()
        ))),
    }
}

// ============================================================================
// Sequences
// ============================================================================

fn sorted_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    if args.len() == 2 {
        return Err(VsqlError::type_error(
            "sorted() key functions are not supported",
        ));
    }
    check_arity("sorted", args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    let mut items = sequence_items("sorted", &args[0])?;
    let mut error: Option<VsqlError> = None;
    items.sort_by(|a, b| {
        if error.is_some() {
            return Ordering::Equal;
        }
        match compare_values(a, b) {
            Ok(ord) => ord,
            Err(e) => {
                error = Some(e);
                Ordering::Equal
            }
        }
    });
    match error {
        Some(error) => Err(error),
        None => Ok(VsqlValue::List(items)),
    }
}

fn isfirst_fn(_engine: &VsqlEngine, args: &[VsqlValue]) -> Result<VsqlValue> {
    check_arity("isfirst", args, 1, 1)?;
    if any_null(args) {
        return Ok(VsqlValue::Null);
    }
    let items = sequence_items("isfirst", &args[0])?;
    Ok(VsqlValue::List(
        (0..items.len()).map(|i| VsqlValue::Bool(i == 0)).collect(),
    ))
}
