//! Canonical textual forms
//!
//! Every value has two renderings: [`repr_value`] is the unambiguous,
//! source-like form (strings quoted, dates as `@(...)` literals), and
//! [`display_value`] is the human form the `str()` builtin produces.
//! Container elements always render in repr form, so the two only differ
//! at the top level.

use crate::color::Color;
use crate::geo::Geo;
use crate::temporal::{DateDelta, DateTimeDelta, MonthDelta};
use crate::value::VsqlValue;
use std::fmt;

/// Source-like form: `repr('x')` is `'x'`, `repr(@(2000-02-29))` is
/// `@(2000-02-29)`.
pub fn repr_value(value: &VsqlValue) -> String {
    match value {
        VsqlValue::Str(s) => quote_str(s),
        VsqlValue::Date(d) => format!("@({})", d.naive().format("%Y-%m-%d")),
        VsqlValue::DateTime(dt) => format!("@({})", dt.naive().format("%Y-%m-%dT%H:%M:%S")),
        VsqlValue::DateDelta(delta) => repr_seconds_delta(delta.days(), 0),
        VsqlValue::DateTimeDelta(delta) => repr_seconds_delta(delta.days(), delta.seconds()),
        VsqlValue::MonthDelta(delta) => format!("monthdelta({})", delta.months()),
        VsqlValue::Color(color) => color_repr(color),
        other => display_value(other),
    }
}

/// Human form: strings unquoted, everything else as `str()` renders it.
pub fn display_value(value: &VsqlValue) -> String {
    match value {
        VsqlValue::Null => "None".to_string(),
        VsqlValue::Bool(true) => "True".to_string(),
        VsqlValue::Bool(false) => "False".to_string(),
        VsqlValue::Int(n) => n.to_string(),
        VsqlValue::Number(n) => format_number(*n),
        VsqlValue::Str(s) => s.clone(),
        VsqlValue::Date(d) => d.naive().format("%Y-%m-%d").to_string(),
        VsqlValue::DateTime(dt) => dt.naive().format("%Y-%m-%d %H:%M:%S").to_string(),
        VsqlValue::DateDelta(delta) => display_date_delta(delta),
        VsqlValue::DateTimeDelta(delta) => display_datetime_delta(delta),
        VsqlValue::MonthDelta(delta) => display_month_delta(delta),
        VsqlValue::Color(color) => display_color(color),
        VsqlValue::Geo(geo) => display_geo(geo),
        VsqlValue::List(items) => {
            format!("[{}]", join_repr(items))
        }
        VsqlValue::Set(items) => {
            if items.is_empty() {
                "{}".to_string()
            } else {
                format!("{{{}}}", join_repr(items))
            }
        }
    }
}

impl fmt::Display for VsqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_value(self))
    }
}

/// Number rendering: whole values keep one decimal place (`42.0`), others
/// use the shortest round-trip form. Magnitudes of 1e16 and up switch to
/// exponent notation so the output stays within the number grammar instead
/// of re-parsing as an (overflowing) Int.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n.abs() >= 1e16 {
        format!("{n:e}")
    } else if n == n.trunc() {
        format!("{n:.1}")
    } else {
        format!("{n}")
    }
}

/// Single-quoted string with the usual escapes. Double quotes pass through
/// unescaped.
pub(crate) fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn join_repr(items: &[VsqlValue]) -> String {
    items
        .iter()
        .map(repr_value)
        .collect::<Vec<_>>()
        .join(", ")
}

// Both day-based and second-based deltas share the timedelta() repr; the
// seconds argument is omitted when zero.
fn repr_seconds_delta(days: i64, seconds: i64) -> String {
    if seconds == 0 {
        format!("timedelta({days})")
    } else {
        format!("timedelta({days}, {seconds})")
    }
}

fn day_suffix(n: i64) -> &'static str {
    if n == 1 || n == -1 { "" } else { "s" }
}

fn display_date_delta(delta: &DateDelta) -> String {
    let days = delta.days();
    format!("{} day{}", days, day_suffix(days))
}

fn display_datetime_delta(delta: &DateTimeDelta) -> String {
    let days = delta.days();
    let seconds = delta.seconds();
    let clock = format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    );
    if days == 0 {
        clock
    } else {
        format!("{} day{}, {}", days, day_suffix(days), clock)
    }
}

fn display_month_delta(delta: &MonthDelta) -> String {
    let months = delta.months();
    format!("{} month{}", months, day_suffix(months))
}

// `#rgb`/`#rgba` when every channel collapses to one hex digit, the long
// form otherwise; the alpha digits disappear when fully opaque.
fn color_repr(color: &Color) -> String {
    let collapses = |v: u8| v % 17 == 0;
    let rgb_collapses = collapses(color.r) && collapses(color.g) && collapses(color.b);
    if color.a == 255 {
        if rgb_collapses {
            format!("#{:x}{:x}{:x}", color.r / 17, color.g / 17, color.b / 17)
        } else {
            format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
        }
    } else if rgb_collapses && collapses(color.a) {
        format!(
            "#{:x}{:x}{:x}{:x}",
            color.r / 17,
            color.g / 17,
            color.b / 17,
            color.a / 17
        )
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color.r, color.g, color.b, color.a
        )
    }
}

fn display_color(color: &Color) -> String {
    if color.a == 255 {
        color_repr(color)
    } else {
        format!(
            "rgba({}, {}, {}, {:.3})",
            color.r,
            color.g,
            color.b,
            f64::from(color.a) / 255.0
        )
    }
}

fn display_geo(geo: &Geo) -> String {
    let info = match &geo.info {
        Some(info) => quote_str(info),
        None => "None".to_string(),
    };
    format!(
        "<geo lat={} long={} info={}>",
        format_number(geo.lat),
        format_number(geo.long),
        info
    )
}
