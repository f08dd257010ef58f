//! Evaluation engine for vSQL expressions
//!
//! Takes the expression trees produced by `vsql-parser` and evaluates them
//! against an environment of application data. The engine is a plain tree
//! walker; there is no compilation step.
//!
//! # Features
//!
//! - Full value model: Null, Bool, Int, Number, Str, Date, DateTime, the
//!   three delta types, Color, Geo, List and Set
//! - Null propagation through operators, attributes and most functions
//! - Numeric promotion along Bool < Int < Number, with integer overflow
//!   reported as a RangeError instead of wrapping
//! - The calendar arithmetic of `+`/`-` on dates and deltas, including
//!   month arithmetic with day clamping
//! - Environment roots `app`, `record` (alias `r`), `user` and `params`,
//!   resolved as entities so that half-finished attribute chains are
//!   errors while chains through absent data yield Null
//! - Builtin functions (`len`, `sorted`, `md5`, `rgb`, `dist`, ...) and
//!   value methods (`s.split()`, `c.lum()`, `d.week()`, ...)
//! - Canonical `repr()`/`str()` renderings for every value
//! - Record filtering and stable multi-key ordering with explicit Null
//!   placement
//!
//! # Architecture
//!
//! [`engine`] walks the tree and resolves environment names; the operator
//! modules under [`operators`] are free functions over already-evaluated
//! values; `funcs` and `methods` hold the builtin registry and the value
//! methods; [`fmt`] renders values; [`order`] applies filters and sort
//! keys to record sets.

pub mod color;
pub mod engine;
pub mod env;
pub mod fmt;
pub mod geo;
pub mod operators;
pub mod order;
pub mod temporal;
pub mod value;

mod funcs;
mod methods;

pub use color::Color;
pub use engine::VsqlEngine;
pub use env::{App, EnvValue, Environment, Record, RequestParams, User};
pub use fmt::{display_value, repr_value};
pub use geo::Geo;
pub use order::{DataOrder, Direction, Nulls};
pub use temporal::{Date, DateDelta, DateTime, DateTimeDelta, MonthDelta};
pub use value::VsqlValue;

pub use vsql_diagnostics::{Result, VsqlError};
