//! Record filtering and ordering
//!
//! A filter is a single expression evaluated per record; records whose
//! result is truthy are kept. An ordering is a list of [`DataOrder`] keys
//! applied in sequence: keys are evaluated once per record up front, then
//! records are sorted stably, so equal keys preserve the incoming order.
//! Null keys are placed first or last per key, independent of the key's
//! direction.

use crate::engine::VsqlEngine;
use crate::env::{Environment, Record};
use crate::operators::comparison::compare_values;
use crate::value::VsqlValue;
use std::cmp::Ordering;
use std::sync::Arc;
use vsql_ast::{Expr, Spanned};
use vsql_diagnostics::{Result, VsqlError};

/// Sort direction of one ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Where Null keys go, regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nulls {
    First,
    Last,
}

/// One ordering key: an expression plus direction and Null placement.
#[derive(Debug, Clone)]
pub struct DataOrder {
    pub expr: Spanned<Expr>,
    pub direction: Direction,
    pub nulls: Nulls,
}

impl DataOrder {
    pub fn new(expr: Spanned<Expr>, direction: Direction, nulls: Nulls) -> Self {
        Self {
            expr,
            direction,
            nulls,
        }
    }

    /// Ascending with Nulls first, the default order.
    pub fn asc(expr: Spanned<Expr>) -> Self {
        Self::new(expr, Direction::Asc, Nulls::First)
    }

    /// Descending with Nulls last.
    pub fn desc(expr: Spanned<Expr>) -> Self {
        Self::new(expr, Direction::Desc, Nulls::Last)
    }

    pub fn with_nulls(mut self, nulls: Nulls) -> Self {
        self.nulls = nulls;
        self
    }
}

impl VsqlEngine {
    /// Keep the records whose filter expression evaluates truthy.
    ///
    /// The record under test is installed as the environment's `record`
    /// root; everything else in `base` stays visible.
    pub fn filter_records(
        &self,
        expr: &Spanned<Expr>,
        records: &[Arc<Record>],
        base: &Environment,
    ) -> Result<Vec<Arc<Record>>> {
        let mut kept = Vec::new();
        for record in records {
            let env = base.clone().with_record(Arc::clone(record));
            if self.evaluate(expr, &env)?.is_truthy() {
                kept.push(Arc::clone(record));
            }
        }
        log::trace!("filter kept {} of {} records", kept.len(), records.len());
        Ok(kept)
    }

    /// Stable multi-key sort.
    ///
    /// Keys are evaluated once per record before sorting; the first
    /// evaluation or comparison error aborts the sort.
    pub fn sort_records(
        &self,
        orders: &[DataOrder],
        records: &[Arc<Record>],
        base: &Environment,
    ) -> Result<Vec<Arc<Record>>> {
        let mut keyed = Vec::with_capacity(records.len());
        for record in records {
            let env = base.clone().with_record(Arc::clone(record));
            let keys = orders
                .iter()
                .map(|order| self.evaluate(&order.expr, &env))
                .collect::<Result<Vec<_>>>()?;
            keyed.push((keys, Arc::clone(record)));
        }

        // sort_by cannot fail, so the comparator parks the first error and
        // degrades to Equal until the sort finishes
        let mut error: Option<VsqlError> = None;
        keyed.sort_by(|(a, _), (b, _)| {
            if error.is_some() {
                return Ordering::Equal;
            }
            for (order, (x, y)) in orders.iter().zip(a.iter().zip(b.iter())) {
                match compare_keys(x, y, order) {
                    Ok(Ordering::Equal) => continue,
                    Ok(ord) => return ord,
                    Err(e) => {
                        error = Some(e);
                        return Ordering::Equal;
                    }
                }
            }
            Ordering::Equal
        });
        if let Some(error) = error {
            return Err(error);
        }
        log::trace!("sorted {} records by {} keys", keyed.len(), orders.len());
        Ok(keyed.into_iter().map(|(_, record)| record).collect())
    }
}

fn compare_keys(a: &VsqlValue, b: &VsqlValue, order: &DataOrder) -> Result<Ordering> {
    // Null placement is decided before (and unaffected by) the direction
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ok(Ordering::Equal),
        (true, false) => {
            return Ok(match order.nulls {
                Nulls::First => Ordering::Less,
                Nulls::Last => Ordering::Greater,
            });
        }
        (false, true) => {
            return Ok(match order.nulls {
                Nulls::First => Ordering::Greater,
                Nulls::Last => Ordering::Less,
            });
        }
        (false, false) => {}
    }
    let ord = compare_values(a, b)?;
    Ok(match order.direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    })
}
