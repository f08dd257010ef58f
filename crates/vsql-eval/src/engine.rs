//! Expression evaluation
//!
//! [`VsqlEngine`] walks a parsed expression tree against an
//! [`Environment`]. Evaluation is eager except where the language requires
//! laziness: `and`/`or` short-circuit and return one of their operands
//! unchanged, conditionals evaluate only the taken branch, and a method
//! call on a Null receiver never evaluates its arguments.
//!
//! Environment names (`app`, `record`, `user`, `params` and intermediate
//! attribute steps like `app.p_x`) resolve to entities that are not values:
//! only a final attribute step produces a value, and using an entity as an
//! operand is a TypeError. An entity that is structurally known but absent
//! from the environment resolves attribute chains to Null instead.

use crate::color::Color;
use crate::env::{App, BucketKind, EnvValue, Environment, Record, RequestParams, User};
use crate::funcs;
use crate::methods;
use crate::operators::{arithmetic, bitwise, comparison, container, logical};
use crate::temporal::{Date, DateTime};
use crate::value::VsqlValue;
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicI64, Ordering};
use vsql_ast::{BinaryOp, BinaryOpExpr, Expr, Literal, MethodCallExpr, Spanned, UnaryOp};
use vsql_diagnostics::{Result, VsqlError};

/// Expression evaluation engine
///
/// Cheap to create and safe to share across threads; the only state is the
/// counter behind the `seq()` builtin.
#[derive(Debug, Default)]
pub struct VsqlEngine {
    seq: AtomicI64,
}

impl VsqlEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate an expression against an environment.
    pub fn evaluate(&self, expr: &Spanned<Expr>, env: &Environment) -> Result<VsqlValue> {
        Evaluator { engine: self, env }.eval(expr)
    }

    pub(crate) fn next_seq(&self) -> i64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

/// What a subexpression resolved to: a plain value, or an environment
/// entity that only supports further attribute access.
enum Target<'a> {
    Value(VsqlValue),
    App(&'a App),
    Record(&'a Record),
    User(&'a User),
    Params(&'a RequestParams),
    Bucket(&'a RequestParams, BucketKind),
    Param(&'a EnvValue),
    /// A structurally known entity absent from this environment; attribute
    /// chains through it resolve to Null.
    Missing(MissingKind),
}

#[derive(Clone, Copy)]
enum MissingKind {
    App,
    Record,
    User,
}

impl Target<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Target::Value(_) => "value",
            Target::App(_) | Target::Missing(MissingKind::App) => "app",
            Target::Record(_) | Target::Missing(MissingKind::Record) => "record",
            Target::User(_) | Target::Missing(MissingKind::User) => "user",
            Target::Params(_) => "params",
            Target::Bucket(..) => "parameter bucket",
            Target::Param(_) => "app parameter",
        }
    }
}

struct Evaluator<'a> {
    engine: &'a VsqlEngine,
    env: &'a Environment,
}

impl<'a> Evaluator<'a> {
    /// Evaluate to a value; an entity result is a type error.
    fn eval(&self, expr: &Spanned<Expr>) -> Result<VsqlValue> {
        match self.eval_target(expr)? {
            Target::Value(value) => Ok(value),
            entity => Err(VsqlError::type_error(format!(
                "{} cannot be used as a value",
                entity.describe()
            ))),
        }
    }

    fn eval_target(&self, expr: &Spanned<Expr>) -> Result<Target<'a>> {
        match &expr.inner {
            Expr::Literal(literal) => Ok(Target::Value(self.literal(literal)?)),
            Expr::Ident(name) => self.root(name),
            Expr::List(elements) => {
                let items = elements
                    .iter()
                    .map(|element| self.eval(element))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Target::Value(VsqlValue::List(items)))
            }
            Expr::Set(elements) => {
                let items = elements
                    .iter()
                    .map(|element| self.eval(element))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Target::Value(VsqlValue::Set(container::dedup_set(items))))
            }
            Expr::Attr(attr) => {
                let object = self.eval_target(&attr.object)?;
                self.attr(object, &attr.name)
            }
            Expr::Index(index) => {
                let object = self.eval(&index.object)?;
                let index_value = self.eval(&index.index)?;
                container::index(&object, &index_value).map(Target::Value)
            }
            Expr::Slice(slice) => {
                let object = self.eval(&slice.object)?;
                let start = self.eval_opt(slice.start.as_deref())?;
                let stop = self.eval_opt(slice.stop.as_deref())?;
                container::slice(&object, &start, &stop).map(Target::Value)
            }
            Expr::UnaryOp(unary) => {
                let operand = self.eval(&unary.operand)?;
                match unary.op {
                    UnaryOp::Not => Ok(Target::Value(logical::logical_not(&operand))),
                    UnaryOp::Neg => arithmetic::negate(&operand).map(Target::Value),
                    UnaryOp::BitNot => bitwise::bit_not(&operand).map(Target::Value),
                }
            }
            Expr::BinaryOp(binary) => self.binary(binary).map(Target::Value),
            Expr::If(conditional) => {
                if self.eval(&conditional.condition)?.is_truthy() {
                    self.eval_target(&conditional.then_branch)
                } else {
                    self.eval_target(&conditional.else_branch)
                }
            }
            Expr::Call(call) => {
                let args = call
                    .args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>>>()?;
                funcs::call(self.engine, &call.name, &args).map(Target::Value)
            }
            Expr::MethodCall(call) => self.method_call(call),
        }
    }

    fn eval_opt(&self, expr: Option<&Spanned<Expr>>) -> Result<VsqlValue> {
        match expr {
            Some(expr) => self.eval(expr),
            None => Ok(VsqlValue::Null),
        }
    }

    fn literal(&self, literal: &Literal) -> Result<VsqlValue> {
        Ok(match literal {
            Literal::Null => VsqlValue::Null,
            Literal::Bool(b) => VsqlValue::Bool(*b),
            Literal::Int(n) => VsqlValue::Int(*n),
            Literal::Number(n) => VsqlValue::Number(*n),
            Literal::Str(s) => VsqlValue::Str(s.clone()),
            // The parser always produces valid dates; this guards trees
            // built by hand
            Literal::Date(d) => VsqlValue::Date(
                Date::from_ymd(d.year, d.month, d.day)
                    .ok_or_else(|| VsqlError::range("invalid date literal"))?,
            ),
            Literal::DateTime(dt) => VsqlValue::DateTime(
                DateTime::from_parts(
                    dt.date.year,
                    dt.date.month,
                    dt.date.day,
                    dt.hour,
                    dt.minute,
                    dt.second,
                )
                .ok_or_else(|| VsqlError::range("invalid datetime literal"))?,
            ),
            Literal::Color(c) => VsqlValue::Color(Color::new(c.r, c.g, c.b, c.a)),
        })
    }

    fn root(&self, name: &str) -> Result<Target<'a>> {
        match name {
            "app" => Ok(match &self.env.app {
                Some(app) => Target::App(app),
                None => Target::Missing(MissingKind::App),
            }),
            "record" | "r" => Ok(match &self.env.record {
                Some(record) => Target::Record(record),
                None => Target::Missing(MissingKind::Record),
            }),
            "user" => Ok(match &self.env.user {
                Some(user) => Target::User(user),
                None => Target::Missing(MissingKind::User),
            }),
            "params" => Ok(Target::Params(&self.env.params)),
            _ => Err(VsqlError::name(format!("name {name:?} is not defined"))),
        }
    }

    fn attr(&self, object: Target<'a>, name: &str) -> Result<Target<'a>> {
        match object {
            Target::Value(VsqlValue::Null) => Ok(Target::Value(VsqlValue::Null)),
            Target::Value(value) => methods::attr(&value, name).map(Target::Value),
            Target::App(app) => app_attr(app, name),
            Target::Record(record) => record_attr(record, name),
            Target::User(user) => Ok(Target::Value(user_attr(user, name)?)),
            Target::Params(params) => match BucketKind::from_name(name) {
                Some(kind) => Ok(Target::Bucket(params, kind)),
                None => Err(VsqlError::name(format!("params has no bucket {name:?}"))),
            },
            Target::Bucket(params, kind) => Ok(Target::Value(params.lookup(kind, name))),
            Target::Param(value) => match name {
                "value" => Ok(env_target(value)),
                _ => Err(VsqlError::name(format!(
                    "app parameter has no attribute {name:?}"
                ))),
            },
            Target::Missing(kind) => Ok(missing_attr(kind, name)),
        }
    }

    fn method_call(&self, call: &MethodCallExpr) -> Result<Target<'a>> {
        let object = self.eval_target(&call.object)?;
        match object {
            // A Null or absent receiver swallows the call, arguments
            // unevaluated
            Target::Missing(_) | Target::Value(VsqlValue::Null) => {
                Ok(Target::Value(VsqlValue::Null))
            }
            Target::Value(value) => {
                let args = call
                    .args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>>>()?;
                methods::call(&value, &call.name, &args).map(Target::Value)
            }
            entity => Err(VsqlError::name(format!(
                "{} has no method {:?}",
                entity.describe(),
                call.name
            ))),
        }
    }

    fn binary(&self, expr: &BinaryOpExpr) -> Result<VsqlValue> {
        use BinaryOp::*;
        match expr.op {
            // Short-circuiting: the untaken operand is never evaluated and
            // the result is an operand, not a Bool
            And => {
                let left = self.eval(&expr.left)?;
                if !left.is_truthy() {
                    return Ok(left);
                }
                self.eval(&expr.right)
            }
            Or => {
                let left = self.eval(&expr.left)?;
                if left.is_truthy() {
                    return Ok(left);
                }
                self.eval(&expr.right)
            }

            // The only null test that does not itself propagate Null
            Is | IsNot => {
                let left = self.eval(&expr.left)?;
                let right = self.eval(&expr.right)?;
                if !right.is_null() {
                    return Err(VsqlError::type_error(
                        "'is' requires None as right operand",
                    ));
                }
                let is_null = left.is_null();
                Ok(VsqlValue::Bool(if expr.op == Is { is_null } else { !is_null }))
            }

            Eq => {
                let (left, right) = self.operands(expr)?;
                Ok(VsqlValue::Bool(comparison::values_equal(&left, &right)))
            }
            Ne => {
                let (left, right) = self.operands(expr)?;
                Ok(VsqlValue::Bool(!comparison::values_equal(&left, &right)))
            }
            Lt => self.ordered(expr, |ord| ord == CmpOrdering::Less),
            Le => self.ordered(expr, |ord| ord != CmpOrdering::Greater),
            Gt => self.ordered(expr, |ord| ord == CmpOrdering::Greater),
            Ge => self.ordered(expr, |ord| ord != CmpOrdering::Less),

            In => {
                let (left, right) = self.operands(expr)?;
                container::contains(&left, &right)
            }
            NotIn => {
                let (left, right) = self.operands(expr)?;
                Ok(match container::contains(&left, &right)? {
                    VsqlValue::Bool(found) => VsqlValue::Bool(!found),
                    other => other,
                })
            }

            Add => self.apply(expr, arithmetic::add),
            Sub => self.apply(expr, arithmetic::subtract),
            Mul => self.apply(expr, arithmetic::multiply),
            Div => self.apply(expr, arithmetic::divide),
            FloorDiv => self.apply(expr, arithmetic::floor_divide),
            Mod => self.apply(expr, arithmetic::modulo),
            BitAnd => self.apply(expr, bitwise::bit_and),
            BitOr => self.apply(expr, bitwise::bit_or),
            BitXor => self.apply(expr, bitwise::bit_xor),
            Shl => self.apply(expr, bitwise::shift_left),
            Shr => self.apply(expr, bitwise::shift_right),
        }
    }

    fn operands(&self, expr: &BinaryOpExpr) -> Result<(VsqlValue, VsqlValue)> {
        Ok((self.eval(&expr.left)?, self.eval(&expr.right)?))
    }

    fn apply(
        &self,
        expr: &BinaryOpExpr,
        op: fn(&VsqlValue, &VsqlValue) -> Result<VsqlValue>,
    ) -> Result<VsqlValue> {
        let (left, right) = self.operands(expr)?;
        op(&left, &right)
    }

    fn ordered(
        &self,
        expr: &BinaryOpExpr,
        accept: fn(CmpOrdering) -> bool,
    ) -> Result<VsqlValue> {
        let (left, right) = self.operands(expr)?;
        let ord = comparison::compare_values(&left, &right)?;
        Ok(VsqlValue::Bool(accept(ord)))
    }
}

fn app_attr<'a>(app: &'a App, name: &str) -> Result<Target<'a>> {
    match name {
        "id" => Ok(Target::Value(opt_str(&app.id))),
        _ => match app.param(name) {
            Some(param) => Ok(Target::Param(param)),
            None => Err(VsqlError::name(format!("app has no attribute {name:?}"))),
        },
    }
}

fn record_attr<'a>(record: &'a Record, name: &str) -> Result<Target<'a>> {
    match name {
        "id" => Ok(Target::Value(opt_str(&record.id))),
        "app" => Ok(match &record.app {
            Some(app) => Target::App(app),
            None => Target::Missing(MissingKind::App),
        }),
        _ => match record.field(name) {
            Some(value) => Ok(env_target(value)),
            None => Err(VsqlError::name(format!(
                "record has no attribute {name:?}"
            ))),
        },
    }
}

fn user_attr(user: &User, name: &str) -> Result<VsqlValue> {
    match name {
        "id" => Ok(opt_str(&user.id)),
        "email" => Ok(opt_str(&user.email)),
        "firstname" => Ok(opt_str(&user.firstname)),
        "lastname" => Ok(opt_str(&user.lastname)),
        _ => Err(VsqlError::name(format!("user has no attribute {name:?}"))),
    }
}

fn env_target(value: &EnvValue) -> Target<'_> {
    match value {
        EnvValue::Value(value) => Target::Value(value.clone()),
        EnvValue::App(app) => Target::App(app),
        EnvValue::Record(record) => Target::Record(record),
    }
}

// Attribute steps through an absent entity stay Null; the app reference of
// an absent record keeps its entity nature so that it still refuses to be
// used as a value.
fn missing_attr(kind: MissingKind, name: &str) -> Target<'static> {
    match (kind, name) {
        (MissingKind::Record, "app") => Target::Missing(MissingKind::App),
        _ => Target::Value(VsqlValue::Null),
    }
}

fn opt_str(value: &Option<String>) -> VsqlValue {
    match value {
        Some(s) => VsqlValue::Str(s.clone()),
        None => VsqlValue::Null,
    }
}
