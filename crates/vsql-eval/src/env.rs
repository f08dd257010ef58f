//! Evaluation environment
//!
//! The environment supplies the entities an expression can name: the current
//! app with its `p_*` parameters, the record under evaluation with its `v_*`
//! value fields and `c_*` relation fields, the requesting user, and typed
//! request parameter buckets. All entities are immutable during evaluation;
//! per-record environments share the rest through `Arc`.

use crate::temporal::{Date, DateTime};
use crate::value::VsqlValue;
use indexmap::IndexMap;
use std::sync::Arc;

/// A value stored on an environment entity
///
/// Either a plain vSQL value or a reference to another entity that itself
/// supports attribute access (app lookups, record relations).
#[derive(Debug, Clone)]
pub enum EnvValue {
    Value(VsqlValue),
    App(Arc<App>),
    Record(Arc<Record>),
}

impl From<VsqlValue> for EnvValue {
    fn from(value: VsqlValue) -> Self {
        Self::Value(value)
    }
}

/// Application context: identity plus named parameters
#[derive(Debug, Clone, Default)]
pub struct App {
    pub id: Option<String>,
    pub params: IndexMap<String, EnvValue>,
}

impl App {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            params: IndexMap::new(),
        }
    }

    /// Add a plain-valued parameter (conventionally named `p_*`)
    pub fn with_param(mut self, name: impl Into<String>, value: VsqlValue) -> Self {
        self.params.insert(name.into(), EnvValue::Value(value));
        self
    }

    /// Add a parameter referring to another app
    pub fn with_app_param(mut self, name: impl Into<String>, app: Arc<App>) -> Self {
        self.params.insert(name.into(), EnvValue::App(app));
        self
    }

    pub fn param(&self, name: &str) -> Option<&EnvValue> {
        self.params.get(name)
    }
}

/// One row of application data
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub id: Option<String>,
    pub app: Option<Arc<App>>,
    pub fields: IndexMap<String, EnvValue>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            app: None,
            fields: IndexMap::new(),
        }
    }

    pub fn with_app(mut self, app: Arc<App>) -> Self {
        self.app = Some(app);
        self
    }

    /// Add a value field (conventionally named `v_*`)
    pub fn with_field(mut self, name: impl Into<String>, value: VsqlValue) -> Self {
        self.fields.insert(name.into(), EnvValue::Value(value));
        self
    }

    /// Add a relation field referring to another record (conventionally `c_*`,
    /// also used for `v_*` lookup fields)
    pub fn with_related(mut self, name: impl Into<String>, record: Arc<Record>) -> Self {
        self.fields.insert(name.into(), EnvValue::Record(record));
        self
    }

    pub fn field(&self, name: &str) -> Option<&EnvValue> {
        self.fields.get(name)
    }
}

/// Requesting user context
#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: Option<String>,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

/// Typed request parameter bucket selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BucketKind {
    Str,
    Int,
    Date,
    DateTime,
    StrList,
    IntList,
    DateList,
    DateTimeList,
}

impl BucketKind {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "str" => Some(Self::Str),
            "int" => Some(Self::Int),
            "date" => Some(Self::Date),
            "datetime" => Some(Self::DateTime),
            "strlist" => Some(Self::StrList),
            "intlist" => Some(Self::IntList),
            "datelist" => Some(Self::DateList),
            "datetimelist" => Some(Self::DateTimeList),
            _ => None,
        }
    }
}

/// Request parameters bucketed by declared type
///
/// Scalar lookups yield Null when the name is absent; list lookups yield an
/// empty list.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    pub str_values: IndexMap<String, String>,
    pub int_values: IndexMap<String, i64>,
    pub date_values: IndexMap<String, Date>,
    pub datetime_values: IndexMap<String, DateTime>,
    pub str_lists: IndexMap<String, Vec<String>>,
    pub int_lists: IndexMap<String, Vec<i64>>,
    pub date_lists: IndexMap<String, Vec<Date>>,
    pub datetime_lists: IndexMap<String, Vec<DateTime>>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_str(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.str_values.insert(name.into(), value.into());
        self
    }

    pub fn with_int(mut self, name: impl Into<String>, value: i64) -> Self {
        self.int_values.insert(name.into(), value);
        self
    }

    pub fn with_date(mut self, name: impl Into<String>, value: Date) -> Self {
        self.date_values.insert(name.into(), value);
        self
    }

    pub fn with_datetime(mut self, name: impl Into<String>, value: DateTime) -> Self {
        self.datetime_values.insert(name.into(), value);
        self
    }

    pub fn with_str_list<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.str_lists
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_int_list(mut self, name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        self.int_lists
            .insert(name.into(), values.into_iter().collect());
        self
    }

    pub fn with_date_list(mut self, name: impl Into<String>, values: impl IntoIterator<Item = Date>) -> Self {
        self.date_lists
            .insert(name.into(), values.into_iter().collect());
        self
    }

    pub fn with_datetime_list(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = DateTime>,
    ) -> Self {
        self.datetime_lists
            .insert(name.into(), values.into_iter().collect());
        self
    }

    pub(crate) fn lookup(&self, bucket: BucketKind, name: &str) -> VsqlValue {
        match bucket {
            BucketKind::Str => self
                .str_values
                .get(name)
                .map(|v| VsqlValue::Str(v.clone()))
                .unwrap_or(VsqlValue::Null),
            BucketKind::Int => self
                .int_values
                .get(name)
                .map(|v| VsqlValue::Int(*v))
                .unwrap_or(VsqlValue::Null),
            BucketKind::Date => self
                .date_values
                .get(name)
                .map(|v| VsqlValue::Date(*v))
                .unwrap_or(VsqlValue::Null),
            BucketKind::DateTime => self
                .datetime_values
                .get(name)
                .map(|v| VsqlValue::DateTime(*v))
                .unwrap_or(VsqlValue::Null),
            BucketKind::StrList => VsqlValue::List(
                self.str_lists
                    .get(name)
                    .map(|v| v.iter().map(|s| VsqlValue::Str(s.clone())).collect())
                    .unwrap_or_default(),
            ),
            BucketKind::IntList => VsqlValue::List(
                self.int_lists
                    .get(name)
                    .map(|v| v.iter().map(|n| VsqlValue::Int(*n)).collect())
                    .unwrap_or_default(),
            ),
            BucketKind::DateList => VsqlValue::List(
                self.date_lists
                    .get(name)
                    .map(|v| v.iter().map(|d| VsqlValue::Date(*d)).collect())
                    .unwrap_or_default(),
            ),
            BucketKind::DateTimeList => VsqlValue::List(
                self.datetime_lists
                    .get(name)
                    .map(|v| v.iter().map(|d| VsqlValue::DateTime(*d)).collect())
                    .unwrap_or_default(),
            ),
        }
    }
}

/// Everything an expression can see during one evaluation
///
/// Cloning is cheap; [`Environment::with_record`] builds the per-record
/// environment used by filter and sort passes.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub app: Option<Arc<App>>,
    pub record: Option<Arc<Record>>,
    pub user: Option<Arc<User>>,
    pub params: Arc<RequestParams>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(mut self, app: Arc<App>) -> Self {
        self.app = Some(app);
        self
    }

    pub fn with_record(mut self, record: Arc<Record>) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_user(mut self, user: Arc<User>) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_params(mut self, params: RequestParams) -> Self {
        self.params = Arc::new(params);
        self
    }
}
