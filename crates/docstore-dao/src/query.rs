//! Positional query parameters and the named-query catalog.
//!
//! Named queries are SQL text registered once under a stable name and
//! dispatched by the generic DAO. Parameters bind strictly by position.

use docstore_core::{DocstoreError, DocstoreResult, UserId};
use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::{Query, QueryAs, QueryScalar};
use std::collections::HashMap;

/// A positional query parameter value.
///
/// Parameters are bound in slice order, first placeholder first.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// Text value.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Param {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<UserId> for Param {
    fn from(id: UserId) -> Self {
        Self::Int(id.into_inner())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Binds parameters onto a plain query, in order.
pub(crate) fn bind_params<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &[Param],
) -> Query<'q, MySql, MySqlArguments> {
    for param in params {
        query = match param {
            Param::Null => query.bind(None::<String>),
            Param::Bool(v) => query.bind(*v),
            Param::Int(v) => query.bind(*v),
            Param::Float(v) => query.bind(*v),
            Param::Text(v) => query.bind(v.clone()),
            Param::Bytes(v) => query.bind(v.clone()),
        };
    }
    query
}

/// Binds parameters onto a typed-row query, in order.
pub(crate) fn bind_params_as<'q, T>(
    mut query: QueryAs<'q, MySql, T, MySqlArguments>,
    params: &[Param],
) -> QueryAs<'q, MySql, T, MySqlArguments> {
    for param in params {
        query = match param {
            Param::Null => query.bind(None::<String>),
            Param::Bool(v) => query.bind(*v),
            Param::Int(v) => query.bind(*v),
            Param::Float(v) => query.bind(*v),
            Param::Text(v) => query.bind(v.clone()),
            Param::Bytes(v) => query.bind(v.clone()),
        };
    }
    query
}

/// Binds parameters onto a scalar query, in order.
pub(crate) fn bind_params_scalar<'q, T>(
    mut query: QueryScalar<'q, MySql, T, MySqlArguments>,
    params: &[Param],
) -> QueryScalar<'q, MySql, T, MySqlArguments> {
    for param in params {
        query = match param {
            Param::Null => query.bind(None::<String>),
            Param::Bool(v) => query.bind(*v),
            Param::Int(v) => query.bind(*v),
            Param::Float(v) => query.bind(*v),
            Param::Text(v) => query.bind(v.clone()),
            Param::Bytes(v) => query.bind(v.clone()),
        };
    }
    query
}

/// Placeholder expanded into a positional IN-list.
pub const IN_PLACEHOLDER: &str = "{in}";

/// Expands the `{in}` placeholder in a statement into `?, ?, ...` for the
/// given parameter count.
pub fn expand_in_placeholder(sql: &str, count: usize) -> DocstoreResult<String> {
    if count == 0 {
        return Err(DocstoreError::validation(
            "IN-list query requires at least one parameter",
        ));
    }
    if !sql.contains(IN_PLACEHOLDER) {
        return Err(DocstoreError::validation(format!(
            "statement has no {} placeholder",
            IN_PLACEHOLDER
        )));
    }
    let placeholders = vec!["?"; count].join(", ");
    Ok(sql.replace(IN_PLACEHOLDER, &placeholders))
}

/// Registry of named queries: stable name to SQL text.
#[derive(Debug, Clone, Default)]
pub struct QueryCatalog {
    queries: HashMap<&'static str, &'static str>,
}

impl QueryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named query, replacing any previous SQL under that name.
    pub fn register(&mut self, name: &'static str, sql: &'static str) -> &mut Self {
        self.queries.insert(name, sql);
        self
    }

    /// Looks up the SQL for a named query.
    pub fn get(&self, name: &str) -> DocstoreResult<&'static str> {
        self.queries
            .get(name)
            .copied()
            .ok_or_else(|| DocstoreError::UnknownQuery(name.to_string()))
    }

    /// Whether a query is registered under the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.queries.contains_key(name)
    }

    /// Number of registered queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
