//! Parameterized read queries.
//!
//! Query text uses `:name` placeholders; values are always bound through
//! the driver, never interpolated into the SQL text. The executor fails
//! fast when the probe has classified the store unavailable and
//! materializes the full result set eagerly.

use std::time::Instant;

use common::errors::{AppError, AppResult};
use common::models::QueryOutput;
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, Row};

use crate::context::DatabaseContext;
use crate::dialect::SqlDialect;

/// A value bound to a named query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl SqlParam {
    fn bind<'q>(&self, query: Query<'q, Any, AnyArguments<'q>>) -> Query<'q, Any, AnyArguments<'q>> {
        match self {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Float(v) => query.bind(*v),
            SqlParam::Bool(v) => query.bind(*v),
            SqlParam::Text(v) => query.bind(v.clone()),
            SqlParam::Null => query.bind(Option::<i64>::None),
        }
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

/// Executes read queries through a [`DatabaseContext`].
pub struct QueryExecutor<'a> {
    ctx: &'a DatabaseContext,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(ctx: &'a DatabaseContext) -> Self {
        Self { ctx }
    }

    /// Runs a parameterized query and materializes all rows.
    ///
    /// Fails with [`AppError::DatabaseUnavailable`] without touching the
    /// network when the store is classified down. Driver failures are
    /// logged with the failing SQL and surfaced as
    /// [`AppError::DatabaseQuery`].
    pub async fn execute(&self, sql: &str, params: &[(&str, SqlParam)]) -> AppResult<QueryOutput> {
        if !self.ctx.is_available().await {
            return Err(AppError::DatabaseUnavailable);
        }
        let dialect = self
            .ctx
            .dialect()
            .ok_or_else(|| AppError::Configuration("database credentials not resolved".into()))?;
        let (bound_sql, values) = bind_named(sql, params, dialect)?;

        let started = Instant::now();
        let rows = self
            .ctx
            .with_connection(move |conn| {
                Box::pin(async move {
                    let mut query = sqlx::query(&bound_sql);
                    for value in &values {
                        query = value.bind(query);
                    }
                    query.fetch_all(&mut *conn).await.map_err(|e| {
                        tracing::error!(query = %bound_sql, error = %e, "query execution failed");
                        AppError::DatabaseQuery(e.to_string())
                    })
                })
            })
            .await?;

        let rows: Vec<Vec<serde_json::Value>> = rows
            .iter()
            .map(|row| (0..row.len()).map(|idx| column_value(row, idx)).collect())
            .collect();

        Ok(QueryOutput {
            row_count: rows.len(),
            rows,
            execution_time_ms: started.elapsed().as_millis() as u64,
        })
    }
}

/// Decodes one column positionally into a JSON value.
///
/// The Any driver only exposes a handful of scalar types; anything it
/// cannot decode maps to null rather than failing the whole row.
fn column_value(row: &AnyRow, idx: usize) -> serde_json::Value {
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return v.map(serde_json::Value::from).unwrap_or(serde_json::Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return v.map(serde_json::Value::from).unwrap_or(serde_json::Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(idx) {
        return v.map(serde_json::Value::from).unwrap_or(serde_json::Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return v.map(serde_json::Value::from).unwrap_or(serde_json::Value::Null);
    }
    serde_json::Value::Null
}

/// Rewrites `:name` placeholders to the dialect's positional syntax and
/// collects the values to bind, in placeholder order.
///
/// Single-quoted literals are copied verbatim and `::` (cast syntax) is
/// never treated as a placeholder. A placeholder without a matching entry
/// in `params` is a validation error.
fn bind_named(
    sql: &str,
    params: &[(&str, SqlParam)],
    dialect: SqlDialect,
) -> AppResult<(String, Vec<SqlParam>)> {
    let mut out = String::with_capacity(sql.len());
    let mut values = Vec::new();
    let mut chars = sql.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if c == '\'' {
                in_string = false;
            }
            continue;
        }
        match c {
            '\'' => {
                in_string = true;
                out.push(c);
            }
            ':' => {
                if chars.peek() == Some(&':') {
                    out.push(':');
                    out.push(chars.next().unwrap());
                    continue;
                }
                let mut name = String::new();
                while let Some(&n) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' {
                        name.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    out.push(':');
                    continue;
                }
                let value = params
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value.clone())
                    .ok_or_else(|| {
                        AppError::Validation(format!("missing value for query parameter :{name}"))
                    })?;
                values.push(value);
                out.push_str(&dialect.placeholder(values.len()));
            }
            _ => out.push(c),
        }
    }

    Ok((out, values))
}
