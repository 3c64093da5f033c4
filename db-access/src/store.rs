//! Person lookups with safe degradation.
//!
//! Both operations are total with respect to store availability: when the
//! probe says the database is down, or a query fails underneath, they
//! return the negative result instead of an error. Test code consequently
//! cannot distinguish "not present" from "could not check" here; callers
//! that need the distinction consult `DatabaseContext::is_available` first.

use std::sync::Arc;

use async_trait::async_trait;
use common::models::PersonRecord;

use crate::context::DatabaseContext;
use crate::query::{QueryExecutor, SqlParam};

/// Table holding imported person rows, addressed as `<schema>.<table>`.
pub const DEFAULT_PERSON_TABLE: &str = "Test.Worldsys";

/// Existence and record lookups for imported persons.
///
/// Behind a trait so the API client can be wired with a test double.
#[async_trait]
pub trait PersonLookup: Send + Sync {
    /// Whether a row with this identifier exists. False when the store is
    /// unavailable, independent of whether the row would exist.
    async fn exists(&self, person_id: i64) -> bool;

    /// The person row, mapped positionally. `None` when unavailable,
    /// unconfigured or no row matched.
    async fn fetch_by_id(&self, person_id: i64) -> Option<PersonRecord>;
}

/// [`PersonLookup`] implementation backed by a [`DatabaseContext`].
pub struct PersonStore {
    ctx: Arc<DatabaseContext>,
    table: String,
}

impl PersonStore {
    pub fn new(ctx: Arc<DatabaseContext>) -> Self {
        Self {
            ctx,
            table: DEFAULT_PERSON_TABLE.to_string(),
        }
    }

    /// Overrides the target table, for schemas that differ from the default.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// The underlying context.
    pub fn context(&self) -> &DatabaseContext {
        &self.ctx
    }
}

#[async_trait]
impl PersonLookup for PersonStore {
    async fn exists(&self, person_id: i64) -> bool {
        if !self.ctx.is_available().await {
            tracing::info!(person_id, "database unavailable, treating person as absent");
            return false;
        }

        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE personId = :person_id",
            self.table
        );
        match QueryExecutor::new(&self.ctx)
            .execute(&sql, &[("person_id", SqlParam::Int(person_id))])
            .await
        {
            Ok(output) => {
                let found = output.scalar_i64().unwrap_or(0) > 0;
                tracing::info!(person_id, found, "person existence check");
                found
            }
            Err(error) => {
                tracing::error!(person_id, error = %error, "person existence check failed");
                false
            }
        }
    }

    async fn fetch_by_id(&self, person_id: i64) -> Option<PersonRecord> {
        if !self.ctx.is_available().await {
            tracing::info!(person_id, "database unavailable, no person record to fetch");
            return None;
        }

        let sql = format!(
            "SELECT DISTINCT * FROM {} WHERE personId = :person_id",
            self.table
        );
        match QueryExecutor::new(&self.ctx)
            .execute(&sql, &[("person_id", SqlParam::Int(person_id))])
            .await
        {
            Ok(output) if output.is_empty() => {
                tracing::info!(person_id, "person not found");
                None
            }
            Ok(output) => {
                let record = output
                    .rows
                    .first()
                    .and_then(|row| PersonRecord::from_row(row));
                match &record {
                    Some(_) => tracing::info!(person_id, "person record fetched"),
                    None => tracing::info!(person_id, "person row had no readable identifier"),
                }
                record
            }
            Err(error) => {
                tracing::error!(person_id, error = %error, "person fetch failed");
                None
            }
        }
    }
}
