//! Query result models.

use serde::{Deserialize, Serialize};

/// Materialized result of a read query.
///
/// Rows are ordered and each row is an ordered sequence of column values;
/// column identity is positional, callers index by offset. An empty result
/// is a valid outcome and distinct from "store unavailable", which callers
/// see as an error from the executor instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutput {
    /// Row data (each row is a vector of JSON values).
    pub rows: Vec<Vec<serde_json::Value>>,

    /// Number of rows returned.
    #[serde(default)]
    pub row_count: usize,

    /// Query execution time in milliseconds.
    #[serde(default)]
    pub execution_time_ms: u64,
}

impl QueryOutput {
    /// Returns true when the query produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First column of the first row as an integer, for `COUNT(*)`-style
    /// scalar queries.
    pub fn scalar_i64(&self) -> Option<i64> {
        self.rows.first()?.first()?.as_i64()
    }
}
