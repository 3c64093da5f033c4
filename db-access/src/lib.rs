//! Database access layer for the import verification harness.
//!
//! Layering, bottom up:
//! - [`dialect`] — SQL dialect identification and connection URL details.
//! - [`context`] — the [`DatabaseContext`]: resolved credentials, the
//!   one-shot cached connectivity probe, and scoped connection/session
//!   acquisition over a lazily built pool.
//! - [`query`] — parameterized read queries with named placeholders.
//! - [`store`] — person lookups that degrade to negative results whenever
//!   the store is unavailable instead of surfacing driver errors.
//!
//! A context is constructed once per test run and injected into
//! collaborators; its probe outcome is frozen for the process lifetime.

pub mod context;
pub mod dialect;
pub mod query;
pub mod store;

pub use context::DatabaseContext;
pub use dialect::SqlDialect;
pub use query::{QueryExecutor, SqlParam};
pub use store::{PersonLookup, PersonStore, DEFAULT_PERSON_TABLE};
