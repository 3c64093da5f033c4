//! Data models shared across the harness.

pub mod person;
pub mod query;

pub use person::PersonRecord;
pub use query::QueryOutput;
