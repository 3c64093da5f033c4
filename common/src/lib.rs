//! Shared modules for the import verification harness.
//!
//! Contains configuration loading, the error taxonomy and the data models
//! used by the database access layer and the import API client.

pub mod config;
pub mod errors;
pub mod models;

pub use config::{ApiSettings, DbCredentials};
pub use errors::{AppError, AppResult};
