//! Client for the person import API.
//!
//! Wraps the `POST /import` endpoint with bearer authentication and
//! response-validation helpers, and optionally carries a person store for
//! import-then-verify flows. The API call and the database check are never
//! coupled transactionally; callers sequence them and tolerate the gap
//! between "import accepted" and "row visible".

pub mod client;

pub use client::{ImportClient, ImportOutcome};
