//! Error taxonomy shared across the harness.
//!
//! Layers below the person store surface these errors; the person store
//! converts them into degraded negative results so that test code never
//! has to handle raw driver failures.

use thiserror::Error;

/// Unified application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database credentials are missing or the configured dialect has no
    /// driver support. Raised only for caller mistakes (using the gateway
    /// while unconfigured), never by availability checks.
    #[error("数据库未配置: {0}")]
    Configuration(String),

    /// The connectivity probe classified the store as down for the rest of
    /// the process lifetime.
    #[error("数据库不可用")]
    DatabaseUnavailable,

    /// Establishing or acquiring a connection failed.
    #[error("数据库连接失败: {0}")]
    DatabaseConnection(String),

    /// A query failed after the store was classified available.
    #[error("数据库查询失败: {0}")]
    DatabaseQuery(String),

    /// An HTTP call to an external service failed at the transport level.
    #[error("外部服务错误: {0}")]
    ExternalService(String),

    /// Malformed caller input, e.g. a named query parameter without a value.
    #[error("参数校验失败: {0}")]
    Validation(String),
}

/// Result alias used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;
