//! Configuration loading for the harness.
//!
//! Both the database credentials and the API settings come from environment
//! variables. Lookups go through an injected closure so tests can supply
//! their own key/value source instead of mutating process state.

/// Database credentials resolved from the environment.
///
/// Exists only when every required key is present; a partially configured
/// environment resolves to `None`, which is the expected "running without a
/// database" state and not an error.
///
/// Recognized keys:
/// - `DB_SERVER`, `DB_NAME`, `DB_USER`, `DB_PASSWORD` (all required together)
/// - `DB_PORT` (optional, integer)
/// - `DB_DRIVER` (optional, defaults to the SQL Server ODBC driver name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbCredentials {
    /// Database server host.
    pub server: String,
    /// Database name (file path for SQLite).
    pub database: String,
    /// Database username.
    pub username: String,
    /// Database password.
    pub password: String,
    /// Database port (dialect default when absent).
    pub port: Option<u16>,
    /// Driver / dialect identifier.
    pub driver: String,
}

impl DbCredentials {
    /// Default driver identifier when `DB_DRIVER` is not set.
    pub const DEFAULT_DRIVER: &'static str = "ODBC Driver 17 for SQL Server";

    /// Resolves credentials from process environment variables.
    pub fn from_env() -> Option<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolves credentials from an arbitrary key/value source.
    ///
    /// Returns `None` as soon as any required key is missing, regardless of
    /// which other keys are present.
    pub fn resolve<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = lookup("DB_SERVER");
        let database = lookup("DB_NAME");
        let username = lookup("DB_USER");
        let password = lookup("DB_PASSWORD");

        let (Some(server), Some(database), Some(username), Some(password)) =
            (server, database, username, password)
        else {
            tracing::info!("database environment not fully set, store checks will run degraded");
            return None;
        };

        Some(Self {
            server,
            database,
            username,
            password,
            port: lookup("DB_PORT").and_then(|v| v.parse().ok()),
            driver: lookup("DB_DRIVER").unwrap_or_else(|| Self::DEFAULT_DRIVER.to_string()),
        })
    }
}

/// Settings for the import API client.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Base URL of the import API.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub auth_token: String,
}

impl ApiSettings {
    /// Default base URL when `API_BASE_URL` is not set.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.test.worldsys.ar";

    /// Loads API settings from process environment variables.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Loads API settings from an arbitrary key/value source.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            base_url: lookup("API_BASE_URL").unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            auth_token: lookup("API_AUTH_TOKEN").unwrap_or_else(|| "xxx".to_string()),
        }
    }
}
