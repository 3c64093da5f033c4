//! SQL dialect identification.
//!
//! The `DB_DRIVER` value selects the dialect. SQL Server (the default) has
//! no sqlx driver, so it resolves to a dialect without driver support and
//! every downstream check degrades, mirroring a missing client library.

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    /// Microsoft SQL Server via ODBC (no native driver support).
    SqlServer,
    /// MySQL / MariaDB.
    MySql,
    /// PostgreSQL.
    Postgres,
    /// SQLite (database name is the file path).
    Sqlite,
}

impl SqlDialect {
    /// Maps a driver identifier to a dialect.
    ///
    /// Unrecognized identifiers fall back to SQL Server, matching the ODBC
    /// driver-name convention of the default configuration.
    pub fn from_driver(driver: &str) -> Self {
        let driver = driver.to_lowercase();
        if driver.contains("sqlite") {
            SqlDialect::Sqlite
        } else if driver.contains("postgres") {
            SqlDialect::Postgres
        } else if driver.contains("mysql") || driver.contains("mariadb") {
            SqlDialect::MySql
        } else {
            SqlDialect::SqlServer
        }
    }

    /// Whether a native driver exists for this dialect.
    pub fn has_driver_support(&self) -> bool {
        !matches!(self, SqlDialect::SqlServer)
    }

    /// Default port for network dialects.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            SqlDialect::SqlServer => Some(1433),
            SqlDialect::MySql => Some(3306),
            SqlDialect::Postgres => Some(5432),
            SqlDialect::Sqlite => None,
        }
    }

    /// Positional placeholder for the n-th bound parameter (1-based).
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            SqlDialect::Postgres => format!("${index}"),
            _ => "?".to_string(),
        }
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlDialect::SqlServer => write!(f, "mssql"),
            SqlDialect::MySql => write!(f, "mysql"),
            SqlDialect::Postgres => write!(f, "postgres"),
            SqlDialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// URL-encodes a driver name for the connection string query segment,
/// spaces as `+`.
pub(crate) fn encode_driver(driver: &str) -> String {
    let mut out = String::with_capacity(driver.len());
    for c in driver.chars() {
        match c {
            ' ' => out.push('+'),
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~') => out.push(c),
            c => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    out
}
