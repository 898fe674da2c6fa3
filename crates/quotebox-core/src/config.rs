use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/quotes.sqlite";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable
/// development config backed by a local SQLite file.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = or_default("DATABASE_URL", DEFAULT_DATABASE_URL);
    if database_url.trim().is_empty() {
        return Err(invalid("DATABASE_URL", "must not be empty".to_string()));
    }

    let env = parse_environment(&or_default("QUOTEBOX_ENV", "development"))?;
    // Production quotes must outlive the process.
    if env.is_production() && is_in_memory_url(&database_url) {
        return Err(invalid(
            "DATABASE_URL",
            "an in-memory database is not allowed in production".to_string(),
        ));
    }
    let bind_addr = parse_addr("QUOTEBOX_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("QUOTEBOX_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("QUOTEBOX_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("QUOTEBOX_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "QUOTEBOX_DB_MIN_CONNECTIONS",
            format!("{db_min_connections} exceeds max connections {db_max_connections}"),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("QUOTEBOX_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let db_busy_timeout_secs = parse_u64("QUOTEBOX_DB_BUSY_TIMEOUT_SECS", "5")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        db_busy_timeout_secs,
    })
}

fn is_in_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "QUOTEBOX_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}
