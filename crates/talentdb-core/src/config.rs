use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("TALENTDB_ENV", "development"))?;

    let bind_addr = parse_addr("TALENTDB_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("TALENTDB_LOG_LEVEL", "info");

    let torre_base_url = or_default("TALENTDB_TORRE_BASE_URL", "https://torre.ai/api");
    if !(torre_base_url.starts_with("http://") || torre_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "TALENTDB_TORRE_BASE_URL".to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }
    let torre_request_timeout_secs = parse_u64("TALENTDB_TORRE_REQUEST_TIMEOUT_SECS", "30")?;
    let torre_user_agent = or_default(
        "TALENTDB_TORRE_USER_AGENT",
        "talentdb/0.1 (profile-collection)",
    );

    let db_max_connections = parse_u32("TALENTDB_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("TALENTDB_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "TALENTDB_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs = parse_u64("TALENTDB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let collect_profiles_delay_ms = parse_u64("TALENTDB_COLLECT_PROFILES_DELAY_MS", "3000")?;
    let pending_profiles_delay_ms = parse_u64("TALENTDB_PENDING_PROFILES_DELAY_MS", "1000")?;
    let bulk_profiles_delay_ms = parse_u64("TALENTDB_BULK_PROFILES_DELAY_MS", "1000")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        torre_base_url,
        torre_request_timeout_secs,
        torre_user_agent,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        collect_profiles_delay_ms,
        pending_profiles_delay_ms,
        bulk_profiles_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TALENTDB_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
