use crate::app_config::{AppConfig, Environment, MAX_MOCK_TWEETS_PER_COMPANY};
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
/// Parsing and validation are decoupled from the process environment so tests
/// can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("SENTDASH_ENV", "development"))?;

    let bind_addr = parse_addr("SENTDASH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SENTDASH_LOG_LEVEL", "info");
    let companies_path = PathBuf::from(or_default(
        "SENTDASH_COMPANIES_PATH",
        "./config/companies.yaml",
    ));

    let window_days = parse_u32("SENTDASH_WINDOW_DAYS", "30")?;
    if window_days == 0 {
        return Err(invalid(
            "SENTDASH_WINDOW_DAYS",
            "window must be at least 1 day".to_string(),
        ));
    }

    let db_max_connections = parse_u32("SENTDASH_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SENTDASH_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SENTDASH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let mock_tweets_per_company = parse_usize("SENTDASH_MOCK_TWEETS_PER_COMPANY", "5000")?;
    if mock_tweets_per_company > MAX_MOCK_TWEETS_PER_COMPANY {
        return Err(invalid(
            "SENTDASH_MOCK_TWEETS_PER_COMPANY",
            format!("at most {MAX_MOCK_TWEETS_PER_COMPANY} tweets per company"),
        ));
    }
    let mock_history_days = parse_u32("SENTDASH_MOCK_HISTORY_DAYS", "365")?;
    let mock_seed = parse_u64("SENTDASH_MOCK_SEED", "42")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        companies_path,
        window_days,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        mock_tweets_per_company,
        mock_history_days,
        mock_seed,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SENTDASH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
