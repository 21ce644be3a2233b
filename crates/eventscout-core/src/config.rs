use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Longest geohash the discovery API accepts for `geoPoint`.
const MAX_GEOHASH_PRECISION: usize = 12;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files, which is useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_key = require("EVENTSCOUT_API_KEY")?;
    if api_key.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "EVENTSCOUT_API_KEY".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let env = parse_environment(&or_default("EVENTSCOUT_ENV", "development"))?;
    let log_level = or_default("EVENTSCOUT_LOG_LEVEL", "info");

    let api_host = or_default("EVENTSCOUT_API_HOST", "https://app.ticketmaster.com");
    let api_path = or_default("EVENTSCOUT_API_PATH", "/discovery/v2/events.json");

    let default_keyword = or_default("EVENTSCOUT_DEFAULT_KEYWORD", "event");
    if default_keyword.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "EVENTSCOUT_DEFAULT_KEYWORD".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let search_radius = parse_u32("EVENTSCOUT_SEARCH_RADIUS", "50")?;

    let geohash_precision = parse_usize("EVENTSCOUT_GEOHASH_PRECISION", "8")?;
    if !(1..=MAX_GEOHASH_PRECISION).contains(&geohash_precision) {
        return Err(ConfigError::InvalidEnvVar {
            var: "EVENTSCOUT_GEOHASH_PRECISION".to_string(),
            reason: format!("must be between 1 and {MAX_GEOHASH_PRECISION}"),
        });
    }

    let request_timeout_secs = parse_u64("EVENTSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("EVENTSCOUT_USER_AGENT", "eventscout/0.1 (event-discovery)");

    Ok(AppConfig {
        env,
        log_level,
        api_key,
        api_host,
        api_path,
        default_keyword,
        search_radius,
        geohash_precision,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "EVENTSCOUT_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
