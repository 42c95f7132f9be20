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
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let serpapi_api_key = require("SERPAPI_API_KEY")?;
    let youtube_api_keys = parse_key_list(&require("YOUTUBE_API_KEYS")?);
    if youtube_api_keys.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "YOUTUBE_API_KEYS".to_string(),
            reason: "expected at least one comma-separated key".to_string(),
        });
    }

    let env = parse_environment(&or_default("MEMETRENDS_ENV", "development"))?;

    let raw_bind = or_default("MEMETRENDS_BIND_ADDR", "0.0.0.0:3000");
    let bind_addr = raw_bind
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "MEMETRENDS_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;
    let log_level = or_default("MEMETRENDS_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("MEMETRENDS_REQUEST_TIMEOUT_SECS", "30")?;
    let thumbnail_timeout_secs = parse_u64("MEMETRENDS_THUMBNAIL_TIMEOUT_SECS", "5")?;

    let trends_base_url = or_default("MEMETRENDS_TRENDS_BASE_URL", "https://serpapi.com/");
    let youtube_base_url =
        or_default("MEMETRENDS_YOUTUBE_BASE_URL", "https://www.googleapis.com/");
    let ytdlp_path = PathBuf::from(or_default("MEMETRENDS_YTDLP_PATH", "yt-dlp"));
    let user_agent = or_default("MEMETRENDS_USER_AGENT", "memetrends/0.1 (trend-research)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        serpapi_api_key,
        youtube_api_keys,
        request_timeout_secs,
        thumbnail_timeout_secs,
        trends_base_url,
        youtube_base_url,
        ytdlp_path,
        user_agent,
    })
}

/// Split a comma-separated key list, dropping blanks.
fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MEMETRENDS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
