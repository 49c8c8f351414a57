use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

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

    let bind_addr = parse_addr("CARDBOARD_BIND_ADDR", "127.0.0.1:8080")?;
    let log_level = or_default("CARDBOARD_LOG_LEVEL", "info");
    let config_dir = lookup("CARDBOARD_CONFIG_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let games_path = PathBuf::from(or_default("CARDBOARD_GAMES_PATH", "games.json"));
    let request_timeout_secs = parse_u64("CARDBOARD_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("CARDBOARD_USER_AGENT", DEFAULT_USER_AGENT);
    let max_concurrent_games = parse_usize("CARDBOARD_MAX_CONCURRENT_GAMES", "3")?;

    if request_timeout_secs == 0 {
        return Err(invalid(
            "CARDBOARD_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    if max_concurrent_games == 0 {
        return Err(invalid(
            "CARDBOARD_MAX_CONCURRENT_GAMES",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        bind_addr,
        log_level,
        config_dir,
        games_path,
        request_timeout_secs,
        user_agent,
        max_concurrent_games,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
