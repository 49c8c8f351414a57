use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.config_dir.is_none());
    assert_eq!(cfg.games_path.to_str(), Some("games.json"));
    assert_eq!(cfg.request_timeout_secs, 15);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.max_concurrent_games, 3);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("CARDBOARD_BIND_ADDR", "0.0.0.0:9000");
    map.insert("CARDBOARD_CONFIG_DIR", "/etc/cardboard");
    map.insert("CARDBOARD_GAMES_PATH", "/var/lib/cardboard/games.json");
    map.insert("CARDBOARD_REQUEST_TIMEOUT_SECS", "30");
    map.insert("CARDBOARD_USER_AGENT", "custom-agent/2.0");
    map.insert("CARDBOARD_MAX_CONCURRENT_GAMES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:9000");
    assert_eq!(
        cfg.config_dir.as_deref().and_then(|p| p.to_str()),
        Some("/etc/cardboard")
    );
    assert_eq!(
        cfg.games_path.to_str(),
        Some("/var/lib/cardboard/games.json")
    );
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.max_concurrent_games, 5);
}

#[test]
fn build_app_config_treats_blank_config_dir_as_unset() {
    let mut map = HashMap::new();
    map.insert("CARDBOARD_CONFIG_DIR", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.config_dir.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("CARDBOARD_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDBOARD_BIND_ADDR"),
        "expected InvalidEnvVar(CARDBOARD_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("CARDBOARD_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDBOARD_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CARDBOARD_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("CARDBOARD_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDBOARD_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CARDBOARD_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_concurrency() {
    let mut map = HashMap::new();
    map.insert("CARDBOARD_MAX_CONCURRENT_GAMES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDBOARD_MAX_CONCURRENT_GAMES"),
        "expected InvalidEnvVar(CARDBOARD_MAX_CONCURRENT_GAMES), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_numeric_concurrency() {
    let mut map = HashMap::new();
    map.insert("CARDBOARD_MAX_CONCURRENT_GAMES", "many");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDBOARD_MAX_CONCURRENT_GAMES"),
        "expected InvalidEnvVar(CARDBOARD_MAX_CONCURRENT_GAMES), got: {result:?}"
    );
}
