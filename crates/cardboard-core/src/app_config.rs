use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// External registry directory; bundled defaults are used when unset or
    /// when a file is missing there.
    pub config_dir: Option<PathBuf>,
    pub games_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Number of games checked at once. Stores within a game are not capped.
    pub max_concurrent_games: usize,
}
