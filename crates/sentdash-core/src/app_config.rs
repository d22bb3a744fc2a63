use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Upper bound on synthetic tweets generated per company.
pub const MAX_MOCK_TWEETS_PER_COMPANY: usize = 100_000;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub companies_path: PathBuf,
    /// Default trailing window, in days, used when a caller does not pass one.
    pub window_days: u32,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub mock_tweets_per_company: usize,
    pub mock_history_days: u32,
    pub mock_seed: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("companies_path", &self.companies_path)
            .field("database_url", &"[redacted]")
            .field("window_days", &self.window_days)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("mock_tweets_per_company", &self.mock_tweets_per_company)
            .field("mock_history_days", &self.mock_history_days)
            .field("mock_seed", &self.mock_seed)
            .finish()
    }
}
