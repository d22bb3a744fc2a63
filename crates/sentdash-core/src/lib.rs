pub mod app_config;
pub mod companies;
pub mod config;
pub mod tweets;

pub use app_config::{AppConfig, Environment, MAX_MOCK_TWEETS_PER_COMPANY};
pub use companies::{load_companies, parse_companies, CompaniesFile, CompanyConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use tweets::{RecordError, SentimentLabel, TweetRecord, DEFAULT_SENTIMENT_CONFIDENCE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read companies file {path}: {source}")]
    CompaniesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse companies file: {0}")]
    CompaniesFileParse(#[from] serde_yaml::Error),

    #[error("companies config validation failed: {0}")]
    Validation(String),
}
