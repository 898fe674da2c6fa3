pub mod app_config;
pub mod config;
pub mod quotes;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use quotes::{normalize_text, NewQuote, Quote, QuoteInput, EMPTY_TEXT_SENTINEL};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid quote input: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
