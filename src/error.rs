use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitnessError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Evolution error: {0}")]
    Evolution(String),

    #[error("Config source error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FitnessError>;
