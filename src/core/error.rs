use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid genome parameter: {0}")]
    InvalidParameter(String),

    #[error("No decision is awaiting an outcome")]
    NoPendingTurn,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
