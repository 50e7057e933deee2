use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("Please enter a valid API key (use --api-key or set {env})")]
    MissingCredential { env: String },

    #[error("Unknown category: '{name}' - expected one of causal, comparative, procedural, predictive, descriptive, evaluative, general")]
    UnknownCategory { name: String },

    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: '{value}' - {message}")]
    InvalidConfigValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Completion API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Completion API returned no content")]
    EmptyCompletion,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("GUI error: {0}")]
    Gui(String),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

impl OptimizerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCredential { .. } => 2,
            Self::UnknownCategory { .. } => 3,
            Self::ConfigKeyNotFound { .. } | Self::InvalidConfigValue { .. } => 4,
            Self::ConfigParse { .. } => 5,
            Self::Api { .. } | Self::EmptyCompletion | Self::Http(_) => 6,
            _ => 1,
        }
    }
}
