use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),

    #[error("invalid config key: {0:?}")]
    InvalidKey(String),

    #[error("config key not found: {0}")]
    MissingKey(String),

    #[error("config key '{key}' is already bound to flag '{existing}', cannot bind flag '{flag}'")]
    KeyAlreadyBound {
        key: String,
        existing: String,
        flag: String,
    },

    #[error("config key '{key}' overlaps key '{existing}', which is already bound")]
    KeyShadowed { key: String, existing: String },
}
