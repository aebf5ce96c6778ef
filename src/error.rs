use crate::command::FlagError;
use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the dragon-flags library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("flag error: {0}")]
    Flag(#[from] FlagError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
