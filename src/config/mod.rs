//! Configuration registry that flags can be bound into.

mod builder;
mod env;
mod error;
mod file;
mod registry;
mod source;

pub use builder::RegistryBuilder;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use registry::Registry;
pub use source::{ConfigEntry, ConfigSource};

use crate::command::FlagHandle;

/// Something flags can be mirrored into under a configuration key.
pub trait KeyBinder {
    /// Makes reads of `key` resolve through `flag`.
    fn bind_flag(&mut self, key: &str, flag: FlagHandle) -> Result<(), ConfigError>;
}
