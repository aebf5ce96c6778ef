use std::path::Path;

use tracing::debug;

use super::env::EnvSource;
use super::file::FileSource;
use super::source::{merge_at_path, ConfigSource};
use super::{ConfigError, Registry};

/// Builder for a [`Registry`] layered from TOML files and environment
/// variables.
///
/// Sources are merged in registration order, later ones overriding earlier
/// ones. Nested tables merge recursively; other values (arrays included) are
/// replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use dragon_flags::Registry;
///
/// // defaults -> environment -> local overrides
/// let registry = Registry::builder()
///     .with_file("config/default.toml", true)
///     .with_env("MYAPP", "__")
///     .with_file("config/local.toml", false)
///     .build()?;
///
/// let level: String = registry.get_as("log.level")?;
/// # Ok::<(), dragon_flags::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct RegistryBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a TOML file.
    ///
    /// If `required` is `true` the build fails when the file doesn't exist;
    /// missing optional files are skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds environment variables named `PREFIX<separator>KEY...`.
    ///
    /// `MYAPP__LOG__LEVEL=debug` with prefix `MYAPP` and separator `__`
    /// becomes `log.level = "debug"`. Segments are lowercased and values are
    /// coerced to integer, float, boolean, or string.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds any other configuration layer.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads and merges every source.
    pub fn build(self) -> Result<Registry, ConfigError> {
        let mut merged = toml::Table::new();

        for source in &self.sources {
            let entries = source.entries()?;
            debug!(source = ?source, entries = entries.len(), "merging config source");
            for entry in entries {
                merge_at_path(&mut merged, &entry.path, entry.value);
            }
        }

        Ok(Registry::from_table(merged))
    }
}
