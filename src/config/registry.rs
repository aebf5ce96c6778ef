use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use toml::{Table, Value};
use tracing::debug;

use super::builder::RegistryBuilder;
use super::source::{lookup_value, merge_at_path, split_key};
use super::{ConfigError, KeyBinder};
use crate::command::FlagHandle;

/// Configuration values with flags bound to keys.
///
/// A key resolves, in order of precedence, to:
///
/// 1. the value of the flag bound to it, if the flag was explicitly set;
/// 2. the value loaded from the configuration sources;
/// 3. the default of the flag bound to it.
#[derive(Debug, Default)]
pub struct Registry {
    values: Table,
    bindings: BTreeMap<String, FlagHandle>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Creates a registry over already-merged values.
    pub fn from_table(values: Table) -> Self {
        Self {
            values,
            bindings: BTreeMap::new(),
        }
    }

    /// Returns `true` if a flag is bound to `key`.
    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    /// Returns the flag bound to `key`.
    pub fn bound_flag(&self, key: &str) -> Option<&FlagHandle> {
        self.bindings.get(key)
    }

    /// Resolves a dotted key.
    pub fn get(&self, key: &str) -> Option<Value> {
        let path = split_key(key)?;
        lookup_value(&self.effective(), &path).cloned()
    }

    /// Resolves a dotted key and deserializes its value.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        value.try_into().map_err(ConfigError::DeserializeError)
    }

    /// Deserializes every resolved value at once.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        Value::Table(self.effective())
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }

    /// Source values with bound flags layered in by precedence.
    fn effective(&self) -> Table {
        let mut table = self.values.clone();
        for (key, flag) in &self.bindings {
            let path: Vec<String> = key.split('.').map(String::from).collect();
            if flag.changed() || lookup_value(&table, &path).is_none() {
                merge_at_path(&mut table, &path, flag.value().to_toml());
            }
        }
        table
    }
}

impl KeyBinder for Registry {
    fn bind_flag(&mut self, key: &str, flag: FlagHandle) -> Result<(), ConfigError> {
        if split_key(key).is_none() {
            return Err(ConfigError::InvalidKey(key.to_string()));
        }
        if let Some(existing) = self.bindings.get(key) {
            if Arc::ptr_eq(existing, &flag) {
                return Ok(());
            }
            return Err(ConfigError::KeyAlreadyBound {
                key: key.to_string(),
                existing: existing.name().to_string(),
                flag: flag.name().to_string(),
            });
        }
        if let Some(existing) = self.bindings.keys().find(|bound| overlaps(bound, key)) {
            return Err(ConfigError::KeyShadowed {
                key: key.to_string(),
                existing: existing.clone(),
            });
        }

        debug!(key, flag = flag.name(), "bound config key");
        self.bindings.insert(key.to_string(), flag);
        Ok(())
    }
}

/// Returns `true` if one key is a dotted-path prefix of the other.
fn overlaps(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    long.strip_prefix(short)
        .is_some_and(|rest| rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{FlagSet, FlagValue};
    use serde::Deserialize;
    use std::time::Duration;

    fn flags() -> FlagSet {
        let mut flags = FlagSet::new();
        flags.register_string("level", None, "info", "").unwrap();
        flags.register_int("port", None, 8080, "").unwrap();
        flags
            .register_duration("timeout", None, Duration::from_secs(5), "")
            .unwrap();
        flags
    }

    fn registry(toml_str: &str) -> Registry {
        Registry::from_table(toml::from_str(toml_str).unwrap())
    }

    #[test]
    fn test_flag_default_is_lowest_precedence() {
        let flags = flags();
        let mut registry = registry("[log]\nlevel = \"warn\"");
        registry
            .bind_flag("log.level", flags.lookup("level").unwrap())
            .unwrap();
        registry
            .bind_flag("port", flags.lookup("port").unwrap())
            .unwrap();

        assert_eq!(registry.get("log.level"), Some(Value::String("warn".into())));
        assert_eq!(registry.get("port"), Some(Value::Integer(8080)));
    }

    #[test]
    fn test_changed_flag_overrides_sources() {
        let flags = flags();
        let mut registry = registry("[log]\nlevel = \"warn\"");
        let level = flags.lookup("level").unwrap();
        registry.bind_flag("log.level", level.clone()).unwrap();

        level.set(FlagValue::String("trace".into())).unwrap();

        assert_eq!(registry.get("log.level"), Some(Value::String("trace".into())));
        assert_eq!(registry.get_as::<String>("log.level").unwrap(), "trace");
    }

    #[test]
    fn test_rebinding_same_flag_is_noop() {
        let flags = flags();
        let mut registry = Registry::default();
        let port = flags.lookup("port").unwrap();

        registry.bind_flag("port", port.clone()).unwrap();
        registry.bind_flag("port", port).unwrap();

        assert!(registry.is_bound("port"));
    }

    #[test]
    fn test_binding_collision() {
        let flags = flags();
        let mut registry = Registry::default();
        registry
            .bind_flag("server", flags.lookup("port").unwrap())
            .unwrap();

        let err = registry
            .bind_flag("server", flags.lookup("level").unwrap())
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::KeyAlreadyBound { ref existing, ref flag, .. }
                if existing == "port" && flag == "level"
        ));
        assert_eq!(registry.bound_flag("server").unwrap().name(), "port");
    }

    #[test]
    fn test_nested_keys_cannot_both_be_bound() {
        let mut flags = flags();
        flags.register_string("server", None, "local", "").unwrap();
        let server = flags.lookup("server").unwrap();
        let port = flags.lookup("port").unwrap();

        let mut registry = Registry::default();
        registry.bind_flag("server", server.clone()).unwrap();
        let err = registry
            .bind_flag("server.port", port.clone())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::KeyShadowed { ref key, ref existing }
                if key == "server.port" && existing == "server"
        ));

        server.set(FlagValue::String("remote".into())).unwrap();
        assert_eq!(registry.get("server"), Some(Value::String("remote".into())));

        let mut registry = Registry::default();
        registry.bind_flag("server.port", port).unwrap();
        let err = registry.bind_flag("server", server).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::KeyShadowed { ref existing, .. } if existing == "server.port"
        ));
    }

    #[test]
    fn test_sibling_keys_with_shared_prefix() {
        let flags = flags();
        let mut registry = Registry::default();

        registry
            .bind_flag("log.level", flags.lookup("level").unwrap())
            .unwrap();
        registry
            .bind_flag("log.levels", flags.lookup("port").unwrap())
            .unwrap();

        assert!(overlaps("a", "a.b"));
        assert!(overlaps("a.b.c", "a.b"));
        assert!(!overlaps("a", "ab"));
        assert!(!overlaps("log.level", "log.levels"));
    }

    #[test]
    fn test_invalid_key() {
        let flags = flags();
        let mut registry = Registry::default();

        for key in ["", "a..b", "trailing."] {
            let err = registry
                .bind_flag(key, flags.lookup("port").unwrap())
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidKey(_)));
        }
    }

    #[test]
    fn test_get_as_missing_key() {
        let registry = Registry::default();
        assert!(matches!(
            registry.get_as::<String>("absent"),
            Err(ConfigError::MissingKey(_))
        ));
    }

    #[test]
    fn test_deserialize_with_flags() {
        #[derive(Debug, Deserialize)]
        struct Settings {
            name: String,
            port: i64,
            timeout: u64,
        }

        let flags = flags();
        let mut registry = registry("name = \"svc\"\nport = 9000");
        registry
            .bind_flag("port", flags.lookup("port").unwrap())
            .unwrap();
        registry
            .bind_flag("timeout", flags.lookup("timeout").unwrap())
            .unwrap();

        let settings: Settings = registry.deserialize().unwrap();

        assert_eq!(settings.name, "svc");
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.timeout, 5000);
    }
}
