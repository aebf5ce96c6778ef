use toml::{Table, Value};

use super::ConfigError;

/// A value contributed by a source, placed at `path` in the merged tree.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub path: Vec<String>,
    pub value: Value,
}

impl ConfigEntry {
    pub fn root(table: Table) -> Self {
        Self {
            path: Vec::new(),
            value: Value::Table(table),
        }
    }

    pub fn at_path(path: Vec<String>, value: Value) -> Self {
        Self { path, value }
    }
}

/// A layer of configuration values for a [`Registry`](super::Registry).
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError>;
}

/// Splits a dotted key into its segments.
///
/// Returns `None` for an empty key or one with an empty segment.
pub(crate) fn split_key(key: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

/// Walks `path` through nested tables.
pub(crate) fn lookup_value<'a, S: AsRef<str>>(table: &'a Table, path: &[S]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = table.get(first.as_ref())?;
    for part in rest {
        current = current.as_table()?.get(part.as_ref())?;
    }
    Some(current)
}

/// Merges `value` into `table` at `path`, creating intermediate tables.
///
/// Tables merge recursively; any other value replaces what was there.
pub fn merge_at_path(table: &mut Table, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        if let Value::Table(overlay) = value {
            deep_merge(table, overlay);
        }
        return;
    };

    if rest.is_empty() {
        match (table.get_mut(first), &value) {
            (Some(Value::Table(base)), Value::Table(overlay)) => {
                deep_merge(base, overlay.clone());
            }
            _ => {
                table.insert(first.clone(), value);
            }
        }
        return;
    }

    if !matches!(table.get(first), Some(Value::Table(_))) {
        table.insert(first.clone(), Value::Table(Table::new()));
    }

    if let Some(Value::Table(nested)) = table.get_mut(first) {
        merge_at_path(nested, rest, value);
    }
}

fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(key: &str) -> Vec<String> {
        key.split('.').map(String::from).collect()
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("server.port"), Some(vec!["server", "port"]));
        assert_eq!(split_key("config"), Some(vec!["config"]));
        assert_eq!(split_key(""), None);
        assert_eq!(split_key("server..port"), None);
        assert_eq!(split_key(".port"), None);
    }

    #[test]
    fn test_merge_creates_nested_tables() {
        let mut table = Table::new();
        merge_at_path(&mut table, &path("server.http.port"), Value::Integer(80));

        assert_eq!(
            lookup_value(&table, &["server", "http", "port"]),
            Some(&Value::Integer(80))
        );
    }

    #[test]
    fn test_merge_replaces_scalar_with_table() {
        let mut table: Table = toml::from_str("server = \"local\"").unwrap();
        merge_at_path(&mut table, &path("server.port"), Value::Integer(80));

        assert_eq!(
            lookup_value(&table, &["server", "port"]),
            Some(&Value::Integer(80))
        );
    }

    #[test]
    fn test_merge_root_table_is_deep() {
        let mut table: Table = toml::from_str("[server]\nhost = \"a\"\nport = 1").unwrap();
        let overlay: Table = toml::from_str("[server]\nport = 2").unwrap();
        merge_at_path(&mut table, &[], Value::Table(overlay));

        assert_eq!(table["server"]["host"].as_str(), Some("a"));
        assert_eq!(table["server"]["port"].as_integer(), Some(2));
    }

    #[test]
    fn test_lookup_through_scalar_fails() {
        let table: Table = toml::from_str("name = \"x\"").unwrap();
        assert_eq!(lookup_value(&table, &["name", "inner"]), None);
        assert_eq!(lookup_value::<&str>(&table, &[]), None);
    }
}
