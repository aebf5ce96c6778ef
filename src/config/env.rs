//! Environment variable configuration source.

use toml::Value;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Reads `PREFIX<sep>SECTION<sep>KEY` variables as `section.key`.
///
/// Path segments are lowercased and values are coerced to the most specific
/// TOML scalar: boolean, integer, float, then string.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }

    fn entries_from<I>(&self, vars: I) -> Vec<ConfigEntry>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);

        vars.into_iter()
            .filter_map(|(key, value)| {
                let path_str = key.strip_prefix(&prefix_with_sep)?;
                if path_str.is_empty() {
                    return None;
                }
                let path: Vec<String> = path_str
                    .split(&self.separator)
                    .map(str::to_lowercase)
                    .collect();
                if path.iter().any(String::is_empty) {
                    return None;
                }
                Some(ConfigEntry::at_path(path, coerce_value(&value)))
            })
            .collect()
    }
}

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        Ok(self.entries_from(std::env::vars()))
    }
}

fn coerce_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    if s.contains('.') {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_prefixed_vars_become_paths() {
        let source = EnvSource::new("APP", "__");
        let entries = source.entries_from(vars(&[
            ("APP__SERVER__PORT", "8080"),
            ("APP__LOG_LEVEL", "debug"),
            ("OTHER__PORT", "1"),
            ("APP__", "ignored"),
            ("APP__A____B", "ignored"),
        ]));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, vec!["server", "port"]);
        assert_eq!(entries[0].value, Value::Integer(8080));
        assert_eq!(entries[1].path, vec!["log_level"]);
        assert_eq!(entries[1].value, Value::String("debug".into()));
    }

    #[test]
    fn test_coercion() {
        assert_eq!(coerce_value("TRUE"), Value::Boolean(true));
        assert_eq!(coerce_value("false"), Value::Boolean(false));
        assert_eq!(coerce_value("-12"), Value::Integer(-12));
        assert_eq!(coerce_value("1.5"), Value::Float(1.5));
        assert_eq!(coerce_value("1.2.3"), Value::String("1.2.3".into()));
        assert_eq!(coerce_value("-"), Value::String("-".into()));
    }

    #[test]
    #[should_panic(expected = "separator must not be empty")]
    fn test_empty_separator_panics() {
        EnvSource::new("APP", "");
    }
}
