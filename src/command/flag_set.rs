//! Typed flag storage for a single command scope.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use toml::Value;

use super::FlagError;

/// A typed flag value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    String(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Duration(Duration),
    StringSlice(Vec<String>),
}

impl FlagValue {
    /// Returns the name of the value's type.
    pub fn kind(&self) -> &'static str {
        match self {
            FlagValue::String(_) => "string",
            FlagValue::Bool(_) => "bool",
            FlagValue::Int(_) => "int",
            FlagValue::Uint(_) => "uint",
            FlagValue::Float(_) => "float",
            FlagValue::Duration(_) => "duration",
            FlagValue::StringSlice(_) => "stringSlice",
        }
    }

    /// Converts the value into its configuration representation.
    ///
    /// Durations become whole milliseconds, truncating any sub-millisecond
    /// remainder. Unsigned values larger than `i64::MAX` saturate.
    pub fn to_toml(&self) -> Value {
        match self {
            FlagValue::String(s) => Value::String(s.clone()),
            FlagValue::Bool(b) => Value::Boolean(*b),
            FlagValue::Int(i) => Value::Integer(*i),
            FlagValue::Uint(u) => Value::Integer(i64::try_from(*u).unwrap_or(i64::MAX)),
            FlagValue::Float(f) => Value::Float(*f),
            FlagValue::Duration(d) => {
                Value::Integer(i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            }
            FlagValue::StringSlice(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::String(s) => f.write_str(s),
            FlagValue::Bool(b) => write!(f, "{b}"),
            FlagValue::Int(i) => write!(f, "{i}"),
            FlagValue::Uint(u) => write!(f, "{u}"),
            FlagValue::Float(x) => write!(f, "{x}"),
            FlagValue::Duration(d) => write!(f, "{d:?}"),
            FlagValue::StringSlice(items) => write!(f, "[{}]", items.join(",")),
        }
    }
}

/// Shell completion hint recorded for a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Directory,
    /// Files restricted to the given extensions; empty means any file.
    Files(Vec<String>),
}

#[derive(Debug)]
struct FlagState {
    value: FlagValue,
    changed: bool,
}

/// A registered flag.
///
/// Flags are shared through [`FlagHandle`] so that a configuration registry
/// can observe the value a command later receives.
#[derive(Debug)]
pub struct Flag {
    name: String,
    shorthand: Option<char>,
    usage: String,
    default: FlagValue,
    state: RwLock<FlagState>,
}

/// Shared reference to a registered flag.
pub type FlagHandle = Arc<Flag>;

impl Flag {
    fn new(name: &str, shorthand: Option<char>, usage: &str, default: FlagValue) -> Self {
        Self {
            name: name.to_string(),
            shorthand,
            usage: usage.to_string(),
            state: RwLock::new(FlagState {
                value: default.clone(),
                changed: false,
            }),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shorthand(&self) -> Option<char> {
        self.shorthand
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn default_value(&self) -> &FlagValue {
        &self.default
    }

    /// Returns the current value, which is the default until the flag is set.
    pub fn value(&self) -> FlagValue {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .clone()
    }

    /// Returns `true` once a value has been assigned explicitly.
    pub fn changed(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .changed
    }

    /// Assigns a value of the flag's type and marks the flag as changed.
    pub fn set(&self, value: FlagValue) -> Result<(), FlagError> {
        if value.kind() != self.default.kind() {
            return Err(FlagError::TypeMismatch {
                name: self.name.clone(),
                expected: self.default.kind(),
                actual: value.kind(),
            });
        }
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.value = value;
        state.changed = true;
        Ok(())
    }
}

/// A collection of uniquely named flags.
#[derive(Debug, Default)]
pub struct FlagSet {
    flags: BTreeMap<String, FlagHandle>,
    shorthands: BTreeMap<char, String>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_string(
        &mut self,
        name: &str,
        short: Option<char>,
        default: impl Into<String>,
        usage: &str,
    ) -> Result<(), FlagError> {
        self.add(name, short, usage, FlagValue::String(default.into()))
    }

    pub fn register_bool(
        &mut self,
        name: &str,
        short: Option<char>,
        default: bool,
        usage: &str,
    ) -> Result<(), FlagError> {
        self.add(name, short, usage, FlagValue::Bool(default))
    }

    pub fn register_int(
        &mut self,
        name: &str,
        short: Option<char>,
        default: i64,
        usage: &str,
    ) -> Result<(), FlagError> {
        self.add(name, short, usage, FlagValue::Int(default))
    }

    pub fn register_uint(
        &mut self,
        name: &str,
        short: Option<char>,
        default: u64,
        usage: &str,
    ) -> Result<(), FlagError> {
        self.add(name, short, usage, FlagValue::Uint(default))
    }

    pub fn register_float(
        &mut self,
        name: &str,
        short: Option<char>,
        default: f64,
        usage: &str,
    ) -> Result<(), FlagError> {
        self.add(name, short, usage, FlagValue::Float(default))
    }

    pub fn register_duration(
        &mut self,
        name: &str,
        short: Option<char>,
        default: Duration,
        usage: &str,
    ) -> Result<(), FlagError> {
        self.add(name, short, usage, FlagValue::Duration(default))
    }

    pub fn register_string_slice(
        &mut self,
        name: &str,
        short: Option<char>,
        default: Vec<String>,
        usage: &str,
    ) -> Result<(), FlagError> {
        self.add(name, short, usage, FlagValue::StringSlice(default))
    }

    /// Returns the flag registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<FlagHandle> {
        self.flags.get(name).cloned()
    }

    /// Returns the flag registered under the shorthand `c`.
    pub fn lookup_shorthand(&self, c: char) -> Option<FlagHandle> {
        self.shorthands.get(&c).and_then(|name| self.lookup(name))
    }

    /// Iterates over flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &FlagHandle> {
        self.flags.values()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    fn add(
        &mut self,
        name: &str,
        short: Option<char>,
        usage: &str,
        default: FlagValue,
    ) -> Result<(), FlagError> {
        if name.is_empty() || name.starts_with('-') || name.contains(char::is_whitespace) {
            return Err(FlagError::InvalidName(name.to_string()));
        }
        if self.flags.contains_key(name) {
            return Err(FlagError::DuplicateFlag(name.to_string()));
        }
        if let Some(c) = short {
            if c == '-' || c.is_whitespace() || c.is_control() {
                return Err(FlagError::InvalidShorthand {
                    name: name.to_string(),
                    shorthand: c,
                });
            }
            if let Some(existing) = self.shorthands.get(&c) {
                return Err(FlagError::DuplicateShorthand {
                    name: name.to_string(),
                    shorthand: c,
                    existing: existing.clone(),
                });
            }
            self.shorthands.insert(c, name.to_string());
        }
        let flag = Flag::new(name, short, usage, default);
        self.flags.insert(name.to_string(), Arc::new(flag));
        Ok(())
    }
}
