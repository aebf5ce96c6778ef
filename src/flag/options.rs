//! Option combinators for [`flag`](super::flag).

use super::{FlagDescriptor, PathKind, Scope};

/// A single change to a [`FlagDescriptor`].
///
/// Each variant touches exactly one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagOption {
    Persistent,
    Mandatory,
    Description(String),
    Abbr(char),
    /// Binds the flag to a registry key equal to its own name.
    Env,
    EnvName(String),
    Dirname,
    Filename(Vec<String>),
}

impl FlagOption {
    pub fn apply_to(self, flag: &mut FlagDescriptor) {
        match self {
            FlagOption::Persistent => flag.scope = Scope::Persistent,
            FlagOption::Mandatory => flag.mandatory = true,
            FlagOption::Description(text) => flag.description = text,
            FlagOption::Abbr(c) => flag.abbreviation = Some(c),
            FlagOption::Env => flag.env_key = Some(flag.name.clone()),
            FlagOption::EnvName(key) => flag.env_key = Some(key),
            FlagOption::Dirname => flag.path_kind = PathKind::Directory,
            FlagOption::Filename(extensions) => flag.path_kind = PathKind::Files(extensions),
        }
    }
}

/// Registers the flag on the persistent flag set.
pub fn persistent() -> FlagOption {
    FlagOption::Persistent
}

/// Requires the flag to be set before the command runs.
pub fn mandatory() -> FlagOption {
    FlagOption::Mandatory
}

pub fn description(text: impl Into<String>) -> FlagOption {
    FlagOption::Description(text.into())
}

/// Sets the single-character shorthand.
pub fn abbr(c: char) -> FlagOption {
    FlagOption::Abbr(c)
}

/// Mirrors the flag into the registry under its own name.
pub fn env() -> FlagOption {
    FlagOption::Env
}

/// Mirrors the flag into the registry under `key`.
pub fn env_name(key: impl Into<String>) -> FlagOption {
    FlagOption::EnvName(key.into())
}

/// Completes the flag's value as a directory.
pub fn dirname() -> FlagOption {
    FlagOption::Dirname
}

/// Completes the flag's value as a file with one of `extensions`.
///
/// No extensions means any file.
pub fn filename<I, S>(extensions: I) -> FlagOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FlagOption::Filename(extensions.into_iter().map(Into::into).collect())
}
