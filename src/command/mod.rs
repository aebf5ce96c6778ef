//! Commands and the flag sets they own.

mod builder;
mod error;
mod flag_set;

use std::collections::{BTreeMap, BTreeSet};

pub use builder::CommandBuilder;
pub use error::FlagError;
pub use flag_set::{Completion, Flag, FlagHandle, FlagSet, FlagValue};

/// The command surface a flag declaration is applied to.
///
/// [`Command`] is the in-crate implementation; other command frameworks can
/// be targeted by implementing this trait.
pub trait FlagTarget {
    /// Flags visible only to this command.
    fn local_flags_mut(&mut self) -> &mut FlagSet;

    /// Flags inherited by subcommands.
    fn persistent_flags_mut(&mut self) -> &mut FlagSet;

    fn mark_flag_required(&mut self, name: &str) -> Result<(), FlagError>;

    fn mark_flag_dirname(&mut self, name: &str) -> Result<(), FlagError>;

    fn mark_flag_filename(&mut self, name: &str, extensions: &[String]) -> Result<(), FlagError>;
}

/// A command with local and persistent flags.
#[derive(Debug, Default)]
pub struct Command {
    name: String,
    local: FlagSet,
    persistent: FlagSet,
    required: BTreeSet<String>,
    completions: BTreeMap<String, Completion>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a builder that applies flag declarations to a new command.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_flags(&self) -> &FlagSet {
        &self.local
    }

    pub fn persistent_flags(&self) -> &FlagSet {
        &self.persistent
    }

    /// Looks up a flag by name, local flags first.
    pub fn lookup(&self, name: &str) -> Option<FlagHandle> {
        self.local
            .lookup(name)
            .or_else(|| self.persistent.lookup(name))
    }

    /// Names of flags that must be set before the command runs.
    pub fn required_flags(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Returns the completion hint recorded for a flag.
    pub fn completion(&self, name: &str) -> Option<&Completion> {
        self.completions.get(name)
    }

    /// Assigns a parsed value to a flag, marking it as changed.
    pub fn set_flag(&self, name: &str, value: FlagValue) -> Result<(), FlagError> {
        let flag = self
            .lookup(name)
            .ok_or_else(|| FlagError::NotFound(name.to_string()))?;
        flag.set(value)
    }

    /// Fails if any required flag has not been set.
    ///
    /// The error lists every missing flag, in name order.
    pub fn validate_required_flags(&self) -> Result<(), FlagError> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|name| !self.lookup(name).is_some_and(|flag| flag.changed()))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FlagError::MissingRequired(missing))
        }
    }

    fn ensure_flag(&self, name: &str) -> Result<(), FlagError> {
        match self.lookup(name) {
            Some(_) => Ok(()),
            None => Err(FlagError::NotFound(name.to_string())),
        }
    }
}

impl FlagTarget for Command {
    fn local_flags_mut(&mut self) -> &mut FlagSet {
        &mut self.local
    }

    fn persistent_flags_mut(&mut self) -> &mut FlagSet {
        &mut self.persistent
    }

    fn mark_flag_required(&mut self, name: &str) -> Result<(), FlagError> {
        self.ensure_flag(name)?;
        self.required.insert(name.to_string());
        Ok(())
    }

    fn mark_flag_dirname(&mut self, name: &str) -> Result<(), FlagError> {
        self.ensure_flag(name)?;
        self.completions
            .insert(name.to_string(), Completion::Directory);
        Ok(())
    }

    fn mark_flag_filename(&mut self, name: &str, extensions: &[String]) -> Result<(), FlagError> {
        self.ensure_flag(name)?;
        self.completions
            .insert(name.to_string(), Completion::Files(extensions.to_vec()));
        Ok(())
    }
}
