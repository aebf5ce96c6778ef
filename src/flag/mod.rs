//! Declarative flag descriptions.
//!
//! A flag is declared once with [`flag`], a [`ValueType`] constructor and a
//! list of [`FlagOption`]s. Nothing touches a command until the returned
//! [`Applicant`] is applied:
//!
//! ```
//! use dragon_flags::flag::{self, env, mandatory, persistent};
//! use dragon_flags::{Command, Registry};
//!
//! let config = flag::flag("config", flag::string("default.yaml"), [persistent(), env(), mandatory()]);
//!
//! let mut cmd = Command::new("app");
//! let mut registry = Registry::default();
//! config.apply(&mut cmd, &mut registry)?;
//!
//! assert!(cmd.persistent_flags().lookup("config").is_some());
//! assert!(cmd.is_required("config"));
//! assert!(registry.is_bound("config"));
//! # Ok::<(), dragon_flags::Error>(())
//! ```

mod applicant;
mod options;
mod value;

pub use applicant::{apply_all, Applicant};
pub use options::{
    abbr, description, dirname, env, env_name, filename, mandatory, persistent, FlagOption,
};
pub use value::{
    boolean, duration, float, int, string, string_slice, uint, Bool, Dur, Float, Int, Str,
    StrSlice, Uint, ValueType,
};

/// Where a flag is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Visible only to the owning command.
    #[default]
    Local,
    /// Inherited by subcommands.
    Persistent,
}

/// Filesystem completion hint for a flag's value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PathKind {
    #[default]
    None,
    Directory,
    /// A file with one of the given extensions; empty means any file.
    Files(Vec<String>),
}

/// Everything known about a flag before it is bound to a command.
#[derive(Debug)]
pub struct FlagDescriptor {
    name: String,
    scope: Scope,
    mandatory: bool,
    path_kind: PathKind,
    abbreviation: Option<char>,
    description: String,
    env_key: Option<String>,
    value_type: Box<dyn ValueType>,
}

impl FlagDescriptor {
    /// Creates a local, optional descriptor with no hints or bindings.
    pub fn new(name: impl Into<String>, value_type: impl ValueType + 'static) -> Self {
        Self {
            name: name.into(),
            scope: Scope::default(),
            mandatory: false,
            path_kind: PathKind::default(),
            abbreviation: None,
            description: String::new(),
            env_key: None,
            value_type: Box::new(value_type),
        }
    }

    /// Applies a single option. Later options overwrite earlier ones that
    /// target the same attribute.
    pub fn with(mut self, option: FlagOption) -> Self {
        option.apply_to(&mut self);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    pub fn path_kind(&self) -> &PathKind {
        &self.path_kind
    }

    pub fn abbreviation(&self) -> Option<char> {
        self.abbreviation
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn env_key(&self) -> Option<&str> {
        self.env_key.as_deref()
    }

    pub fn value_type(&self) -> &dyn ValueType {
        self.value_type.as_ref()
    }
}

impl PartialEq for FlagDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.scope == other.scope
            && self.mandatory == other.mandatory
            && self.path_kind == other.path_kind
            && self.abbreviation == other.abbreviation
            && self.description == other.description
            && self.env_key == other.env_key
            && self.value_type.default_value() == other.value_type.default_value()
    }
}

/// Declares a flag.
///
/// Options are applied in order. The returned [`Applicant`] registers the
/// flag when applied; an invalid name is only reported at that point.
pub fn flag(
    name: impl Into<String>,
    value_type: impl ValueType + 'static,
    options: impl IntoIterator<Item = FlagOption>,
) -> Applicant {
    let descriptor = options
        .into_iter()
        .fold(FlagDescriptor::new(name, value_type), FlagDescriptor::with);
    Applicant::new(descriptor)
}
