//! Declarative command-line flag registration.
//!
//! Flags are declared with [`flag::flag`] and a list of options, collected as
//! [`Applicant`]s, and applied to a [`Command`] at startup. Applying a flag
//! registers it on the command's local or persistent [`FlagSet`], binds it
//! into a configuration [`Registry`], marks it required and records its
//! completion hint.

pub mod command;
pub mod config;
mod error;
pub mod flag;

pub use command::{Command, CommandBuilder, FlagError, FlagHandle, FlagSet, FlagTarget, FlagValue};
pub use config::{ConfigError, KeyBinder, Registry};
pub use error::Error;
pub use flag::{Applicant, FlagDescriptor, FlagOption, PathKind, Scope, ValueType};
