use tracing::debug;

use super::Command;
use crate::config::KeyBinder;
use crate::flag::{apply_all, Applicant};
use crate::Error;

/// Collects flag declarations and applies them to a new [`Command`].
///
/// ## Example
///
/// ```
/// use dragon_flags::flag::{self, abbr, env, persistent};
/// use dragon_flags::{Command, Registry};
///
/// let mut registry = Registry::default();
/// let cmd = Command::builder("serve")
///     .with_flag(flag::flag("port", flag::int(8080), [abbr('p'), env()]))
///     .with_flag(flag::flag("verbose", flag::boolean(false), [persistent()]))
///     .build(&mut registry)?;
///
/// assert_eq!(cmd.name(), "serve");
/// assert!(cmd.local_flags().lookup("port").is_some());
/// assert!(registry.is_bound("port"));
/// # Ok::<(), dragon_flags::Error>(())
/// ```
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct CommandBuilder {
    name: String,
    applicants: Vec<Applicant>,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            applicants: Vec::new(),
        }
    }

    pub fn with_flag(mut self, applicant: Applicant) -> Self {
        self.applicants.push(applicant);
        self
    }

    pub fn with_flags(mut self, applicants: impl IntoIterator<Item = Applicant>) -> Self {
        self.applicants.extend(applicants);
        self
    }

    /// Creates the command and applies every collected flag in order.
    ///
    /// Returns the first error raised by the command or by `binder`.
    pub fn build<B: KeyBinder + ?Sized>(self, binder: &mut B) -> Result<Command, Error> {
        let mut cmd = Command::new(self.name);
        debug!(command = cmd.name(), flags = self.applicants.len(), "applying flags");
        apply_all(self.applicants, &mut cmd, binder)?;
        Ok(cmd)
    }
}
