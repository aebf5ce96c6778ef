use tracing::debug;

use super::{FlagDescriptor, PathKind, Scope};
use crate::command::{FlagError, FlagTarget};
use crate::config::KeyBinder;
use crate::Error;

/// A flag declaration waiting to be bound to a command.
///
/// Applying consumes the applicant, so each declaration binds at most one
/// command. The descriptor stays readable but cannot be applied on its own:
///
/// ```compile_fail
/// use dragon_flags::flag::{flag, string};
/// use dragon_flags::{Command, Registry};
///
/// let applicant = flag("output", string(""), []);
/// let mut registry = Registry::default();
/// applicant.descriptor().apply(&mut Command::new("a"), &mut registry)?;
/// applicant.descriptor().apply(&mut Command::new("b"), &mut registry)?;
/// # Ok::<(), dragon_flags::Error>(())
/// ```
#[derive(Debug, PartialEq)]
#[must_use = "applicants do nothing until applied to a command"]
pub struct Applicant {
    descriptor: FlagDescriptor,
}

impl Applicant {
    pub fn new(descriptor: FlagDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &FlagDescriptor {
        &self.descriptor
    }

    pub fn into_descriptor(self) -> FlagDescriptor {
        self.descriptor
    }

    /// Registers the flag on `target` and wires up its bindings.
    ///
    /// In order: registers the typed flag on the persistent or local flag
    /// set, looks it up again, binds it to the registry key, then marks it
    /// required and records its completion hint. The first failing step
    /// aborts the sequence and its error is returned unchanged.
    pub fn apply<T, B>(self, target: &mut T, binder: &mut B) -> Result<(), Error>
    where
        T: FlagTarget + ?Sized,
        B: KeyBinder + ?Sized,
    {
        self.descriptor.apply(target, binder)
    }
}

impl From<FlagDescriptor> for Applicant {
    fn from(descriptor: FlagDescriptor) -> Self {
        Self::new(descriptor)
    }
}

impl FlagDescriptor {
    /// Binds this flag to a command. Callers go through [`Applicant::apply`].
    pub(crate) fn apply<T, B>(&self, target: &mut T, binder: &mut B) -> Result<(), Error>
    where
        T: FlagTarget + ?Sized,
        B: KeyBinder + ?Sized,
    {
        let flags = match self.scope {
            Scope::Persistent => target.persistent_flags_mut(),
            Scope::Local => target.local_flags_mut(),
        };

        debug!(flag = %self.name, scope = ?self.scope, "registering flag");
        self.value_type.register(self, flags)?;

        let handle = flags
            .lookup(&self.name)
            .ok_or_else(|| FlagError::LookupFailed(self.name.clone()))?;

        if let Some(key) = &self.env_key {
            debug!(flag = %self.name, key = %key, "binding flag to registry key");
            binder.bind_flag(key, handle)?;
        }

        if self.mandatory {
            target.mark_flag_required(&self.name)?;
        }

        match &self.path_kind {
            PathKind::None => {}
            PathKind::Directory => target.mark_flag_dirname(&self.name)?,
            PathKind::Files(extensions) => target.mark_flag_filename(&self.name, extensions)?,
        }

        Ok(())
    }
}

/// Applies every applicant in order, stopping at the first error.
pub fn apply_all<I, T, B>(applicants: I, target: &mut T, binder: &mut B) -> Result<(), Error>
where
    I: IntoIterator<Item = Applicant>,
    T: FlagTarget + ?Sized,
    B: KeyBinder + ?Sized,
{
    for applicant in applicants {
        applicant.apply(target, binder)?;
    }
    Ok(())
}
