use thiserror::Error;

/// Errors raised by a command or one of its flag sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FlagError {
    #[error("invalid flag name: {0:?}")]
    InvalidName(String),

    #[error("invalid shorthand {shorthand:?} for flag {name}")]
    InvalidShorthand { name: String, shorthand: char },

    #[error("flag redefined: {0}")]
    DuplicateFlag(String),

    #[error("unable to redefine {shorthand:?} shorthand for flag {name}: already used by {existing}")]
    DuplicateShorthand {
        name: String,
        shorthand: char,
        existing: String,
    },

    #[error("no such flag: {0}")]
    NotFound(String),

    #[error("flag {0} was registered but could not be looked up")]
    LookupFailed(String),

    #[error("flag {name} holds {expected} values, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("required flag(s) not set: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}
