//! Typed flag constructors.

use std::fmt;
use std::time::Duration;

use super::FlagDescriptor;
use crate::command::{FlagError, FlagSet, FlagValue};

/// Registers one typed flag on a flag set.
///
/// Implementations must register under exactly [`FlagDescriptor::name`],
/// pass the shorthand and description through, and return any flag-set
/// error unchanged.
pub trait ValueType: fmt::Debug + Send + Sync {
    /// The value the flag holds until it is set.
    fn default_value(&self) -> FlagValue;

    fn register(&self, flag: &FlagDescriptor, flags: &mut FlagSet) -> Result<(), FlagError>;
}

macro_rules! value_type {
    ($(#[$doc:meta])* $ty:ident($inner:ty), $ctor:ident, $variant:ident, $register:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty($inner);

        $(#[$doc])*
        pub fn $ctor(default: impl Into<$inner>) -> $ty {
            $ty(default.into())
        }

        impl ValueType for $ty {
            fn default_value(&self) -> FlagValue {
                FlagValue::$variant(self.0.clone())
            }

            fn register(
                &self,
                flag: &FlagDescriptor,
                flags: &mut FlagSet,
            ) -> Result<(), FlagError> {
                flags.$register(
                    flag.name(),
                    flag.abbreviation(),
                    self.0.clone(),
                    flag.description(),
                )
            }
        }
    };
}

value_type!(
    /// A string flag.
    Str(String), string, String, register_string
);
value_type!(
    /// A boolean flag.
    Bool(bool), boolean, Bool, register_bool
);
value_type!(
    /// A signed integer flag.
    Int(i64), int, Int, register_int
);
value_type!(
    /// An unsigned integer flag.
    Uint(u64), uint, Uint, register_uint
);
value_type!(
    /// A floating point flag.
    Float(f64), float, Float, register_float
);
value_type!(
    /// A duration flag.
    Dur(Duration), duration, Duration, register_duration
);

/// A flag holding a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrSlice(Vec<String>);

/// A flag holding a list of strings.
pub fn string_slice<I, S>(default: I) -> StrSlice
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    StrSlice(default.into_iter().map(Into::into).collect())
}

impl ValueType for StrSlice {
    fn default_value(&self) -> FlagValue {
        FlagValue::StringSlice(self.0.clone())
    }

    fn register(&self, flag: &FlagDescriptor, flags: &mut FlagSet) -> Result<(), FlagError> {
        flags.register_string_slice(
            flag.name(),
            flag.abbreviation(),
            self.0.clone(),
            flag.description(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::{abbr, description};

    #[test]
    fn test_register_long_form() {
        let descriptor = FlagDescriptor::new("retries", int(3)).with(description("retry count"));
        let mut flags = FlagSet::new();

        descriptor
            .value_type()
            .register(&descriptor, &mut flags)
            .unwrap();

        let flag = flags.lookup("retries").unwrap();
        assert_eq!(flag.shorthand(), None);
        assert_eq!(flag.usage(), "retry count");
        assert_eq!(flag.value(), FlagValue::Int(3));
    }

    #[test]
    fn test_register_short_form() {
        let descriptor = FlagDescriptor::new("quiet", boolean(false)).with(abbr('q'));
        let mut flags = FlagSet::new();

        descriptor
            .value_type()
            .register(&descriptor, &mut flags)
            .unwrap();

        assert_eq!(flags.lookup_shorthand('q').unwrap().name(), "quiet");
    }

    #[test]
    fn test_register_twice_propagates_duplicate() {
        let descriptor = FlagDescriptor::new("tags", string_slice(["a", "b"]));
        let mut flags = FlagSet::new();
        let value_type = descriptor.value_type();

        value_type.register(&descriptor, &mut flags).unwrap();
        let err = value_type.register(&descriptor, &mut flags).unwrap_err();

        assert_eq!(err, FlagError::DuplicateFlag("tags".into()));
    }

    #[test]
    fn test_default_values() {
        assert_eq!(string("x").default_value(), FlagValue::String("x".into()));
        assert_eq!(uint(7u64).default_value(), FlagValue::Uint(7));
        assert_eq!(float(0.5).default_value(), FlagValue::Float(0.5));
        assert_eq!(
            duration(Duration::from_millis(250)).default_value(),
            FlagValue::Duration(Duration::from_millis(250))
        );
        assert_eq!(
            string_slice(Vec::<String>::new()).default_value(),
            FlagValue::StringSlice(vec![])
        );
    }
}
