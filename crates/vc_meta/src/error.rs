use alloc::boxed::Box;

use thiserror::Error;

// -----------------------------------------------------------------------------
// RegisterError

/// A contract violation detected while registering metadata.
///
/// The fluent [`MetaFactory`](crate::MetaFactory) panics with these, see
/// [`MetaRegistry::try_reflect`](crate::MetaRegistry::try_reflect) for the
/// fallible entry point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegisterError {
    #[error("type `{type_name}` is already reflected")]
    AlreadyReflected { type_name: &'static str },

    #[error("the name \"{name}\" is already used by another reflected type")]
    DuplicateTypeName { name: Box<str> },

    #[error("type `{owner}` already has a data member named \"{name}\"")]
    DuplicateData { owner: &'static str, name: Box<str> },

    #[error("type `{owner}` already has a function named \"{name}\"")]
    DuplicateFunc { owner: &'static str, name: Box<str> },

    #[error("type `{owner}` already has a destructor")]
    DuplicateDtor { owner: &'static str },

    #[error("duplicate property key of type `{key}` registered on `{owner}`")]
    DuplicateProperty {
        owner: &'static str,
        key: &'static str,
    },
}

impl RegisterError {
    #[cold]
    #[inline(never)]
    pub fn handle_error(&self) -> ! {
        panic!("{self}");
    }
}
