//! Registration of metadata.
//!
//! [`MetaFactory`] is the fluent builder returned by
//! [`MetaRegistry::reflect`](crate::MetaRegistry::reflect). Callables are
//! accepted through the `Into*` traits, data members through [`DataAccess`].

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod callable;
mod data_access;

// -----------------------------------------------------------------------------
// Exports

pub use builder::MetaFactory;
pub use callable::{CtorThunk, FuncThunk, IntoCtor, IntoFunc, IntoMethod, IntoMethodMut};
pub use data_access::{DataAccess, Field, FieldRef, GlobalMut, GlobalRef};
pub use data_access::{field, field_ref, global_mut, global_ref};
