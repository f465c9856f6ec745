//! Type-erased values and argument lists.

// -----------------------------------------------------------------------------
// Modules

mod args;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use args::{ArgTypes, IntoArgs};
pub use value::AnyValue;

pub(crate) use args::{accepts, take};
pub(crate) use value::{EqFn, eq_impl, unerase_mut, unerase_ref};
