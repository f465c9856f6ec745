//! Read-only views over registered metadata.
//!
//! Every handle borrows the [`MetaRegistry`](crate::MetaRegistry) it came
//! from, is `Copy`, and compares equal only to handles of the same record.
//! Iteration always visits the most recently registered record first.

// -----------------------------------------------------------------------------
// Modules

mod ctor;
mod data;
mod dtor;
mod func;
mod prop;
mod ty;

// -----------------------------------------------------------------------------
// Exports

pub use ctor::MetaCtor;
pub use data::MetaData;
pub use dtor::MetaDtor;
pub use func::MetaFunc;
pub use prop::MetaProp;
pub use ty::MetaType;
