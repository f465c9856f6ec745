//! The metadata registry.
//!
//! - [`MetaRegistry`]: owns the records of every reflected type.
//! - [`MetaRegistryArc`]: a registry behind `Arc<RwLock<..>>`.
//! - [`global`]: the process-wide [`MetaRegistryArc`].

// -----------------------------------------------------------------------------
// Modules

mod meta_registry;
mod nodes;

// -----------------------------------------------------------------------------
// Exports

pub use meta_registry::{MetaRegistry, MetaRegistryArc, global};

pub(crate) use nodes::{CtorFn, DtorNode, ErasedData, FuncFn, Receiver};
pub(crate) use nodes::{CtorNode, DataNode, FuncNode, TypeNode};
