#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod name;
mod prop;

pub mod any;
pub mod factory;
pub mod handle;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-level exports

pub use any::{AnyValue, ArgTypes, IntoArgs};
pub use error::RegisterError;
pub use factory::{DataAccess, MetaFactory, field, field_ref, global_mut, global_ref};
pub use handle::{MetaCtor, MetaData, MetaDtor, MetaFunc, MetaProp, MetaType};
pub use registry::{MetaRegistry, MetaRegistryArc, global};
