//! Synchronization primitives.
//!
//! Re-exports the standard library's locks and lazy cells, so `no_std` crates
//! in the workspace reach them through one path.
//!
//! See the [standard library] for further details.
//!
//! [standard library]: https://doc.rust-lang.org/std/sync/index.html

pub use alloc::sync::Arc;

pub use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
