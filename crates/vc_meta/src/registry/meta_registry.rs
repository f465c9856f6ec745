use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use vc_os::sync::{Arc, LazyLock, PoisonError};
use vc_os::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use vc_utils::TypeIdMap;
use vc_utils::hash::{NoOpHashState, PreHashMap};

use super::nodes::TypeNode;
use crate::any::EqFn;
use crate::name::{NameKey, new_name};
use crate::{AnyValue, MetaFactory, MetaType, RegisterError};

// -----------------------------------------------------------------------------
// MetaRegistry

/// Storage for the metadata of reflected types.
///
/// Registration goes through [`reflect`](Self::reflect) and needs `&mut self`.
/// Queries only need `&self`, so any number of readers can share a registry
/// once registration is done.
///
/// A type referenced by a registration (as a parameter, return or data type)
/// gets a placeholder record. Placeholders are invisible to queries until the
/// type itself is reflected, which reuses the same record.
///
/// # Examples
///
/// ```
/// use vc_meta::MetaRegistry;
///
/// let mut registry = MetaRegistry::new();
/// registry.reflect::<u32>("u32").ctor_default();
///
/// let by_type = registry.resolve::<u32>().unwrap();
/// let by_name = registry.resolve_by_name("u32").unwrap();
/// assert_eq!(by_type, by_name);
/// assert!(registry.resolve::<u64>().is_none());
/// ```
pub struct MetaRegistry {
    slots: TypeIdMap<usize>,
    nodes: Vec<TypeNode>,
    reflected: Vec<usize>,
    names: PreHashMap<Box<str>, usize>,
}

impl Default for MetaRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MetaRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            slots: TypeIdMap::new(),
            nodes: Vec::new(),
            reflected: Vec::new(),
            names: PreHashMap::with_hasher(NoOpHashState),
        }
    }

    /// Reflects `T` under `name` and returns a builder for its metadata.
    ///
    /// # Panics
    ///
    /// Panics if `T` is already reflected or `name` is taken.
    #[track_caller]
    pub fn reflect<T: Any + Send + Sync>(&mut self, name: &str) -> MetaFactory<'_, T> {
        match self.try_reflect(name) {
            Ok(factory) => factory,
            Err(e) => e.handle_error(),
        }
    }

    /// Fallible version of [`reflect`](Self::reflect).
    pub fn try_reflect<T: Any + Send + Sync>(
        &mut self,
        name: &str,
    ) -> Result<MetaFactory<'_, T>, RegisterError> {
        let index = self.slot::<T>();

        if self.nodes[index].is_reflected() {
            return Err(RegisterError::AlreadyReflected {
                type_name: type_name::<T>(),
            });
        }

        let name = new_name(name);
        if self.names.contains_key(&name) {
            return Err(RegisterError::DuplicateTypeName {
                name: name.into_inner(),
            });
        }

        log::debug!("reflect `{}` as \"{}\"", type_name::<T>(), &**name);

        self.names.insert(name.clone(), index);
        self.nodes[index].name = Some(name);
        self.reflected.push(index);

        Ok(MetaFactory::new(self, index))
    }

    /// Returns the slot of `T`, creating a placeholder on first use.
    pub(crate) fn slot<T: Any>(&mut self) -> usize {
        let nodes = &mut self.nodes;
        *self.slots.get_or_insert(TypeId::of::<T>(), || {
            nodes.push(TypeNode::placeholder::<T>());
            nodes.len() - 1
        })
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, index: usize) -> &mut TypeNode {
        &mut self.nodes[index]
    }

    /// The handle of the node at `index`, if that type is reflected.
    pub(crate) fn meta_type(&self, index: usize) -> Option<MetaType<'_>> {
        let node = self.nodes.get(index)?;
        node.is_reflected().then(|| MetaType::new(self, node))
    }

    /// The equality function of the node at `index`, attached to values the
    /// registry hands out for that type.
    #[inline]
    pub(crate) fn eq_fn(&self, index: usize) -> Option<EqFn> {
        self.nodes.get(index).and_then(|node| node.eq)
    }

    /// Resolves a reflected type by its static type.
    #[inline]
    pub fn resolve<T: Any>(&self) -> Option<MetaType<'_>> {
        self.slots
            .get_type::<T>()
            .and_then(|&index| self.meta_type(index))
    }

    /// Resolves a reflected type by its [`TypeId`].
    pub fn resolve_by_id(&self, type_id: TypeId) -> Option<MetaType<'_>> {
        self.slots
            .get(&type_id)
            .and_then(|&index| self.meta_type(index))
    }

    /// Resolves a reflected type by the name it was reflected with.
    pub fn resolve_by_name(&self, name: &str) -> Option<MetaType<'_>> {
        let key = NameKey::new(name);
        self.names
            .raw_entry()
            .from_hash(key.hash, |stored| key.matches(stored))
            .and_then(|(_, &index)| self.meta_type(index))
    }

    /// The reflected type of the value held by `value`.
    #[inline]
    pub fn type_of(&self, value: &AnyValue) -> Option<MetaType<'_>> {
        self.resolve_by_id(value.ty_id()?)
    }

    /// Iterates reflected types, most recently reflected first.
    pub fn types(&self) -> impl Iterator<Item = MetaType<'_>> {
        self.reflected
            .iter()
            .rev()
            .filter_map(|&index| self.meta_type(index))
    }

    /// Returns `true` if `T` is reflected.
    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.resolve::<T>().is_some()
    }

    /// Number of reflected types.
    #[inline]
    pub fn len(&self) -> usize {
        self.reflected.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reflected.is_empty()
    }
}

impl fmt::Debug for MetaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.types().map(|ty| ty.name()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// MetaRegistryArc

/// A shared, lockable [`MetaRegistry`].
#[derive(Clone, Default)]
pub struct MetaRegistryArc {
    /// The wrapped [`MetaRegistry`].
    pub internal: Arc<RwLock<MetaRegistry>>,
}

impl MetaRegistryArc {
    /// Takes a read lock on the underlying [`MetaRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, MetaRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`MetaRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, MetaRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for MetaRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}

static GLOBAL: LazyLock<MetaRegistryArc> = LazyLock::new(MetaRegistryArc::default);

/// The process-wide registry, created on first use.
///
/// # Examples
///
/// ```
/// struct Marker;
///
/// vc_meta::global().write().reflect::<Marker>("doc::marker");
/// assert!(vc_meta::global().read().contains::<Marker>());
/// ```
#[inline]
pub fn global() -> &'static MetaRegistryArc {
    &GLOBAL
}
