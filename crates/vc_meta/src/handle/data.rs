use core::any::{Any, TypeId};
use core::fmt;
use core::ptr;

use crate::name::Name;
use crate::prop::impl_props_fn;
use crate::registry::{DataNode, MetaRegistry};
use crate::{AnyValue, MetaType};

/// A data member or shared variable of a reflected type.
///
/// Instances are passed as `&dyn Any`, either the plain value or an
/// [`AnyValue`] holding it.
///
/// # Examples
///
/// ```
/// use vc_meta::{MetaRegistry, field, field_ref};
///
/// struct Health {
///     current: u32,
///     max: u32,
/// }
///
/// let mut registry = MetaRegistry::new();
/// registry
///     .reflect::<Health>("health")
///     .data("current", field(|h: &Health| &h.current, |h: &mut Health| &mut h.current))
///     .data("max", field_ref(|h: &Health| &h.max));
///
/// let ty = registry.resolve::<Health>().unwrap();
/// let mut health = Health { current: 10, max: 20 };
///
/// let current = ty.data("current").unwrap();
/// assert!(current.set(&mut health, 15_u32));
/// assert_eq!(*current.get(&health).read::<u32>(), 15);
///
/// let max = ty.data("max").unwrap();
/// assert!(max.is_readonly());
/// assert!(!max.set(&mut health, 99_u32));
/// assert_eq!(health.max, 20);
/// ```
#[derive(Clone, Copy)]
pub struct MetaData<'r> {
    registry: &'r MetaRegistry,
    node: &'r DataNode,
}

impl<'r> MetaData<'r> {
    #[inline]
    pub(crate) fn new(registry: &'r MetaRegistry, node: &'r DataNode) -> Self {
        Self { registry, node }
    }

    #[inline]
    pub(crate) fn name_key(&self) -> &'r Name {
        &self.node.name
    }

    #[inline]
    pub fn name(&self) -> &'r str {
        &self.node.name
    }

    /// Returns `true` if the value cannot be written.
    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.node.readonly
    }

    /// Returns `true` if the value is not bound to an instance.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.node.shared
    }

    /// The reflected type of the value, if that type is reflected.
    #[inline]
    pub fn ty(&self) -> Option<MetaType<'r>> {
        self.registry.meta_type(self.node.ty)
    }

    #[inline]
    pub fn value_type_id(&self) -> TypeId {
        self.node.ty_id
    }

    /// Returns `true` if the value has type `V`.
    #[inline]
    pub fn accept<V: Any>(&self) -> bool {
        self.node.ty_id == TypeId::of::<V>()
    }

    /// Reads the value from `instance`.
    ///
    /// Shared values ignore the instance. Returns an invalid value if
    /// `instance` has the wrong type.
    #[inline]
    pub fn get(&self, instance: &dyn Any) -> AnyValue {
        self.node
            .access
            .get(Some(instance))
            .with_eq(self.registry.eq_fn(self.node.ty))
    }

    /// Reads a shared value. Instance data yields an invalid value.
    #[inline]
    pub fn get_shared(&self) -> AnyValue {
        self.node
            .access
            .get(None)
            .with_eq(self.registry.eq_fn(self.node.ty))
    }

    /// Writes `value` into `instance`.
    ///
    /// Returns `false`, leaving the instance unchanged, if the data is
    /// readonly or a type does not match.
    pub fn set<V: Any + Send + Sync>(&self, instance: &mut dyn Any, value: V) -> bool {
        self.set_any(Some(instance), AnyValue::new(value))
    }

    /// Writes a shared value.
    pub fn set_shared<V: Any + Send + Sync>(&self, value: V) -> bool {
        self.set_any(None, AnyValue::new(value))
    }

    /// Type-erased form of [`set`](Self::set).
    pub fn set_any(&self, instance: Option<&mut dyn Any>, mut value: AnyValue) -> bool {
        !self.node.readonly && self.node.access.set(instance, &mut value)
    }

    impl_props_fn!();
}

impl PartialEq for MetaData<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl Eq for MetaData<'_> {}

impl fmt::Debug for MetaData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaData")
            .field("name", &self.name())
            .field("readonly", &self.node.readonly)
            .field("shared", &self.node.shared)
            .finish()
    }
}
