use core::any::{Any, TypeId};
use core::fmt;
use core::ptr;

use crate::any::ArgTypes;
use crate::name::NameKey;
use crate::prop::impl_props_fn;
use crate::registry::{MetaRegistry, TypeNode};
use crate::{AnyValue, IntoArgs, MetaCtor, MetaData, MetaDtor, MetaFunc};

// -----------------------------------------------------------------------------
// MetaType

/// A reflected type.
///
/// Handles are cheap to copy and compare by identity: two handles are equal
/// when they view the same record.
#[derive(Clone, Copy)]
pub struct MetaType<'r> {
    registry: &'r MetaRegistry,
    node: &'r TypeNode,
}

impl<'r> MetaType<'r> {
    #[inline]
    pub(crate) fn new(registry: &'r MetaRegistry, node: &'r TypeNode) -> Self {
        Self { registry, node }
    }

    /// The name the type was reflected with.
    #[inline]
    pub fn name(&self) -> &'r str {
        self.node.name.as_ref().map_or("", |name| &***name)
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.node.id
    }

    /// The Rust type name, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.node.type_name
    }

    /// Returns `true` if this is the record of `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.node.id == TypeId::of::<T>()
    }

    /// Iterates the constructors, most recently registered first.
    pub fn ctors(&self) -> impl Iterator<Item = MetaCtor<'r>> + use<'r> {
        let registry = self.registry;
        self.node
            .ctors
            .iter()
            .rev()
            .map(move |node| MetaCtor::new(registry, node))
    }

    /// The constructor taking exactly `A`.
    ///
    /// If several were registered with the same parameters, this is the
    /// oldest one, while [`construct`](Self::construct) uses the newest.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_meta::MetaRegistry;
    ///
    /// let mut registry = MetaRegistry::new();
    /// registry
    ///     .reflect::<String>("string")
    ///     .ctor_default()
    ///     .ctor_from::<char>();
    ///
    /// let ty = registry.resolve::<String>().unwrap();
    /// assert!(ty.ctor::<()>().is_some());
    /// assert!(ty.ctor::<(char,)>().is_some());
    /// assert!(ty.ctor::<(i32,)>().is_none());
    /// ```
    pub fn ctor<A: ArgTypes>(&self) -> Option<MetaCtor<'r>> {
        self.node
            .ctors
            .iter()
            .find(|node| A::matches(&node.arg_ids))
            .map(|node| MetaCtor::new(self.registry, node))
    }

    #[inline]
    pub fn dtor(&self) -> Option<MetaDtor<'r>> {
        self.node.dtor.as_ref().map(MetaDtor::new)
    }

    /// Iterates the data members, most recently registered first.
    pub fn data_members(&self) -> impl Iterator<Item = MetaData<'r>> + use<'r> {
        let registry = self.registry;
        self.node
            .data
            .iter()
            .rev()
            .map(move |node| MetaData::new(registry, node))
    }

    pub fn data(&self, name: &str) -> Option<MetaData<'r>> {
        let key = NameKey::new(name);
        self.data_members().find(|data| key.matches(data.name_key()))
    }

    /// Iterates the functions, most recently registered first.
    pub fn funcs(&self) -> impl Iterator<Item = MetaFunc<'r>> + use<'r> {
        let registry = self.registry;
        self.node
            .funcs
            .iter()
            .rev()
            .map(move |node| MetaFunc::new(registry, node))
    }

    pub fn func(&self, name: &str) -> Option<MetaFunc<'r>> {
        let key = NameKey::new(name);
        self.funcs().find(|func| key.matches(func.name_key()))
    }

    /// Constructs an instance with the first constructor accepting `args`.
    ///
    /// Arguments must match a constructor's parameters exactly, no conversion
    /// takes place. Returns an invalid value if no constructor accepts them.
    pub fn construct(&self, args: impl IntoArgs) -> AnyValue {
        let mut args = args.into_args();
        match self.ctors().find(|ctor| ctor.accepts(&args)) {
            Some(ctor) => ctor.call(&mut args),
            None => AnyValue::invalid(),
        }
    }

    /// Destroys an instance of this type.
    ///
    /// Runs the registered destructor if any, otherwise drops the value.
    /// Returns the value back if it does not hold this type.
    pub fn destroy(&self, instance: AnyValue) -> Result<(), AnyValue> {
        if instance.ty_id() != Some(self.node.id) {
            return Err(instance);
        }
        match self.dtor() {
            Some(dtor) => dtor.invoke(instance),
            None => (self.node.destroy)(instance),
        }
    }

    impl_props_fn!();
}

impl PartialEq for MetaType<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl Eq for MetaType<'_> {}

impl fmt::Debug for MetaType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaType")
            .field("name", &self.name())
            .field("type_name", &self.node.type_name)
            .finish()
    }
}
