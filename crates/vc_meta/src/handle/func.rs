use core::any::{Any, TypeId};
use core::fmt;
use core::ptr;

use crate::any::{ArgTypes, accepts};
use crate::name::Name;
use crate::prop::impl_props_fn;
use crate::registry::{FuncNode, MetaRegistry, Receiver};
use crate::{AnyValue, IntoArgs, MetaType};

/// A function of a reflected type.
///
/// Functions registered with `method` are *constant*: they take the instance
/// by shared reference. Functions registered with `func` are *shared*: they
/// take no instance at all.
///
/// Every invocation checks the receiver and the arguments first. A mismatch
/// yields an invalid value, a function returning `()` yields a valid `()`.
#[derive(Clone, Copy)]
pub struct MetaFunc<'r> {
    registry: &'r MetaRegistry,
    node: &'r FuncNode,
}

impl<'r> MetaFunc<'r> {
    #[inline]
    pub(crate) fn new(registry: &'r MetaRegistry, node: &'r FuncNode) -> Self {
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

    #[inline]
    pub fn arity(&self) -> usize {
        self.node.arg_ids.len()
    }

    /// Returns `true` if the function only needs a shared instance.
    #[inline]
    pub fn is_const(&self) -> bool {
        self.node.constant
    }

    /// Returns `true` if the function takes no instance.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.node.shared
    }

    /// The reflected return type, if that type is reflected.
    #[inline]
    pub fn ret(&self) -> Option<MetaType<'r>> {
        self.registry.meta_type(self.node.ret)
    }

    #[inline]
    pub fn ret_type_id(&self) -> TypeId {
        self.node.ret_id
    }

    /// The reflected type of the parameter at `index`.
    pub fn arg(&self, index: usize) -> Option<MetaType<'r>> {
        let slot = *self.node.args.get(index)?;
        self.registry.meta_type(slot)
    }

    #[inline]
    pub fn arg_type_id(&self, index: usize) -> Option<TypeId> {
        self.node.arg_ids.get(index).copied()
    }

    /// Returns `true` if the parameters are exactly `A`.
    #[inline]
    pub fn accept<A: ArgTypes>(&self) -> bool {
        A::matches(&self.node.arg_ids)
    }

    #[inline]
    pub fn accepts(&self, args: &[AnyValue]) -> bool {
        accepts(&self.node.arg_ids, args)
    }

    /// Invokes the function on a shared instance.
    ///
    /// Fails for functions that need a mutable instance.
    pub fn invoke(&self, instance: &dyn Any, args: impl IntoArgs) -> AnyValue {
        self.dispatch(Receiver::Ref(instance), args)
    }

    /// Invokes the function on a mutable instance.
    pub fn invoke_mut(&self, instance: &mut dyn Any, args: impl IntoArgs) -> AnyValue {
        self.dispatch(Receiver::Mut(instance), args)
    }

    /// Invokes a shared function without an instance.
    pub fn call(&self, args: impl IntoArgs) -> AnyValue {
        self.dispatch(Receiver::Absent, args)
    }

    fn dispatch(&self, receiver: Receiver<'_>, args: impl IntoArgs) -> AnyValue {
        let mut args = args.into_args();
        if !self.accepts(&args) {
            return AnyValue::invalid();
        }
        (self.node.invoke)(receiver, &mut args).with_eq(self.registry.eq_fn(self.node.ret))
    }

    impl_props_fn!();
}

impl PartialEq for MetaFunc<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl Eq for MetaFunc<'_> {}

impl fmt::Debug for MetaFunc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaFunc")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .field("constant", &self.node.constant)
            .field("shared", &self.node.shared)
            .finish()
    }
}
