use core::any::TypeId;
use core::fmt;
use core::ptr;

use crate::any::{ArgTypes, accepts};
use crate::prop::impl_props_fn;
use crate::registry::{CtorNode, MetaRegistry};
use crate::{AnyValue, IntoArgs, MetaType};

/// A constructor of a reflected type.
#[derive(Clone, Copy)]
pub struct MetaCtor<'r> {
    registry: &'r MetaRegistry,
    node: &'r CtorNode,
}

impl<'r> MetaCtor<'r> {
    #[inline]
    pub(crate) fn new(registry: &'r MetaRegistry, node: &'r CtorNode) -> Self {
        Self { registry, node }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.node.arg_ids.len()
    }

    /// The reflected type of the parameter at `index`.
    ///
    /// `None` if out of range or the parameter type is not reflected.
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

    /// Returns `true` if `args` can be passed to [`invoke`](Self::invoke).
    #[inline]
    pub fn accepts(&self, args: &[AnyValue]) -> bool {
        accepts(&self.node.arg_ids, args)
    }

    /// Constructs a new instance, or returns an invalid value if `args` do not
    /// match the parameters exactly.
    pub fn invoke(&self, args: impl IntoArgs) -> AnyValue {
        let mut args = args.into_args();
        if !self.accepts(&args) {
            return AnyValue::invalid();
        }
        self.call(&mut args)
    }

    /// Invokes the thunk with arguments already checked by `accepts`.
    #[inline]
    pub(crate) fn call(&self, args: &mut [AnyValue]) -> AnyValue {
        (self.node.invoke)(args).with_eq(self.registry.eq_fn(self.node.ty))
    }

    impl_props_fn!();
}

impl PartialEq for MetaCtor<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl Eq for MetaCtor<'_> {}

impl fmt::Debug for MetaCtor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaCtor")
            .field("arity", &self.arity())
            .finish()
    }
}
