use core::fmt;
use core::ptr;

use crate::AnyValue;
use crate::prop::impl_props_fn;
use crate::registry::DtorNode;

/// The destructor registered for a type.
#[derive(Clone, Copy)]
pub struct MetaDtor<'r> {
    node: &'r DtorNode,
}

impl<'r> MetaDtor<'r> {
    #[inline]
    pub(crate) fn new(node: &'r DtorNode) -> Self {
        Self { node }
    }

    /// Runs the destructor on `instance`.
    ///
    /// Returns the value back if it does not hold the owning type.
    #[inline]
    pub fn invoke(&self, instance: AnyValue) -> Result<(), AnyValue> {
        (self.node.invoke)(instance)
    }

    impl_props_fn!();
}

impl PartialEq for MetaDtor<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl Eq for MetaDtor<'_> {}

impl fmt::Debug for MetaDtor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MetaDtor")
    }
}
