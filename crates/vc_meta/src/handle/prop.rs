use core::fmt;
use core::ptr;

use crate::AnyValue;
use crate::prop::PropNode;

/// A key/value annotation attached to a metadata record.
#[derive(Clone, Copy)]
pub struct MetaProp<'r> {
    node: &'r PropNode,
}

impl<'r> MetaProp<'r> {
    #[inline]
    pub(crate) fn new(node: &'r PropNode) -> Self {
        Self { node }
    }

    #[inline]
    pub fn key(&self) -> &'r AnyValue {
        &self.node.key
    }

    #[inline]
    pub fn value(&self) -> &'r AnyValue {
        &self.node.value
    }
}

impl PartialEq for MetaProp<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl Eq for MetaProp<'_> {}

impl fmt::Debug for MetaProp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaProp")
            .field("key", &self.node.key)
            .field("value", &self.node.value)
            .finish()
    }
}
