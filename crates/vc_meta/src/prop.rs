use alloc::vec::Vec;
use core::any::Any;

use crate::AnyValue;
use crate::handle::MetaProp;

// -----------------------------------------------------------------------------
// PropList

pub(crate) struct PropNode {
    pub key: AnyValue,
    pub value: AnyValue,
}

/// Key/value annotations of one metadata record.
///
/// Entries are appended, iteration runs newest first.
#[derive(Default)]
pub(crate) struct PropList(Vec<PropNode>);

impl PropList {
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a property, returning `false` if an equal key exists.
    pub fn insert(&mut self, key: AnyValue, value: AnyValue) -> bool {
        if self.0.iter().any(|prop| prop.key == key) {
            return false;
        }
        self.0.push(PropNode { key, value });
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = MetaProp<'_>> {
        self.0.iter().rev().map(MetaProp::new)
    }

    pub fn find<K: PartialEq + Any>(&self, key: &K) -> Option<MetaProp<'_>> {
        self.iter()
            .find(|prop| prop.key().downcast_ref::<K>() == Some(key))
    }
}

/// Adds `properties` and `property` to a handle with a `node.props` field.
macro_rules! impl_props_fn {
    () => {
        /// Iterates the properties, most recently registered first.
        pub fn properties(&self) -> impl Iterator<Item = $crate::MetaProp<'r>> + use<'r> {
            self.node.props.iter()
        }

        /// Looks up a property by key.
        ///
        /// A key matches when it has type `K` and compares equal to `key`.
        pub fn property<K: PartialEq + ::core::any::Any>(
            &self,
            key: &K,
        ) -> Option<$crate::MetaProp<'r>> {
            self.node.props.find(key)
        }
    };
}

pub(crate) use impl_props_fn;

#[cfg(test)]
mod tests {
    use super::PropList;
    use crate::AnyValue;

    #[derive(PartialEq)]
    enum Key {
        Bool,
        Int,
    }

    #[test]
    fn unique_keys() {
        let mut props = PropList::new();
        assert!(props.insert(AnyValue::comparable(Key::Bool), AnyValue::new(false)));
        assert!(props.insert(AnyValue::comparable(Key::Int), AnyValue::new(3)));
        assert!(!props.insert(AnyValue::comparable(Key::Int), AnyValue::new(4)));
        assert!(props.insert(AnyValue::comparable(1_u8), AnyValue::new(4)));
        assert_eq!(props.iter().count(), 3);
    }

    #[test]
    fn newest_first_lookup() {
        let mut props = PropList::new();
        props.insert(AnyValue::comparable(Key::Bool), AnyValue::new(true));
        props.insert(AnyValue::comparable(Key::Int), AnyValue::new(3_i32));

        let first = props.iter().next().map(|p| p.key().is::<Key>());
        assert_eq!(first, Some(true));
        assert!(props.iter().next().is_some_and(|p| p.value().is::<i32>()));

        let int = props.find(&Key::Int).map(|p| *p.value().read::<i32>());
        assert_eq!(int, Some(3));
        assert!(props.find(&1_u8).is_none());
    }
}
