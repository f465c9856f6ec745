use core::fmt::Debug;
use core::hash::{BuildHasher, Hash, Hasher};
use core::ops::Deref;

use crate::hash::{FixedHashState, NoOpHashMap};

// -----------------------------------------------------------------------------
// Hashed

/// A value stored together with its [`FixedHashState`] hash.
///
/// Hashing a `Hashed` writes the stored hash only, and equality compares the
/// hashes before the values. Use it as the key of a [`PreHashMap`].
pub struct Hashed<V> {
    hash: u64,
    value: V,
}

impl<V: Hash> Hashed<V> {
    /// Hashes `value` with [`FixedHashState`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_utils::hash::Hashed;
    ///
    /// let name = Hashed::new("transform");
    /// assert_eq!(name.hash(), Hashed::<&str>::hash_one(&"transform"));
    /// ```
    #[inline]
    pub fn new(value: V) -> Self {
        Self {
            hash: Self::hash_one(&value),
            value,
        }
    }

    /// The hash [`Hashed::new`] would compute for `value`.
    #[inline]
    pub fn hash_one<Q: Hash + ?Sized>(value: &Q) -> u64 {
        FixedHashState.hash_one(value)
    }
}

impl<V> Hashed<V> {
    /// Returns the pre-computed hash.
    #[inline(always)]
    pub const fn hash(&self) -> u64 {
        self.hash
    }

    /// Extracts the wrapped value.
    #[inline(always)]
    pub fn into_inner(self) -> V {
        self.value
    }
}

impl<V> Hash for Hashed<V> {
    #[inline]
    fn hash<R: Hasher>(&self, state: &mut R) {
        state.write_u64(self.hash);
    }
}

impl<V> Deref for Hashed<V> {
    type Target = V;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<V: PartialEq> PartialEq for Hashed<V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.value == other.value
    }
}

impl<V: Eq> Eq for Hashed<V> {}

impl<V: Clone> Clone for Hashed<V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            hash: self.hash,
            value: self.value.clone(),
        }
    }
}

impl<V: Debug> Debug for Hashed<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hashed")
            .field("hash", &self.hash)
            .field("value", &self.value)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PreHashMap

/// A [`NoOpHashMap`] keyed by [`Hashed`] values.
pub type PreHashMap<K, V> = NoOpHashMap<Hashed<K>, V>;

#[cfg(test)]
mod tests {
    use super::{Hashed, PreHashMap};
    use alloc::boxed::Box;

    #[test]
    fn str_and_box_hash_alike() {
        let boxed: Hashed<Box<str>> = Hashed::new("name".into());
        assert_eq!(boxed.hash(), Hashed::<Box<str>>::hash_one("name"));
    }

    #[test]
    fn map_lookup_by_raw_hash() {
        let mut map = PreHashMap::<Box<str>, u32>::default();
        map.insert(Hashed::new("a".into()), 1);
        map.insert(Hashed::new("b".into()), 2);

        let hash = Hashed::<Box<str>>::hash_one("b");
        let found = map
            .raw_entry()
            .from_hash(hash, |key| &***key == "b")
            .map(|(_, v)| *v);
        assert_eq!(found, Some(2));
    }
}
