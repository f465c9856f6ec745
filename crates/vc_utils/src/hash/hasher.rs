//! Hash states used across the workspace.
//!
//! - [`FixedHashState`]: `foldhash` with a fixed seed, so a given input always
//!   produces the same hash, in every process.
//! - [`NoOpHashState`]: passes a `u64` straight through, for keys that were
//!   hashed ahead of time (see [`Hashed`](super::Hashed)).

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// The hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// Deterministic hash state based on `foldhash`.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("position");
/// let b = FixedHashState.hash_one("position");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// Hasher that keeps the last written `u64` as its result.
///
/// Byte writes are folded in reverse order, so `write_u32(n)` and
/// `write_u64(n)` agree when only one value is written.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        self.hash = bytes
            .iter()
            .rev()
            .fold(self.hash, |acc, byte| acc.rotate_left(8).wrapping_add(*byte as u64));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Hash state for keys that already carry their hash.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::NoOpHashState;
///
/// assert_eq!(NoOpHashState.hash_one(42_u64), 42);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedHashState, NoOpHashState};
    use core::hash::BuildHasher;

    #[test]
    fn fixed_is_deterministic() {
        assert_eq!(FixedHashState.hash_one("a"), FixedHashState.hash_one("a"));
        assert_ne!(FixedHashState.hash_one("a"), FixedHashState.hash_one("b"));
    }

    #[test]
    fn noop_widths_agree() {
        assert_eq!(NoOpHashState.hash_one(10_u32), NoOpHashState.hash_one(10_u64));
    }
}
