//! Hash containers built on *hashbrown* with *foldhash* hashers.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// A hasher whose output only depends on the input.
pub type FixedHasher = FoldHasher<'static>;

/// Hash state with a fixed seed, so iteration order of a map
/// built from the same inserts is the same across runs.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use tg_utils::hash::FixedHashState;
///
/// let mut a = FixedHashState.build_hasher();
/// let mut b = FixedHashState.build_hasher();
/// "Vec<i32>".hash(&mut a);
/// "Vec<i32>".hash(&mut b);
/// assert_eq!(a.finish(), b.finish());
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
// NoOpHashState

/// A hasher that passes a written `u64` straight through.
///
/// `TypeId` is already a high quality hash, hashing it again is wasted work.
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
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Aliases

/// A `hashbrown` map using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A `hashbrown` set using [`FixedHashState`].
pub type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

#[cfg(test)]
mod tests {
    use super::{FixedHashState, HashMap, NoOpHashState};
    use core::hash::{BuildHasher, Hash, Hasher};
    use foldhash::fast::FixedState;

    #[test]
    fn no_op_passes_u64_through() {
        let mut hasher = NoOpHashState.build_hasher();
        42_u64.hash(&mut hasher);
        assert_eq!(hasher.finish(), 42);
    }

    #[test]
    fn fixed_state_uses_the_shared_seed() {
        let expected = FixedState::with_seed(0x95EE04C4F326B271).hash_one("Vec<i32>");
        assert_eq!(FixedHashState.hash_one("Vec<i32>"), expected);
    }

    #[test]
    fn fixed_map_roundtrip() {
        let mut map = HashMap::default();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.len(), 2);
    }
}
