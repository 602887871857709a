use core::any::TypeId;
use core::fmt::Debug;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// Backs the static type-info cells and the per-type caches, where the key is
/// always a concrete type and the value is computed once.
///
/// # Examples
///
/// ```
/// use tg_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// assert!(map.try_insert_type::<u8>(|| "byte"));
/// assert!(!map.try_insert_type::<u8>(|| "again"));
/// assert_eq!(map.get_type::<u8>(), Some(&"byte"));
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty `TypeIdMap`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Creates an empty `TypeIdMap` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity_and_hasher(capacity, NoOpHashState))
    }

    /// Inserts the result of `f` if `type_id` is absent.
    ///
    /// Returns `false` and leaves the map unchanged if the key already exists;
    /// `f` is only called on insertion.
    #[inline]
    pub fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => {
                entry.insert(f());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// See [`try_insert`](Self::try_insert).
    #[inline(always)]
    pub fn try_insert_type<T: ?Sized + 'static>(&mut self, f: impl FnOnce() -> V) -> bool {
        self.try_insert(TypeId::of::<T>(), f)
    }

    /// Returns the value for `type_id`, inserting the result of `f` first if absent.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    pub fn get_mut(&mut self, type_id: &TypeId) -> Option<&mut V> {
        self.0.get_mut(type_id)
    }

    pub fn insert(&mut self, type_id: TypeId, v: V) -> Option<V> {
        self.0.insert(type_id, v)
    }

    pub fn remove(&mut self, type_id: &TypeId) -> Option<V> {
        self.0.remove(type_id)
    }

    /// Removes every entry, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline(always)]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<T> Default for TypeIdMap<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for TypeIdMap<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Debug> Debug for TypeIdMap<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::TypeIdMap;
    use core::any::TypeId;

    #[test]
    fn get_or_insert_runs_once() {
        let mut map = TypeIdMap::new();
        let mut calls = 0;
        for _ in 0..3 {
            map.get_or_insert(TypeId::of::<i32>(), || {
                calls += 1;
                calls
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(map.get_type::<i32>(), Some(&1));
    }

    #[test]
    fn remove_and_clear() {
        let mut map = TypeIdMap::new();
        map.insert(TypeId::of::<u8>(), 'a');
        map.insert(TypeId::of::<u16>(), 'b');
        assert_eq!(map.remove(&TypeId::of::<u8>()), Some('a'));
        assert!(!map.contains_type::<u8>());
        map.clear();
        assert!(map.is_empty());
    }
}
