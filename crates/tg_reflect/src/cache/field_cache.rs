use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use tg_utils::TypeIdMap;

use crate::Reflect;
use crate::info::{NamedField, TypeInfo};

// -----------------------------------------------------------------------------
// FieldMarkers

/// Answers the questions that decide whether a field is persisted.
pub trait FieldMarkers: Send + Sync {
    fn is_public(&self, field: &NamedField) -> bool;

    /// The field is explicitly marked to be persisted.
    fn is_persistable(&self, field: &NamedField) -> bool;

    /// The field is explicitly marked to be skipped.
    fn is_excluded(&self, field: &NamedField) -> bool;
}

/// Reads the markers recorded by `#[derive(Reflect)]`.
///
/// A `pub` field is public and `#[reflect(serialize_field)]` marks a field
/// persistable. [`FieldFlags::IGNORE`](crate::info::FieldFlags::IGNORE)
/// excludes a field; derived structs leave `#[reflect(ignore)]` fields out of
/// their type info instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeMarkers;

impl FieldMarkers for AttributeMarkers {
    #[inline]
    fn is_public(&self, field: &NamedField) -> bool {
        field.is_public()
    }

    #[inline]
    fn is_persistable(&self, field: &NamedField) -> bool {
        field.is_serialize_marked()
    }

    #[inline]
    fn is_excluded(&self, field: &NamedField) -> bool {
        field.is_ignored()
    }
}

/// A field is serialized if it is public or marked persistable,
/// and not excluded.
#[inline]
pub fn is_serializable(markers: &dyn FieldMarkers, field: &NamedField) -> bool {
    (markers.is_public(field) || markers.is_persistable(field)) && !markers.is_excluded(field)
}

// -----------------------------------------------------------------------------
// FieldAccessCache

/// Memoizes the serializable fields of each struct type.
///
/// Fields come back in declaration order. Types other than structs have no
/// fields. Entries are computed once per type and kept until
/// [`clear_cache`](Self::clear_cache).
///
/// # Examples
///
/// ```
/// use tg_reflect::cache::FieldAccessCache;
/// use tg_reflect::derive::Reflect;
/// use tg_reflect::info::Typed;
///
/// #[derive(Reflect)]
/// struct Player {
///     pub name: String,
///     #[reflect(serialize_field)]
///     score: u32,
///     #[reflect(ignore)]
///     pub session: u64,
///     cached_rank: u32,
/// }
///
/// let cache = FieldAccessCache::new();
/// let fields = cache.serializable_fields(Player::type_info());
/// let names: Vec<_> = fields.iter().map(|field| field.name()).collect();
/// assert_eq!(names, ["name", "score"]);
/// ```
pub struct FieldAccessCache {
    markers: Box<dyn FieldMarkers>,
    cache: RwLock<TypeIdMap<Arc<[&'static NamedField]>>>,
}

impl Default for FieldAccessCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FieldAccessCache {
    /// A cache using [`AttributeMarkers`].
    pub fn new() -> Self {
        Self::with_markers(AttributeMarkers)
    }

    pub fn with_markers(markers: impl FieldMarkers + 'static) -> Self {
        Self {
            markers: Box::new(markers),
            cache: RwLock::new(TypeIdMap::new()),
        }
    }

    pub fn serializable_fields(&self, info: &'static TypeInfo) -> Arc<[&'static NamedField]> {
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&info.ty_id())
            .cloned();
        if let Some(fields) = cached {
            return fields;
        }

        let fields = self.collect_fields(info);

        // A concurrent computation may have inserted first, keep its set.
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(info.ty_id(), || fields)
            .clone()
    }

    /// The serializable fields of the runtime type of `value`.
    #[inline]
    pub fn serializable_fields_of(&self, value: &dyn Reflect) -> Arc<[&'static NamedField]> {
        self.serializable_fields(value.reflect_type_info())
    }

    fn collect_fields(&self, info: &'static TypeInfo) -> Arc<[&'static NamedField]> {
        let Ok(info) = info.as_struct() else {
            return Arc::from(Vec::new());
        };
        info.fields()
            .iter()
            .filter(|field| is_serializable(&*self.markers, field))
            .collect()
    }

    pub fn clear_cache(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!("clearing {} cached field sets", cache.len());
        cache.clear();
    }

    /// Number of types with a cached field set.
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for FieldAccessCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessCache")
            .field("cached", &self.cached_len())
            .finish_non_exhaustive()
    }
}
