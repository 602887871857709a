//! Caches in front of the reflection data that the codecs query per value.
//!
//! Both caches memoize hits and misses alike and are only invalidated by an
//! explicit `clear_cache`. They are plain objects: whoever owns them decides
//! their lifetime.

// -----------------------------------------------------------------------------
// Modules

mod field_cache;
mod type_resolver;

// -----------------------------------------------------------------------------
// Exports

pub use field_cache::{AttributeMarkers, FieldAccessCache, FieldMarkers, is_serializable};
pub use type_resolver::TypeResolver;

use crate::registry::TypeRegistryArc;

// -----------------------------------------------------------------------------
// ReflectCaches

/// The resolver and field caches of one serializer.
#[derive(Debug)]
pub struct ReflectCaches {
    resolver: TypeResolver,
    fields: FieldAccessCache,
}

impl ReflectCaches {
    pub fn new(registry: TypeRegistryArc) -> Self {
        Self {
            resolver: TypeResolver::new(registry),
            fields: FieldAccessCache::new(),
        }
    }

    /// Uses `markers` to decide field eligibility instead of [`AttributeMarkers`].
    pub fn with_markers(registry: TypeRegistryArc, markers: impl FieldMarkers + 'static) -> Self {
        Self {
            resolver: TypeResolver::new(registry),
            fields: FieldAccessCache::with_markers(markers),
        }
    }

    #[inline]
    pub fn resolver(&self) -> &TypeResolver {
        &self.resolver
    }

    #[inline]
    pub fn field_cache(&self) -> &FieldAccessCache {
        &self.fields
    }

    /// Clears both caches.
    pub fn clear_cache(&self) {
        self.resolver.clear_cache();
        self.fields.clear_cache();
    }
}
