use alloc::string::{String, ToString};
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use tg_utils::hash::HashMap;

use crate::info::TypeInfo;
use crate::registry::{TypeRegistry, TypeRegistryArc};

/// Resolves type names against a [`TypeRegistry`], caching every outcome.
///
/// A name is looked up, in order:
///
/// 1. as a full type path in the registry's global index;
/// 2. in each loaded module, in load order: as a full or crate-relative
///    path, then by case-insensitive simple name. The first hit wins, so
///    a simple name present in several modules resolves to the earliest.
///
/// Misses are cached too: a type registered after a failed lookup stays
/// unresolvable under that name until [`clear_cache`](Self::clear_cache).
///
/// # Examples
///
/// ```
/// use tg_reflect::cache::TypeResolver;
/// use tg_reflect::registry::{TypeRegistry, TypeRegistryArc};
///
/// let registry = TypeRegistryArc::new(TypeRegistry::new());
/// let resolver = TypeResolver::new(registry.clone());
///
/// assert!(resolver.resolve("alloc::string::String").is_some());
/// assert!(resolver.resolve("STRING").is_some());
/// assert!(resolver.resolve("Vec<u8>").is_none());
///
/// registry.write().register::<Vec<u8>>();
/// assert!(resolver.resolve("Vec<u8>").is_none());
///
/// resolver.clear_cache();
/// assert!(resolver.resolve("Vec<u8>").is_some());
/// ```
pub struct TypeResolver {
    registry: TypeRegistryArc,
    cache: RwLock<HashMap<String, Option<&'static TypeInfo>>>,
    scans: AtomicUsize,
}

impl TypeResolver {
    pub fn new(registry: TypeRegistryArc) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::default()),
            scans: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    pub fn resolve(&self, name: &str) -> Option<&'static TypeInfo> {
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied();
        if let Some(outcome) = cached {
            return outcome;
        }

        let outcome = Self::scan(&self.registry.read(), name);
        self.scans.fetch_add(1, Ordering::Relaxed);

        // A concurrent resolution may have cached first, keep its outcome.
        *self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_insert(outcome)
    }

    fn scan(registry: &TypeRegistry, name: &str) -> Option<&'static TypeInfo> {
        log::trace!("resolving type name `{name}`");
        if let Some(info) = registry.get_with_type_path(name) {
            return Some(info);
        }
        for module in registry.modules() {
            let found = module
                .get_with_path(name)
                .or_else(|| module.find_by_name_ignore_case(name));
            if found.is_some() {
                log::trace!("type name `{name}` found in module `{}`", module.name());
                return found;
            }
        }
        None
    }

    /// Drops every cached outcome, hits and misses alike.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!("clearing {} cached type resolutions", cache.len());
        cache.clear();
    }

    /// Number of resolutions that missed the cache and scanned the registry.
    #[inline]
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    /// Number of cached names.
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeResolver")
            .field("cached", &self.cached_len())
            .field("scans", &self.scan_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::TypeResolver;
    use crate::info::TypePath;
    use crate::ops::NdArray;
    use crate::registry::{TypeRegistry, TypeRegistryArc};

    fn resolver() -> (TypeRegistryArc, TypeResolver) {
        let registry = TypeRegistryArc::new(TypeRegistry::new());
        let resolver = TypeResolver::new(registry.clone());
        (registry, resolver)
    }

    #[test]
    fn miss_is_cached_until_clear() {
        let (registry, resolver) = resolver();
        assert!(resolver.resolve("Nonexistent.Type").is_none());
        assert!(resolver.resolve("Nonexistent.Type").is_none());
        assert_eq!(resolver.scan_count(), 1);

        registry.write().register::<NdArray<u8, 2>>();
        assert!(resolver.resolve("NdArray<u8, 2>").is_some());
        assert_eq!(resolver.scan_count(), 2);

        resolver.clear_cache();
        assert_eq!(resolver.cached_len(), 0);
        assert!(resolver.resolve("Nonexistent.Type").is_none());
        assert_eq!(resolver.scan_count(), 3);
    }

    #[test]
    fn hit_is_cached() {
        let (_, resolver) = resolver();
        let first = resolver.resolve("i64").unwrap();
        let second = resolver.resolve("i64").unwrap();
        assert!(core::ptr::eq(first, second));
        assert_eq!(resolver.scan_count(), 1);
    }

    #[test]
    fn lookup_order() {
        let (registry, resolver) = resolver();
        registry.write().register::<NdArray<f32, 2>>();

        // Global path index.
        let info = resolver.resolve(NdArray::<f32, 2>::type_path()).unwrap();
        assert!(info.type_is::<NdArray<f32, 2>>());
        // Crate-relative path within a module.
        assert!(resolver.resolve("ops::NdArray<f32, 2>").is_some());
        // Case-insensitive simple name.
        assert!(resolver.resolve("ndarray<F32, 2>").is_some());
        assert!(resolver.resolve("NdArray<f32, 3>").is_none());
    }

    #[test]
    fn concurrent_resolutions_agree() {
        let (_, resolver) = resolver();
        let resolver = Arc::new(resolver);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || resolver.resolve("alloc::string::String"))
            })
            .collect();
        for handle in handles {
            let info = handle.join().unwrap().unwrap();
            assert!(info.type_is::<String>());
        }
        assert_eq!(resolver.cached_len(), 1);
    }
}
