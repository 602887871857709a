use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tg_utils::TypeIdMap;
use tg_utils::hash::{HashMap, HashSet};

use crate::info::{TypeInfo, Typed};

/// Module of types whose path has no crate segment, like `i32`.
const CORE_MODULE: &str = "core";

fn default_module(info: &TypeInfo) -> &'static str {
    info.ty().crate_name().unwrap_or(CORE_MODULE)
}

// -----------------------------------------------------------------------------
// TypeModule

/// A named group of registered types, in registration order.
///
/// Types land in the module named after their crate unless registered with
/// [`TypeRegistry::register_in`]; a module can be unloaded as a whole.
#[derive(Debug)]
pub struct TypeModule {
    name: String,
    types: Vec<&'static TypeInfo>,
}

impl TypeModule {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Types in registration order.
    #[inline]
    pub fn types(&self) -> &[&'static TypeInfo] {
        &self.types
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Finds a type by its full path, or by its path relative to its crate.
    ///
    /// `shapes::Circle` matches a type `my_crate::shapes::Circle`.
    pub fn get_with_path(&self, path: &str) -> Option<&'static TypeInfo> {
        self.types.iter().copied().find(|info| {
            let full = info.type_path();
            full == path
                || info
                    .ty()
                    .crate_name()
                    .and_then(|krate| full.strip_prefix(krate))
                    .and_then(|rest| rest.strip_prefix("::"))
                    == Some(path)
        })
    }

    /// Linear scan comparing simple type names, ignoring ASCII case.
    ///
    /// Only ASCII letters are case folded, so non-ASCII characters must
    /// match exactly. The first type in registration order wins.
    pub fn find_by_name_ignore_case(&self, name: &str) -> Option<&'static TypeInfo> {
        self.types
            .iter()
            .copied()
            .find(|info| info.type_name().eq_ignore_ascii_case(name))
    }
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types, indexed by [`TypeId`], type path and
/// simple type name.
///
/// Simple names registered by more than one type are *ambiguous* and
/// only reachable through their full path.
///
/// # Examples
///
/// ```
/// use tg_reflect::registry::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Vec<u16>>();
///
/// let info = registry.get_with_type_path("alloc::vec::Vec<u16>").unwrap();
/// assert!(info.is_list());
/// assert!(registry.get_with_type_name("u16").is_some());
/// assert!(registry.modules().any(|module| module.name() == "alloc"));
/// ```
pub struct TypeRegistry {
    type_table: TypeIdMap<&'static TypeInfo>,
    modules: Vec<TypeModule>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any type.
    pub fn empty() -> Self {
        Self {
            type_table: TypeIdMap::new(),
            modules: Vec::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Creates a registry holding the built-in scalar types, `String` and `Uuid`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<uuid::Uuid>();
        registry
    }

    // The type must not already exist.
    fn add_name_index(
        info: &'static TypeInfo,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let type_name = info.type_name();
        if ambiguous_names.contains(type_name) {
            return;
        }
        if type_name_to_id.remove(type_name).is_some() {
            log::warn!("type name `{type_name}` is ambiguous, use the full type path");
            ambiguous_names.insert(type_name);
        } else {
            type_name_to_id.insert(type_name, info.ty_id());
        }
    }

    fn module_mut(&mut self, name: &str) -> &mut TypeModule {
        let index = match self.modules.iter().position(|module| module.name == name) {
            Some(index) => index,
            None => {
                self.modules.push(TypeModule::new(name));
                self.modules.len() - 1
            }
        };
        &mut self.modules[index]
    }

    // Returns `false` if the type was already registered.
    fn register_internal(&mut self, info: &'static TypeInfo, module: &str) -> bool {
        let inserted = self.type_table.try_insert(info.ty_id(), || info);
        if inserted {
            self.type_path_to_id.insert(info.type_path(), info.ty_id());
            Self::add_name_index(info, &mut self.type_name_to_id, &mut self.ambiguous_names);
            self.module_mut(module).types.push(info);
        }
        inserted
    }

    /// Registers `info` in `module`, then the types it refers to.
    ///
    /// Dependencies from the same crate follow into `module`, others go to
    /// their own crate's module.
    fn register_tree(&mut self, info: &'static TypeInfo, module: &str) {
        if !self.register_internal(info, module) {
            return;
        }
        let home = default_module(info);
        match info {
            TypeInfo::Struct(info) => {
                for field in info.fields() {
                    self.register_dependency(field.type_info(), module, home);
                }
            }
            TypeInfo::List(info) => self.register_dependency(info.item_info(), module, home),
            TypeInfo::Array(info) => self.register_dependency(info.item_info(), module, home),
            TypeInfo::Opaque(_) => {}
        }
    }

    fn register_dependency(&mut self, dep: &'static TypeInfo, module: &str, home: &str) {
        let dep_home = default_module(dep);
        if dep_home == home {
            self.register_tree(dep, module);
        } else {
            self.register_tree(dep, dep_home);
        }
    }

    /// Registers `T` and the types of its fields or items.
    ///
    /// `T` lands in the module named after its crate, `core` for types
    /// without a module path. Registering a type twice does nothing.
    pub fn register<T: Typed>(&mut self) {
        let info = T::type_info();
        self.register_tree(info, default_module(info));
    }

    /// Registers `T` in an explicitly named module, like a plugin.
    ///
    /// ```
    /// use tg_reflect::registry::TypeRegistry;
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register_in::<Vec<String>>("plugin");
    /// assert!(registry.contains_type::<Vec<String>>());
    ///
    /// assert!(registry.unload_module("plugin"));
    /// assert!(!registry.contains_type::<Vec<String>>());
    /// // `String` was registered before in its own module.
    /// assert!(registry.contains_type::<String>());
    /// ```
    pub fn register_in<T: Typed>(&mut self, module: &str) {
        self.register_tree(T::type_info(), module);
    }

    /// Registers the type of `value`.
    #[inline]
    pub fn register_by_val<T: Typed>(&mut self, _: &T) {
        self.register::<T>();
    }

    /// Registers every type whose derive requested `#[reflect(auto_register)]`.
    ///
    /// Returns `false` if none was found, which is always the case without
    /// the `auto_register` feature.
    pub fn auto_register(&mut self) -> bool {
        crate::__macro_exports::register_submitted(self)
    }

    /// Removes a module and every type registered in it.
    ///
    /// Names that were ambiguous only because of the removed types become
    /// reachable again. Returns `false` if no such module is loaded.
    ///
    /// Dependents in other modules are not checked. A type that stays loaded
    /// keeps pointing at the `TypeInfo` of removed field or item types, and
    /// lookups by name or path no longer find them. Unload the dependents
    /// first, or register the removed types again.
    pub fn unload_module(&mut self, name: &str) -> bool {
        let Some(index) = self.modules.iter().position(|module| module.name == name) else {
            return false;
        };
        let module = self.modules.remove(index);
        for info in &module.types {
            self.type_table.remove(&info.ty_id());
            self.type_path_to_id.remove(info.type_path());
        }

        self.type_name_to_id.clear();
        self.ambiguous_names.clear();
        for info in self.modules.iter().flat_map(|module| module.types.iter().copied()) {
            Self::add_name_index(info, &mut self.type_name_to_id, &mut self.ambiguous_names);
        }

        log::debug!("unloaded type module `{name}` with {} types", module.len());
        true
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_table.contains(&type_id)
    }

    #[inline]
    pub fn contains_type<T: 'static>(&self) -> bool {
        self.type_table.contains_type::<T>()
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.type_table.get(&type_id).copied()
    }

    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static TypeInfo> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Looks a type up by its simple name; ambiguous names return `None`.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static TypeInfo> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Loaded modules in load order.
    pub fn modules(&self) -> impl ExactSizeIterator<Item = &TypeModule> {
        self.modules.iter()
    }

    pub fn module(&self, name: &str) -> Option<&TypeModule> {
        self.modules.iter().find(|module| module.name == name)
    }

    /// Every registered type, in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeInfo> + '_ {
        self.type_table.values().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_table.len()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shared [`TypeRegistry`].
///
/// Lock poisoning is ignored: a registry is only ever mutated through
/// complete insertions and removals.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<TypeRegistry> for TypeRegistryArc {
    #[inline]
    fn from(registry: TypeRegistry) -> Self {
        Self::new(registry)
    }
}

impl fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.read().type_path_to_id.keys())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
