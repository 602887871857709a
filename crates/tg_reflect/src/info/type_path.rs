use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// - [`type_path`](TypePath::type_path): the qualified name, unique per type,
///   e.g. `alloc::vec::Vec<i32>`.
/// - [`type_name`](TypePath::type_name): the simple name without module path,
///   may collide across modules, e.g. `Vec<i32>`.
/// - [`type_ident`](TypePath::type_ident): the simple name without generics, e.g. `Vec`.
/// - [`module_path`](TypePath::module_path): the module the type lives in, if any.
///
/// Names never carry a leading `::`.
///
/// # Examples
///
/// ```
/// use tg_reflect::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn type_ident() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
///
/// assert_eq!(Foo::type_path(), "my_crate::foo::Foo");
/// ```
pub trait TypePath: 'static {
    fn type_path() -> &'static str;

    fn type_name() -> &'static str;

    fn type_ident() -> &'static str;

    #[inline]
    fn module_path() -> Option<&'static str> {
        None
    }
}

/// Dynamic dispatch for [`TypePath`], implemented for every `TypePath` type.
pub trait DynamicTypePath {
    fn reflect_type_path(&self) -> &'static str;

    fn reflect_type_name(&self) -> &'static str;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        T::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        T::type_name()
    }
}

// -----------------------------------------------------------------------------
// Type

/// Identity of a concrete type: its [`TypeId`] plus its [`TypePath`] accessors.
///
/// The names are resolved through function pointers, generic types build
/// their paths lazily on first access.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    type_ident: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl Type {
    #[inline]
    pub const fn of<T: TypePath>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_path: T::type_path,
            type_name: T::type_name,
            type_ident: T::type_ident,
            module_path: T::module_path,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    #[inline]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    #[inline]
    pub fn ident(&self) -> &'static str {
        (self.type_ident)()
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }

    /// The first segment of the module path.
    ///
    /// ```
    /// use tg_reflect::info::Type;
    ///
    /// assert_eq!(Type::of::<String>().crate_name(), Some("alloc"));
    /// assert_eq!(Type::of::<i32>().crate_name(), None);
    /// ```
    pub fn crate_name(&self) -> Option<&'static str> {
        self.module_path()
            .map(|path| path.split("::").next().unwrap_or(path))
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// -----------------------------------------------------------------------------
// impl_type_fn

/// Adds the [`Type`] accessors to an info struct with a `ty` field.
macro_rules! impl_type_fn {
    ($field:ident) => {
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        $crate::info::impl_type_fn!();
    };
    () => {
        #[inline]
        pub const fn ty_id(&self) -> ::core::any::TypeId {
            self.ty().id()
        }

        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.ty().is::<T>()
        }

        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.ty().path()
        }

        #[inline]
        pub fn type_name(&self) -> &'static str {
            self.ty().name()
        }
    };
}

pub(crate) use impl_type_fn;
