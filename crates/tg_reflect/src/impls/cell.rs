//! Static storage for type information.
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`] holding the [`TypeInfo`] of a
//!   non-generic type. Non-generic paths are string literals and need no cell.
//! - [`GenericTypeInfoCell`], [`GenericTypePathCell`]: a `static` inside a
//!   generic function is shared by every instantiation, so these cells key
//!   their values by [`TypeId`]. Values are leaked to hand out `'static` refs.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use tg_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;

    pub trait TypedProperty: 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// A cell for the type info of a non-generic type.
///
/// ```
/// use tg_reflect::impls::NonGenericTypeInfoCell;
/// use tg_reflect::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
///
/// struct Token;
///
/// impl TypePath for Token {
///     fn type_path() -> &'static str { "lexer::Token" }
///     fn type_name() -> &'static str { "Token" }
///     fn type_ident() -> &'static str { "Token" }
/// }
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(core::ptr::eq(Token::type_info(), Token::type_info()));
/// ```
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// A cell for the type info or path of every instantiation of a generic type.
///
/// ```
/// use tg_reflect::impls::{self, GenericTypePathCell};
/// use tg_reflect::info::TypePath;
///
/// struct Wrapper<T>(T);
///
/// impl<T: TypePath> TypePath for Wrapper<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["demo::Wrapper<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["Wrapper<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Wrapper" }
/// }
///
/// assert_eq!(Wrapper::<u8>::type_path(), "demo::Wrapper<u8>");
/// assert_eq!(Wrapper::<String>::type_name(), "Wrapper<String>");
/// ```
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // A racing writer may have inserted first, its value wins.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
