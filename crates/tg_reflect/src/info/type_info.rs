use core::fmt;

use thiserror::Error;

use crate::info::{ArrayInfo, ListInfo, OpaqueInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The "kinds" of a reflected type.
///
/// Each kind corresponds to one of the reflection traits in [`ops`](crate::ops).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Array,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Array => f.pad("Array"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Error returned when a value or info is not the expected [`ReflectKind`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("reflect kind mismatch: expected {expected}, received {received}")]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Runtime descriptor of a concrete type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) when
/// the type is known statically, through
/// [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped::reflect_type_info)
/// on a `dyn Reflect`, or by name through
/// [`TypeResolver`](crate::cache::TypeResolver).
///
/// # Examples
///
/// ```
/// use tg_reflect::info::{ReflectKind, Typed};
///
/// assert_eq!(i32::type_info().kind(), ReflectKind::Opaque);
/// assert!(<Box<[i32]> as Typed>::type_info().is_array());
/// assert_eq!(<Vec<i32> as Typed>::type_info().type_name(), "Vec<i32>");
/// ```
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Array(ArrayInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Casts to [`", stringify!($info), "`].")]
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[inline]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    #[inline]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    crate::info::impl_type_fn!();

    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// The element type of an array or list; `None` for other kinds.
    pub fn item_info(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::Array(info) => Some(info.item_info()),
            Self::List(info) => Some(info.item_info()),
            _ => None,
        }
    }

    /// The rank of an array type; `None` for other kinds.
    pub const fn array_rank(&self) -> Option<usize> {
        match self {
            Self::Array(info) => Some(info.rank()),
            _ => None,
        }
    }
}
