use alloc::boxed::Box;
use core::any::TypeId;
use core::ops::Deref;

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// TypeParamInfo

/// A type parameter of a generic type, e.g. the `T` of `Vec<T>`.
#[derive(Clone, Debug)]
pub struct TypeParamInfo {
    name: &'static str,
    ty_id: TypeId,
    type_info: fn() -> &'static TypeInfo,
}

impl TypeParamInfo {
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty_id: TypeId::of::<T>(),
            type_info: T::type_info,
        }
    }

    /// The parameter's name in the declaration, e.g. `"T"`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// The [`TypeInfo`] of the type the parameter is instantiated with.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

// -----------------------------------------------------------------------------
// Generics

/// The type parameters of a type, in declaration order.
///
/// ```
/// use tg_reflect::info::Typed;
///
/// let info = <Vec<u8> as Typed>::type_info().as_list().unwrap();
/// assert_eq!(info.generics().len(), 1);
/// assert_eq!(info.generics()[0].name(), "T");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Generics(Box<[TypeParamInfo]>);

impl Generics {
    #[inline]
    pub fn new() -> Self {
        Self(Box::new([]))
    }

    #[inline]
    pub fn from_params(params: impl Into<Box<[TypeParamInfo]>>) -> Self {
        Self(params.into())
    }

    pub fn get_named(&self, name: &str) -> Option<&TypeParamInfo> {
        self.0.iter().find(|param| param.name == name)
    }
}

impl Deref for Generics {
    type Target = [TypeParamInfo];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
