use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a type's [`TypeInfo`].
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) and by the
/// built-in impls. Manual impls store the info in a
/// [`NonGenericTypeInfoCell`](crate::impls::NonGenericTypeInfoCell) or a
/// [`GenericTypeInfoCell`](crate::impls::GenericTypeInfoCell):
///
/// ```
/// use tg_reflect::impls::NonGenericTypeInfoCell;
/// use tg_reflect::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
///
/// struct Handle(u32);
///
/// impl TypePath for Handle {
///     fn type_path() -> &'static str { "demo::Handle" }
///     fn type_name() -> &'static str { "Handle" }
///     fn type_ident() -> &'static str { "Handle" }
/// }
///
/// impl Typed for Handle {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(Handle::type_info().type_is::<Handle>());
/// ```
pub trait Typed: TypePath {
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
