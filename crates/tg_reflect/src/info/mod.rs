//! Runtime type descriptors.
//!
//! - [`TypePath`], [`Typed`]: static accessors implemented per type.
//! - [`TypeInfo`]: the descriptor, one variant per [`ReflectKind`].
//! - [`NamedField`]: a struct field with its visibility and persistence markers.

// -----------------------------------------------------------------------------
// Modules

mod array_info;
mod field_info;
mod generics;
mod list_info;
mod opaque_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use array_info::ArrayInfo;
pub use field_info::{FieldFlags, FieldVisibility, NamedField};
pub use generics::{Generics, TypeParamInfo};
pub use list_info::ListInfo;
pub use opaque_info::OpaqueInfo;
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use typed::{DynamicTyped, Typed};

pub(crate) use type_path::impl_type_fn;
