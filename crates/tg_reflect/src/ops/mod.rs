//! Kind-specific reflection traits.
//!
//! - [`Struct`]: named fields.
//! - [`List`]: growable ordered containers.
//! - [`Array`]: fixed-rank arrays addressed by index tuples, with
//!   [`IndexTuples`] for row-major enumeration and [`ArrayBuilder`]
//!   for construction.

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod list_ops;
mod nd_array;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use array_ops::{Array, ArrayBuildError, ArrayBuilder, IndexTuples};
pub use array_ops::{flat_index, flat_len, take_items};
pub use list_ops::{List, ListItemIter};
pub use nd_array::NdArray;
pub use struct_ops::{FieldIter, Struct};

use crate::Reflect;
use crate::info::{ReflectKind, ReflectKindError};

// -----------------------------------------------------------------------------
// ReflectRef / ReflectMut

/// An immutable view of a value through its kind-specific trait.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Opaque(&'a dyn Reflect),
}

/// A mutable view of a value through its kind-specific trait.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Opaque(&'a mut dyn Reflect),
}

macro_rules! impl_kind_casts {
    ($ref_ty:ident, $($ref:tt)+) => {
        impl<'a> $ref_ty<'a> {
            pub fn kind(&self) -> ReflectKind {
                match self {
                    Self::Struct(_) => ReflectKind::Struct,
                    Self::List(_) => ReflectKind::List,
                    Self::Array(_) => ReflectKind::Array,
                    Self::Opaque(_) => ReflectKind::Opaque,
                }
            }

            pub fn as_struct(self) -> Result<$($ref)+ dyn Struct, ReflectKindError> {
                match self {
                    Self::Struct(value) => Ok(value),
                    other => Err(ReflectKindError {
                        expected: ReflectKind::Struct,
                        received: other.kind(),
                    }),
                }
            }

            pub fn as_list(self) -> Result<$($ref)+ dyn List, ReflectKindError> {
                match self {
                    Self::List(value) => Ok(value),
                    other => Err(ReflectKindError {
                        expected: ReflectKind::List,
                        received: other.kind(),
                    }),
                }
            }

            pub fn as_array(self) -> Result<$($ref)+ dyn Array, ReflectKindError> {
                match self {
                    Self::Array(value) => Ok(value),
                    other => Err(ReflectKindError {
                        expected: ReflectKind::Array,
                        received: other.kind(),
                    }),
                }
            }
        }
    };
}

impl_kind_casts!(ReflectRef, &'a);
impl_kind_casts!(ReflectMut, &'a mut);
