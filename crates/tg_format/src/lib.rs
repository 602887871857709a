//! Tag-tree serialization on top of `tg_reflect`.
//!
//! Values are converted to and from a [`Tag`] tree by a [`Serializer`], which
//! hands each value to the first [`SerializationFormat`] that can handle its
//! type. The built-in formats live in [`formats`].
//!
//! # Examples
//!
//! ```
//! use tg_format::{Serializer, Tag};
//! use tg_reflect::ops::NdArray;
//! use tg_reflect::registry::{TypeRegistry, TypeRegistryArc};
//!
//! let serializer = Serializer::new(TypeRegistryArc::new(TypeRegistry::new()));
//!
//! let grid = NdArray::from_vec([2, 2], vec![1_i32, 2, 3, 4]).unwrap();
//! let tag = serializer.to_tag(&grid).unwrap();
//! assert_eq!(tag.get("dimensions"), Some(&Tag::from(vec![Tag::Int(2), Tag::Int(2)])));
//!
//! let back: NdArray<i32, 2> = serializer.from_tag(&tag).unwrap().unwrap();
//! assert_eq!(back, grid);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod context;
mod error;
mod format;
mod serializer;
mod tag;

pub mod formats;

// -----------------------------------------------------------------------------
// Exports

pub use context::SerializationContext;
pub use error::CodecError;
pub use format::SerializationFormat;
pub use serializer::Serializer;
pub use tag::{Tag, TagType};
