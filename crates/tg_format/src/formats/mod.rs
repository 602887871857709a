//! The built-in [`SerializationFormat`](crate::SerializationFormat)s.

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod guid;
mod object;
mod primitive;

// -----------------------------------------------------------------------------
// Exports

pub use collection::CollectionFormat;
pub use guid::GuidFormat;
pub use object::ObjectFormat;
pub use primitive::PrimitiveFormat;
