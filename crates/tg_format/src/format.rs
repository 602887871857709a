use tg_reflect::Reflect;
use tg_reflect::info::TypeInfo;

use crate::{CodecError, SerializationContext, Serializer, Tag};

/// A codec for a family of types.
///
/// The [`Serializer`] asks its formats in order and uses the first whose
/// [`can_handle`](Self::can_handle) accepts the type. Formats recurse into
/// items and fields through the serializer they are given. They hold no
/// per-call state and may be shared between threads.
pub trait SerializationFormat: Send + Sync {
    /// A name for diagnostics.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn can_handle(&self, info: &TypeInfo) -> bool;

    fn serialize(
        &self,
        value: &dyn Reflect,
        serializer: &Serializer,
        ctx: &mut SerializationContext,
    ) -> Result<Tag, CodecError>;

    /// Reads a value of type `target` from a non-null `tag`.
    fn deserialize(
        &self,
        tag: &Tag,
        target: &'static TypeInfo,
        serializer: &Serializer,
        ctx: &mut SerializationContext,
    ) -> Result<Option<Box<dyn Reflect>>, CodecError>;
}
