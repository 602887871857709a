use core::fmt;

use tg_reflect::Reflect;
use tg_reflect::cache::{FieldAccessCache, ReflectCaches, TypeResolver};
use tg_reflect::info::{TypeInfo, Typed};
use tg_reflect::registry::TypeRegistryArc;

use crate::formats::{CollectionFormat, GuidFormat, ObjectFormat, PrimitiveFormat};
use crate::{CodecError, SerializationContext, SerializationFormat, Tag};

/// Converts values to and from [`Tag`] trees through an ordered list of
/// [`SerializationFormat`]s.
///
/// The serializer owns the [`ReflectCaches`] its formats query; they live as
/// long as the serializer and are only emptied by [`clear_cache`](Self::clear_cache).
///
/// # Examples
///
/// ```
/// use tg_format::{Serializer, Tag};
/// use tg_reflect::registry::{TypeRegistry, TypeRegistryArc};
///
/// let serializer = Serializer::new(TypeRegistryArc::new(TypeRegistry::new()));
///
/// let tag = serializer.to_tag(&vec![String::from("a"), String::from("b")]).unwrap();
/// assert_eq!(tag, Tag::from(vec![Tag::from("a"), Tag::from("b")]));
///
/// let list: Vec<String> = serializer.from_tag(&tag).unwrap().unwrap();
/// assert_eq!(list, ["a", "b"]);
///
/// assert_eq!(serializer.from_tag::<Vec<String>>(&Tag::Null).unwrap(), None);
/// ```
pub struct Serializer {
    formats: Vec<Box<dyn SerializationFormat>>,
    caches: ReflectCaches,
}

impl Serializer {
    /// A serializer with the built-in formats, in order: primitives, UUIDs,
    /// collections, structs.
    pub fn new(registry: TypeRegistryArc) -> Self {
        let mut serializer = Self::empty(registry);
        serializer
            .add_format(PrimitiveFormat)
            .add_format(GuidFormat)
            .add_format(CollectionFormat)
            .add_format(ObjectFormat);
        serializer
    }

    /// A serializer without any format.
    pub fn empty(registry: TypeRegistryArc) -> Self {
        Self::with_caches(ReflectCaches::new(registry))
    }

    /// A serializer without any format, using the given caches.
    pub fn with_caches(caches: ReflectCaches) -> Self {
        Self {
            formats: Vec::new(),
            caches,
        }
    }

    /// Appends a format. Formats added earlier take precedence.
    pub fn add_format(&mut self, format: impl SerializationFormat + 'static) -> &mut Self {
        self.formats.push(Box::new(format));
        self
    }

    /// Names of the formats, in the order they are asked.
    pub fn formats(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.formats.iter().map(|format| format.name())
    }

    #[inline]
    pub fn caches(&self) -> &ReflectCaches {
        &self.caches
    }

    #[inline]
    pub fn resolver(&self) -> &TypeResolver {
        self.caches.resolver()
    }

    #[inline]
    pub fn field_cache(&self) -> &FieldAccessCache {
        self.caches.field_cache()
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        self.caches.resolver().registry()
    }

    /// Empties the type resolution and field caches.
    pub fn clear_cache(&self) {
        self.caches.clear_cache();
    }

    /// The first format that handles `info`.
    pub fn format_for(&self, info: &TypeInfo) -> Option<&dyn SerializationFormat> {
        let format = self
            .formats
            .iter()
            .find(|format| format.can_handle(info))
            .map(|format| &**format);
        if let Some(format) = format {
            log::trace!("`{}` handled by {}", info.type_path(), format.name());
        }
        format
    }

    pub fn serialize(
        &self,
        value: &dyn Reflect,
        ctx: &mut SerializationContext,
    ) -> Result<Tag, CodecError> {
        let info = value.reflect_type_info();
        self.format_for(info)
            .ok_or(CodecError::NoFormat(info.type_path()))?
            .serialize(value, self, ctx)
    }

    /// Reads a value of type `target`; a [`Tag::Null`] reads as `None`.
    pub fn deserialize(
        &self,
        tag: &Tag,
        target: &'static TypeInfo,
        ctx: &mut SerializationContext,
    ) -> Result<Option<Box<dyn Reflect>>, CodecError> {
        if tag.is_null() {
            return Ok(None);
        }
        self.format_for(target)
            .ok_or(CodecError::NoFormat(target.type_path()))?
            .deserialize(tag, target, self, ctx)
    }

    /// Reads a struct compound whose type is named by its `"$type"` entry.
    ///
    /// Fails with [`CodecError::MissingField`] without a `"$type"` entry and
    /// [`CodecError::FormatError`] if the name does not resolve.
    pub fn deserialize_any(
        &self,
        tag: &Tag,
        ctx: &mut SerializationContext,
    ) -> Result<Option<Box<dyn Reflect>>, CodecError> {
        if tag.is_null() {
            return Ok(None);
        }
        let name = match tag.get(ObjectFormat::TYPE_KEY) {
            Some(Tag::String(name)) => name,
            Some(other) => {
                return Err(CodecError::InvalidTagType {
                    expected: "String",
                    found: other.tag_type(),
                });
            }
            None => return Err(CodecError::MissingField(ObjectFormat::TYPE_KEY)),
        };
        let target = self
            .resolver()
            .resolve(name)
            .ok_or_else(|| CodecError::FormatError {
                type_path: ObjectFormat::TYPE_KEY,
                message: format!("no registered type is named `{name}`"),
            })?;
        self.deserialize(tag, target, ctx)
    }

    /// Serializes `value` with a default context.
    pub fn to_tag<T: Reflect>(&self, value: &T) -> Result<Tag, CodecError> {
        self.serialize(value, &mut SerializationContext::default())
    }

    /// Deserializes a `T` with a default context.
    pub fn from_tag<T: Reflect + Typed>(&self, tag: &Tag) -> Result<Option<T>, CodecError> {
        self.from_tag_with(tag, &mut SerializationContext::default())
    }

    pub fn from_tag_with<T: Reflect + Typed>(
        &self,
        tag: &Tag,
        ctx: &mut SerializationContext,
    ) -> Result<Option<T>, CodecError> {
        let Some(value) = self.deserialize(tag, T::type_info(), ctx)? else {
            return Ok(None);
        };
        value
            .take::<T>()
            .map(Some)
            .map_err(|_| CodecError::InvalidType {
                type_path: T::type_path(),
                reason: "the tag describes a value of another type",
            })
    }
}

impl fmt::Debug for Serializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializer")
            .field("formats", &self.formats().collect::<Vec<_>>())
            .field("caches", &self.caches)
            .finish()
    }
}
