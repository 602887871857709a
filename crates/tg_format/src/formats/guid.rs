use tg_reflect::Reflect;
use tg_reflect::info::{TypeInfo, TypePath};
use uuid::Uuid;

use crate::{CodecError, SerializationContext, SerializationFormat, Serializer, Tag};

/// [`Uuid`] as its hyphenated lowercase text.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuidFormat;

impl SerializationFormat for GuidFormat {
    fn name(&self) -> &'static str {
        "GuidFormat"
    }

    fn can_handle(&self, info: &TypeInfo) -> bool {
        info.type_is::<Uuid>()
    }

    fn serialize(
        &self,
        value: &dyn Reflect,
        _: &Serializer,
        _: &mut SerializationContext,
    ) -> Result<Tag, CodecError> {
        match value.downcast_ref::<Uuid>() {
            Some(uuid) => Ok(Tag::String(uuid.hyphenated().to_string())),
            None => Err(CodecError::UnsupportedType {
                type_path: value.reflect_type_path(),
                format: self.name(),
            }),
        }
    }

    fn deserialize(
        &self,
        tag: &Tag,
        _: &'static TypeInfo,
        _: &Serializer,
        _: &mut SerializationContext,
    ) -> Result<Option<Box<dyn Reflect>>, CodecError> {
        let Tag::String(text) = tag else {
            return Err(CodecError::TypeMismatch {
                expected: Uuid::type_path(),
                found: tag.tag_type(),
            });
        };
        let uuid = Uuid::parse_str(text).map_err(|err| CodecError::FormatError {
            type_path: Uuid::type_path(),
            message: err.to_string(),
        })?;
        Ok(Some(uuid.into_boxed_reflect()))
    }
}

#[cfg(test)]
mod tests {
    use tg_reflect::registry::{TypeRegistry, TypeRegistryArc};
    use uuid::Uuid;

    use crate::{CodecError, Serializer, Tag, TagType};

    fn serializer() -> Serializer {
        Serializer::new(TypeRegistryArc::new(TypeRegistry::new()))
    }

    #[test]
    fn canonical_text() {
        let uuid = Uuid::parse_str("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        let tag = serializer().to_tag(&uuid).unwrap();
        assert_eq!(tag, Tag::from("67e55044-10b1-426f-9247-bb680e5fe0c8"));
    }

    #[test]
    fn round_trip() {
        let serializer = serializer();
        let uuid = Uuid::new_v4();
        let tag = serializer.to_tag(&uuid).unwrap();
        assert_eq!(serializer.from_tag::<Uuid>(&tag).unwrap(), Some(uuid));
    }

    #[test]
    fn rejects_other_tags() {
        let serializer = serializer();
        assert_eq!(
            serializer.from_tag::<Uuid>(&Tag::Int(4)),
            Err(CodecError::TypeMismatch {
                expected: "uuid::Uuid",
                found: TagType::Int,
            })
        );
        assert!(matches!(
            serializer.from_tag::<Uuid>(&Tag::from("not-a-uuid")),
            Err(CodecError::FormatError { .. })
        ));
    }
}
