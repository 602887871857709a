use tg_reflect::Reflect;
use tg_reflect::info::TypeInfo;
use tg_reflect::ops::ReflectRef;

use crate::{CodecError, SerializationContext, SerializationFormat, Serializer, Tag};

/// Named-field structs as a compound of their serializable fields.
///
/// Which fields are written is decided by the serializer's
/// [`FieldAccessCache`](tg_reflect::cache::FieldAccessCache). On read,
/// absent or null keys leave the field at its default value, so the target
/// needs a default constructor (`#[reflect(default)]`).
///
/// With [`SerializationContext::with_type_hints`] the compound starts with a
/// [`TYPE_KEY`](Self::TYPE_KEY) entry holding the type path. When reading, a
/// hint naming a registered struct selects that type over the declared one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectFormat;

impl ObjectFormat {
    pub const TYPE_KEY: &'static str = "$type";

    /// The type named by the `"$type"` entry of `tag`, or `target`.
    fn select_type(
        tag: &Tag,
        target: &'static TypeInfo,
        serializer: &Serializer,
        ctx: &mut SerializationContext,
    ) -> Result<&'static TypeInfo, CodecError> {
        match tag.get(Self::TYPE_KEY) {
            None | Some(Tag::Null) => Ok(target),
            Some(Tag::String(name)) => match serializer.resolver().resolve(name) {
                Some(info) if info.is_struct() => Ok(info),
                _ => {
                    log::warn!(
                        "type hint `{name}` does not name a registered struct, reading `{}`",
                        target.type_path()
                    );
                    ctx.push_unresolved(name);
                    Ok(target)
                }
            },
            Some(other) => Err(CodecError::InvalidTagType {
                expected: "String",
                found: other.tag_type(),
            }),
        }
    }
}

impl SerializationFormat for ObjectFormat {
    fn name(&self) -> &'static str {
        "ObjectFormat"
    }

    fn can_handle(&self, info: &TypeInfo) -> bool {
        info.is_struct()
    }

    fn serialize(
        &self,
        value: &dyn Reflect,
        serializer: &Serializer,
        ctx: &mut SerializationContext,
    ) -> Result<Tag, CodecError> {
        let ReflectRef::Struct(_) = value.reflect_ref() else {
            return Err(CodecError::UnsupportedType {
                type_path: value.reflect_type_path(),
                format: self.name(),
            });
        };

        let mut tag = Tag::new_compound();
        if ctx.type_hints() {
            tag.insert(Self::TYPE_KEY, value.reflect_type_path());
        }
        for field in serializer.field_cache().serializable_fields_of(value).iter() {
            let item = field
                .get(value)
                .ok_or(CodecError::MissingField(field.name()))?;
            tag.insert(field.name(), serializer.serialize(item, ctx)?);
        }
        Ok(tag)
    }

    fn deserialize(
        &self,
        tag: &Tag,
        target: &'static TypeInfo,
        serializer: &Serializer,
        ctx: &mut SerializationContext,
    ) -> Result<Option<Box<dyn Reflect>>, CodecError> {
        if !matches!(tag, Tag::Compound(_)) {
            return Err(CodecError::InvalidTagType {
                expected: "Compound",
                found: tag.tag_type(),
            });
        }

        let info = Self::select_type(tag, target, serializer, ctx)?;
        let mut value = info
            .as_struct()
            .map_err(|_| CodecError::UnsupportedType {
                type_path: info.type_path(),
                format: self.name(),
            })?
            .default_value()
            .ok_or(CodecError::InstantiationError(info.type_path()))?;

        for field in serializer.field_cache().serializable_fields(info).iter() {
            let Some(item) = tag.get(field.name()) else {
                continue;
            };
            let Some(item) = serializer.deserialize(item, field.type_info(), ctx)? else {
                continue;
            };
            field
                .set(&mut *value, item)
                .map_err(|_| CodecError::InvalidType {
                    type_path: info.type_path(),
                    reason: "a field value does not match the declared field type",
                })?;
        }
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use tg_reflect::derive::Reflect;
    use tg_reflect::info::{TypePath, Typed};
    use tg_reflect::registry::{TypeRegistry, TypeRegistryArc};
    use uuid::Uuid;

    use crate::{CodecError, SerializationContext, Serializer, Tag, TagType};

    #[derive(Reflect, Debug, Clone, PartialEq)]
    #[reflect(default)]
    struct Player {
        pub id: Uuid,
        pub name: String,
        pub level: u32,
        #[reflect(serialize_field)]
        score: f64,
        session: u64,
        #[reflect(ignore)]
        pub cache: Vec<i32>,
        pub inventory: Vec<Item>,
    }

    impl Default for Player {
        fn default() -> Self {
            Self {
                id: Uuid::nil(),
                name: String::from("nobody"),
                level: 1,
                score: 0.0,
                session: 0,
                cache: Vec::new(),
                inventory: Vec::new(),
            }
        }
    }

    #[derive(Reflect, Debug, Default, Clone, PartialEq)]
    #[reflect(default)]
    struct Item {
        pub kind: String,
        pub count: u8,
    }

    #[derive(Reflect, Debug, Default, Clone, PartialEq)]
    #[reflect(default)]
    struct Shape {
        pub sides: u8,
    }

    #[derive(Reflect, Debug, Default, Clone, PartialEq)]
    #[reflect(default)]
    struct Square {
        pub sides: u8,
        pub edge: f32,
    }

    #[derive(Reflect)]
    struct Locked {
        pub code: u16,
    }

    fn serializer() -> Serializer {
        let mut registry = TypeRegistry::new();
        registry.register::<Player>();
        registry.register::<Shape>();
        registry.register::<Square>();
        Serializer::new(TypeRegistryArc::new(registry))
    }

    fn player() -> Player {
        Player {
            id: Uuid::from_u128(0x1234),
            name: String::from("Ada"),
            level: 12,
            score: 99.5,
            session: 7,
            cache: vec![1, 2],
            inventory: vec![Item {
                kind: String::from("torch"),
                count: 3,
            }],
        }
    }

    #[test]
    fn writes_serializable_fields() {
        let tag = serializer().to_tag(&player()).unwrap();
        let keys: Vec<_> = tag.as_compound().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["id", "name", "level", "score", "inventory"]);
        assert_eq!(tag.get("level"), Some(&Tag::UInt(12)));
        assert_eq!(
            tag.get("id").and_then(Tag::as_str),
            Some("00000000-0000-0000-0000-000000001234")
        );
        assert_eq!(
            tag.get("inventory").and_then(|items| items.item(0)).and_then(|item| item.get("kind")),
            Some(&Tag::from("torch"))
        );
    }

    #[test]
    fn round_trip_keeps_defaults_for_skipped_fields() {
        let serializer = serializer();
        let original = player();
        let tag = serializer.to_tag(&original).unwrap();
        let back: Player = serializer.from_tag(&tag).unwrap().unwrap();

        assert_eq!(
            back,
            Player {
                session: 0,
                cache: Vec::new(),
                ..original
            }
        );
    }

    #[test]
    fn absent_and_null_keys_keep_defaults() {
        let mut tag = Tag::new_compound();
        tag.insert("name", Tag::Null);
        tag.insert("score", Tag::Int(4));

        let back: Player = serializer().from_tag(&tag).unwrap().unwrap();
        assert_eq!(back.name, "nobody");
        assert_eq!(back.level, 1);
        assert_eq!(back.score, 4.0);
    }

    #[test]
    fn needs_a_default_constructor() {
        let mut tag = Tag::new_compound();
        tag.insert("code", Tag::UShort(1));
        assert!(matches!(
            serializer().from_tag::<Locked>(&tag),
            Err(CodecError::InstantiationError(path)) if path.ends_with("Locked")
        ));
    }

    #[test]
    fn rejects_non_compound_tags() {
        assert_eq!(
            serializer().from_tag::<Shape>(&Tag::Int(3)),
            Err(CodecError::InvalidTagType {
                expected: "Compound",
                found: TagType::Int,
            })
        );
    }

    #[test]
    fn field_type_mismatch() {
        let mut tag = Tag::new_compound();
        tag.insert("sides", Tag::from("four"));
        assert!(matches!(
            serializer().from_tag::<Shape>(&tag),
            Err(CodecError::TypeMismatch { expected: "u8", .. })
        ));
    }

    #[test]
    fn type_hints_are_written_first() {
        let serializer = serializer();
        let mut ctx = SerializationContext::new().with_type_hints(true);
        let tag = serializer
            .serialize(&Shape { sides: 3 }, &mut ctx)
            .unwrap();

        let (key, value) = tag.as_compound().unwrap().first().unwrap();
        assert_eq!(key, "$type");
        assert_eq!(value.as_str(), Some(Shape::type_path()));
    }

    #[test]
    fn type_hint_selects_registered_struct() {
        let serializer = serializer();
        let mut tag = Tag::new_compound();
        tag.insert("$type", "square");
        tag.insert("sides", Tag::Byte(4));
        tag.insert("edge", Tag::Float(2.0));

        let mut ctx = SerializationContext::new();
        let value = serializer
            .deserialize(&tag, <Shape as Typed>::type_info(), &mut ctx)
            .unwrap()
            .unwrap();
        assert_eq!(
            value.take::<Square>().unwrap(),
            Square {
                sides: 4,
                edge: 2.0
            }
        );
        assert!(ctx.unresolved_type_hints().is_empty());
    }

    #[test]
    fn unknown_type_hint_falls_back() {
        let serializer = serializer();
        let mut tag = Tag::new_compound();
        tag.insert("$type", "Hexagon");
        tag.insert("sides", Tag::Byte(6));

        let mut ctx = SerializationContext::new();
        let shape: Shape = serializer.from_tag_with(&tag, &mut ctx).unwrap().unwrap();
        assert_eq!(shape.sides, 6);
        assert_eq!(ctx.unresolved_type_hints(), ["Hexagon"]);

        tag.insert("$type", Tag::Int(1));
        assert!(matches!(
            serializer.from_tag::<Shape>(&tag),
            Err(CodecError::InvalidTagType { expected: "String", .. })
        ));
    }

    #[test]
    fn deserialize_any_uses_the_hint() {
        let serializer = serializer();
        let mut ctx = SerializationContext::new().with_type_hints(true);
        let tag = serializer.serialize(&player(), &mut ctx).unwrap();

        let value = serializer.deserialize_any(&tag, &mut ctx).unwrap().unwrap();
        assert_eq!(value.take::<Player>().unwrap().name, "Ada");

        let mut anonymous = tag.clone();
        anonymous.as_compound_mut().unwrap().shift_remove("$type");
        assert_eq!(
            serializer.deserialize_any(&anonymous, &mut ctx).err(),
            Some(CodecError::MissingField("$type"))
        );

        anonymous.insert("$type", "Ghost");
        assert!(matches!(
            serializer.deserialize_any(&anonymous, &mut ctx),
            Err(CodecError::FormatError { .. })
        ));
    }
}
