use tg_reflect::Reflect;
use tg_reflect::info::{TypeInfo, TypePath};

use crate::{CodecError, SerializationContext, SerializationFormat, Serializer, Tag};

/// Scalars and strings as the scalar tag of the same width.
///
/// Reading is lenient across widths: an integer target accepts any integer
/// tag whose value fits, a float target accepts any numeric tag. A value that
/// does not fit fails with [`CodecError::TypeMismatch`].
///
/// # Examples
///
/// ```
/// use tg_format::{Serializer, Tag};
/// use tg_reflect::registry::{TypeRegistry, TypeRegistryArc};
///
/// let serializer = Serializer::new(TypeRegistryArc::new(TypeRegistry::new()));
///
/// assert_eq!(serializer.to_tag(&7_u16).unwrap(), Tag::UShort(7));
/// assert_eq!(serializer.from_tag::<i64>(&Tag::Byte(7)).unwrap(), Some(7));
/// assert!(serializer.from_tag::<u8>(&Tag::Int(300)).is_err());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimitiveFormat;

macro_rules! primitive_types {
    ($m:ident) => {
        $m! {
            bool => Bool,
            u8 => Byte,
            i8 => SByte,
            i16 => Short,
            u16 => UShort,
            i32 => Int,
            u32 => UInt,
            i64 => Long,
            u64 => ULong,
            f32 => Float,
            f64 => Double,
            String => String,
        }
    };
}

impl SerializationFormat for PrimitiveFormat {
    fn name(&self) -> &'static str {
        "PrimitiveFormat"
    }

    fn can_handle(&self, info: &TypeInfo) -> bool {
        macro_rules! is_primitive {
            ($($ty:ty => $variant:ident,)*) => {
                false $(|| info.type_is::<$ty>())*
            };
        }
        primitive_types!(is_primitive)
    }

    fn serialize(
        &self,
        value: &dyn Reflect,
        _: &Serializer,
        _: &mut SerializationContext,
    ) -> Result<Tag, CodecError> {
        macro_rules! to_tag {
            ($($ty:ty => $variant:ident,)*) => {
                $(
                    if let Some(value) = value.downcast_ref::<$ty>() {
                        return Ok(Tag::$variant(value.clone()));
                    }
                )*
            };
        }
        primitive_types!(to_tag);

        Err(CodecError::UnsupportedType {
            type_path: value.reflect_type_path(),
            format: self.name(),
        })
    }

    fn deserialize(
        &self,
        tag: &Tag,
        target: &'static TypeInfo,
        _: &Serializer,
        _: &mut SerializationContext,
    ) -> Result<Option<Box<dyn Reflect>>, CodecError> {
        let ty = target.ty();
        let value = if ty.is::<bool>() {
            match *tag {
                Tag::Bool(value) => Ok(value.into_boxed_reflect()),
                _ => Err(mismatch::<bool>(tag)),
            }
        } else if ty.is::<String>() {
            match tag {
                Tag::String(value) => Ok(value.clone().into_boxed_reflect()),
                _ => Err(mismatch::<String>(tag)),
            }
        } else if ty.is::<u8>() {
            read_integer::<u8>(tag)
        } else if ty.is::<i8>() {
            read_integer::<i8>(tag)
        } else if ty.is::<i16>() {
            read_integer::<i16>(tag)
        } else if ty.is::<u16>() {
            read_integer::<u16>(tag)
        } else if ty.is::<i32>() {
            read_integer::<i32>(tag)
        } else if ty.is::<u32>() {
            read_integer::<u32>(tag)
        } else if ty.is::<i64>() {
            read_integer::<i64>(tag)
        } else if ty.is::<u64>() {
            read_integer::<u64>(tag)
        } else if ty.is::<f64>() {
            float_value(tag)
                .map(Reflect::into_boxed_reflect)
                .ok_or_else(|| mismatch::<f64>(tag))
        } else if ty.is::<f32>() {
            float_value(tag)
                .and_then(narrow_f32)
                .map(Reflect::into_boxed_reflect)
                .ok_or_else(|| mismatch::<f32>(tag))
        } else {
            Err(CodecError::UnsupportedType {
                type_path: target.type_path(),
                format: self.name(),
            })
        };
        value.map(Some)
    }
}

// -----------------------------------------------------------------------------
// Coercion

#[inline]
fn mismatch<T: TypePath>(tag: &Tag) -> CodecError {
    CodecError::TypeMismatch {
        expected: T::type_path(),
        found: tag.tag_type(),
    }
}

fn integer_value(tag: &Tag) -> Option<i128> {
    Some(match *tag {
        Tag::Byte(v) => v.into(),
        Tag::SByte(v) => v.into(),
        Tag::Short(v) => v.into(),
        Tag::UShort(v) => v.into(),
        Tag::Int(v) => v.into(),
        Tag::UInt(v) => v.into(),
        Tag::Long(v) => v.into(),
        Tag::ULong(v) => v.into(),
        _ => return None,
    })
}

fn read_integer<T>(tag: &Tag) -> Result<Box<dyn Reflect>, CodecError>
where
    T: Reflect + TypePath + TryFrom<i128>,
{
    integer_value(tag)
        .and_then(|v| T::try_from(v).ok())
        .map(Reflect::into_boxed_reflect)
        .ok_or_else(|| mismatch::<T>(tag))
}

fn float_value(tag: &Tag) -> Option<f64> {
    match *tag {
        Tag::Float(v) => Some(v.into()),
        Tag::Double(v) => Some(v),
        // Wide integers round to the nearest representable value.
        _ => integer_value(tag).map(|v| v as f64),
    }
}

/// `None` if a finite value lies outside the `f32` range.
fn narrow_f32(value: f64) -> Option<f32> {
    if value.is_finite() && value.abs() > f64::from(f32::MAX) {
        None
    } else {
        Some(value as f32)
    }
}

#[cfg(test)]
mod tests {
    use tg_reflect::registry::{TypeRegistry, TypeRegistryArc};

    use crate::{CodecError, Serializer, Tag, TagType};

    fn serializer() -> Serializer {
        Serializer::new(TypeRegistryArc::new(TypeRegistry::new()))
    }

    #[test]
    fn scalars_keep_their_width() {
        let serializer = serializer();
        assert_eq!(serializer.to_tag(&true).unwrap(), Tag::Bool(true));
        assert_eq!(serializer.to_tag(&-3_i8).unwrap(), Tag::SByte(-3));
        assert_eq!(serializer.to_tag(&9_u32).unwrap(), Tag::UInt(9));
        assert_eq!(serializer.to_tag(&1.5_f32).unwrap(), Tag::Float(1.5));
        assert_eq!(serializer.to_tag(&2.5_f64).unwrap(), Tag::Double(2.5));
        assert_eq!(
            serializer.to_tag(&String::from("x")).unwrap(),
            Tag::String("x".into())
        );
    }

    #[test]
    fn integers_coerce_when_in_range() {
        let serializer = serializer();
        assert_eq!(serializer.from_tag::<u8>(&Tag::Long(255)).unwrap(), Some(255));
        assert_eq!(serializer.from_tag::<i16>(&Tag::SByte(-4)).unwrap(), Some(-4));
        assert_eq!(
            serializer.from_tag::<u64>(&Tag::ULong(u64::MAX)).unwrap(),
            Some(u64::MAX)
        );
        assert_eq!(
            serializer.from_tag::<u32>(&Tag::Int(-1)),
            Err(CodecError::TypeMismatch {
                expected: "u32",
                found: TagType::Int,
            })
        );
        assert!(serializer.from_tag::<i32>(&Tag::Double(1.0)).is_err());
    }

    #[test]
    fn floats_accept_numbers() {
        let serializer = serializer();
        assert_eq!(serializer.from_tag::<f64>(&Tag::Int(3)).unwrap(), Some(3.0));
        assert_eq!(serializer.from_tag::<f64>(&Tag::Float(0.5)).unwrap(), Some(0.5));
        assert_eq!(serializer.from_tag::<f32>(&Tag::Double(0.25)).unwrap(), Some(0.25));
        assert!(serializer.from_tag::<f32>(&Tag::Double(1e300)).is_err());
        assert!(
            serializer
                .from_tag::<f32>(&Tag::Double(f64::INFINITY))
                .unwrap()
                .unwrap()
                .is_infinite()
        );
    }

    #[test]
    fn bool_and_string_are_strict() {
        let serializer = serializer();
        assert!(serializer.from_tag::<bool>(&Tag::Byte(1)).is_err());
        assert!(serializer.from_tag::<String>(&Tag::Int(1)).is_err());
        assert_eq!(
            serializer.from_tag::<String>(&Tag::from("ok")).unwrap(),
            Some(String::from("ok"))
        );
        assert_eq!(serializer.from_tag::<bool>(&Tag::Null).unwrap(), None);
    }
}
