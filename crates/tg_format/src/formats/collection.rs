use tg_reflect::Reflect;
use tg_reflect::info::{ArrayInfo, ListInfo, TypeInfo, Typed};
use tg_reflect::ops::{
    Array, ArrayBuildError, ArrayBuilder, IndexTuples, List, ReflectRef, flat_len,
};

use crate::{CodecError, SerializationContext, SerializationFormat, Serializer, Tag};

/// Arrays and lists.
///
/// Lists and rank-1 arrays are written as a [`Tag::List`] in item order.
/// Arrays of a higher rank are written as a compound holding their extents
/// under `"dimensions"` and their items in row-major order under
/// `"elements"`:
///
/// ```
/// use tg_format::{Serializer, Tag};
/// use tg_reflect::ops::NdArray;
/// use tg_reflect::registry::{TypeRegistry, TypeRegistryArc};
///
/// let serializer = Serializer::new(TypeRegistryArc::new(TypeRegistry::new()));
///
/// let grid = NdArray::from_vec([2, 3], vec![1_u8, 2, 3, 4, 5, 6]).unwrap();
/// let tag = serializer.to_tag(&grid).unwrap();
///
/// assert_eq!(tag.get("dimensions").unwrap().len(), 2);
/// assert_eq!(tag.get("elements").unwrap().item(3), Some(&Tag::Byte(4)));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionFormat;

impl CollectionFormat {
    pub const DIMENSIONS_KEY: &'static str = "dimensions";
    pub const ELEMENTS_KEY: &'static str = "elements";
}

impl SerializationFormat for CollectionFormat {
    fn name(&self) -> &'static str {
        "CollectionFormat"
    }

    fn can_handle(&self, info: &TypeInfo) -> bool {
        info.is_array() || info.is_list()
    }

    fn serialize(
        &self,
        value: &dyn Reflect,
        serializer: &Serializer,
        ctx: &mut SerializationContext,
    ) -> Result<Tag, CodecError> {
        match value.reflect_ref() {
            ReflectRef::List(list) => {
                let items = list
                    .iter()
                    .map(|item| serializer.serialize(item, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Tag::List(items))
            }
            ReflectRef::Array(array) if array.rank() == 1 => {
                Ok(Tag::List(write_items(array, serializer, ctx)?))
            }
            ReflectRef::Array(array) => {
                let dimensions = array
                    .extents()
                    .into_iter()
                    .map(|extent| {
                        i32::try_from(extent).map_err(|_| {
                            CodecError::InvalidExtent(i64::try_from(extent).unwrap_or(i64::MAX))
                        })
                    })
                    .collect::<Result<Box<[i32]>, _>>()?;

                let mut tag = Tag::new_compound();
                tag.insert(
                    Self::DIMENSIONS_KEY,
                    serializer.serialize(&dimensions, ctx)?,
                );
                tag.insert(
                    Self::ELEMENTS_KEY,
                    Tag::List(write_items(array, serializer, ctx)?),
                );
                Ok(tag)
            }
            _ => Err(CodecError::UnsupportedType {
                type_path: value.reflect_type_path(),
                format: self.name(),
            }),
        }
    }

    fn deserialize(
        &self,
        tag: &Tag,
        target: &'static TypeInfo,
        serializer: &Serializer,
        ctx: &mut SerializationContext,
    ) -> Result<Option<Box<dyn Reflect>>, CodecError> {
        let value = match target {
            TypeInfo::Array(info) => read_array(tag, info, serializer, ctx)?,
            TypeInfo::List(info) => read_list(tag, info, serializer, ctx)?,
            _ => {
                return Err(CodecError::UnsupportedType {
                    type_path: target.type_path(),
                    format: self.name(),
                });
            }
        };
        Ok(Some(value))
    }
}

// -----------------------------------------------------------------------------
// Writing

fn write_items(
    array: &dyn Array,
    serializer: &Serializer,
    ctx: &mut SerializationContext,
) -> Result<Vec<Tag>, CodecError> {
    let extents = array.extents();
    let mut items = Vec::with_capacity(array.len());
    let mut tuples = IndexTuples::new(&extents);
    while let Some(indices) = tuples.next_tuple() {
        let item = array.get(indices).ok_or_else(|| ArrayBuildError::OutOfBounds {
            indices: indices.to_vec(),
            extents: extents.clone(),
        })?;
        items.push(serializer.serialize(item, ctx)?);
    }
    Ok(items)
}

// -----------------------------------------------------------------------------
// Reading

fn read_item(
    tag: &Tag,
    item_info: &'static TypeInfo,
    container: &'static str,
    serializer: &Serializer,
    ctx: &mut SerializationContext,
) -> Result<Box<dyn Reflect>, CodecError> {
    serializer
        .deserialize(tag, item_info, ctx)?
        .ok_or(CodecError::UnexpectedNull(container))
}

fn read_array(
    tag: &Tag,
    info: &'static ArrayInfo,
    serializer: &Serializer,
    ctx: &mut SerializationContext,
) -> Result<Box<dyn Reflect>, CodecError> {
    let item_info = info.item_info();
    let container = info.type_path();

    match tag {
        Tag::List(items) => {
            if info.rank() != 1 {
                return Err(CodecError::RankMismatch {
                    expected: info.rank(),
                    found: 1,
                });
            }
            let mut builder = ArrayBuilder::new(info, &[items.len()])?;
            for (index, item) in items.iter().enumerate() {
                let value = read_item(item, item_info, container, serializer, ctx)?;
                builder.set(&[index], value)?;
            }
            Ok(builder.finish()?)
        }
        Tag::Compound(_) => {
            let extents = read_extents(tag, serializer, ctx)?;
            if extents.len() != info.rank() {
                return Err(CodecError::RankMismatch {
                    expected: info.rank(),
                    found: extents.len(),
                });
            }

            let elements = match tag.get(CollectionFormat::ELEMENTS_KEY) {
                Some(Tag::List(elements)) => elements,
                Some(other) => {
                    return Err(CodecError::InvalidTagType {
                        expected: "List",
                        found: other.tag_type(),
                    });
                }
                None => return Err(CodecError::MissingField(CollectionFormat::ELEMENTS_KEY)),
            };

            let len = flat_len(&extents).ok_or_else(|| ArrayBuildError::Overflow(extents.clone()))?;
            if elements.len() != len {
                return Err(CodecError::SizeMismatch {
                    expected: len,
                    found: elements.len(),
                });
            }

            let mut builder = ArrayBuilder::new(info, &extents)?;
            let mut tuples = IndexTuples::new(&extents);
            let mut cursor = 0;
            while let Some(indices) = tuples.next_tuple() {
                let value = read_item(&elements[cursor], item_info, container, serializer, ctx)?;
                builder.set(indices, value)?;
                cursor += 1;
            }
            Ok(builder.finish()?)
        }
        other => Err(CodecError::InvalidTagType {
            expected: "List or Compound",
            found: other.tag_type(),
        }),
    }
}

/// Reads the `"dimensions"` entry of an array compound.
fn read_extents(
    tag: &Tag,
    serializer: &Serializer,
    ctx: &mut SerializationContext,
) -> Result<Vec<usize>, CodecError> {
    let missing = || CodecError::MissingField(CollectionFormat::DIMENSIONS_KEY);

    let dimensions = tag
        .get(CollectionFormat::DIMENSIONS_KEY)
        .ok_or_else(missing)?;
    let dimensions = serializer
        .deserialize(dimensions, <Box<[i32]> as Typed>::type_info(), ctx)?
        .ok_or_else(missing)?
        .take::<Box<[i32]>>()
        .map_err(|_| CodecError::InvalidType {
            type_path: CollectionFormat::DIMENSIONS_KEY,
            reason: "dimensions must be a sequence of integers",
        })?;

    dimensions
        .iter()
        .map(|&extent| usize::try_from(extent).map_err(|_| CodecError::InvalidExtent(extent.into())))
        .collect()
}

fn read_list(
    tag: &Tag,
    info: &'static ListInfo,
    serializer: &Serializer,
    ctx: &mut SerializationContext,
) -> Result<Box<dyn Reflect>, CodecError> {
    let container = info.type_path();
    if info.generics().len() != 1 {
        return Err(CodecError::InvalidType {
            type_path: container,
            reason: "a list type must have exactly one type parameter",
        });
    }
    let mut list = info
        .default_value()
        .ok_or(CodecError::InstantiationError(container))?;

    let Tag::List(items) = tag else {
        return Err(CodecError::InvalidTagType {
            expected: "List",
            found: tag.tag_type(),
        });
    };

    let item_info = info.item_info();
    for item in items {
        let value = read_item(item, item_info, container, serializer, ctx)?;
        list.push(value).map_err(|_| CodecError::InvalidType {
            type_path: container,
            reason: "the item type differs from the list item type",
        })?;
    }
    let list: Box<dyn Reflect> = list;
    Ok(list)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use tg_reflect::Reflect;
    use tg_reflect::impls::NonGenericTypeInfoCell;
    use tg_reflect::info::{
        Generics, ListInfo, ReflectKind, TypeInfo, TypeParamInfo, TypePath, Typed,
    };
    use tg_reflect::ops::{List, ListItemIter, NdArray, ReflectMut, ReflectRef};
    use tg_reflect::registry::{TypeRegistry, TypeRegistryArc};

    use crate::{CodecError, Serializer, Tag, TagType};

    fn serializer() -> Serializer {
        Serializer::new(TypeRegistryArc::new(TypeRegistry::new()))
    }

    fn ints(values: &[i32]) -> Tag {
        values.iter().copied().map(Tag::Int).collect()
    }

    fn grid_tag(dimensions: Tag, elements: Tag) -> Tag {
        let mut tag = Tag::new_compound();
        tag.insert("dimensions", dimensions);
        tag.insert("elements", elements);
        tag
    }

    #[test]
    fn rank_one_round_trip() {
        let serializer = serializer();

        let vec = vec![3_i32, 1, 4];
        let tag = serializer.to_tag(&vec).unwrap();
        assert_eq!(tag, ints(&[3, 1, 4]));
        assert_eq!(serializer.from_tag::<Vec<i32>>(&tag).unwrap(), Some(vec));

        let deque: VecDeque<i32> = serializer.from_tag(&tag).unwrap().unwrap();
        assert_eq!(deque, [3, 1, 4]);

        let boxed: Box<[i32]> = serializer.from_tag(&tag).unwrap().unwrap();
        assert_eq!(&*boxed, [3, 1, 4]);

        let fixed: [i32; 3] = serializer.from_tag(&tag).unwrap().unwrap();
        assert_eq!(fixed, [3, 1, 4]);
        assert_eq!(serializer.to_tag(&fixed).unwrap(), tag);

        let line = NdArray::from_vec([3], vec![3_i32, 1, 4]).unwrap();
        assert_eq!(serializer.to_tag(&line).unwrap(), tag);
        assert_eq!(serializer.from_tag::<NdArray<i32, 1>>(&tag).unwrap(), Some(line));
    }

    #[test]
    fn rank_two_is_row_major() {
        let serializer = serializer();
        let grid =
            NdArray::from_fn([2, 3], |i| i32::try_from(i[0] * 10 + i[1]).unwrap()).unwrap();

        let tag = serializer.to_tag(&grid).unwrap();
        assert_eq!(tag, grid_tag(ints(&[2, 3]), ints(&[0, 1, 2, 10, 11, 12])));

        let keys: Vec<_> = tag.as_compound().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["dimensions", "elements"]);

        let back: NdArray<i32, 2> = serializer.from_tag(&tag).unwrap().unwrap();
        assert_eq!(back, grid);
        assert_eq!(back.item([1, 2]), Some(&12));
    }

    #[test]
    fn rank_three_round_trip() {
        let serializer = serializer();
        let cube = NdArray::from_fn([2, 2, 3], |i| {
            format!("{}{}{}", i[0], i[1], i[2])
        })
        .unwrap();

        let tag = serializer.to_tag(&cube).unwrap();
        let elements = tag.get("elements").unwrap();
        assert_eq!(elements.len(), 12);
        assert_eq!(elements.item(0).and_then(Tag::as_str), Some("000"));
        assert_eq!(elements.item(4).and_then(Tag::as_str), Some("011"));
        assert_eq!(elements.item(11).and_then(Tag::as_str), Some("112"));

        let back: NdArray<String, 3> = serializer.from_tag(&tag).unwrap().unwrap();
        assert_eq!(back, cube);
    }

    #[test]
    fn nested_collections() {
        let serializer = serializer();
        let rows = vec![vec![1_u8], vec![], vec![2, 3]];
        let tag = serializer.to_tag(&rows).unwrap();
        assert_eq!(tag.item(1), Some(&Tag::new_list()));
        assert_eq!(serializer.from_tag::<Vec<Vec<u8>>>(&tag).unwrap(), Some(rows));
    }

    #[test]
    fn empty_collections() {
        let serializer = serializer();

        let tag = serializer.to_tag(&Vec::<i64>::new()).unwrap();
        assert_eq!(tag, Tag::new_list());
        assert_eq!(serializer.from_tag::<Vec<i64>>(&tag).unwrap(), Some(vec![]));

        let flat = NdArray::<i64, 2>::from_vec([0, 3], vec![]).unwrap();
        let tag = serializer.to_tag(&flat).unwrap();
        assert_eq!(tag, grid_tag(ints(&[0, 3]), Tag::new_list()));
        assert_eq!(serializer.from_tag::<NdArray<i64, 2>>(&tag).unwrap(), Some(flat));
    }

    #[test]
    fn missing_dimensions() {
        let mut tag = Tag::new_compound();
        tag.insert("elements", ints(&[1, 2]));
        assert_eq!(
            serializer().from_tag::<NdArray<i32, 2>>(&tag),
            Err(CodecError::MissingField("dimensions"))
        );

        tag.insert("dimensions", Tag::Null);
        assert_eq!(
            serializer().from_tag::<NdArray<i32, 2>>(&tag),
            Err(CodecError::MissingField("dimensions"))
        );
    }

    #[test]
    fn element_count_must_match() {
        let tag = grid_tag(ints(&[2, 3]), ints(&[1, 2, 3, 4, 5]));
        assert_eq!(
            serializer().from_tag::<NdArray<i32, 2>>(&tag),
            Err(CodecError::SizeMismatch {
                expected: 6,
                found: 5
            })
        );
    }

    #[test]
    fn malformed_arrays() {
        let serializer = serializer();

        let negative = grid_tag(ints(&[2, -1]), Tag::new_list());
        assert_eq!(
            serializer.from_tag::<NdArray<i32, 2>>(&negative),
            Err(CodecError::InvalidExtent(-1))
        );

        let wrong_rank = grid_tag(ints(&[4]), ints(&[1, 2, 3, 4]));
        assert_eq!(
            serializer.from_tag::<NdArray<i32, 2>>(&wrong_rank),
            Err(CodecError::RankMismatch {
                expected: 2,
                found: 1
            })
        );

        assert_eq!(
            serializer.from_tag::<NdArray<i32, 2>>(&ints(&[1, 2])),
            Err(CodecError::RankMismatch {
                expected: 2,
                found: 1
            })
        );

        let mut no_elements = Tag::new_compound();
        no_elements.insert("dimensions", ints(&[1, 1]));
        assert_eq!(
            serializer.from_tag::<NdArray<i32, 2>>(&no_elements),
            Err(CodecError::MissingField("elements"))
        );

        let scalar_elements = grid_tag(ints(&[1, 1]), Tag::Int(1));
        assert_eq!(
            serializer.from_tag::<NdArray<i32, 2>>(&scalar_elements),
            Err(CodecError::InvalidTagType {
                expected: "List",
                found: TagType::Int
            })
        );

        assert!(matches!(
            serializer.from_tag::<Vec<i32>>(&Tag::Int(1)),
            Err(CodecError::InvalidTagType { .. })
        ));
    }

    #[test]
    fn fixed_length_is_enforced() {
        assert_eq!(
            serializer().from_tag::<[i32; 3]>(&ints(&[1, 2])),
            Err(CodecError::SizeMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn null_items_are_rejected() {
        let serializer = serializer();
        let tag = Tag::from(vec![Tag::Int(1), Tag::Null]);
        assert_eq!(
            serializer.from_tag::<Vec<i32>>(&tag),
            Err(CodecError::UnexpectedNull("alloc::vec::Vec<i32>"))
        );

        let grid = grid_tag(ints(&[1, 2]), Tag::from(vec![Tag::Null, Tag::Int(1)]));
        assert!(matches!(
            serializer.from_tag::<NdArray<i32, 2>>(&grid),
            Err(CodecError::UnexpectedNull(_))
        ));
    }

    #[test]
    fn renders_as_json() {
        let grid = NdArray::from_vec([2, 2], vec![true, false, false, true]).unwrap();
        let tag = serializer().to_tag(&grid).unwrap();
        assert_eq!(
            serde_json::to_string(&tag).unwrap(),
            r#"{"dimensions":[2,2],"elements":[true,false,false,true]}"#
        );
    }

    // A list type whose info is configured per test.
    macro_rules! custom_list {
        ($name:ident, $info:expr) => {
            #[derive(Default)]
            struct $name(Vec<i32>);

            impl TypePath for $name {
                fn type_path() -> &'static str {
                    concat!("tests::", stringify!($name))
                }

                fn type_name() -> &'static str {
                    stringify!($name)
                }

                fn type_ident() -> &'static str {
                    stringify!($name)
                }
            }

            impl Typed for $name {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| TypeInfo::List($info))
                }
            }

            impl Reflect for $name {
                fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                    *self = value.take::<Self>()?;
                    Ok(())
                }

                fn reflect_kind(&self) -> ReflectKind {
                    ReflectKind::List
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::List(self)
                }

                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::List(self)
                }
            }

            impl List for $name {
                fn get(&self, index: usize) -> Option<&dyn Reflect> {
                    <[i32]>::get(&self.0, index).map(|item| item as &dyn Reflect)
                }

                fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                    <[i32]>::get_mut(&mut self.0, index).map(|item| item as &mut dyn Reflect)
                }

                fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                    self.0.push(value.take::<i32>()?);
                    Ok(())
                }

                fn pop(&mut self) -> Option<Box<dyn Reflect>> {
                    self.0.pop().map(Reflect::into_boxed_reflect)
                }

                fn len(&self) -> usize {
                    Vec::len(&self.0)
                }

                fn iter(&self) -> ListItemIter<'_> {
                    ListItemIter::new(self)
                }
            }
        };
    }

    custom_list!(
        PairList,
        ListInfo::new::<PairList, i32>()
            .with_default::<PairList>()
            .with_generics(Generics::from_params([
                TypeParamInfo::new::<i32>("K"),
                TypeParamInfo::new::<i32>("V"),
            ]))
    );

    custom_list!(NoDefaultList, ListInfo::new::<NoDefaultList, i32>());

    #[test]
    fn list_target_needs_one_generic() {
        assert_eq!(
            serializer().from_tag::<PairList>(&ints(&[1])).err(),
            Some(CodecError::InvalidType {
                type_path: "tests::PairList",
                reason: "a list type must have exactly one type parameter",
            })
        );
    }

    #[test]
    fn list_target_needs_default() {
        assert_eq!(
            serializer().from_tag::<NoDefaultList>(&ints(&[1])).err(),
            Some(CodecError::InstantiationError("tests::NoDefaultList"))
        );
    }
}
