use core::fmt;

use indexmap::IndexMap;
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

// -----------------------------------------------------------------------------
// TagType

/// The kind of a [`Tag`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Null,
    Bool,
    Byte,
    SByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    String,
    List,
    Compound,
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// -----------------------------------------------------------------------------
// Tag

/// A node of the self-describing value tree.
///
/// Scalars keep their exact width, lists keep their order and compounds keep
/// their insertion order.
///
/// ```
/// use tg_format::{Tag, TagType};
///
/// let mut player = Tag::new_compound();
/// player.insert("name", "Ada");
/// player.insert("scores", vec![Tag::Int(3), Tag::Int(7)]);
///
/// assert_eq!(player.tag_type(), TagType::Compound);
/// assert_eq!(player.get("name").and_then(Tag::as_str), Some("Ada"));
/// assert_eq!(player.get("scores").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Tag {
    #[default]
    Null,
    Bool(bool),
    Byte(u8),
    SByte(i8),
    Short(i16),
    UShort(u16),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    Float(f32),
    Double(f64),
    String(String),
    List(Vec<Tag>),
    Compound(IndexMap<String, Tag>),
}

impl Tag {
    #[inline]
    pub fn new_list() -> Self {
        Self::List(Vec::new())
    }

    #[inline]
    pub fn new_compound() -> Self {
        Self::Compound(IndexMap::new())
    }

    pub const fn tag_type(&self) -> TagType {
        match self {
            Self::Null => TagType::Null,
            Self::Bool(_) => TagType::Bool,
            Self::Byte(_) => TagType::Byte,
            Self::SByte(_) => TagType::SByte,
            Self::Short(_) => TagType::Short,
            Self::UShort(_) => TagType::UShort,
            Self::Int(_) => TagType::Int,
            Self::UInt(_) => TagType::UInt,
            Self::Long(_) => TagType::Long,
            Self::ULong(_) => TagType::ULong,
            Self::Float(_) => TagType::Float,
            Self::Double(_) => TagType::Double,
            Self::String(_) => TagType::String,
            Self::List(_) => TagType::List,
            Self::Compound(_) => TagType::Compound,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Number of items of a list or entries of a compound, `0` for other tags.
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Compound(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Tag>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&IndexMap<String, Tag>> {
        match self {
            Self::Compound(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut IndexMap<String, Tag>> {
        match self {
            Self::Compound(entries) => Some(entries),
            _ => None,
        }
    }

    /// The list item at `index`.
    pub fn item(&self, index: usize) -> Option<&Tag> {
        self.as_list()?.get(index)
    }

    /// Replaces the list item at `index`, returning the previous one.
    ///
    /// Returns `None` and drops `value` if `self` is not a list or `index`
    /// is out of bounds.
    pub fn set_item(&mut self, index: usize, value: impl Into<Tag>) -> Option<Tag> {
        let slot = self.as_list_mut()?.get_mut(index)?;
        Some(core::mem::replace(slot, value.into()))
    }

    /// Appends to a list; returns `false` if `self` is not a list.
    pub fn push(&mut self, value: impl Into<Tag>) -> bool {
        match self.as_list_mut() {
            Some(items) => {
                items.push(value.into());
                true
            }
            None => false,
        }
    }

    /// The compound entry named `key`.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.as_compound()?.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.as_compound_mut()?.get_mut(key)
    }

    /// Inserts a compound entry, returning the previous value under `key`.
    ///
    /// Does nothing if `self` is not a compound.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        self.as_compound_mut()?.insert(key.into(), value.into())
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Tag {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_scalar! {
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
    Vec<Tag> => List,
    IndexMap<String, Tag> => Compound,
}

impl From<&str> for Tag {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl FromIterator<Tag> for Tag {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Tag)> for Tag {
    fn from_iter<I: IntoIterator<Item = (String, Tag)>>(iter: I) -> Self {
        Self::Compound(iter.into_iter().collect())
    }
}

// -----------------------------------------------------------------------------
// Serialize

/// Renders the tree through any serde format: scalars as themselves,
/// lists as sequences, compounds as maps in insertion order.
impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Byte(value) => serializer.serialize_u8(*value),
            Self::SByte(value) => serializer.serialize_i8(*value),
            Self::Short(value) => serializer.serialize_i16(*value),
            Self::UShort(value) => serializer.serialize_u16(*value),
            Self::Int(value) => serializer.serialize_i32(*value),
            Self::UInt(value) => serializer.serialize_u32(*value),
            Self::Long(value) => serializer.serialize_i64(*value),
            Self::ULong(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f32(*value),
            Self::Double(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Compound(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Tag, TagType};

    #[test]
    fn list_access() {
        let mut list: Tag = [Tag::Byte(1), Tag::Byte(2)].into_iter().collect();
        assert!(list.push(3_u8));
        assert_eq!(list.len(), 3);
        assert_eq!(list.set_item(0, 9_u8), Some(Tag::Byte(1)));
        assert_eq!(list.item(0), Some(&Tag::Byte(9)));
        assert_eq!(list.set_item(5, 1_u8), None);
        assert!(list.get("key").is_none());
    }

    #[test]
    fn compound_keeps_insertion_order() {
        let mut tag = Tag::new_compound();
        tag.insert("z", 1_i32);
        tag.insert("a", 2_i32);
        assert_eq!(tag.insert("z", 3_i32), Some(Tag::Int(1)));

        let keys: Vec<_> = tag.as_compound().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["z", "a"]);
        assert_eq!(Tag::Null.insert("k", 1_i32), None);
    }

    #[test]
    fn tag_types() {
        assert_eq!(Tag::default().tag_type(), TagType::Null);
        assert_eq!(Tag::from(1.5_f64).tag_type(), TagType::Double);
        assert_eq!(Tag::from("x").tag_type(), TagType::String);
        assert_eq!(TagType::UShort.to_string(), "UShort");
    }

    #[test]
    fn renders_as_json() {
        let mut tag = Tag::new_compound();
        tag.insert("id", 7_u64);
        tag.insert("name", "crate");
        tag.insert("empty", Tag::Null);
        tag.insert("values", vec![Tag::Float(0.5), Tag::Bool(true)]);

        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"name":"crate","empty":null,"values":[0.5,true]}"#
        );
    }
}
