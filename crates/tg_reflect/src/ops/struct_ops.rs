use core::iter::FusedIterator;

use crate::Reflect;

/// A struct with named fields.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect).
/// Field order matches [`StructInfo::fields`](crate::info::StructInfo::fields).
///
/// # Examples
///
/// ```
/// use tg_reflect::derive::Reflect;
/// use tg_reflect::ops::Struct;
///
/// #[derive(Reflect)]
/// struct Foo {
///     bar: u32,
/// }
///
/// let mut foo = Foo { bar: 1 };
/// *foo.field_mut("bar").unwrap().downcast_mut::<u32>().unwrap() = 7;
/// assert_eq!(foo.bar, 7);
/// assert_eq!(foo.field_len(), 1);
/// ```
pub trait Struct: Reflect {
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn field_len(&self) -> usize;

    /// Iterates field values in declaration order.
    ///
    /// Trait objects use [`FieldIter::new`].
    #[inline]
    fn iter_fields(&self) -> FieldIter<'_>
    where
        Self: Sized,
    {
        FieldIter::new(self)
    }
}

/// Iterator over the field values of a [`Struct`].
pub struct FieldIter<'a> {
    value: &'a dyn Struct,
    index: usize,
}

impl<'a> FieldIter<'a> {
    #[inline]
    pub fn new(value: &'a dyn Struct) -> Self {
        Self { value, index: 0 }
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = &'a dyn Reflect;

    fn next(&mut self) -> Option<Self::Item> {
        let field = self.value.field_at(self.index);
        self.index += field.is_some() as usize;
        field
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.value.field_len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FieldIter<'_> {}
impl FusedIterator for FieldIter<'_> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::Struct;
    use crate::Reflect;
    use crate::info::{FieldVisibility, TypePath, Typed};
    use crate::ops::ReflectRef;

    #[derive(crate::derive::Reflect, Default, Debug, PartialEq)]
    #[reflect(default, type_path = "demo::items::Sword")]
    struct Sword {
        pub name: String,
        #[reflect(serialize_field)]
        damage: u32,
        pub(crate) tags: Vec<String>,
    }

    #[derive(crate::derive::Reflect)]
    struct Plain {
        pub r#type: u8,
    }

    #[test]
    fn derived_type_path() {
        assert_eq!(Sword::type_path(), "demo::items::Sword");
        assert_eq!(Sword::module_path(), Some("demo::items"));
        assert_eq!(Sword::type_name(), "Sword");

        assert_eq!(
            Plain::type_path(),
            "tg_reflect::ops::struct_ops::tests::Plain"
        );
        assert_eq!(Plain::module_path(), Some("tg_reflect::ops::struct_ops::tests"));
    }

    #[test]
    fn derived_field_table() {
        let info = Sword::type_info().as_struct().unwrap();
        assert_eq!(info.field_len(), 3);
        assert_eq!(info.index_of("damage"), Some(1));

        let damage = info.field("damage").unwrap();
        assert!(damage.is_serialize_marked());
        assert_eq!(damage.visibility(), FieldVisibility::Private);
        // Restricted visibility is not public.
        assert!(!info.field("tags").unwrap().is_public());
        assert!(info.field("tags").unwrap().type_info().is_list());

        let plain = Plain::type_info().as_struct().unwrap();
        assert!(plain.field("type").is_some());
    }

    #[test]
    fn access_by_name_and_index() {
        let mut sword = Sword {
            name: String::from("Edge"),
            damage: 12,
            tags: Vec::new(),
        };

        assert_eq!(sword.field("damage").unwrap().downcast_ref::<u32>(), Some(&12));
        assert!(sword.field_at(0).unwrap().is::<String>());
        assert!(sword.field("missing").is_none());
        assert!(sword.field_at(3).is_none());

        *sword.field_mut("damage").unwrap().downcast_mut::<u32>().unwrap() = 20;
        assert_eq!(sword.damage, 20);

        let names: Vec<_> = sword
            .iter_fields()
            .filter_map(|field| field.downcast_ref::<String>())
            .collect();
        assert_eq!(names, [&String::from("Edge")]);
    }

    #[test]
    fn set_through_named_field() {
        let info = Sword::type_info().as_struct().unwrap();
        let mut value = info.default_value().unwrap();

        let name = info.field("name").unwrap();
        name.set(&mut *value, String::from("Dawn").into_boxed_reflect())
            .unwrap();
        // Wrong type is handed back.
        assert!(name.set(&mut *value, 1_u8.into_boxed_reflect()).is_err());

        assert!(matches!(value.reflect_ref(), ReflectRef::Struct(_)));
        let sword = value.take::<Sword>().unwrap();
        assert_eq!(sword.name, "Dawn");
        assert_eq!(sword.damage, 0);
    }
}
