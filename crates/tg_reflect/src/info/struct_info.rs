use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{NamedField, Type, TypePath, impl_type_fn};

/// Type info for structs with named fields.
///
/// Fields keep their declaration order.
///
/// # Examples
///
/// ```
/// use tg_reflect::derive::Reflect;
/// use tg_reflect::info::Typed;
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Foo {
///     a: u32,
///     b: String,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.field_at(1).unwrap().name(), "b");
/// assert!(info.default_value().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    default: Option<fn() -> Box<dyn Reflect>>,
}

fn default_value<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

impl StructInfo {
    impl_type_fn!(ty);

    pub fn new<T: TypePath>(fields: &[NamedField]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            default: None,
        }
    }

    /// Records a constructor for a default instance.
    pub fn with_default<T: Reflect + Default>(mut self) -> Self {
        self.default = Some(default_value::<T>);
        self
    }

    /// All named fields, public and private, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// A default instance, or `None` if the type has no default constructor.
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|f| f())
    }
}
