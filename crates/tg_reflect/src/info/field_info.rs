use alloc::boxed::Box;
use core::any::{Any, TypeId};

use bitflags::bitflags;

use crate::Reflect;
use crate::info::{TypeInfo, Typed};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// FieldVisibility

/// Declared visibility of a field.
///
/// Only a plain `pub` counts as public; `pub(crate)`, `pub(super)` and
/// private fields are all [`FieldVisibility::Private`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldVisibility {
    Public,
    #[default]
    Private,
}

// -----------------------------------------------------------------------------
// FieldFlags

bitflags! {
    /// Explicit persistence markers recorded on a field.
    ///
    /// `SERIALIZE_FIELD` is set by `#[reflect(serialize_field)]`. The derive
    /// drops `#[reflect(ignore)]` fields instead of flagging them, `IGNORE`
    /// is for hand-written descriptors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// The field is persisted even if it is not public.
        const SERIALIZE_FIELD = 1 << 0;
        /// The field is never persisted.
        const IGNORE = 1 << 1;
    }
}

// -----------------------------------------------------------------------------
// NamedField

/// Information for a named struct field.
///
/// # Examples
///
/// ```
/// use tg_reflect::derive::Reflect;
/// use tg_reflect::info::{FieldVisibility, Typed};
///
/// #[derive(Reflect)]
/// struct Foo {
///     pub field_a: f32,
///     #[reflect(ignore)]
///     field_b: u8,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let a = info.field("field_a").unwrap();
///
/// assert!(a.type_is::<f32>());
/// assert_eq!(a.visibility(), FieldVisibility::Public);
/// // Ignored fields are not part of the type info.
/// assert!(info.field("field_b").is_none());
/// assert_eq!(info.field_len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    ty_id: TypeId,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    visibility: FieldVisibility,
    flags: FieldFlags,
}

impl NamedField {
    /// Creates a private, unmarked field named `name` of type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty_id: TypeId::of::<T>(),
            type_info: T::type_info,
            visibility: FieldVisibility::Private,
            flags: FieldFlags::empty(),
        }
    }

    #[inline]
    pub const fn with_visibility(mut self, visibility: FieldVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[inline]
    pub const fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// The declared type of the field.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn visibility(&self) -> FieldVisibility {
        self.visibility
    }

    #[inline]
    pub const fn is_public(&self) -> bool {
        matches!(self.visibility, FieldVisibility::Public)
    }

    #[inline]
    pub const fn flags(&self) -> FieldFlags {
        self.flags
    }

    /// Whether the field carries `#[reflect(serialize_field)]`.
    #[inline]
    pub const fn is_serialize_marked(&self) -> bool {
        self.flags.contains(FieldFlags::SERIALIZE_FIELD)
    }

    /// Whether the descriptor carries [`FieldFlags::IGNORE`].
    #[inline]
    pub const fn is_ignored(&self) -> bool {
        self.flags.contains(FieldFlags::IGNORE)
    }

    /// Reads this field from a struct instance.
    ///
    /// Returns `None` if `instance` is not a struct or has no such field.
    pub fn get<'a>(&self, instance: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        match instance.reflect_ref() {
            ReflectRef::Struct(value) => value.field(self.name),
            _ => None,
        }
    }

    pub fn get_mut<'a>(&self, instance: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        match instance.reflect_mut() {
            ReflectMut::Struct(value) => value.field_mut(self.name),
            _ => None,
        }
    }

    /// Writes `value` into this field of a struct instance.
    ///
    /// The value is handed back if the field is missing or its type differs.
    pub fn set(
        &self,
        instance: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>> {
        match self.get_mut(instance) {
            Some(field) => field.set(value),
            None => Err(value),
        }
    }
}
