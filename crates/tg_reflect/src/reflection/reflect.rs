use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{FieldIter, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// Type-erased access to a value whose shape is described by a
/// [`TypeInfo`](crate::info::TypeInfo).
///
/// Codecs never see concrete types: they receive a `&dyn Reflect`, branch on
/// [`reflect_ref`](Reflect::reflect_ref) and recurse into items or fields.
/// Deserialization produces `Box<dyn Reflect>` values that the caller turns
/// back into concrete ones with [`take`](<dyn Reflect>::take).
///
/// Implemented for the built-in scalars and collections in [`impls`](crate::impls),
/// and for structs through [`#[derive(Reflect)]`](crate::derive::Reflect).
///
/// # Type identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box, use
/// [`Reflect::ty_id`] instead:
///
/// ```
/// use core::any::{Any, TypeId};
/// use tg_reflect::Reflect;
///
/// let x: Box<dyn Reflect> = 32_i32.into_boxed_reflect();
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Replaces `self` with `value` if it has the same concrete type.
    ///
    /// On a type mismatch the value is handed back untouched.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Debug formatting for `dyn Reflect`.
    ///
    /// Scalars print their value; composite kinds print their items.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Struct(value) => {
                let mut debug = f.debug_struct(self.reflect_type_name());
                if let Ok(info) = self.reflect_type_info().as_struct() {
                    for (field, item) in info.fields().iter().zip(FieldIter::new(value)) {
                        debug.field(field.name(), &item);
                    }
                }
                debug.finish()
            }
            ReflectRef::List(value) => f.debug_list().entries(value.iter()).finish(),
            ReflectRef::Array(value) => {
                let mut debug = f.debug_list();
                let extents = value.extents();
                let mut tuples = crate::ops::IndexTuples::new(&extents);
                while let Some(indices) = tuples.next_tuple() {
                    if let Some(item) = value.get(indices) {
                        debug.entry(&item);
                    }
                }
                debug.finish()
            }
            ReflectRef::Opaque(_) => f.write_str(self.reflect_type_path()),
        }
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }

    /// Downcasts the boxed value to `Box<T>`, handing it back on a mismatch.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            // The concrete type was checked above.
            Ok(any.downcast::<T>().unwrap_or_else(|_| unreachable!()))
        } else {
            Err(self)
        }
    }

    /// Moves the value out of the box as a `T`, handing it back on a mismatch.
    ///
    /// ```
    /// use tg_reflect::Reflect;
    ///
    /// let value = String::from("tag").into_boxed_reflect();
    /// assert_eq!(value.take::<String>().unwrap(), "tag");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

// -----------------------------------------------------------------------------
// impl_reflect_cast_fn

/// Implements `set` and the kind accessors of [`Reflect`] for a type of kind `$kind`.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;

    #[derive(crate::derive::Reflect)]
    struct Marker {
        pub name: String,
        pub at: [i32; 2],
        pub tags: Vec<u8>,
        #[reflect(ignore)]
        pub scratch: Vec<u8>,
    }

    #[test]
    fn debug_through_dyn_reflect() {
        let marker = Marker {
            name: String::from("spawn"),
            at: [3, -4],
            tags: vec![7],
            scratch: vec![1, 2, 3],
        };
        let value: &dyn Reflect = &marker;
        assert_eq!(
            format!("{value:?}"),
            r#"Marker { name: "spawn", at: [3, -4], tags: [7] }"#
        );
    }
}
