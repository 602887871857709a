use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Generics, Type, TypeInfo, TypeParamInfo, TypePath, Typed, impl_type_fn};
use crate::ops::List;

/// Type info for growable ordered containers, such as `Vec<T>`.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use tg_reflect::info::Typed;
///
/// let info = <Vec<i32> as Typed>::type_info().as_list().unwrap();
///
/// assert_eq!(info.item_id(), TypeId::of::<i32>());
/// assert!(info.default_value().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    generics: Generics,
    item_id: TypeId,
    // `TypeInfo` is created on the first visit, use function pointers to delay it.
    item_info: fn() -> &'static TypeInfo,
    default: Option<fn() -> Box<dyn List>>,
}

fn default_list<L: List + Default>() -> Box<dyn List> {
    Box::new(L::default())
}

impl ListInfo {
    impl_type_fn!(ty);

    /// Creates the info of a list type `TList` holding `TItem`s.
    ///
    /// The generics are `[T]`; use [`with_generics`](Self::with_generics)
    /// for containers declaring more parameters.
    pub fn new<TList: List + TypePath, TItem: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            generics: Generics::from_params([TypeParamInfo::new::<TItem>("T")]),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            default: None,
        }
    }

    pub fn with_generics(mut self, generics: Generics) -> Self {
        self.generics = generics;
        self
    }

    /// Records a constructor for an empty instance.
    pub fn with_default<TList: List + Default>(mut self) -> Self {
        self.default = Some(default_list::<TList>);
        self
    }

    #[inline]
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// A new empty instance, or `None` if the type has no default constructor.
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn List>> {
        self.default.map(|f| f())
    }
}
