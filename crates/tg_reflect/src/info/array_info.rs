use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::{Array, ArrayBuildError};

/// Type info for fixed-rank arrays.
///
/// The rank is part of the type (`Box<[T]>` and `[T; N]` are rank 1,
/// `NdArray<T, R>` is rank `R`); the extents are only known per value.
///
/// # Examples
///
/// ```
/// use tg_reflect::info::Typed;
/// use tg_reflect::ops::NdArray;
///
/// let info = <NdArray<i32, 2> as Typed>::type_info().as_array().unwrap();
/// assert_eq!(info.rank(), 2);
/// assert!(info.item_is::<i32>());
/// ```
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item_id: TypeId,
    // `TypeInfo` is created on the first visit, use function pointers to delay it.
    item_info: fn() -> &'static TypeInfo,
    rank: usize,
    fixed_len: Option<usize>,
    from_items: fn(&[usize], Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ArrayBuildError>,
}

fn build_array<A: Array>(
    extents: &[usize],
    items: Vec<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, ArrayBuildError> {
    A::from_items(extents, items).map(|array| Box::new(array) as Box<dyn Reflect>)
}

impl ArrayInfo {
    impl_type_fn!(ty);

    /// Creates the info of an array type `TArray` of rank `rank` holding `TItem`s.
    #[inline]
    pub const fn new<TArray: Array + TypePath, TItem: Reflect + Typed>(rank: usize) -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            rank,
            fixed_len: None,
            from_items: build_array::<TArray>,
        }
    }

    /// Marks a rank-1 array type whose length is part of the type, like `[T; N]`.
    #[inline]
    pub const fn with_fixed_len(mut self, len: usize) -> Self {
        self.fixed_len = Some(len);
        self
    }

    #[inline]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    pub const fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }

    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    /// The element type.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Builds an array value from its extents and its items in row-major order.
    ///
    /// Usually reached through [`ArrayBuilder`](crate::ops::ArrayBuilder).
    #[inline]
    pub fn from_items(
        &self,
        extents: &[usize],
        items: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ArrayBuildError> {
        (self.from_items)(extents, items)
    }
}
