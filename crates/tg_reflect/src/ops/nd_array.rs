use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ArrayInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Array, ArrayBuildError, flat_index, flat_len, take_items};

/// A dense array of rank `R` stored in row-major order.
///
/// The extents are fixed at construction, every index tuple in bounds
/// addresses exactly one item.
///
/// ```
/// use tg_reflect::ops::NdArray;
///
/// let mut grid = NdArray::from_vec([2, 2], vec!['a', 'b', 'c', 'd']).unwrap();
/// assert_eq!(grid.item([1, 0]), Some(&'c'));
///
/// *grid.item_mut([0, 1]).unwrap() = 'x';
/// assert_eq!(grid.as_slice(), ['a', 'x', 'c', 'd']);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NdArray<T, const R: usize> {
    extents: [usize; R],
    items: Vec<T>,
}

impl<T, const R: usize> NdArray<T, R> {
    /// Wraps row-major `items`, which must hold exactly the product of `extents`.
    pub fn from_vec(extents: [usize; R], items: Vec<T>) -> Result<Self, ArrayBuildError> {
        let len = flat_len(&extents).ok_or_else(|| ArrayBuildError::Overflow(extents.to_vec()))?;
        if len != items.len() {
            return Err(ArrayBuildError::SizeMismatch {
                expected: len,
                found: items.len(),
            });
        }
        Ok(Self { extents, items })
    }

    /// Builds an array by calling `f` on every index tuple in row-major order.
    pub fn from_fn(
        extents: [usize; R],
        mut f: impl FnMut(&[usize]) -> T,
    ) -> Result<Self, ArrayBuildError> {
        let len = flat_len(&extents).ok_or_else(|| ArrayBuildError::Overflow(extents.to_vec()))?;
        let mut items = Vec::with_capacity(len);
        let mut tuples = crate::ops::IndexTuples::new(&extents);
        while let Some(indices) = tuples.next_tuple() {
            items.push(f(indices));
        }
        Ok(Self { extents, items })
    }

    #[inline]
    pub const fn extents(&self) -> [usize; R] {
        self.extents
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, indices: [usize; R]) -> Option<&T> {
        flat_index(&self.extents, &indices).map(|offset| &self.items[offset])
    }

    pub fn item_mut(&mut self, indices: [usize; R]) -> Option<&mut T> {
        flat_index(&self.extents, &indices).map(|offset| &mut self.items[offset])
    }

    /// Items in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

/// An array with every extent `0`; rank `0` holds a single default item.
impl<T: Default, const R: usize> Default for NdArray<T, R> {
    fn default() -> Self {
        let items = if R == 0 {
            alloc::vec![T::default()]
        } else {
            Vec::new()
        };
        Self {
            extents: [0; R],
            items,
        }
    }
}

// -----------------------------------------------------------------------------
// Reflection

impl<T: TypePath, const R: usize> TypePath for NdArray<T, R> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&[
                "tg_reflect::ops::NdArray<",
                T::type_path(),
                ", ",
                &R.to_string(),
                ">",
            ])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["NdArray<", T::type_name(), ", ", &R.to_string(), ">"])
        })
    }

    #[inline]
    fn type_ident() -> &'static str {
        "NdArray"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("tg_reflect::ops")
    }
}

impl<T: Reflect + Typed, const R: usize> Typed for NdArray<T, R> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::new::<Self, T>(R)))
    }
}

impl<T: Reflect + Typed, const R: usize> Reflect for NdArray<T, R> {
    crate::reflection::impl_reflect_cast_fn!(Array);
}

impl<T: Reflect + Typed, const R: usize> Array for NdArray<T, R> {
    #[inline]
    fn rank(&self) -> usize {
        R
    }

    fn extent(&self, dim: usize) -> usize {
        self.extents.get(dim).copied().unwrap_or(0)
    }

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, indices: &[usize]) -> Option<&dyn Reflect> {
        let offset = flat_index(&self.extents, indices)?;
        Some(self.items[offset].as_reflect())
    }

    fn get_mut(&mut self, indices: &[usize]) -> Option<&mut dyn Reflect> {
        let offset = flat_index(&self.extents, indices)?;
        Some(self.items[offset].as_reflect_mut())
    }

    fn from_items(extents: &[usize], items: Vec<Box<dyn Reflect>>) -> Result<Self, ArrayBuildError> {
        let extents: [usize; R] =
            extents
                .try_into()
                .map_err(|_| ArrayBuildError::RankMismatch {
                    expected: R,
                    found: extents.len(),
                })?;
        let len = flat_len(&extents).ok_or_else(|| ArrayBuildError::Overflow(extents.to_vec()))?;
        if len != items.len() {
            return Err(ArrayBuildError::SizeMismatch {
                expected: len,
                found: items.len(),
            });
        }
        Ok(Self {
            extents,
            items: take_items::<T>(items)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::NdArray;
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{Array, ArrayBuildError, IndexTuples};

    #[test]
    fn nd_array_paths() {
        assert_eq!(
            NdArray::<i32, 2>::type_path(),
            "tg_reflect::ops::NdArray<i32, 2>"
        );
        assert_eq!(NdArray::<u8, 3>::type_name(), "NdArray<u8, 3>");
        assert_eq!(NdArray::<u8, 3>::type_info().array_rank(), Some(3));
    }

    #[test]
    fn from_fn_follows_index_tuples() {
        let grid = NdArray::from_fn([2, 3], |indices| (indices[0] * 10 + indices[1]) as i64).unwrap();
        assert_eq!(grid.as_slice(), [0, 1, 2, 10, 11, 12]);

        let mut tuples = IndexTuples::new(&grid.extents());
        let mut read = Vec::new();
        while let Some(indices) = tuples.next_tuple() {
            read.push(*Array::get(&grid, indices).unwrap().downcast_ref::<i64>().unwrap());
        }
        assert_eq!(read, grid.as_slice());
    }

    #[test]
    fn from_vec_checks_size() {
        assert_eq!(
            NdArray::<u8, 2>::from_vec([2, 2], vec![1, 2, 3]),
            Err(ArrayBuildError::SizeMismatch { expected: 4, found: 3 })
        );
    }

    #[test]
    fn from_items_checks_rank() {
        let items = vec![1_i32.into_boxed_reflect()];
        assert!(matches!(
            NdArray::<i32, 2>::from_items(&[1], items),
            Err(ArrayBuildError::RankMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn empty_extent() {
        let grid = NdArray::<i32, 2>::from_items(&[3, 0], vec![]).unwrap();
        assert_eq!(grid.extents(), [3, 0]);
        assert!(grid.is_empty());
        assert_eq!(Array::extents(&grid), [3, 0]);
    }

    #[test]
    fn set_replaces_whole_array() {
        let mut grid = NdArray::<u8, 1>::default();
        let other = NdArray::from_vec([2], vec![4_u8, 5]).unwrap();
        grid.set(other.clone().into_boxed_reflect()).unwrap();
        assert_eq!(grid, other);
    }
}
