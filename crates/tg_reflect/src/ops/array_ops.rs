use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use thiserror::Error;

use crate::Reflect;
use crate::info::{ArrayInfo, TypePath};

// -----------------------------------------------------------------------------
// Array

/// A fixed-rank array whose items are addressed by an index tuple.
///
/// The rank is fixed by the type; the extent of each dimension is only known
/// per value. Items are laid out in row-major order: the last dimension
/// varies fastest.
///
/// # Examples
///
/// ```
/// use tg_reflect::ops::{Array, NdArray};
///
/// let grid = NdArray::from_vec([2, 3], vec![0, 1, 2, 10, 11, 12]).unwrap();
///
/// assert_eq!(grid.rank(), 2);
/// assert_eq!(grid.extents(), [2, 3]);
/// assert_eq!(grid.get(&[1, 2]).unwrap().downcast_ref::<i32>(), Some(&12));
/// ```
pub trait Array: Reflect {
    fn rank(&self) -> usize;

    /// The extent of dimension `dim`, `0` if `dim >= rank`.
    fn extent(&self, dim: usize) -> usize;

    /// Total number of items.
    fn len(&self) -> usize {
        (0..self.rank()).map(|dim| self.extent(dim)).product()
    }

    fn extents(&self) -> Vec<usize> {
        (0..self.rank()).map(|dim| self.extent(dim)).collect()
    }

    fn get(&self, indices: &[usize]) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, indices: &[usize]) -> Option<&mut dyn Reflect>;

    /// Builds the array from its extents and its items in row-major order.
    fn from_items(extents: &[usize], items: Vec<Box<dyn Reflect>>) -> Result<Self, ArrayBuildError>
    where
        Self: Sized;
}

// -----------------------------------------------------------------------------
// ArrayBuildError

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArrayBuildError {
    #[error("array rank mismatch: expected {expected}, found {found}")]
    RankMismatch { expected: usize, found: usize },

    #[error("array size mismatch: expected {expected} items, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("array size overflows with extents {0:?}")]
    Overflow(Vec<usize>),

    #[error("array item {index} is `{found}`, expected `{expected}`")]
    ItemMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("index tuple {indices:?} is out of bounds for extents {extents:?}")]
    OutOfBounds {
        indices: Vec<usize>,
        extents: Vec<usize>,
    },

    #[error("array item {0} was never assigned")]
    Incomplete(usize),
}

// -----------------------------------------------------------------------------
// Index helpers

/// The number of items in an array with the given extents, `None` on overflow.
///
/// ```
/// use tg_reflect::ops::flat_len;
///
/// assert_eq!(flat_len(&[2, 3, 4]), Some(24));
/// assert_eq!(flat_len(&[2, 0]), Some(0));
/// assert_eq!(flat_len(&[usize::MAX, 2]), None);
/// ```
pub fn flat_len(extents: &[usize]) -> Option<usize> {
    extents
        .iter()
        .try_fold(1_usize, |len, &extent| len.checked_mul(extent))
}

/// The row-major offset of `indices`, `None` if the tuple is out of bounds.
///
/// ```
/// use tg_reflect::ops::flat_index;
///
/// assert_eq!(flat_index(&[2, 3], &[1, 2]), Some(5));
/// assert_eq!(flat_index(&[2, 3], &[2, 0]), None);
/// ```
pub fn flat_index(extents: &[usize], indices: &[usize]) -> Option<usize> {
    if extents.len() != indices.len() {
        return None;
    }
    let mut offset = 0_usize;
    for (&extent, &index) in extents.iter().zip(indices) {
        if index >= extent {
            return None;
        }
        offset = offset * extent + index;
    }
    Some(offset)
}

/// Downcasts row-major items into the concrete item type of an array.
pub fn take_items<T: Reflect + TypePath>(
    items: Vec<Box<dyn Reflect>>,
) -> Result<Vec<T>, ArrayBuildError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            item.take::<T>().map_err(|item| ArrayBuildError::ItemMismatch {
                index,
                expected: T::type_path(),
                found: item.reflect_type_path(),
            })
        })
        .collect()
}

// -----------------------------------------------------------------------------
// IndexTuples

/// Enumerates every index tuple of an array in row-major order.
///
/// An odometer over the extents: the last position increments first and
/// carries into the previous one on wrap-around. Any zero extent yields no
/// tuples.
///
/// ```
/// use tg_reflect::ops::IndexTuples;
///
/// let mut tuples = IndexTuples::new(&[2, 3]);
/// let mut seen = Vec::new();
/// while let Some(indices) = tuples.next_tuple() {
///     seen.push((indices[0], indices[1]));
/// }
/// assert_eq!(seen, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
/// ```
pub struct IndexTuples {
    extents: Vec<usize>,
    current: Vec<usize>,
    started: bool,
    done: bool,
}

impl IndexTuples {
    pub fn new(extents: &[usize]) -> Self {
        Self {
            extents: extents.to_vec(),
            current: vec![0; extents.len()],
            started: false,
            done: extents.contains(&0),
        }
    }

    /// Advances to the next tuple.
    pub fn next_tuple(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.current);
        }
        for dim in (0..self.extents.len()).rev() {
            self.current[dim] += 1;
            if self.current[dim] < self.extents[dim] {
                return Some(&self.current);
            }
            self.current[dim] = 0;
        }
        self.done = true;
        None
    }
}

// -----------------------------------------------------------------------------
// ArrayBuilder

/// Assembles an array of a reflected type from items assigned by index tuple.
///
/// ```
/// use tg_reflect::Reflect;
/// use tg_reflect::info::Typed;
/// use tg_reflect::ops::{ArrayBuilder, IndexTuples, NdArray};
///
/// let info = <NdArray<u8, 2> as Typed>::type_info().as_array().unwrap();
/// let mut builder = ArrayBuilder::new(info, &[2, 2]).unwrap();
///
/// let mut tuples = IndexTuples::new(&[2, 2]);
/// let mut next = 0_u8;
/// while let Some(indices) = tuples.next_tuple() {
///     builder.set(indices, next.into_boxed_reflect()).unwrap();
///     next += 1;
/// }
///
/// let grid = builder.finish().unwrap().take::<NdArray<u8, 2>>().unwrap();
/// assert_eq!(grid.as_slice(), [0, 1, 2, 3]);
/// ```
pub struct ArrayBuilder {
    info: &'static ArrayInfo,
    extents: Vec<usize>,
    slots: Vec<Option<Box<dyn Reflect>>>,
}

impl ArrayBuilder {
    /// Starts an array of `info`'s type with the given extents.
    ///
    /// Fails if the number of extents differs from the type's rank,
    /// or the total size overflows.
    pub fn new(info: &'static ArrayInfo, extents: &[usize]) -> Result<Self, ArrayBuildError> {
        if extents.len() != info.rank() {
            return Err(ArrayBuildError::RankMismatch {
                expected: info.rank(),
                found: extents.len(),
            });
        }
        let len = flat_len(extents).ok_or_else(|| ArrayBuildError::Overflow(extents.to_vec()))?;
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Ok(Self {
            info,
            extents: extents.to_vec(),
            slots,
        })
    }

    #[inline]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Assigns the item at `indices`, replacing any earlier assignment.
    pub fn set(&mut self, indices: &[usize], value: Box<dyn Reflect>) -> Result<(), ArrayBuildError> {
        let offset =
            flat_index(&self.extents, indices).ok_or_else(|| ArrayBuildError::OutOfBounds {
                indices: indices.to_vec(),
                extents: self.extents.clone(),
            })?;
        self.slots[offset] = Some(value);
        Ok(())
    }

    /// Converts the assigned items into the concrete array type.
    pub fn finish(self) -> Result<Box<dyn Reflect>, ArrayBuildError> {
        let items = self
            .slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(ArrayBuildError::Incomplete(index)))
            .collect::<Result<Vec<_>, _>>()?;
        self.info.from_items(&self.extents, items)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{ArrayBuildError, ArrayBuilder, IndexTuples, flat_index, flat_len};
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::NdArray;

    fn collect(extents: &[usize]) -> Vec<Vec<usize>> {
        let mut tuples = IndexTuples::new(extents);
        let mut out = Vec::new();
        while let Some(indices) = tuples.next_tuple() {
            out.push(indices.to_vec());
        }
        out
    }

    #[test]
    fn odometer_is_row_major() {
        let tuples = collect(&[2, 2, 2]);
        assert_eq!(tuples.len(), 8);
        assert_eq!(tuples[0], [0, 0, 0]);
        assert_eq!(tuples[1], [0, 0, 1]);
        assert_eq!(tuples[2], [0, 1, 0]);
        assert_eq!(tuples[7], [1, 1, 1]);
        for (offset, indices) in tuples.iter().enumerate() {
            assert_eq!(flat_index(&[2, 2, 2], indices), Some(offset));
        }
    }

    #[test]
    fn zero_extent_has_no_tuples() {
        assert!(collect(&[3, 0, 2]).is_empty());
        assert_eq!(flat_len(&[3, 0, 2]), Some(0));
    }

    #[test]
    fn builder_rejects_wrong_rank() {
        let info = <NdArray<i32, 3> as Typed>::type_info().as_array().unwrap();
        assert!(matches!(
            ArrayBuilder::new(info, &[1, 2]),
            Err(ArrayBuildError::RankMismatch { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn builder_reports_unassigned_slot() {
        let info = <NdArray<i32, 2> as Typed>::type_info().as_array().unwrap();
        let mut builder = ArrayBuilder::new(info, &[1, 2]).unwrap();
        builder.set(&[0, 1], 5_i32.into_boxed_reflect()).unwrap();
        assert!(matches!(builder.finish(), Err(ArrayBuildError::Incomplete(0))));
    }

    #[test]
    fn builder_reports_item_mismatch() {
        let info = <NdArray<i32, 1> as Typed>::type_info().as_array().unwrap();
        let mut builder = ArrayBuilder::new(info, &[1]).unwrap();
        builder.set(&[0], 5_u8.into_boxed_reflect()).unwrap();
        assert!(matches!(
            builder.finish(),
            Err(ArrayBuildError::ItemMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn builder_rejects_out_of_bounds() {
        let info = <NdArray<i32, 2> as Typed>::type_info().as_array().unwrap();
        let mut builder = ArrayBuilder::new(info, &[2, 2]).unwrap();
        assert!(matches!(
            builder.set(&[0, 2], 1_i32.into_boxed_reflect()),
            Err(ArrayBuildError::OutOfBounds { .. })
        ));
    }
}
