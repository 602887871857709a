use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ArrayInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Array, ArrayBuildError, take_items};

fn single_index(indices: &[usize]) -> Option<usize> {
    match indices {
        [index] => Some(*index),
        _ => None,
    }
}

fn single_extent(extents: &[usize], items: usize) -> Result<usize, ArrayBuildError> {
    let [len] = extents else {
        return Err(ArrayBuildError::RankMismatch {
            expected: 1,
            found: extents.len(),
        });
    };
    if *len != items {
        return Err(ArrayBuildError::SizeMismatch {
            expected: *len,
            found: items,
        });
    }
    Ok(*len)
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: TypePath> TypePath for Box<[T]> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["alloc::boxed::Box<[", T::type_path(), "]>"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Box<[", T::type_name(), "]>"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Box"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl<T: Reflect + Typed> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::new::<Self, T>(1)))
    }
}

impl<T: Reflect + Typed> Reflect for Box<[T]> {
    crate::reflection::impl_reflect_cast_fn!(Array);
}

impl<T: Reflect + Typed> Array for Box<[T]> {
    #[inline]
    fn rank(&self) -> usize {
        1
    }

    fn extent(&self, dim: usize) -> usize {
        if dim == 0 { <[T]>::len(self) } else { 0 }
    }

    fn get(&self, indices: &[usize]) -> Option<&dyn Reflect> {
        <[T]>::get(self, single_index(indices)?).map(Reflect::as_reflect)
    }

    fn get_mut(&mut self, indices: &[usize]) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, single_index(indices)?).map(Reflect::as_reflect_mut)
    }

    fn from_items(extents: &[usize], items: Vec<Box<dyn Reflect>>) -> Result<Self, ArrayBuildError> {
        single_extent(extents, items.len())?;
        Ok(take_items::<T>(items)?.into_boxed_slice())
    }
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["[", T::type_path(), "; ", &N.to_string(), "]"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["[", T::type_name(), "; ", &N.to_string(), "]"])
        })
    }

    #[inline]
    fn type_ident() -> &'static str {
        Self::type_name()
    }
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(ArrayInfo::new::<Self, T>(1).with_fixed_len(N))
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    crate::reflection::impl_reflect_cast_fn!(Array);
}

impl<T: Reflect + Typed, const N: usize> Array for [T; N] {
    #[inline]
    fn rank(&self) -> usize {
        1
    }

    fn extent(&self, dim: usize) -> usize {
        if dim == 0 { N } else { 0 }
    }

    fn get(&self, indices: &[usize]) -> Option<&dyn Reflect> {
        <[T]>::get(self, single_index(indices)?).map(Reflect::as_reflect)
    }

    fn get_mut(&mut self, indices: &[usize]) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, single_index(indices)?).map(Reflect::as_reflect_mut)
    }

    /// Fails with [`ArrayBuildError::SizeMismatch`] unless exactly `N` items are given.
    fn from_items(extents: &[usize], items: Vec<Box<dyn Reflect>>) -> Result<Self, ArrayBuildError> {
        let len = single_extent(extents, items.len())?;
        if len != N {
            return Err(ArrayBuildError::SizeMismatch {
                expected: N,
                found: len,
            });
        }
        take_items::<T>(items)?
            .try_into()
            .map_err(|items: Vec<T>| ArrayBuildError::SizeMismatch {
                expected: N,
                found: items.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{Array, ArrayBuildError};

    #[test]
    fn array_paths() {
        assert_eq!(<Box<[i32]>>::type_path(), "alloc::boxed::Box<[i32]>");
        assert_eq!(<Box<[String]>>::type_name(), "Box<[String]>");
        assert_eq!(<[u8; 4]>::type_path(), "[u8; 4]");
        assert_eq!(<[[u8; 2]; 3]>::type_name(), "[[u8; 2]; 3]");
    }

    #[test]
    fn fixed_len_is_recorded() {
        let info = <[f32; 3]>::type_info().as_array().unwrap();
        assert_eq!(info.rank(), 1);
        assert_eq!(info.fixed_len(), Some(3));
        assert_eq!(<Box<[f32]>>::type_info().as_array().unwrap().fixed_len(), None);
    }

    #[test]
    fn boxed_slice_from_items() {
        let items = vec![1_i64.into_boxed_reflect(), 2_i64.into_boxed_reflect()];
        let array = <Box<[i64]>>::from_items(&[2], items).unwrap();
        assert_eq!(&*array, [1, 2]);
        assert_eq!(Array::get(&array, &[1]).unwrap().downcast_ref::<i64>(), Some(&2));
        assert!(Array::get(&array, &[0, 0]).is_none());
    }

    #[test]
    fn fixed_array_rejects_other_length() {
        let items = vec![1_u8.into_boxed_reflect(), 2_u8.into_boxed_reflect()];
        assert_eq!(
            <[u8; 3]>::from_items(&[2], items),
            Err(ArrayBuildError::SizeMismatch { expected: 3, found: 2 })
        );
    }

    #[test]
    fn from_items_rejects_rank() {
        assert_eq!(
            <Box<[u8]>>::from_items(&[0, 0], vec![]).unwrap_err(),
            ArrayBuildError::RankMismatch { expected: 1, found: 2 }
        );
    }
}
