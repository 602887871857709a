use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::{List, ListItemIter};
use crate::Reflect;

macro_rules! impl_list {
    ($ty:ident, $module:literal, $push:ident, $pop:ident) => {
        impl<T: TypePath> TypePath for $ty<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[$module, "::", stringify!($ty), "<", T::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[stringify!($ty), "<", T::type_name(), ">"])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<T: Reflect + Typed> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::List(ListInfo::new::<Self, T>().with_default::<Self>())
                })
            }
        }

        impl<T: Reflect + Typed> Reflect for $ty<T> {
            crate::reflection::impl_reflect_cast_fn!(List);
        }

        impl<T: Reflect + Typed> List for $ty<T> {
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                if index < <$ty<T>>::len(self) {
                    Some(self[index].as_reflect())
                } else {
                    None
                }
            }

            fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                if index < <$ty<T>>::len(self) {
                    Some(self[index].as_reflect_mut())
                } else {
                    None
                }
            }

            fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                let value = value.take::<T>()?;
                <$ty<T>>::$push(self, value);
                Ok(())
            }

            fn pop(&mut self) -> Option<Box<dyn Reflect>> {
                <$ty<T>>::$pop(self).map(Reflect::into_boxed_reflect)
            }

            #[inline]
            fn len(&self) -> usize {
                <$ty<T>>::len(self)
            }

            #[inline]
            fn iter(&self) -> ListItemIter<'_> {
                ListItemIter::new(self)
            }
        }
    };
}

impl_list!(Vec, "alloc::vec", push, pop);
impl_list!(VecDeque, "alloc::collections", push_back, pop_back);

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::List;

    #[test]
    fn list_paths() {
        assert_eq!(Vec::<i32>::type_path(), "alloc::vec::Vec<i32>");
        assert_eq!(Vec::<Vec<u8>>::type_name(), "Vec<Vec<u8>>");
        assert_eq!(
            VecDeque::<String>::type_path(),
            "alloc::collections::VecDeque<alloc::string::String>"
        );
        assert_eq!(Vec::<u8>::type_ident(), "Vec");
    }

    #[test]
    fn list_info_describes_item() {
        let info = Vec::<u32>::type_info().as_list().unwrap();
        assert!(info.item_is::<u32>());
        assert_eq!(info.generics().len(), 1);
        assert_eq!(info.generics()[0].name(), "T");

        let empty = info.default_value().unwrap();
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn push_rejects_wrong_item() {
        let mut list: VecDeque<i32> = VecDeque::new();
        List::push(&mut list, 1_i32.into_boxed_reflect()).unwrap();
        assert!(List::push(&mut list, 1_i64.into_boxed_reflect()).is_err());
        assert_eq!(List::len(&list), 1);
    }

    #[test]
    fn iterates_in_order() {
        let list = vec![3_u8, 1, 2];
        let items: Vec<u8> = List::iter(&list)
            .map(|item| *item.downcast_ref::<u8>().unwrap())
            .collect();
        assert_eq!(items, [3, 1, 2]);
    }
}
