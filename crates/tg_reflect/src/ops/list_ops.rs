use alloc::boxed::Box;
use core::iter::FusedIterator;

use crate::Reflect;

/// A growable ordered container, such as `Vec<T>` or `VecDeque<T>`.
///
/// # Examples
///
/// ```
/// use tg_reflect::Reflect;
/// use tg_reflect::ops::List;
///
/// let mut list: Vec<i32> = vec![1, 2];
/// List::push(&mut list, 3_i32.into_boxed_reflect()).unwrap();
///
/// assert_eq!(List::len(&list), 3);
/// assert!(List::push(&mut list, "no".to_string().into_boxed_reflect()).is_err());
/// ```
pub trait List: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Appends an item, handing it back if its type is not the item type.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn pop(&mut self) -> Option<Box<dyn Reflect>>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> ListItemIter<'_>;
}

/// Iterator over the items of a [`List`].
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> ListItemIter<'a> {
    #[inline]
    pub fn new(list: &'a dyn List) -> Self {
        Self { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.list.get(self.index);
        self.index += item.is_some() as usize;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}
impl FusedIterator for ListItemIter<'_> {}
