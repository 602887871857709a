//! Reflection for built-in types, and helpers to implement it.
//!
//! - scalars: `bool`, `i8`-`i64`, `u8`-`u64`, `f32`, `f64`
//! - `String`, `uuid::Uuid`
//! - lists: `Vec<T>`, `VecDeque<T>`
//! - rank-1 arrays: `Box<[T]>`, `[T; N]`
//!
//! `NdArray<T, R>` lives in [`ops`](crate::ops) with the array traits.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod cell;
mod list;
mod opaque;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// Concatenates string slices with a single allocation.
///
/// Used to build the paths of generic types.
///
/// ```
/// use tg_reflect::impls;
///
/// let s = impls::concat(&["alloc::vec::Vec", "<", "u8", ">"]);
/// assert_eq!(s, "alloc::vec::Vec<u8>");
/// assert_eq!(s.capacity(), 19);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> ::alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = ::alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
