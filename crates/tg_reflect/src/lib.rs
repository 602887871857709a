#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::tg_reflect::...` paths, this alias lets the
// crate's own tests and doc examples use it.
extern crate self as tg_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod cache;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::Reflect;
pub use tg_reflect_derive as derive;
