//! Small containers shared by the `tg_*` crates.
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId) with a pass-through hasher.
//! - [`hash`]: `hashbrown` containers with a fixed `foldhash` seed.
#![no_std]

extern crate alloc;

mod typeid_map;

pub mod hash;

pub use typeid_map::TypeIdMap;
