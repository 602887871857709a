#![doc = include_str!("../README.md")]

pub use tg_format as format;
pub use tg_reflect as reflect;
pub use tg_utils as utils;
