mod reflect;

pub use reflect::Reflect;

pub(crate) use reflect::impl_reflect_cast_fn;
