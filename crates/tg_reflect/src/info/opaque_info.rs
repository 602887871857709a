use crate::info::{Type, TypePath, impl_type_fn};

/// Type info for values without inner structure, such as scalars and identifiers.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: TypePath>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
