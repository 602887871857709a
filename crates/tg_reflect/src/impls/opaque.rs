use alloc::string::String;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};

/// Implements the reflection traits for a leaf type that serializes as a whole.
macro_rules! impl_opaque {
    ($ty:ty, $path:expr, $name:expr, $module:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $name
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $module
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl Reflect for $ty {
            crate::reflection::impl_reflect_cast_fn!(Opaque);

            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }
    };
    ($($ty:ident),+ $(,)?) => {
        $( impl_opaque!($ty, stringify!($ty), stringify!($ty), None); )+
    };
}

impl_opaque!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);
impl_opaque!(String, "alloc::string::String", "String", Some("alloc::string"));
impl_opaque!(uuid::Uuid, "uuid::Uuid", "Uuid", Some("uuid"));

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};

    #[test]
    fn scalar_paths() {
        assert_eq!(i64::type_path(), "i64");
        assert_eq!(f32::type_name(), "f32");
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(uuid::Uuid::module_path(), Some("uuid"));
        assert_eq!(bool::type_info().kind(), ReflectKind::Opaque);
    }

    #[test]
    fn set_checks_type() {
        let mut value = 3_u16;
        value.set(7_u16.into_boxed_reflect()).unwrap();
        assert_eq!(value, 7);

        let rejected = value.set(7_i16.into_boxed_reflect()).unwrap_err();
        assert!(rejected.is::<i16>());
        assert_eq!(value, 7);
    }

    #[test]
    fn debug_prints_value() {
        let value: &dyn Reflect = &-12_i32;
        assert_eq!(alloc::format!("{value:?}"), "-12");
    }
}
