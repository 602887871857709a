//! Items used by code generated from `tg_reflect_derive`.

use crate::registry::TypeRegistry;

pub use alloc::boxed::Box;

/// A registration function submitted by `#[reflect(auto_register)]` types.
#[cfg(feature = "auto_register")]
pub struct AutoRegistration(pub fn(&mut TypeRegistry));

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

#[cfg(feature = "auto_register")]
pub use inventory;

/// Runs every submitted registration function.
///
/// Returns `false` when nothing was submitted, which is also what platforms
/// without `inventory` support look like.
pub(crate) fn register_submitted(registry: &mut TypeRegistry) -> bool {
    #[cfg(feature = "auto_register")]
    {
        let mut any = false;
        for registration in inventory::iter::<AutoRegistration> {
            (registration.0)(registry);
            any = true;
        }
        any
    }
    #[cfg(not(feature = "auto_register"))]
    {
        let _ = registry;
        false
    }
}
