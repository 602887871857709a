//! The type universe: every type a [`TypeResolver`](crate::cache::TypeResolver)
//! can find by name, grouped into loadable modules.

mod type_registry;

pub use type_registry::{TypeModule, TypeRegistry, TypeRegistryArc};
