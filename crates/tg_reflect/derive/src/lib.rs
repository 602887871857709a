//! `#[derive(Reflect)]` for `tg_reflect`.
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Struct Reflection Derivation
///
/// `#[derive(Reflect)]` implements `TypePath`, `Typed`, `Reflect` and `Struct`
/// for a non-generic struct with named fields. The field table is built once,
/// on the first call to `Typed::type_info`.
///
/// Every field type must implement `Typed` and `Reflect`, except for fields
/// marked `#[reflect(ignore)]`.
///
/// ## Type Attributes
///
/// - `#[reflect(default)]`: the type implements `Default`; codecs use it to
///   create instances before filling in fields.
/// - `#[reflect(auto_register)]`: `TypeRegistry::auto_register` registers the
///   type (needs the `auto_register` feature).
/// - `#[reflect(type_path = "my_crate::Foo")]`: overrides the type path,
///   which defaults to `module_path!()` joined with the type name.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default, auto_register, type_path = "game::Player")]
/// struct Player { /* ... */ }
/// ```
///
/// ## Field Attributes
///
/// A field is persisted if it is `pub` or carries `#[reflect(serialize_field)]`.
/// Restricted visibilities such as `pub(crate)` count as private.
///
/// `#[reflect(ignore)]` leaves a field out of reflection entirely, so its type
/// needs no reflection impls.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Player {
///     pub name: String,          // persisted
///     #[reflect(serialize_field)]
///     health: i32,               // persisted
///     #[reflect(ignore)]
///     pub frame_cache: Handle,   // not reflected
///     scratch: u32,              // skipped
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectStruct::from_input(&ast) {
        Ok(data) => impls::impl_struct(&data).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
