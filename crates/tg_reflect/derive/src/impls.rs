//! Code generation for `#[derive(Reflect)]`.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{Index, LitStr};

use crate::derive_data::ReflectStruct;
use crate::path;

pub(crate) fn impl_struct(data: &ReflectStruct) -> TokenStream {
    let type_path = impl_type_path(data);
    let typed = impl_typed(data);
    let reflect = impl_reflect(data);
    let struct_ops = impl_struct_ops(data);
    let auto_register = impl_auto_register(data);

    quote! {
        const _: () = {
            #type_path
            #typed
            #reflect
            #struct_ops
            #auto_register
        };
    }
}

fn impl_type_path(data: &ReflectStruct) -> TokenStream {
    let tg_reflect_path = path::tg_reflect_path();
    let info_ = path::info_(&tg_reflect_path);
    let option_ = path::option_();

    let ident = data.ident;
    let name = LitStr::new(&ident.to_string(), ident.span());

    let (type_path, module_path) = match &data.attrs.type_path {
        Some(custom) => {
            let value = custom.value();
            let module = match value.rsplit_once("::") {
                Some((module, _)) => {
                    let module = LitStr::new(module, custom.span());
                    quote!(#option_::Some(#module))
                }
                None => quote!(#option_::None),
            };
            (quote!(#custom), module)
        }
        None => (
            quote!(::core::concat!(::core::module_path!(), "::", #name)),
            quote!(#option_::Some(::core::module_path!())),
        ),
    };

    quote! {
        impl #info_::TypePath for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #name
            }

            #[inline]
            fn module_path() -> #option_<&'static str> {
                #module_path
            }
        }
    }
}

fn impl_typed(data: &ReflectStruct) -> TokenStream {
    let tg_reflect_path = path::tg_reflect_path();
    let info_ = path::info_(&tg_reflect_path);
    let cell_ = path::non_generic_type_info_cell_(&tg_reflect_path);

    let ident = data.ident;

    let fields = data.active_fields().map(|field| {
        let ty = field.ty;
        let name = field.name();
        let visibility = if field.is_public {
            quote!(#info_::FieldVisibility::Public)
        } else {
            quote!(#info_::FieldVisibility::Private)
        };
        let mut flags = quote!(#info_::FieldFlags::empty());
        if let Some(span) = field.attrs.serialize_field {
            flags = quote_spanned!(span => #flags.union(#info_::FieldFlags::SERIALIZE_FIELD));
        }
        quote! {
            #info_::NamedField::new::<#ty>(#name)
                .with_visibility(#visibility)
                .with_flags(#flags)
        }
    });

    let with_default = data
        .attrs
        .default
        .map(|span| quote_spanned!(span => .with_default::<Self>()));

    quote! {
        impl #info_::Typed for #ident {
            fn type_info() -> &'static #info_::TypeInfo {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_init(|| {
                    #info_::TypeInfo::Struct(
                        #info_::StructInfo::new::<Self>(&[ #(#fields),* ])
                            #with_default
                    )
                })
            }
        }
    }
}

fn impl_reflect(data: &ReflectStruct) -> TokenStream {
    let tg_reflect_path = path::tg_reflect_path();
    let reflect_ = path::reflect_(&tg_reflect_path);
    let info_ = path::info_(&tg_reflect_path);
    let ops_ = path::ops_(&tg_reflect_path);
    let exports_ = path::macro_exports_(&tg_reflect_path);
    let result_ = path::result_();

    let ident = data.ident;

    quote! {
        impl #reflect_ for #ident {
            fn set(
                &mut self,
                value: #exports_::Box<dyn #reflect_>,
            ) -> #result_<(), #exports_::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                #result_::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #info_::ReflectKind {
                #info_::ReflectKind::Struct
            }

            #[inline]
            fn reflect_ref(&self) -> #ops_::ReflectRef<'_> {
                #ops_::ReflectRef::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #ops_::ReflectMut<'_> {
                #ops_::ReflectMut::Struct(self)
            }
        }
    }
}

fn impl_struct_ops(data: &ReflectStruct) -> TokenStream {
    let tg_reflect_path = path::tg_reflect_path();
    let reflect_ = path::reflect_(&tg_reflect_path);
    let ops_ = path::ops_(&tg_reflect_path);
    let option_ = path::option_();

    let ident = data.ident;
    let members: Vec<_> = data.active_fields().map(|field| field.ident).collect();
    let names: Vec<_> = data.active_fields().map(|field| field.name()).collect();
    let indices: Vec<_> = (0..members.len()).map(Index::from).collect();
    let field_len = members.len();

    quote! {
        impl #ops_::Struct for #ident {
            fn field(&self, name: &str) -> #option_<&dyn #reflect_> {
                match name {
                    #( #names => #option_::Some(#reflect_::as_reflect(&self.#members)), )*
                    _ => #option_::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #option_<&mut dyn #reflect_> {
                match name {
                    #( #names => #option_::Some(#reflect_::as_reflect_mut(&mut self.#members)), )*
                    _ => #option_::None,
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #( #indices => #option_::Some(#reflect_::as_reflect(&self.#members)), )*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #( #indices => #option_::Some(#reflect_::as_reflect_mut(&mut self.#members)), )*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}

#[cfg(feature = "auto_register")]
fn impl_auto_register(data: &ReflectStruct) -> TokenStream {
    let Some(span) = data.attrs.auto_register else {
        return TokenStream::new();
    };

    let tg_reflect_path = path::tg_reflect_path();
    let exports_ = path::macro_exports_(&tg_reflect_path);
    let ident = data.ident;

    quote_spanned! { span =>
        fn __register(registry: &mut #tg_reflect_path::registry::TypeRegistry) {
            registry.register::<#ident>();
        }

        #exports_::inventory::submit! {
            #exports_::AutoRegistration(__register)
        }
    }
}

#[cfg(not(feature = "auto_register"))]
fn impl_auto_register(_: &ReflectStruct) -> TokenStream {
    TokenStream::new()
}
