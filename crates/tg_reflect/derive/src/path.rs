use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn tg_reflect_path() -> syn::Path {
    syn::parse_quote!(::tg_reflect)
}

#[inline(always)]
pub(crate) fn reflect_(tg_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #tg_reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn info_(tg_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #tg_reflect_path::info
    }
}

#[inline(always)]
pub(crate) fn ops_(tg_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #tg_reflect_path::ops
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(tg_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #tg_reflect_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn macro_exports_(tg_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #tg_reflect_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! {
        ::core::option::Option
    }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! {
        ::core::result::Result
    }
}
