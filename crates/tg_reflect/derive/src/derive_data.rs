//! Parsing of the derive input and its `#[reflect(...)]` attributes.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, Visibility};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[reflect(...)]` on the type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub auto_register: Option<Span>,
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    res.default = Some(meta.path.span());
                } else if meta.path.is_ident("auto_register") {
                    res.auto_register = Some(meta.path.span());
                } else if meta.path.is_ident("type_path") {
                    let path: LitStr = meta.value()?.parse()?;
                    if path.value().is_empty() || path.value().starts_with("::") {
                        return Err(syn::Error::new(
                            path.span(),
                            "`type_path` must be a non-empty path without a leading `::`",
                        ));
                    }
                    res.type_path = Some(path);
                } else {
                    return Err(meta.error(
                        "unsupported type attribute, expected `default`, `auto_register` or `type_path`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(res)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[reflect(...)]` on a field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub serialize_field: Option<Span>,
    pub ignore: Option<Span>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("serialize_field") {
                    res.serialize_field = Some(meta.path.span());
                } else if meta.path.is_ident("ignore") {
                    res.ignore = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "unsupported field attribute, expected `serialize_field` or `ignore`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(res)
    }
}

// -----------------------------------------------------------------------------
// ReflectStruct

pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub is_public: bool,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    pub(crate) fn name(&self) -> String {
        // Raw identifiers keep their `r#` prefix in `to_string`.
        let name = self.ident.to_string();
        match name.strip_prefix("r#") {
            Some(stripped) => stripped.to_string(),
            None => name,
        }
    }
}

pub(crate) struct ReflectStruct<'a> {
    pub ident: &'a Ident,
    pub attrs: TypeAttributes,
    pub fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub(crate) fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        const UNSUPPORTED: &str = "`#[derive(Reflect)]` only supports structs with named fields";

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`#[derive(Reflect)]` does not support generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => return Err(syn::Error::new(ast.ident.span(), UNSUPPORTED)),
            },
            _ => return Err(syn::Error::new(ast.ident.span(), UNSUPPORTED)),
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
        let fields = named
            .named
            .iter()
            .map(|field| {
                Ok(StructField {
                    ident: field
                        .ident
                        .as_ref()
                        .ok_or_else(|| syn::Error::new(field.span(), UNSUPPORTED))?,
                    ty: &field.ty,
                    is_public: matches!(field.vis, Visibility::Public(_)),
                    attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self {
            ident: &ast.ident,
            attrs,
            fields,
        })
    }

    /// Fields visible to reflection; `#[reflect(ignore)]` fields are left out.
    pub(crate) fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.attrs.ignore.is_none())
    }
}
