// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashMap;
use syn::spanned::Spanned;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields, LitInt, LitStr};

/// Highest tag that fits next to the 3 wire-type bits of a header.
const MAX_FIELD_TAG: u32 = u32::MAX >> 3;

/// Default slot requested by `#[parcel(default ...)]`.
enum DefaultAttr {
    /// `default`: the type's `Default` impl.
    Type,
    /// `default = "expr"`.
    Expr(Expr),
}

/// Parsed `#[parcel(...)]` on a struct field.
struct FieldAttrs {
    tag: Option<(u32, proc_macro2::Span)>,
    required: bool,
    version: bool,
    default: Option<DefaultAttr>,
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs {
        tag: None,
        required: false,
        version: false,
        default: None,
    };
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("parcel")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("tag") {
                let lit: LitInt = meta.value()?.parse()?;
                let tag: u32 = lit.base10_parse()?;
                if tag > MAX_FIELD_TAG {
                    return Err(syn::Error::new(
                        lit.span(),
                        format!("tag {tag} exceeds the maximum field tag {MAX_FIELD_TAG}"),
                    ));
                }
                attrs.tag = Some((tag, lit.span()));
            } else if meta.path.is_ident("required") {
                attrs.required = true;
            } else if meta.path.is_ident("version") {
                attrs.version = true;
            } else if meta.path.is_ident("default") {
                attrs.default = if meta.input.peek(syn::Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    Some(DefaultAttr::Expr(lit.parse()?))
                } else {
                    Some(DefaultAttr::Type)
                };
            } else {
                return Err(meta.error(
                    "unsupported parcel attribute (expected tag, required, default, version)",
                ));
            }
            Ok(())
        })?;
    }
    if attrs.required && attrs.default.is_some() {
        return Err(syn::Error::new_spanned(
            field,
            "a required field cannot declare a default",
        ));
    }
    Ok(attrs)
}

/// `#[derive(SafeParcelable)]`: descriptor table plus value-map conversions.
///
/// Every named field needs `#[parcel(tag = N)]`. Optional flags:
/// - `required`: the tag must be present on the wire
/// - `default` / `default = "expr"`: value used when the tag is absent
/// - `version`: marks the record's `i32` version field
///
/// Fields without a default are required unless their type is `Option<T>`.
/// The derived type also implements `ParcelField` (nested record) and
/// `ParcelElement` (record arrays).
///
/// Example:
/// ```ignore
/// use safeparcel::SafeParcelable;
///
/// #[derive(SafeParcelable)]
/// struct Account {
///     #[parcel(tag = 1000, version, default = "2")]
///     version: i32,
///     #[parcel(tag = 1)]
///     name: String,
///     #[parcel(tag = 2)]
///     avatar: Option<Vec<u8>>,
/// }
/// ```
#[proc_macro_derive(SafeParcelable, attributes(parcel))]
#[allow(clippy::too_many_lines)]
pub fn derive_safe_parcelable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let type_name = name.to_string();

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, "Generic records are not supported")
            .to_compile_error()
            .into();
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return syn::Error::new_spanned(&input, "Only named fields are supported")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Only structs are supported")
                .to_compile_error()
                .into()
        }
    };

    struct FieldInfo {
        ident: syn::Ident,
        local: syn::Ident,
        ty: syn::Type,
        tag: u32,
        attrs: FieldAttrs,
    }

    let mut field_infos = Vec::new();
    let mut seen_tags: HashMap<u32, String> = HashMap::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(ident) = field.ident.as_ref() else {
            return syn::Error::new_spanned(field, "Field must have a name")
                .to_compile_error()
                .into();
        };
        let attrs = match parse_field_attrs(field) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error().into(),
        };
        let Some((tag, tag_span)) = attrs.tag else {
            return syn::Error::new(field.span(), "missing #[parcel(tag = N)]")
                .to_compile_error()
                .into();
        };
        if let Some(previous) = seen_tags.insert(tag, ident.to_string()) {
            return syn::Error::new(
                tag_span,
                format!("tag {tag} is already used by field `{previous}`"),
            )
            .to_compile_error()
            .into();
        }

        field_infos.push(FieldInfo {
            ident: ident.clone(),
            local: format_ident!("field_{}", index),
            ty: field.ty.clone(),
            tag,
            attrs,
        });
    }

    let descriptors: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let ty = &f.ty;
            let tag = f.tag;
            let field_name = f.ident.to_string();
            let required = f.attrs.required;
            let default = match &f.attrs.default {
                Some(DefaultAttr::Type) => quote! { Some(<#ty as ::core::default::Default>::default()) },
                Some(DefaultAttr::Expr(expr)) => quote! { Some(#expr) },
                None => quote! { None },
            };
            let version = f.attrs.version.then(|| quote! { .version() });
            quote! {
                ::safeparcel::binding::field_descriptor::<#ty>(#tag, #field_name, #default, #required)?
                    #version
            }
        })
        .collect();

    let put_fields: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let ident = &f.ident;
            let tag = f.tag;
            quote! {
                ::safeparcel::binding::put_field(&mut values, #tag, &self.#ident);
            }
        })
        .collect();

    let take_fields: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let ty = &f.ty;
            let tag = f.tag;
            let local = &f.local;
            let field_name = f.ident.to_string();
            let absent = match &f.attrs.default {
                Some(DefaultAttr::Type) => quote! { <#ty as ::core::default::Default>::default() },
                Some(DefaultAttr::Expr(expr)) => quote! { #expr },
                None => quote! {
                    ::safeparcel::binding::absent_field::<#ty>(#type_name, #field_name, #tag)?
                },
            };
            quote! {
                let #local: #ty = match ::safeparcel::binding::take_field::<#ty>(
                    &mut values, #type_name, #field_name, #tag,
                )? {
                    Some(value) => value,
                    None => #absent,
                };
            }
        })
        .collect();

    let assignments: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let ident = &f.ident;
            let local = &f.local;
            quote! { #ident: #local }
        })
        .collect();

    let expanded = quote! {
        impl ::safeparcel::binding::SafeParcelable for #name {
            fn schema() -> ::core::result::Result<
                ::safeparcel::schema::RecordDescriptor,
                ::safeparcel::schema::SchemaError,
            > {
                ::safeparcel::schema::RecordDescriptor::new(
                    #type_name,
                    vec![#(#descriptors),*],
                )
            }

            fn to_value_map(&self) -> ::safeparcel::value::ValueMap {
                #[allow(unused_mut)]
                let mut values = ::safeparcel::value::ValueMap::new();
                #(#put_fields)*
                values
            }

            #[allow(unused_mut, unused_variables)]
            fn from_value_map(
                mut values: ::safeparcel::value::ValueMap,
            ) -> ::core::result::Result<Self, ::safeparcel::binding::BindingError> {
                #(#take_fields)*
                Ok(Self { #(#assignments),* })
            }
        }

        impl ::safeparcel::binding::ParcelField for #name {
            fn field_kind() -> ::core::result::Result<
                ::safeparcel::schema::FieldKind,
                ::safeparcel::schema::SchemaError,
            > {
                ::safeparcel::binding::record_kind::<Self>()
            }

            fn to_value(&self) -> Option<::safeparcel::value::Value> {
                Some(::safeparcel::value::Value::Record(
                    <Self as ::safeparcel::binding::SafeParcelable>::to_value_map(self),
                ))
            }

            fn from_value(
                value: ::safeparcel::value::Value,
            ) -> ::core::result::Result<Self, ::safeparcel::binding::BindingError> {
                ::safeparcel::binding::record_from_value::<Self>(value)
            }
        }

        impl ::safeparcel::binding::ParcelElement for #name {
            fn array_kind() -> ::core::result::Result<
                ::safeparcel::schema::FieldKind,
                ::safeparcel::schema::SchemaError,
            > {
                ::safeparcel::binding::record_array_kind::<Self>()
            }

            fn array_to_value(items: &[Self]) -> ::safeparcel::value::Value {
                ::safeparcel::binding::records_to_value(items)
            }

            fn array_from_value(
                value: ::safeparcel::value::Value,
            ) -> ::core::result::Result<Vec<Self>, ::safeparcel::binding::BindingError> {
                ::safeparcel::binding::records_from_value::<Self>(value)
            }
        }
    };

    TokenStream::from(expanded)
}

/// `#[derive(ParcelEnum)]`: enum-like `i32` constant field.
///
/// Every variant must be a unit variant with an explicit discriminant. One
/// variant may carry `#[parcel(fallback)]`; unknown constants then decode to
/// it instead of failing.
///
/// Example:
/// ```ignore
/// #[derive(Clone, Copy, safeparcel::ParcelEnum)]
/// enum Mode {
///     Off = 0,
///     On = 1,
///     #[parcel(fallback)]
///     Unknown = -1,
/// }
/// ```
#[proc_macro_derive(ParcelEnum, attributes(parcel))]
pub fn derive_parcel_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let type_name = name.to_string();

    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input, "ParcelEnum only supports enums")
            .to_compile_error()
            .into();
    };

    let mut variants = Vec::new();
    let mut fallback: Option<syn::Ident> = None;

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(variant, "ParcelEnum variants must be unit variants")
                .to_compile_error()
                .into();
        }
        let Some((_, discriminant)) = &variant.discriminant else {
            return syn::Error::new_spanned(
                variant,
                "ParcelEnum variants need an explicit discriminant",
            )
            .to_compile_error()
            .into();
        };

        let mut is_fallback = false;
        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("parcel")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("fallback") {
                    is_fallback = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported parcel attribute (expected fallback)"))
                }
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }
        if is_fallback {
            if fallback.is_some() {
                return syn::Error::new_spanned(variant, "only one variant can be the fallback")
                    .to_compile_error()
                    .into();
            }
            fallback = Some(variant.ident.clone());
        }

        variants.push((variant.ident.clone(), discriminant.clone()));
    }

    let values: Vec<_> = variants
        .iter()
        .map(|(_, expr)| quote! { (#expr) as i32 })
        .collect();
    let to_arms: Vec<_> = variants
        .iter()
        .map(|(ident, expr)| quote! { Self::#ident => (#expr) as i32 })
        .collect();
    let from_checks: Vec<_> = variants
        .iter()
        .map(|(ident, expr)| {
            quote! {
                if value == (#expr) as i32 {
                    return Some(Self::#ident);
                }
            }
        })
        .collect();
    let unknown = match &fallback {
        Some(ident) => quote! { Some(Self::#ident) },
        None => quote! { None },
    };

    let expanded = quote! {
        #[allow(clippy::unnecessary_cast)]
        impl ::safeparcel::binding::ParcelConstant for #name {
            const NAME: &'static str = #type_name;
            const VALUES: &'static [i32] = &[#(#values),*];

            fn to_constant(&self) -> i32 {
                match self {
                    #(#to_arms,)*
                }
            }

            fn from_constant(value: i32) -> Option<Self> {
                #(#from_checks)*
                #unknown
            }
        }

        impl ::safeparcel::binding::ParcelField for #name {
            fn field_kind() -> ::core::result::Result<
                ::safeparcel::schema::FieldKind,
                ::safeparcel::schema::SchemaError,
            > {
                Ok(::safeparcel::binding::constant_kind::<Self>())
            }

            fn to_value(&self) -> Option<::safeparcel::value::Value> {
                Some(::safeparcel::value::Value::Int32(
                    <Self as ::safeparcel::binding::ParcelConstant>::to_constant(self),
                ))
            }

            fn from_value(
                value: ::safeparcel::value::Value,
            ) -> ::core::result::Result<Self, ::safeparcel::binding::BindingError> {
                ::safeparcel::binding::constant_from_value::<Self>(value)
            }
        }
    };

    TokenStream::from(expanded)
}
