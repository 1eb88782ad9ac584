//! `QueryRecord` derive implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Attribute, DeriveInput, Field, LitStr};

use crate::utils::{add_query_value_bounds, validate_struct_with_named_fields};

const ATTRIBUTE: &str = "qs";

/// Main entry point for the `QueryRecord` derive macro.
pub fn derive_query_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_query_record_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_query_record_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let fields = validate_struct_with_named_fields(input, "QueryRecord")?;
    let display = parse_container_attributes(&input.attrs)?;

    let generics = add_query_value_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut is_zero = quote! { true };
    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let ty = &field.ty;
        let declared_name = ident.unraw().to_string();
        let tag = match parse_field_tag(field)? {
            Some(tag) => quote! { ::core::option::Option::Some(#tag) },
            None => quote! { ::core::option::Option::None },
        };

        descriptors.push(quote! {
            ::querystruct::Field::new(
                ::querystruct::FieldDescriptor::new(
                    #declared_name,
                    ::core::any::type_name::<#ty>(),
                    #tag,
                ),
                &self.#ident,
            )
        });
        is_zero = quote! { #is_zero && ::querystruct::QueryValue::is_zero(&self.#ident) };
    }

    let as_display = if display {
        quote! {
            fn as_display(&self) -> ::core::option::Option<&dyn ::core::fmt::Display> {
                ::core::option::Option::Some(self)
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        impl #impl_generics ::querystruct::Record for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            fn fields(&self) -> ::std::vec::Vec<::querystruct::Field<'_>> {
                ::std::vec![#(#descriptors),*]
            }

            #as_display
        }

        impl #impl_generics ::querystruct::QueryValue for #name #ty_generics #where_clause {
            fn resolve(&self) -> ::querystruct::Resolved<'_> {
                ::querystruct::Resolved::Record(self)
            }

            fn is_zero(&self) -> bool {
                #is_zero
            }
        }
    })
}

/// Parse `#[qs(display)]` on the struct; returns whether `display` was set.
fn parse_container_attributes(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut display = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("display") {
                display = true;
                Ok(())
            } else {
                Err(meta.error("unsupported qs container attribute, expected `display`"))
            }
        })?;
    }
    Ok(display)
}

/// Parse the `#[qs("...")]` annotation of a field.
fn parse_field_tag(field: &Field) -> syn::Result<Option<LitStr>> {
    let mut tag: Option<LitStr> = None;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE)) {
        if tag.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate qs attribute"));
        }
        tag = Some(attr.parse_args::<LitStr>().map_err(|err| {
            syn::Error::new(err.span(), "expected #[qs(\"key[,omitempty]\")] or #[qs(\"-\")]")
        })?);
    }
    Ok(tag)
}
