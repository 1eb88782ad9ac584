//! Shared helpers for the derive implementation.

use syn::{parse_quote, punctuated::Punctuated, token::Comma, Data, DeriveInput, Field, Fields, Generics};

/// Validate that the input is a struct with named fields, returning the fields.
pub fn validate_struct_with_named_fields<'a>(
    input: &'a DeriveInput,
    macro_name: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{macro_name} derive only supports structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{macro_name} derive only supports structs"),
        )),
    }
}

/// Add a `QueryValue` bound to every type parameter.
pub fn add_query_value_bounds(mut generics: Generics) -> Generics {
    let params: Vec<_> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::querystruct::QueryValue));
    }
    generics
}
