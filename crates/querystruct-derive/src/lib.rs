//! Derive macro for `querystruct` records.
//!
//! `#[derive(QueryRecord)]` implements `querystruct::Record` and
//! `querystruct::QueryValue` for a struct with named fields.
//!
//! Attributes:
//!
//! - `#[qs("key,omitempty")]` on a field sets its annotation; `#[qs("-")]`
//!   excludes it.
//! - `#[qs(display)]` on the struct renders it through its `Display` impl
//!   when it appears as a field of another record.

use proc_macro::TokenStream;

mod record;
mod utils;

/// Derive `querystruct::Record` and `querystruct::QueryValue`.
#[proc_macro_derive(QueryRecord, attributes(qs))]
pub fn derive_query_record(input: TokenStream) -> TokenStream {
    record::derive_query_record(input)
}
