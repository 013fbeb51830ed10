//! `#[derive(Aggregate)]`: wires a struct with named fields into the
//! visitor protocol of `visitjson`.
//!
//! Fields are exposed in declaration order, under their own name or the one
//! given by `#[json(rename = "...")]`.

extern crate proc_macro;

mod attr;
mod bound;
mod de;
mod ser;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DataStruct, DeriveInput, Error, Fields, Ident, Result};

#[proc_macro_derive(Aggregate, attributes(json))]
pub fn derive_aggregate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => fields,
        _ => {
            return Err(Error::new(
                Span::call_site(),
                "`Aggregate` can only be derived for structs with named fields",
            ))
        }
    };

    let names = attr::names_of_fields(fields)?;
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let dummy_ident = Ident::new(
        &format!("_IMPL_AGGREGATE_FOR_{}", ident.unraw()),
        Span::call_site(),
    );

    let ser = ser::derive(input, fields, &names);
    let de = de::derive(input, fields, &names);

    Ok(quote! {
        #[allow(non_upper_case_globals)]
        const #dummy_ident: () = {
            impl #impl_generics ::visitjson::__private::Classify for #ident #ty_generics #where_clause {
                const CATEGORY: ::visitjson::__private::Category = ::visitjson::__private::Category::Aggregate;
            }

            #ser

            #de
        };
    })
}
