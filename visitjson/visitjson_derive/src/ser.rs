use crate::bound;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, DeriveInput, FieldsNamed};

/// Read access: `AcceptReader` visiting every field, plus the `Serialize`
/// hook that hands the struct to the encoder as an aggregate.
pub fn derive(input: &DeriveInput, fields: &FieldsNamed, names: &[String]) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let fieldname = fields.named.iter().map(|f| &f.ident);

    let bounds = [parse_quote!(::visitjson::__private::Serialize)];
    let bounded_where_clause = bound::where_clause_with_bound(&input.generics, &bounds);

    quote! {
        impl #impl_generics ::visitjson::__private::AcceptReader for #ident #ty_generics #bounded_where_clause {
            fn accept_reader(&self, __visit: &mut dyn ::visitjson::__private::ReadVisitor) {
                #(
                    ::visitjson::__private::ReadVisitor::visit(__visit, #names, &self.#fieldname);
                )*
            }
        }

        impl #impl_generics ::visitjson::__private::Serialize for #ident #ty_generics #bounded_where_clause {
            fn begin(&self) -> ::visitjson::__private::Fragment<'_> {
                ::visitjson::__private::Fragment::Aggregate(self)
            }
        }
    }
}
