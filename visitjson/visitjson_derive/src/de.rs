use crate::bound;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, DeriveInput, FieldsNamed};

/// Write access: `AcceptWriter` over the same fields and names as the read
/// side, plus the `Deserialize` hook.
pub fn derive(input: &DeriveInput, fields: &FieldsNamed, names: &[String]) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let fieldname = fields.named.iter().map(|f| &f.ident);

    // Containers of `T` build each element from `T::default()`.
    let bounds = [
        parse_quote!(::visitjson::__private::Deserialize),
        parse_quote!(::visitjson::__private::Default),
    ];
    let bounded_where_clause = bound::where_clause_with_bound(&input.generics, &bounds);

    quote! {
        impl #impl_generics ::visitjson::__private::AcceptWriter for #ident #ty_generics #bounded_where_clause {
            fn accept_writer(&mut self, __visit: &mut dyn ::visitjson::__private::WriteVisitor) {
                #(
                    ::visitjson::__private::WriteVisitor::visit(__visit, #names, &mut self.#fieldname);
                )*
            }
        }

        impl #impl_generics ::visitjson::__private::Deserialize for #ident #ty_generics #bounded_where_clause {
            fn begin(&mut self) -> ::visitjson::__private::Place<'_> {
                ::visitjson::__private::Place::Aggregate(self)
            }
        }
    }
}
