use syn::{parse_quote, Generics, Path, WhereClause, WherePredicate};

/// The where clause of `generics`, extended with `T: B1 + B2 + ...` for every
/// type parameter `T`.
pub fn where_clause_with_bound(generics: &Generics, bounds: &[Path]) -> WhereClause {
    let new_predicates = generics
        .type_params()
        .map::<WherePredicate, _>(|param| {
            let param = &param.ident;
            parse_quote!(#param: #(#bounds)+*)
        })
        .collect::<Vec<_>>();

    let mut generics = generics.clone();
    let where_clause = generics.make_where_clause();
    where_clause.predicates.extend(new_predicates);
    where_clause.clone()
}
