use std::collections::BTreeSet;
use syn::ext::IdentExt;
use syn::{Error, Field, FieldsNamed, LitStr, Result};

/// JSON key of every field, in declaration order.
pub fn names_of_fields(fields: &FieldsNamed) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        let name = name_of_field(field)?;
        if !seen.insert(name.clone()) {
            return Err(Error::new_spanned(
                field,
                format!("duplicate field name `{}`", name),
            ));
        }
        names.push(name);
    }
    Ok(names)
}

fn name_of_field(field: &Field) -> Result<String> {
    let mut rename = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("json") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                return Err(meta.error("unsupported attribute, expected `rename`"));
            }
            if rename.is_some() {
                return Err(meta.error("duplicate `rename` attribute"));
            }
            let name: LitStr = meta.value()?.parse()?;
            rename = Some(name.value());
            Ok(())
        })?;
    }

    match (rename, &field.ident) {
        (Some(name), _) => Ok(name),
        (None, Some(ident)) => Ok(ident.unraw().to_string()),
        (None, None) => Err(Error::new_spanned(field, "expected a named field")),
    }
}
