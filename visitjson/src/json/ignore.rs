use super::scan::Scanner;
use crate::types::Token;
use crate::{Error, Result};

/// Consume one well-formed JSON value of any shape without storing it.
pub(crate) fn skip_value(scanner: &mut Scanner<'_>) -> Result<()> {
    let next = scanner.peek_non_ws();
    let offset = scanner.position();
    match next {
        Some('"') => {
            scanner.bump();
            scanner.parse_str()?;
        }
        Some('[') => scanner.nest(|scanner| {
            scanner.bump();
            if scanner.close_if_empty(']') {
                return Ok(());
            }
            loop {
                skip_value(scanner)?;
                if !scanner.separator(']')? {
                    return Ok(());
                }
            }
        })?,
        Some('{') => scanner.nest(|scanner| {
            scanner.bump();
            if scanner.close_if_empty('}') {
                return Ok(());
            }
            loop {
                scanner.expect('"')?;
                scanner.parse_str()?;
                scanner.expect(':')?;
                skip_value(scanner)?;
                if !scanner.separator('}')? {
                    return Ok(());
                }
            }
        })?,
        Some('-' | '0'..='9') => {
            let text = scanner.numeral();
            if text.parse::<f64>().is_err() {
                return Err(Error::InvalidNumber {
                    text: text.to_owned(),
                    offset,
                });
            }
        }
        Some(c) if c.is_ascii_alphabetic() => {
            match scanner.word() {
                "true" | "false" | "null" => {}
                word => {
                    return Err(Error::StructuralMismatch {
                        expected: Token::Value,
                        found: Token::Literal(word.to_owned()),
                        offset,
                    })
                }
            }
        }
        found => {
            return Err(Error::StructuralMismatch {
                expected: Token::Value,
                found: found.into(),
                offset,
            })
        }
    }
    Ok(())
}
