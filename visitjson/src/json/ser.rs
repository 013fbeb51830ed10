use crate::meta::Classify;
use crate::ser::{Fragment, Serialize};
use crate::visit::ReadVisitor;

use core::fmt::{self, Display};
use std::string::String;

/// Serialize any serializable type into a JSON string.
pub fn to_string<T: ?Sized + Classify + Serialize>(value: &T) -> String {
    let mut out = String::new();
    to_writer(value, &mut out);
    out
}

/// Append the JSON text of `value` to `out`, returning `out` for chaining.
pub fn to_writer<'o, T: ?Sized + Classify + Serialize>(value: &T, out: &'o mut String) -> &'o mut String {
    tracing::trace!(category = ?T::CATEGORY, "encoding value");
    write_value(&value, out);
    out
}

/// Formats the wrapped value as compact JSON.
///
/// ```
/// use visitjson::Json;
///
/// assert_eq!(format!("{}", Json(&vec![3, 7, 11])), "[3,7,11]");
/// ```
pub struct Json<'a, T: ?Sized>(pub &'a T);

impl<T: ?Sized + Classify + Serialize> Display for Json<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&to_string(self.0))
    }
}

fn write_value(value: &dyn Serialize, out: &mut String) {
    match value.begin() {
        Fragment::Bool(b) => out.push_str(if b { "true" } else { "false" }),
        Fragment::Number(n) => out.push_str(&n.to_string()),
        Fragment::Char(c) => {
            out.push('"');
            escape_char(c, out);
            out.push('"');
        }
        Fragment::Str(s) => escape_str(&s, out),
        Fragment::Seq(mut seq) => {
            out.push('[');
            let mut first = true;
            while let Some(element) = seq.next() {
                if !first {
                    out.push(',');
                }
                first = false;
                write_value(element, out);
            }
            out.push(']');
        }
        Fragment::Tuple(tuple) => {
            out.push('{');
            for (index, element) in (0..tuple.arity()).filter_map(|i| tuple.element(i).map(|e| (i, e))) {
                if index > 0 {
                    out.push(',');
                }
                // Positions are keyed from 1.
                out.push('"');
                out.push_str(&(index + 1).to_string());
                out.push_str("\":");
                write_value(element, out);
            }
            out.push('}');
        }
        Fragment::Aggregate(aggregate) => {
            out.push('{');
            aggregate.accept_reader(&mut FieldWriter { out: &mut *out, first: true });
            out.push('}');
        }
    }
}

struct FieldWriter<'o> {
    out: &'o mut String,
    first: bool,
}

impl ReadVisitor for FieldWriter<'_> {
    fn visit(&mut self, name: &str, value: &dyn Serialize) {
        if !self.first {
            self.out.push(',');
        }
        self.first = false;
        escape_str(name, self.out);
        self.out.push(':');
        write_value(value, self.out);
    }
}

fn escape_str(value: &str, out: &mut String) {
    out.push('"');
    let mut rest = value;
    // Escaped bytes are all ASCII, so `i + 1` is always a char boundary.
    while let Some(i) = rest.bytes().position(needs_escape) {
        out.push_str(&rest[..i]);
        escape_char(char::from(rest.as_bytes()[i]), out);
        rest = &rest[i + 1..];
    }
    out.push_str(rest);
    out.push('"');
}

fn needs_escape(byte: u8) -> bool {
    byte < 0x20 || byte == b'"' || byte == b'\\'
}

fn escape_char(c: char, out: &mut String) {
    const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";
    match c {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\x08' => out.push_str("\\b"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\x0c' => out.push_str("\\f"),
        '\r' => out.push_str("\\r"),
        '\0'..='\x1f' => {
            let byte = c as usize;
            out.push_str("\\u00");
            out.push(char::from(HEX_DIGITS[byte >> 4]));
            out.push(char::from(HEX_DIGITS[byte & 0xF]));
        }
        c => out.push(c),
    }
}
