//! Visitor-driven JSON encoding and decoding.
//!
//! Types are sorted at compile time into categories (see [`meta`]). Scalars,
//! strings, containers and tuples are handled by built-in impls; user structs
//! take part by exposing their fields through the [`visit`] protocol, usually
//! via `#[derive(Aggregate)]`.
//!
//! ```
//! use visitjson::Aggregate;
//!
//! #[derive(Aggregate, Default, Debug, PartialEq)]
//! struct Reading {
//!     sensor: String,
//!     values: Vec<f64>,
//! }
//!
//! let reading = Reading { sensor: "t1".into(), values: vec![20.5, 21.0] };
//! let text = visitjson::to_string(&reading);
//! assert_eq!(text, r#"{"sensor":"t1","values":[20.5,21]}"#);
//! assert_eq!(visitjson::from_str::<Reading>(&text), Ok(reading));
//! ```

extern crate self as visitjson;

pub mod de;
pub mod json;
pub mod meta;
pub mod ser;
pub mod visit;

mod config;
mod number;
mod types;

#[doc(hidden)]
#[path = "macro_export.rs"]
pub mod __private;

pub use visitjson_derive::Aggregate;

pub use crate::config::{Config, UnknownFields, DEFAULT_MAX_DEPTH};
pub use crate::de::Deserialize;
pub use crate::json::{from_str, from_str_into, from_str_into_with, from_str_with, to_string, to_writer, Json, Scanner};
pub use crate::meta::{Category, Classify};
pub use crate::number::Number;
pub use crate::ser::Serialize;
pub use crate::types::{Error, Result, Token};
pub use crate::visit::{AcceptReader, AcceptWriter, ReadVisitor, WriteVisitor};
