//! Paths used by code that `#[derive(Aggregate)]` and `impl_aggregate!`
//! expand to. Not public API.
pub use core::default::Default;

pub use crate::de::{Deserialize, Place};
pub use crate::meta::{Category, Classify};
pub use crate::ser::{Fragment, Serialize};
pub use crate::visit::{AcceptReader, AcceptWriter, ReadVisitor, WriteVisitor};
