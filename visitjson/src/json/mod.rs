//! JSON text codec driven by the category of each value.
//!
//! Scalars map to JSON scalars, containers to arrays, and both tuples and
//! aggregates to objects. Tuple members are keyed `"1"`, `"2"`, ... by
//! position; aggregate members by field name.

mod de;
mod ignore;
mod scan;
mod ser;

pub use self::de::{from_str, from_str_into, from_str_into_with, from_str_with};
pub use self::scan::Scanner;
pub use self::ser::{to_string, to_writer, Json};
