//! The visitor protocol through which aggregates expose their fields.
//!
//! An aggregate declares its fields once per access mode: `accept_reader`
//! hands out shared references for encoding, `accept_writer` hands out
//! mutable references for decoding. Both visit every field exactly once and
//! in the same declared order.

use crate::de::Deserialize;
use crate::ser::Serialize;

/// Receives read-only fields of an aggregate.
pub trait ReadVisitor {
    fn visit(&mut self, name: &str, value: &dyn Serialize);
}

/// Receives mutable fields of an aggregate.
pub trait WriteVisitor {
    fn visit(&mut self, name: &str, value: &mut dyn Deserialize);
}

impl<F> ReadVisitor for F
where
    F: FnMut(&str, &dyn Serialize),
{
    fn visit(&mut self, name: &str, value: &dyn Serialize) {
        self(name, value)
    }
}

impl<F> WriteVisitor for F
where
    F: FnMut(&str, &mut dyn Deserialize),
{
    fn visit(&mut self, name: &str, value: &mut dyn Deserialize) {
        self(name, value)
    }
}

pub trait AcceptReader {
    fn accept_reader(&self, visit: &mut dyn ReadVisitor);
}

pub trait AcceptWriter {
    fn accept_writer(&mut self, visit: &mut dyn WriteVisitor);
}

/// A value exposing named fields in both access modes.
pub trait Aggregate: AcceptReader + AcceptWriter {}

impl<T: ?Sized + AcceptReader + AcceptWriter> Aggregate for T {}

/// Attach the classifier and codec hooks to a type whose visitor protocol is
/// written by hand. `#[derive(Aggregate)]` does this on its own.
///
/// ```
/// use visitjson::visit::{AcceptReader, AcceptWriter, ReadVisitor, WriteVisitor};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl AcceptReader for Point {
///     fn accept_reader(&self, visit: &mut dyn ReadVisitor) {
///         visit.visit("x", &self.x);
///         visit.visit("y", &self.y);
///     }
/// }
///
/// impl AcceptWriter for Point {
///     fn accept_writer(&mut self, visit: &mut dyn WriteVisitor) {
///         visit.visit("x", &mut self.x);
///         visit.visit("y", &mut self.y);
///     }
/// }
///
/// visitjson::impl_aggregate!(Point);
///
/// assert_eq!(visitjson::to_string(&Point { x: 1, y: 2 }), r#"{"x":1,"y":2}"#);
/// ```
#[macro_export]
macro_rules! impl_aggregate {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::__private::Classify for $ty {
                const CATEGORY: $crate::__private::Category = $crate::__private::Category::Aggregate;
            }

            impl $crate::__private::Serialize for $ty {
                fn begin(&self) -> $crate::__private::Fragment<'_> {
                    $crate::__private::Fragment::Aggregate(self)
                }
            }

            impl $crate::__private::Deserialize for $ty {
                fn begin(&mut self) -> $crate::__private::Place<'_> {
                    $crate::__private::Place::Aggregate(self)
                }
            }
        )+
    };
}
