use core::fmt::{self, Display};

/// A JSON number represented by some Rust primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Display for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        // Float `Display` already prints the shortest text that parses back to
        // the same value, and drops the fraction of whole numbers.
        match *self {
            Number::U64(n) => Display::fmt(&n, formatter),
            Number::I64(i) => Display::fmt(&i, formatter),
            Number::F32(f) if f.is_finite() => Display::fmt(&f, formatter),
            Number::F64(f) if f.is_finite() => Display::fmt(&f, formatter),
            Number::F32(_) | Number::F64(_) => formatter.write_str("null"),
        }
    }
}
