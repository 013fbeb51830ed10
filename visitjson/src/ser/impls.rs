use super::{Fragment, Seq, Serialize, Tuple};
use crate::number::Number;

use std::borrow::Cow;
use std::collections::{btree_set, vec_deque, BTreeMap, BTreeSet, HashMap, VecDeque};
use std::slice;

impl Serialize for bool {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Bool(*self)
    }
}

impl Serialize for char {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Char(*self)
    }
}

impl Serialize for str {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Str(Cow::Borrowed(self))
    }
}

impl Serialize for String {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Str(Cow::Borrowed(self.as_str()))
    }
}

impl Serialize for Cow<'_, str> {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Str(Cow::Borrowed(&**self))
    }
}

macro_rules! signed {
    ($($ty:ident)*) => {
        $(
            impl Serialize for $ty {
                fn begin(&self) -> Fragment<'_> {
                    Fragment::Number(Number::I64(*self as i64))
                }
            }
        )*
    };
}
signed!(i8 i16 i32 i64 isize);

macro_rules! unsigned {
    ($($ty:ident)*) => {
        $(
            impl Serialize for $ty {
                fn begin(&self) -> Fragment<'_> {
                    Fragment::Number(Number::U64(*self as u64))
                }
            }
        )*
    };
}
unsigned!(u8 u16 u32 u64 usize);

impl Serialize for f32 {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Number(Number::F32(*self))
    }
}

impl Serialize for f64 {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Number(Number::F64(*self))
    }
}

impl<T: ?Sized + Serialize> Serialize for &T {
    fn begin(&self) -> Fragment<'_> {
        (**self).begin()
    }
}

impl<T: ?Sized + Serialize> Serialize for &mut T {
    fn begin(&self) -> Fragment<'_> {
        (**self).begin()
    }
}

impl<T: ?Sized + Serialize> Serialize for Box<T> {
    fn begin(&self) -> Fragment<'_> {
        (**self).begin()
    }
}

// Borrowing iterators double as sequence cursors.
macro_rules! seq_iter {
    ($($iter:ident)::+) => {
        impl<'a, T: Serialize> Seq for $($iter)::+<'a, T> {
            fn next(&mut self) -> Option<&dyn Serialize> {
                Iterator::next(self).map(|element| element as &dyn Serialize)
            }
        }
    };
}
seq_iter!(slice::Iter);
seq_iter!(vec_deque::Iter);
seq_iter!(btree_set::Iter);

impl<T: Serialize> Serialize for [T] {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Seq(Box::new(self.iter()))
    }
}

impl<T: Serialize, const N: usize> Serialize for [T; N] {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Seq(Box::new(self.iter()))
    }
}

impl<T: Serialize> Serialize for Vec<T> {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Seq(Box::new(self.iter()))
    }
}

impl<T: Serialize> Serialize for VecDeque<T> {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Seq(Box::new(self.iter()))
    }
}

impl<T: Serialize> Serialize for BTreeSet<T> {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Seq(Box::new(self.iter()))
    }
}

/// Walks map entries as `(key, value)` pairs, so each encodes like a 2-tuple.
struct Entries<'a, I, K, V> {
    iter: I,
    entry: Option<(&'a K, &'a V)>,
}

impl<'a, I, K, V> Seq for Entries<'a, I, K, V>
where
    I: Iterator<Item = (&'a K, &'a V)>,
    K: Serialize,
    V: Serialize,
{
    fn next(&mut self) -> Option<&dyn Serialize> {
        let entry = self.entry.insert(self.iter.next()?);
        Some(&*entry)
    }
}

impl<K: Serialize, V: Serialize> Serialize for BTreeMap<K, V> {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Seq(Box::new(Entries {
            iter: self.iter(),
            entry: None,
        }))
    }
}

impl<K: Serialize, V: Serialize, S> Serialize for HashMap<K, V, S> {
    fn begin(&self) -> Fragment<'_> {
        Fragment::Seq(Box::new(Entries {
            iter: self.iter(),
            entry: None,
        }))
    }
}

macro_rules! tuple {
    ($len:expr => $($n:tt $T:ident)+) => {
        impl<$($T: Serialize),+> Tuple for ($($T,)+) {
            fn arity(&self) -> usize {
                $len
            }

            fn element(&self, index: usize) -> Option<&dyn Serialize> {
                match index {
                    $( $n => Some(&self.$n), )+
                    _ => None,
                }
            }
        }

        impl<$($T: Serialize),+> Serialize for ($($T,)+) {
            fn begin(&self) -> Fragment<'_> {
                Fragment::Tuple(self)
            }
        }
    };
}

tuple!(1 => 0 A);
tuple!(2 => 0 A 1 B);
tuple!(3 => 0 A 1 B 2 C);
tuple!(4 => 0 A 1 B 2 C 3 D);
tuple!(5 => 0 A 1 B 2 C 3 D 4 E);
tuple!(6 => 0 A 1 B 2 C 3 D 4 E 5 F);
tuple!(7 => 0 A 1 B 2 C 3 D 4 E 5 F 6 G);
tuple!(8 => 0 A 1 B 2 C 3 D 4 E 5 F 6 G 7 H);
