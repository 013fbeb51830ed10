use super::{Deserialize, Numeral, Place, Seq, Tuple};

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

impl Deserialize for bool {
    fn begin(&mut self) -> Place<'_> {
        Place::Bool(self)
    }
}

impl Deserialize for char {
    fn begin(&mut self) -> Place<'_> {
        Place::Char(self)
    }
}

impl Deserialize for String {
    fn begin(&mut self) -> Place<'_> {
        Place::Str(self)
    }
}

macro_rules! number {
    ($($ty:ident)*) => {
        $(
            impl Numeral for $ty {
                fn assign(&mut self, text: &str) -> bool {
                    match text.parse::<$ty>() {
                        Ok(n) => {
                            *self = n;
                            true
                        }
                        Err(_) => false,
                    }
                }
            }

            impl Deserialize for $ty {
                fn begin(&mut self) -> Place<'_> {
                    Place::Number(self)
                }
            }
        )*
    };
}
number!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize f32 f64);

impl<T: ?Sized + Deserialize> Deserialize for &mut T {
    fn begin(&mut self) -> Place<'_> {
        (**self).begin()
    }
}

impl<T: ?Sized + Deserialize> Deserialize for Box<T> {
    fn begin(&mut self) -> Place<'_> {
        (**self).begin()
    }
}

/// A growable container decoded elements are appended to.
pub trait Append {
    type Element;
    fn append(&mut self, element: Self::Element);
}

impl<T> Append for Vec<T> {
    type Element = T;
    fn append(&mut self, element: T) {
        self.push(element);
    }
}

impl<T> Append for VecDeque<T> {
    type Element = T;
    fn append(&mut self, element: T) {
        self.push_back(element);
    }
}

impl<T: Ord> Append for BTreeSet<T> {
    type Element = T;
    fn append(&mut self, element: T) {
        self.insert(element);
    }
}

// A decoded entry replaces the value under an existing key.
impl<K: Ord, V> Append for BTreeMap<K, V> {
    type Element = (K, V);
    fn append(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Append for HashMap<K, V, S> {
    type Element = (K, V);
    fn append(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }
}

/// Hands out a fresh default element per slot and appends it to the target
/// once the next slot is requested, or on finish.
struct Builder<'a, C: Append> {
    out: &'a mut C,
    element: Option<C::Element>,
}

impl<'a, C: Append> Builder<'a, C> {
    fn new(out: &'a mut C) -> Self {
        Builder { out, element: None }
    }

    fn shift(&mut self) {
        if let Some(e) = self.element.take() {
            self.out.append(e);
        }
    }
}

impl<C> Seq for Builder<'_, C>
where
    C: Append,
    C::Element: Deserialize + Default,
{
    fn element(&mut self) -> Option<&mut dyn Deserialize> {
        self.shift();
        Some(self.element.insert(C::Element::default()))
    }

    fn finish(&mut self) -> bool {
        self.shift();
        true
    }
}

impl<T: Deserialize + Default> Deserialize for Vec<T> {
    fn begin(&mut self) -> Place<'_> {
        Place::Seq(Box::new(Builder::new(self)))
    }
}

impl<T: Deserialize + Default> Deserialize for VecDeque<T> {
    fn begin(&mut self) -> Place<'_> {
        Place::Seq(Box::new(Builder::new(self)))
    }
}

impl<T: Deserialize + Default + Ord> Deserialize for BTreeSet<T> {
    fn begin(&mut self) -> Place<'_> {
        Place::Seq(Box::new(Builder::new(self)))
    }
}

impl<K, V> Deserialize for BTreeMap<K, V>
where
    K: Deserialize + Default + Ord,
    V: Deserialize + Default,
{
    fn begin(&mut self) -> Place<'_> {
        Place::Seq(Box::new(Builder::new(self)))
    }
}

impl<K, V, S> Deserialize for HashMap<K, V, S>
where
    K: Deserialize + Default + Eq + Hash,
    V: Deserialize + Default,
    S: BuildHasher,
{
    fn begin(&mut self) -> Place<'_> {
        Place::Seq(Box::new(Builder::new(self)))
    }
}

/// Overwrites the slots of a fixed-size array in order.
struct Filler<'a, T> {
    out: &'a mut [T],
    filled: usize,
}

impl<T: Deserialize> Seq for Filler<'_, T> {
    fn element(&mut self) -> Option<&mut dyn Deserialize> {
        let slot = self.out.get_mut(self.filled)?;
        self.filled += 1;
        Some(slot)
    }

    fn finish(&mut self) -> bool {
        self.filled == self.out.len()
    }

    fn fixed_len(&self) -> Option<usize> {
        Some(self.out.len())
    }
}

impl<T: Deserialize, const N: usize> Deserialize for [T; N] {
    fn begin(&mut self) -> Place<'_> {
        Place::Seq(Box::new(Filler { out: self, filled: 0 }))
    }
}

macro_rules! tuple {
    ($len:expr => $($n:tt $T:ident)+) => {
        impl<$($T: Deserialize),+> Tuple for ($($T,)+) {
            fn arity(&self) -> usize {
                $len
            }

            fn element(&mut self, index: usize) -> Option<&mut dyn Deserialize> {
                match index {
                    $( $n => Some(&mut self.$n), )+
                    _ => None,
                }
            }
        }

        impl<$($T: Deserialize),+> Deserialize for ($($T,)+) {
            fn begin(&mut self) -> Place<'_> {
                Place::Tuple(self)
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

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<T: Deserialize>(target: &mut T, values: &[&str]) -> bool {
        let Place::Seq(mut seq) = target.begin() else {
            panic!("not a sequence");
        };
        for text in values {
            let Some(slot) = seq.element() else {
                return false;
            };
            let Place::Number(n) = slot.begin() else {
                panic!("not a number");
            };
            assert!(n.assign(text));
        }
        seq.finish()
    }

    #[test]
    fn numerals_use_the_target_parser() {
        let mut byte = 0u8;
        assert!(byte.assign("255"));
        assert!(!byte.assign("256"));
        assert_eq!(byte, 255);
        let mut float = 0f64;
        assert!(float.assign("-2.5e3"));
        assert_eq!(float, -2500.0);
        assert!(!float.assign(""));
    }

    #[test]
    fn builder_appends_after_existing_elements() {
        let mut v = vec![1];
        assert!(fill(&mut v, &["2", "3"]));
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn builder_feeds_sets_and_deques() {
        let mut set = BTreeSet::<u32>::new();
        assert!(fill(&mut set, &["3", "1", "3"]));
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 3]);
        let mut deque = VecDeque::<i16>::new();
        assert!(fill(&mut deque, &["9"]));
        assert_eq!(deque, [9]);
    }

    #[test]
    fn builder_inserts_map_entries() {
        let mut map = BTreeMap::from([(1u8, String::from("old"))]);
        let Place::Seq(mut seq) = map.begin() else {
            panic!("not a sequence");
        };
        for (key, value) in [("1", "new"), ("2", "two")] {
            let Some(slot) = seq.element() else {
                panic!("no slot");
            };
            let Place::Tuple(entry) = slot.begin() else {
                panic!("not a tuple");
            };
            let Some(Place::Number(k)) = entry.element(0).map(|k| k.begin()) else {
                panic!("not a number key");
            };
            assert!(k.assign(key));
            let Some(Place::Str(v)) = entry.element(1).map(|v| v.begin()) else {
                panic!("not a string value");
            };
            v.push_str(value);
        }
        assert!(seq.finish());
        drop(seq);
        assert_eq!(map, BTreeMap::from([(1, "new".to_owned()), (2, "two".to_owned())]));
    }

    #[test]
    fn filler_needs_the_exact_length() {
        let mut exact = [0u8; 2];
        assert!(fill(&mut exact, &["4", "5"]));
        assert_eq!(exact, [4, 5]);

        let mut short = [0u8; 3];
        assert!(!fill(&mut short, &["4", "5"]));

        let mut long = [0u8; 1];
        assert!(!fill(&mut long, &["4", "5"]));
    }
}
