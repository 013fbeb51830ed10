//! Compile-time classification of types into JSON categories.
//!
//! Every supported type implements [`Classify`] and so has exactly one
//! [`Category`]. References and boxes classify as the type they point to.
//! A type without an impl is unsupported: the codec entry points require
//! `Classify`, so handing them such a type fails to build.

use core::marker::PhantomData;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Boolean,
    Number,
    Character,
    String,
    Container,
    Tuple,
    Aggregate,
    Unsupported,
}

impl Category {
    pub const fn is_supported(self) -> bool {
        !matches!(self, Category::Unsupported)
    }
}

/// The JSON category of a type.
///
/// Encoding or decoding a type without this impl does not build:
///
/// ```compile_fail
/// let pointer: *const u8 = std::ptr::null();
/// visitjson::to_string(&pointer);
/// ```
///
/// ```compile_fail
/// // No derive, no visitor: a plain struct has no category.
/// #[derive(Default)]
/// struct Plain {
///     id: u32,
/// }
///
/// visitjson::to_string(&Plain::default());
/// ```
///
/// ```compile_fail
/// #[derive(Default)]
/// struct Plain {
///     id: u32,
/// }
///
/// let _ = visitjson::from_str::<Plain>(r#"{"id":1}"#);
/// ```
///
/// Supported types pass through the same entry points:
///
/// ```
/// let text = visitjson::to_string(&vec![(1, 'a')]);
/// assert_eq!(visitjson::from_str::<Vec<(u8, char)>>(&text), Ok(vec![(1, 'a')]));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no JSON category",
    label = "unsupported type",
    note = "derive `Aggregate`, or implement `AcceptReader` and `AcceptWriter` and invoke `impl_aggregate!`"
)]
pub trait Classify {
    const CATEGORY: Category;
}

/// Category of `T`, usable in const contexts.
pub const fn category<T: ?Sized + Classify>() -> Category {
    T::CATEGORY
}

macro_rules! classify {
    ($category:ident => $($ty:ty),* $(,)?) => {
        $(
            impl Classify for $ty {
                const CATEGORY: Category = Category::$category;
            }
        )*
    };
}

classify!(Boolean => bool);
classify!(Number => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
classify!(Character => char);
classify!(String => str, String);

impl Classify for Cow<'_, str> {
    const CATEGORY: Category = Category::String;
}

impl<T: Classify> Classify for Vec<T> {
    const CATEGORY: Category = Category::Container;
}

impl<T: Classify> Classify for VecDeque<T> {
    const CATEGORY: Category = Category::Container;
}

impl<T: Classify> Classify for BTreeSet<T> {
    const CATEGORY: Category = Category::Container;
}

// Maps are containers of `(key, value)` entries.
impl<K: Classify, V: Classify> Classify for BTreeMap<K, V> {
    const CATEGORY: Category = Category::Container;
}

impl<K: Classify, V: Classify, S> Classify for HashMap<K, V, S> {
    const CATEGORY: Category = Category::Container;
}

impl<T: Classify, const N: usize> Classify for [T; N] {
    const CATEGORY: Category = Category::Container;
}

impl<T: Classify> Classify for [T] {
    const CATEGORY: Category = Category::Container;
}

impl<T: ?Sized + Classify> Classify for &T {
    const CATEGORY: Category = T::CATEGORY;
}

impl<T: ?Sized + Classify> Classify for &mut T {
    const CATEGORY: Category = T::CATEGORY;
}

impl<T: ?Sized + Classify> Classify for Box<T> {
    const CATEGORY: Category = T::CATEGORY;
}

macro_rules! classify_tuple {
    ($($T:ident)+) => {
        impl<$($T: Classify),+> Classify for ($($T,)+) {
            const CATEGORY: Category = Category::Tuple;
        }
    };
}

classify_tuple!(A);
classify_tuple!(A B);
classify_tuple!(A B C);
classify_tuple!(A B C D);
classify_tuple!(A B C D E);
classify_tuple!(A B C D E F);
classify_tuple!(A B C D E F G);
classify_tuple!(A B C D E F G H);

/// Zero-sized stand-in for `T`, used by `category_of!` to pick between
/// [`ViaClassify`] and [`ViaFallback`] through method resolution.
#[doc(hidden)]
pub struct Probe<T: ?Sized>(PhantomData<T>);

impl<T: ?Sized> Probe<T> {
    pub const fn new() -> Self {
        Probe(PhantomData)
    }
}

impl<T: ?Sized> Default for Probe<T> {
    fn default() -> Self {
        Probe::new()
    }
}

#[doc(hidden)]
pub trait ViaClassify {
    fn category(&self) -> Category;
}

impl<T: ?Sized + Classify> ViaClassify for Probe<T> {
    fn category(&self) -> Category {
        T::CATEGORY
    }
}

#[doc(hidden)]
pub trait ViaFallback {
    fn category(&self) -> Category;
}

impl<T: ?Sized> ViaFallback for &Probe<T> {
    fn category(&self) -> Category {
        Category::Unsupported
    }
}

/// Category of a concrete type, or `Category::Unsupported` when the type has
/// none. Resolved during type checking; inside generic code it always falls
/// back to `Unsupported`, so name concrete types only.
///
/// ```
/// use visitjson::{category_of, Category};
///
/// assert_eq!(category_of!(Vec<u8>), Category::Container);
/// assert_eq!(category_of!(*const u8), Category::Unsupported);
/// ```
#[macro_export]
macro_rules! category_of {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::meta::{ViaClassify as _, ViaFallback as _};
        (&$crate::meta::Probe::<$ty>::new()).category()
    }};
}
