pub mod impls;

use crate::meta::Category;
use crate::visit::AcceptWriter;
use std::boxed::Box;

/// Mutable view of a pre-existing target value, tagged by its category.
pub enum Place<'a> {
    Bool(&'a mut bool),
    Number(&'a mut dyn Numeral),
    Char(&'a mut char),
    Str(&'a mut String),
    Seq(Box<dyn Seq + 'a>),
    Tuple(&'a mut dyn Tuple),
    Aggregate(&'a mut dyn AcceptWriter),
}

impl Place<'_> {
    pub fn category(&self) -> Category {
        match self {
            Place::Bool(_) => Category::Boolean,
            Place::Number(_) => Category::Number,
            Place::Char(_) => Category::Character,
            Place::Str(_) => Category::String,
            Place::Seq(_) => Category::Container,
            Place::Tuple(_) => Category::Tuple,
            Place::Aggregate(_) => Category::Aggregate,
        }
    }
}

/// Trait for data structures that can be filled in from a JSON string.
pub trait Deserialize {
    fn begin(&mut self) -> Place<'_>;
}

/// A numeric slot, assigned from the text of a JSON numeral using the
/// target type's own parsing rules.
pub trait Numeral {
    /// Returns `false`, leaving the slot untouched, if `text` does not parse.
    fn assign(&mut self, text: &str) -> bool;
}

/// Trait that can hand out places to write sequence elements.
pub trait Seq {
    /// A slot for the next element, or `None` when the target has no room.
    fn element(&mut self) -> Option<&mut dyn Deserialize>;

    /// Commits the elements handed out so far. Returns `false` if the target
    /// required more elements than it received.
    fn finish(&mut self) -> bool;

    /// Exact element count required by fixed-size targets.
    fn fixed_len(&self) -> Option<usize> {
        None
    }
}

/// Positional mutable access to the elements of a fixed-arity tuple.
pub trait Tuple {
    fn arity(&self) -> usize;
    fn element(&mut self, index: usize) -> Option<&mut dyn Deserialize>;
}
