mod impls;

use crate::meta::Category;
use crate::number::Number;
use crate::visit::AcceptReader;
use std::borrow::Cow;
use std::boxed::Box;

/// Read-only view of a value, tagged by its category.
pub enum Fragment<'a> {
    Bool(bool),
    Number(Number),
    Char(char),
    Str(Cow<'a, str>),
    Seq(Box<dyn Seq + 'a>),
    Tuple(&'a dyn Tuple),
    Aggregate(&'a dyn AcceptReader),
}

impl Fragment<'_> {
    pub fn category(&self) -> Category {
        match self {
            Fragment::Bool(_) => Category::Boolean,
            Fragment::Number(_) => Category::Number,
            Fragment::Char(_) => Category::Character,
            Fragment::Str(_) => Category::String,
            Fragment::Seq(_) => Category::Container,
            Fragment::Tuple(_) => Category::Tuple,
            Fragment::Aggregate(_) => Category::Aggregate,
        }
    }
}

/// Trait for data structures that can be serialized to a JSON string.
pub trait Serialize {
    fn begin(&self) -> Fragment<'_>;
}

/// Trait that can iterate elements of a sequence.
pub trait Seq {
    fn next(&mut self) -> Option<&dyn Serialize>;
}

/// Positional access to the elements of a fixed-arity tuple.
pub trait Tuple {
    fn arity(&self) -> usize;
    fn element(&self, index: usize) -> Option<&dyn Serialize>;
}
