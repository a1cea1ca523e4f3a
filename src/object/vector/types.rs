use super::OptionNA;
use crate::object::Obj;

pub type Double = OptionNA<f64>;
pub type Integer = OptionNA<i32>;
pub type Logical = OptionNA<bool>;
pub type Character = OptionNA<String>;

/// Vector element
///
/// Anything that can be stored in a vector slot. Every element type has a
/// missing value used to fill out-of-bounds reads and vector growth: `NA`
/// for atomic types and `NULL` for list elements.
///
pub trait VecElement: Clone + Default + std::fmt::Debug {
    fn is_na(&self) -> bool;

    fn na() -> Self {
        Self::default()
    }
}

impl<T: Clone + std::fmt::Debug> VecElement for OptionNA<T> {
    fn is_na(&self) -> bool {
        matches!(self, OptionNA::NA)
    }
}

impl VecElement for Obj {
    fn is_na(&self) -> bool {
        matches!(self, Obj::Null)
    }
}
