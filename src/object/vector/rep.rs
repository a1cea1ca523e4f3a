use super::types::*;
use crate::object::CowObj;

/// Vector attributes
///
/// Only the attributes that subscripting reads or propagates are modeled.
/// `dimnames` holds one optional character vector per axis.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes {
    pub names: Option<CowObj<Vec<Character>>>,
    pub dim: Option<Vec<usize>>,
    pub dimnames: Option<Vec<Option<Vec<Character>>>>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.names.is_none() && self.dim.is_none() && self.dimnames.is_none()
    }

    /// Names of one axis, if the array carries any.
    pub fn axis_names(&self, axis: usize) -> Option<&Vec<Character>> {
        self.dimnames
            .as_ref()
            .and_then(|dn| dn.get(axis))
            .and_then(|names| names.as_ref())
    }
}

/// Vector storage
///
/// Element values behind a copy-on-write cell, together with the
/// attributes of the vector.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Rep<T: Clone> {
    pub values: CowObj<Vec<T>>,
    pub attrs: Attributes,
}

impl<T: Clone> Default for Rep<T> {
    fn default() -> Self {
        Rep {
            values: CowObj::from(Vec::new()),
            attrs: Attributes::default(),
        }
    }
}

impl<T: Clone> Rep<T> {
    pub fn new(values: Vec<T>) -> Self {
        Rep {
            values: values.into(),
            attrs: Attributes::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).cloned()
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }
}

impl<T: Clone> From<Vec<T>> for Rep<T> {
    fn from(values: Vec<T>) -> Self {
        Rep::new(values)
    }
}

impl<T: Clone> From<CowObj<Vec<T>>> for Rep<T> {
    fn from(values: CowObj<Vec<T>>) -> Self {
        Rep {
            values,
            attrs: Attributes::default(),
        }
    }
}
