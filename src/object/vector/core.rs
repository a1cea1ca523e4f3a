use std::fmt::Debug;

use super::rep::{Attributes, Rep};
use super::types::*;
use crate::object::{CowObj, Obj};

#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub enum OptionNA<T> {
    #[default]
    NA,
    Some(T),
}

impl<T> OptionNA<T> {
    pub fn map<F, U>(self, f: F) -> OptionNA<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            OptionNA::Some(x) => OptionNA::Some(f(x)),
            OptionNA::NA => OptionNA::NA,
        }
    }

    pub fn as_option(self) -> Option<T> {
        match self {
            OptionNA::Some(x) => Option::Some(x),
            OptionNA::NA => Option::None,
        }
    }

    pub fn as_ref(&self) -> OptionNA<&T> {
        match self {
            OptionNA::Some(x) => OptionNA::Some(x),
            OptionNA::NA => OptionNA::NA,
        }
    }
}

impl<T> From<Option<T>> for OptionNA<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(x) => OptionNA::Some(x),
            None => OptionNA::NA,
        }
    }
}

impl<T: Debug> Debug for OptionNA<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "{:?}", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

/// Storage type of a vector, ordered by coercion rank.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum VectorKind {
    Logical,
    Integer,
    Double,
    Character,
    List,
}

/// Flavor of a list container
///
/// Language objects, expressions and pairlists are all list-like. Their
/// subsets are built as generic lists and re-tagged afterwards.
///
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ListKind {
    #[default]
    Generic,
    PairList,
    Language,
    Expression,
}

impl ListKind {
    /// Kind carried by a subset of a list of this kind.
    pub fn subset_kind(self) -> ListKind {
        match self {
            ListKind::PairList => ListKind::Generic,
            kind => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Vector {
    Logical(Rep<Logical>),
    Integer(Rep<Integer>),
    Double(Rep<Double>),
    Character(Rep<Character>),
    List(Rep<Obj>, ListKind),
}

/// Apply the same expression to the `Rep` of every vector variant.
#[macro_export]
macro_rules! with_rep {
    ($vector:expr, $x:ident => $body:expr) => {
        match $vector {
            $crate::object::Vector::Logical($x) => $body,
            $crate::object::Vector::Integer($x) => $body,
            $crate::object::Vector::Double($x) => $body,
            $crate::object::Vector::Character($x) => $body,
            $crate::object::Vector::List($x, _) => $body,
        }
    };
}

impl Vector {
    pub fn kind(&self) -> VectorKind {
        match self {
            Vector::Logical(_) => VectorKind::Logical,
            Vector::Integer(_) => VectorKind::Integer,
            Vector::Double(_) => VectorKind::Double,
            Vector::Character(_) => VectorKind::Character,
            Vector::List(..) => VectorKind::List,
        }
    }

    /// An empty vector of the given storage type.
    pub fn empty(kind: VectorKind) -> Vector {
        match kind {
            VectorKind::Logical => Vector::Logical(Rep::default()),
            VectorKind::Integer => Vector::Integer(Rep::default()),
            VectorKind::Double => Vector::Double(Rep::default()),
            VectorKind::Character => Vector::Character(Rep::default()),
            VectorKind::List => Vector::List(Rep::default(), ListKind::Generic),
        }
    }

    pub fn len(&self) -> usize {
        with_rep!(self, x => x.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn attrs(&self) -> &Attributes {
        with_rep!(self, x => &x.attrs)
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        with_rep!(self, x => &mut x.attrs)
    }

    pub fn names(&self) -> Option<&CowObj<Vec<Character>>> {
        self.attrs().names.as_ref()
    }

    pub fn set_names(mut self, names: Vec<Character>) -> Self {
        self.attrs_mut().names = Some(names.into());
        self
    }

    pub fn set_dim(mut self, dim: Vec<usize>) -> Self {
        self.attrs_mut().dim = Some(dim);
        self
    }

    pub fn set_dimnames(mut self, dimnames: Vec<Option<Vec<Character>>>) -> Self {
        self.attrs_mut().dimnames = Some(dimnames);
        self
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Vector::List(..))
    }

    /// Get a single element as a bare object.
    pub fn get(&self, index: usize) -> Option<Obj> {
        use crate::object::Scalar;
        match self {
            Vector::Logical(x) => x.get(index).map(|x| Obj::Scalar(Scalar::Logical(x))),
            Vector::Integer(x) => x.get(index).map(|x| Obj::Scalar(Scalar::Integer(x))),
            Vector::Double(x) => x.get(index).map(|x| Obj::Scalar(Scalar::Double(x))),
            Vector::Character(x) => x.get(index).map(|x| Obj::Scalar(Scalar::Character(x))),
            Vector::List(x, _) => x.get(index),
        }
    }

    /// Whether any element is missing.
    pub fn any_na(&self) -> bool {
        with_rep!(self, x => x.values.iter().any(|v| v.is_na()))
    }
}

impl From<Vec<f64>> for Vector {
    fn from(x: Vec<f64>) -> Self {
        Vector::Double(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>().into())
    }
}

impl From<Vec<Double>> for Vector {
    fn from(x: Vec<Double>) -> Self {
        Vector::Double(x.into())
    }
}

impl From<Vec<i32>> for Vector {
    fn from(x: Vec<i32>) -> Self {
        Vector::Integer(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>().into())
    }
}

impl From<Vec<Integer>> for Vector {
    fn from(x: Vec<Integer>) -> Self {
        Vector::Integer(x.into())
    }
}

impl From<Vec<bool>> for Vector {
    fn from(x: Vec<bool>) -> Self {
        Vector::Logical(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>().into())
    }
}

impl From<Vec<Logical>> for Vector {
    fn from(x: Vec<Logical>) -> Self {
        Vector::Logical(x.into())
    }
}

impl From<Vec<String>> for Vector {
    fn from(x: Vec<String>) -> Self {
        Vector::Character(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>().into())
    }
}

impl From<Vec<&str>> for Vector {
    fn from(x: Vec<&str>) -> Self {
        Vector::from(x.into_iter().map(String::from).collect::<Vec<_>>())
    }
}

impl From<Vec<Character>> for Vector {
    fn from(x: Vec<Character>) -> Self {
        Vector::Character(x.into())
    }
}

impl From<Vec<Obj>> for Vector {
    fn from(x: Vec<Obj>) -> Self {
        Vector::List(x.into(), ListKind::Generic)
    }
}
