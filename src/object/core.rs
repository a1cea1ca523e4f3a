use std::rc::Rc;

use super::*;

#[derive(Default, Clone, Debug)]
pub enum Obj {
    // Data structures
    #[default]
    Null,
    Scalar(Scalar),
    Vector(Vector),
    Environment(Rc<Environment>),

    // Non-subsettable runtime values, carried by name
    Function(String),
    Symbol(String),
}

impl PartialEq for Obj {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Obj::Null, Obj::Null) => true,
            (Obj::Scalar(l), Obj::Scalar(r)) => l == r,
            (Obj::Scalar(s), Obj::Vector(v)) | (Obj::Vector(v), Obj::Scalar(s)) => {
                v.len() == 1 && v.attrs().is_empty() && &s.clone().into_vector() == v
            }
            (Obj::Vector(l), Obj::Vector(r)) => l == r,
            (Obj::Environment(l), Obj::Environment(r)) => Rc::ptr_eq(l, r),
            (Obj::Function(l), Obj::Function(r)) => l == r,
            (Obj::Symbol(l), Obj::Symbol(r)) => l == r,
            _ => false,
        }
    }
}

impl Obj {
    /// R's `typeof()` of the object
    pub fn type_name(&self) -> &'static str {
        match self {
            Obj::Null => "NULL",
            Obj::Scalar(s) => kind_name(s.kind()),
            Obj::Vector(Vector::List(_, kind)) => match kind {
                ListKind::Generic => "list",
                ListKind::PairList => "pairlist",
                ListKind::Language => "language",
                ListKind::Expression => "expression",
            },
            Obj::Vector(v) => kind_name(v.kind()),
            Obj::Environment(_) => "environment",
            Obj::Function(_) => "closure",
            Obj::Symbol(_) => "symbol",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Obj::Null => 0,
            Obj::Vector(v) => v.len(),
            Obj::Environment(e) => e.values.borrow().len(),
            _ => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the object as a vector, promoting bare elements.
    pub fn as_vector(&self) -> Option<Vector> {
        match self {
            Obj::Scalar(s) => Some(s.clone().into_vector()),
            Obj::Vector(v) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Obj::Scalar(s) => Some(s.into_vector()),
            Obj::Vector(v) => Some(v),
            _ => None,
        }
    }
}

fn kind_name(kind: VectorKind) -> &'static str {
    match kind {
        VectorKind::Logical => "logical",
        VectorKind::Integer => "integer",
        VectorKind::Double => "double",
        VectorKind::Character => "character",
        VectorKind::List => "list",
    }
}

impl From<Vector> for Obj {
    fn from(value: Vector) -> Self {
        Obj::Vector(value)
    }
}

impl From<Scalar> for Obj {
    fn from(value: Scalar) -> Self {
        Obj::Scalar(value)
    }
}

impl From<i32> for Obj {
    fn from(value: i32) -> Self {
        Obj::Scalar(Scalar::Integer(OptionNA::Some(value)))
    }
}

impl From<f64> for Obj {
    fn from(value: f64) -> Self {
        Obj::Scalar(Scalar::Double(OptionNA::Some(value)))
    }
}

impl From<bool> for Obj {
    fn from(value: bool) -> Self {
        Obj::Scalar(Scalar::Logical(OptionNA::Some(value)))
    }
}

impl From<&str> for Obj {
    fn from(value: &str) -> Self {
        Obj::Scalar(Scalar::Character(OptionNA::Some(value.to_string())))
    }
}

impl From<String> for Obj {
    fn from(value: String) -> Self {
        Obj::Scalar(Scalar::Character(OptionNA::Some(value)))
    }
}

impl From<Rc<Environment>> for Obj {
    fn from(value: Rc<Environment>) -> Self {
        Obj::Environment(value)
    }
}
