use strum::EnumDiscriminants;

use crate::error::Error;
use crate::lang::Signal;
use crate::object::types::*;
use crate::object::{ListKind, Obj, OptionNA, Scalar, Vector, VectorKind};

/// A raw subscript for one axis, as supplied by the caller
///
/// Scalar variants are the length-one forms of the vector variants and are
/// resolved identically. Factors resolve through their integer codes.
///
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(OperandClass), derive(Hash, strum::Display))]
pub enum IndexOperand {
    Missing,
    Null,
    Int(Integer),
    IntVec(Vec<Integer>),
    Double(Double),
    DoubleVec(Vec<Double>),
    Logical(Logical),
    LogicalVec(Vec<Logical>),
    Str(Character),
    StrVec(Vec<Character>),
    Factor {
        codes: Vec<Integer>,
        levels: Vec<Character>,
    },
    List(Vec<Obj>),
    Symbol(String),
    Function(String),
}

impl IndexOperand {
    pub fn class(&self) -> OperandClass {
        OperandClass::from(self)
    }

    pub fn len(&self) -> usize {
        use IndexOperand::*;
        match self {
            Missing | Null => 0,
            Int(_) | Double(_) | Logical(_) | Str(_) | Symbol(_) | Function(_) => 1,
            IntVec(v) => v.len(),
            DoubleVec(v) => v.len(),
            LogicalVec(v) => v.len(),
            StrVec(v) => v.len(),
            Factor { codes, .. } => codes.len(),
            List(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the operand is the empty argument of `x[]` or `x[i, ]`.
    pub fn is_missing(&self) -> bool {
        match self {
            IndexOperand::Missing => true,
            IndexOperand::Symbol(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Split a vector operand into its scalar elements
    ///
    /// Used for recursive `[[` on lists, where each element descends one
    /// level.
    ///
    pub fn elements(&self) -> Option<Vec<IndexOperand>> {
        use IndexOperand as I;
        let elements = match self {
            I::IntVec(v) => v.iter().cloned().map(I::Int).collect(),
            I::DoubleVec(v) => v.iter().cloned().map(I::Double).collect(),
            I::LogicalVec(v) => v.iter().cloned().map(I::Logical).collect(),
            I::StrVec(v) => v.iter().cloned().map(I::Str).collect(),
            _ => return None,
        };
        Some(elements)
    }
}

impl TryFrom<&Obj> for IndexOperand {
    type Error = Signal;

    fn try_from(value: &Obj) -> Result<Self, Self::Error> {
        let operand = match value {
            Obj::Null => IndexOperand::Null,
            Obj::Scalar(Scalar::Integer(x)) => IndexOperand::Int(x.clone()),
            Obj::Scalar(Scalar::Double(x)) => IndexOperand::Double(x.clone()),
            Obj::Scalar(Scalar::Logical(x)) => IndexOperand::Logical(x.clone()),
            Obj::Scalar(Scalar::Character(x)) => IndexOperand::Str(x.clone()),
            Obj::Vector(Vector::Integer(x)) => IndexOperand::IntVec(x.values.to_vec()),
            Obj::Vector(Vector::Double(x)) => IndexOperand::DoubleVec(x.values.to_vec()),
            Obj::Vector(Vector::Logical(x)) => IndexOperand::LogicalVec(x.values.to_vec()),
            Obj::Vector(Vector::Character(x)) => IndexOperand::StrVec(x.values.to_vec()),
            Obj::Vector(Vector::List(x, _)) => IndexOperand::List(x.values.to_vec()),
            Obj::Symbol(s) => IndexOperand::Symbol(s.clone()),
            Obj::Function(f) => IndexOperand::Function(f.clone()),
            Obj::Environment(_) => return Error::InvalidSubscriptType("environment").into(),
        };
        Ok(operand)
    }
}

impl From<i32> for IndexOperand {
    fn from(value: i32) -> Self {
        IndexOperand::Int(OptionNA::Some(value))
    }
}

impl From<f64> for IndexOperand {
    fn from(value: f64) -> Self {
        IndexOperand::Double(OptionNA::Some(value))
    }
}

impl From<bool> for IndexOperand {
    fn from(value: bool) -> Self {
        IndexOperand::Logical(OptionNA::Some(value))
    }
}

impl From<&str> for IndexOperand {
    fn from(value: &str) -> Self {
        IndexOperand::Str(OptionNA::Some(value.to_string()))
    }
}

impl From<Vec<i32>> for IndexOperand {
    fn from(value: Vec<i32>) -> Self {
        IndexOperand::IntVec(value.into_iter().map(OptionNA::Some).collect())
    }
}

impl From<Vec<f64>> for IndexOperand {
    fn from(value: Vec<f64>) -> Self {
        IndexOperand::DoubleVec(value.into_iter().map(OptionNA::Some).collect())
    }
}

impl From<Vec<bool>> for IndexOperand {
    fn from(value: Vec<bool>) -> Self {
        IndexOperand::LogicalVec(value.into_iter().map(OptionNA::Some).collect())
    }
}

impl From<Vec<&str>> for IndexOperand {
    fn from(value: Vec<&str>) -> Self {
        IndexOperand::StrVec(
            value
                .into_iter()
                .map(|s| OptionNA::Some(s.to_string()))
                .collect(),
        )
    }
}

/// Run-time shape class of a subscripted container
///
/// Part of the key of a cached specialization. Bare elements share the
/// class of the plain vector they promote to.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ContainerClass {
    Null,
    Vector {
        kind: VectorKind,
        list: Option<ListKind>,
        rank: usize,
    },
    Environment,
    Function,
    Symbol,
}

impl From<&Obj> for ContainerClass {
    fn from(value: &Obj) -> Self {
        match value {
            Obj::Null => ContainerClass::Null,
            Obj::Scalar(s) => ContainerClass::Vector {
                kind: s.kind(),
                list: None,
                rank: 0,
            },
            Obj::Vector(v) => ContainerClass::from(v),
            Obj::Environment(_) => ContainerClass::Environment,
            Obj::Function(_) => ContainerClass::Function,
            Obj::Symbol(_) => ContainerClass::Symbol,
        }
    }
}

impl From<&Vector> for ContainerClass {
    fn from(v: &Vector) -> Self {
        let list = match v {
            Vector::List(_, kind) => Some(*kind),
            _ => None,
        };
        ContainerClass::Vector {
            kind: v.kind(),
            list,
            rank: v.attrs().dim.as_ref().map_or(0, |d| d.len()),
        }
    }
}

impl std::fmt::Display for ContainerClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerClass::Null => write!(f, "null"),
            ContainerClass::Vector {
                list: Some(list), rank, ..
            } => write!(f, "{list}/{rank}"),
            ContainerClass::Vector { kind, rank, .. } => write!(f, "{kind}/{rank}"),
            ContainerClass::Environment => write!(f, "environment"),
            ContainerClass::Function => write!(f, "closure"),
            ContainerClass::Symbol => write!(f, "symbol"),
        }
    }
}
