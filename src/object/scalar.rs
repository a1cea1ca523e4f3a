use super::vector::types::*;
use super::vector::{Vector, VectorKind};

/// A bare vector element
///
/// Produced by `[[` on atomic vectors and by the single-element fast path
/// of `[`. Equal to a one-element vector without attributes.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Logical(Logical),
    Integer(Integer),
    Double(Double),
    Character(Character),
}

impl Scalar {
    pub fn kind(&self) -> VectorKind {
        match self {
            Scalar::Logical(_) => VectorKind::Logical,
            Scalar::Integer(_) => VectorKind::Integer,
            Scalar::Double(_) => VectorKind::Double,
            Scalar::Character(_) => VectorKind::Character,
        }
    }

    pub fn into_vector(self) -> Vector {
        match self {
            Scalar::Logical(x) => Vector::from(vec![x]),
            Scalar::Integer(x) => Vector::from(vec![x]),
            Scalar::Double(x) => Vector::from(vec![x]),
            Scalar::Character(x) => Vector::from(vec![x]),
        }
    }
}
