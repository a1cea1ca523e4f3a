use crate::object::{Obj, OptionNA, Scalar};

/// Syntactic subscript operator of a call site
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum Operator {
    #[strum(serialize = "[")]
    Subset,
    #[strum(serialize = "[[")]
    Subset2,
    #[strum(serialize = "[<-")]
    SubsetAssign,
    #[strum(serialize = "[[<-")]
    Subset2Assign,
}

impl Operator {
    pub fn access(self) -> Access {
        match self {
            Operator::Subset | Operator::SubsetAssign => Access::Subset,
            Operator::Subset2 | Operator::Subset2Assign => Access::Exact,
        }
    }

    pub fn is_assignment(self) -> bool {
        matches!(self, Operator::SubsetAssign | Operator::Subset2Assign)
    }
}

/// Element access semantics
///
/// `Subset` is the permissive `[`, tolerating out-of-range and empty
/// selections. `Exact` is `[[`, which must resolve to exactly one element.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Access {
    Subset,
    Exact,
}

/// Fixed mode of one specialization
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Mode {
    pub access: Access,
    pub assignment: bool,
    /// Character subscripts must match names exactly
    pub exact: bool,
    /// Drop axes with a single selected position
    pub drop: bool,
}

impl Mode {
    pub fn new(operator: Operator, exact: bool, drop: bool) -> Self {
        Mode {
            access: operator.access(),
            assignment: operator.is_assignment(),
            exact,
            drop,
        }
    }

    pub fn is_subset(&self) -> bool {
        self.access == Access::Subset
    }

    pub fn is_exact(&self) -> bool {
        self.access == Access::Exact
    }

    pub fn is_assignment(&self) -> bool {
        self.assignment
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::new(Operator::Subset, true, true)
    }
}

/// Coerce an `exact =` or `drop =` argument to a flag
///
/// Absent, `NULL`, empty and `NA` values fall back to `default`. Otherwise
/// the first element is read as a logical.
///
pub fn flag(value: Option<&Obj>, default: bool) -> bool {
    let first = match value {
        None | Some(Obj::Null) => return default,
        Some(Obj::Scalar(s)) => s.clone(),
        Some(Obj::Vector(v)) => match v.get(0) {
            Some(Obj::Scalar(s)) => s,
            _ => return default,
        },
        Some(_) => return default,
    };

    let parsed = match first {
        Scalar::Logical(x) => x.as_option(),
        Scalar::Integer(x) => x.as_option().map(|i| i != 0),
        Scalar::Double(x) => x.as_option().filter(|f| !f.is_nan()).map(|f| f != 0.0),
        Scalar::Character(OptionNA::Some(s)) => match s.as_str() {
            "TRUE" | "true" | "True" | "T" => Some(true),
            "FALSE" | "false" | "False" | "F" => Some(false),
            _ => None,
        },
        Scalar::Character(OptionNA::NA) => None,
    };

    parsed.unwrap_or(default)
}
