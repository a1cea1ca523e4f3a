use core::fmt;

use crate::error::Error;
use crate::object::Obj;

/// Unwinding value
///
/// Every failure raised while resolving or applying a subscript travels as
/// a `Signal` to the nearest handler of the host evaluator. Nothing in this
/// crate recovers from one locally.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Error(Error),
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Error(e) => write!(f, "{e}"),
        }
    }
}

pub type EvalResult = Result<Obj, Signal>;
