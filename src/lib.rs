pub mod error;
pub mod lang;
pub mod object;
pub mod subscript;

mod trace;

use lang::EvalResult;
use object::Obj;
use subscript::{CallSite, IndexOperand, Operator};

/// `x[...]`, through a call site of its own.
pub fn subset(x: &Obj, indices: &[IndexOperand], drop: bool) -> EvalResult {
    CallSite::new(Operator::Subset).extract(x, indices, true, drop)
}

/// `x[[...]]`, through a call site of its own.
pub fn subset2(x: &Obj, indices: &[IndexOperand], exact: bool) -> EvalResult {
    CallSite::new(Operator::Subset2).extract(x, indices, exact, true)
}

/// `x[...] <- value`, returning the updated `x`.
pub fn subset_assign(x: Obj, indices: &[IndexOperand], value: Obj) -> EvalResult {
    CallSite::new(Operator::SubsetAssign).assign(x, indices, value, true)
}

/// `x[[...]] <- value`, returning the updated `x`.
pub fn subset2_assign(x: Obj, indices: &[IndexOperand], value: Obj) -> EvalResult {
    CallSite::new(Operator::Subset2Assign).assign(x, indices, value, true)
}

/// Build an integer vector, e.g. `int![1, NA, 3]`
#[macro_export]
macro_rules! int {
    ($($t:tt)*) => {
        $crate::object::Vector::from(
            $crate::__elements!(int [] $($t)*) as Vec<$crate::object::types::Integer>
        )
    };
}

/// Build a double vector, e.g. `dbl![1.5, NA]`
#[macro_export]
macro_rules! dbl {
    ($($t:tt)*) => {
        $crate::object::Vector::from(
            $crate::__elements!(dbl [] $($t)*) as Vec<$crate::object::types::Double>
        )
    };
}

/// Build a logical vector, e.g. `lgl![true, NA]`
#[macro_export]
macro_rules! lgl {
    ($($t:tt)*) => {
        $crate::object::Vector::from(
            $crate::__elements!(lgl [] $($t)*) as Vec<$crate::object::types::Logical>
        )
    };
}

/// Build a character vector, e.g. `chr!["a", NA]`
#[macro_export]
macro_rules! chr {
    ($($t:tt)*) => {
        $crate::object::Vector::from(
            $crate::__elements!(chr [] $($t)*) as Vec<$crate::object::types::Character>
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __elements {
    ($kind:ident [$($acc:expr),*]) => {
        vec![$($acc),*]
    };
    ($kind:ident [$($acc:expr),*] NA $(, $($rest:tt)*)?) => {
        $crate::__elements!($kind [$($acc,)* $crate::object::OptionNA::NA] $($($rest)*)?)
    };
    ($kind:ident [$($acc:expr),*] $x:expr $(, $($rest:tt)*)?) => {
        $crate::__elements!($kind [$($acc,)* $crate::__element!($kind $x)] $($($rest)*)?)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __element {
    (int $x:expr) => {
        $crate::object::OptionNA::Some($x as i32)
    };
    (dbl $x:expr) => {
        $crate::object::OptionNA::Some($x as f64)
    };
    (lgl $x:expr) => {
        $crate::object::OptionNA::Some($x)
    };
    (chr $x:expr) => {
        $crate::object::OptionNA::Some(::std::string::String::from($x))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{OptionNA, Vector};

    #[test]
    fn vector_macros() {
        assert_eq!(
            int![1, NA, -3],
            Vector::from(vec![OptionNA::Some(1), OptionNA::NA, OptionNA::Some(-3)])
        );
        assert_eq!(dbl![1, 2.5], Vector::from(vec![1.0, 2.5]));
        assert_eq!(lgl![true, NA].len(), 2);
        assert_eq!(chr!["a", "b",], Vector::from(vec!["a", "b"]));
        assert!(int![].is_empty());
    }

    #[test]
    fn free_functions_round_trip() {
        let x = Obj::from(int![1, 2, 3]);
        let x = subset_assign(x, &[2.into()], Obj::from(20)).unwrap();
        assert_eq!(subset2(&x, &[2.into()], true).unwrap(), Obj::from(20));
        assert_eq!(subset(&x, &[vec![1, 2].into()], true).unwrap(), Obj::from(int![1, 20]));

        let l = Obj::from(Vector::from(vec![Obj::from(1)]));
        let l = subset2_assign(l, &[1.into()], Obj::Null).unwrap();
        assert_eq!(l.len(), 0);
    }
}
