use super::rep::Rep;
use super::types::*;
use super::{ListKind, OptionNA, Vector, VectorKind};
use crate::internal_err;
use crate::lang::Signal;
use crate::object::{Obj, Scalar};

pub trait CoercibleInto<T>: Sized {
    fn coerce_into(self) -> T;
}

impl CoercibleInto<i32> for bool {
    #[inline]
    fn coerce_into(self) -> i32 {
        self as i32
    }
}

impl CoercibleInto<f64> for bool {
    #[inline]
    fn coerce_into(self) -> f64 {
        self as i32 as f64
    }
}

impl CoercibleInto<f64> for i32 {
    #[inline]
    fn coerce_into(self) -> f64 {
        self as f64
    }
}

impl CoercibleInto<String> for bool {
    #[inline]
    fn coerce_into(self) -> String {
        let s = if self { "TRUE" } else { "FALSE" };
        s.to_string()
    }
}

impl CoercibleInto<String> for i32 {
    #[inline]
    fn coerce_into(self) -> String {
        self.to_string()
    }
}

impl CoercibleInto<String> for f64 {
    fn coerce_into(self) -> String {
        format_double(self)
    }
}

/// Render a double the way `as.character` does
///
/// Up to 15 significant digits, in fixed notation unless scientific
/// notation is narrower.
///
fn format_double(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    } else if x.is_infinite() {
        let inf = if x > 0.0 { "Inf" } else { "-Inf" };
        return inf.to_string();
    } else if x == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:.14e}", x.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return x.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let digits = mantissa.replace('.', "");
    let digits = digits.trim_end_matches('0');
    let nsig = digits.len() as i32;

    let decimals = (nsig - 1 - exponent).max(0);
    let fixed_width = if exponent >= 0 {
        exponent + 1 + if decimals > 0 { decimals + 1 } else { 0 }
    } else {
        1 + decimals + 1
    };
    let exponent_digits = if exponent.abs() >= 100 { 3 } else { 2 };
    let sci_width = nsig + (nsig > 1) as i32 + 2 + exponent_digits;

    let sign = if x < 0.0 { "-" } else { "" };
    if fixed_width <= sci_width {
        format!("{sign}{:.*}", decimals as usize, x.abs())
    } else {
        let (first, rest) = digits.split_at(1);
        let point = if rest.is_empty() { "" } else { "." };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let width = exponent_digits as usize;
        format!("{sign}{first}{point}{rest}e{exp_sign}{:0width$}", exponent.abs())
    }
}

impl<T, U> CoercibleInto<OptionNA<U>> for OptionNA<T>
where
    T: CoercibleInto<U>,
{
    #[inline]
    fn coerce_into(self) -> OptionNA<U> {
        self.map(|x| x.coerce_into())
    }
}

impl CoercibleInto<Obj> for Logical {
    fn coerce_into(self) -> Obj {
        Obj::Scalar(Scalar::Logical(self))
    }
}

impl CoercibleInto<Obj> for Integer {
    fn coerce_into(self) -> Obj {
        Obj::Scalar(Scalar::Integer(self))
    }
}

impl CoercibleInto<Obj> for Double {
    fn coerce_into(self) -> Obj {
        Obj::Scalar(Scalar::Double(self))
    }
}

impl CoercibleInto<Obj> for Character {
    fn coerce_into(self) -> Obj {
        Obj::Scalar(Scalar::Character(self))
    }
}

fn convert<T, U>(rep: Rep<T>) -> Rep<U>
where
    T: Clone + CoercibleInto<U>,
    U: Clone,
{
    let attrs = rep.attrs.clone();
    let values: Vec<U> = rep
        .values
        .into_inner()
        .into_iter()
        .map(|x| x.coerce_into())
        .collect();
    Rep::new(values).with_attrs(attrs)
}

impl Vector {
    /// Upcast a vector to a storage type of equal or higher rank
    ///
    /// Attributes are preserved. Downcasts never happen during subscripting
    /// and are reported as internal errors.
    ///
    pub fn coerce_to(self, kind: VectorKind) -> Result<Vector, Signal> {
        use VectorKind as K;
        if self.kind() == kind {
            return Ok(self);
        }

        let v = match (self, kind) {
            (Vector::Logical(x), K::Integer) => Vector::Integer(convert(x)),
            (Vector::Logical(x), K::Double) => Vector::Double(convert(x)),
            (Vector::Logical(x), K::Character) => Vector::Character(convert(x)),
            (Vector::Logical(x), K::List) => Vector::List(convert(x), ListKind::Generic),
            (Vector::Integer(x), K::Double) => Vector::Double(convert(x)),
            (Vector::Integer(x), K::Character) => Vector::Character(convert(x)),
            (Vector::Integer(x), K::List) => Vector::List(convert(x), ListKind::Generic),
            (Vector::Double(x), K::Character) => Vector::Character(convert(x)),
            (Vector::Double(x), K::List) => Vector::List(convert(x), ListKind::Generic),
            (Vector::Character(x), K::List) => Vector::List(convert(x), ListKind::Generic),
            (from, to) => {
                return internal_err!(format!("cannot downcast {} to {}", from.kind(), to));
            }
        };

        Ok(v)
    }
}
