use hashbrown::HashMap;

use crate::error::Error;
use crate::lang::Signal;
use crate::object::types::*;
use crate::object::{Container, OptionNA};

use super::check::axis_extent;
use super::mode::Mode;
use super::operand::IndexOperand;
use super::position::Position;

type Resolved = Result<Position, Signal>;

/// Operand normalizer for one axis
///
/// Turns a raw subscript into a canonical [`Position`] against the shape of
/// a container. Whether an out-of-range, zero or missing subscript is an
/// error, an `NA` or a request to grow depends on the mode:
///
/// * `[` tolerates out-of-range positions, producing `NA`s.
/// * `[[` needs exactly one position and reports everything else.
/// * assignments pass far positions through so the vector can grow.
///
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Normalizer {
    pub axis: usize,
    pub rank: usize,
    pub mode: Mode,
}

impl Normalizer {
    pub fn new(axis: usize, rank: usize, mode: Mode) -> Self {
        Normalizer { axis, rank, mode }
    }

    pub fn normalize<C>(&self, x: &C, operand: &IndexOperand) -> Resolved
    where
        C: Container + ?Sized,
    {
        use IndexOperand as I;
        match operand {
            I::Missing => self.missing(x),
            I::Symbol(s) if s.is_empty() => self.missing(x),
            I::Symbol(_) => Error::InvalidSubscriptType("symbol").into(),
            I::Function(_) => Error::InvalidSubscriptType("closure").into(),
            I::List(_) => Error::InvalidSubscriptType("list").into(),
            I::Null => self.null(x),
            I::Int(i) => self.int(x, i.clone()),
            I::IntVec(v) => self.int_vec(x, v),
            I::Double(d) => self.double(x, d),
            I::DoubleVec(v) => self.int_vec(x, &v.iter().map(truncate).collect::<Vec<_>>()),
            I::Logical(b) => self.logical(x, b),
            I::LogicalVec(v) => self.logical_vec(x, v),
            I::Str(s) => self.string(x, s),
            I::StrVec(v) => self.string_vec(x, v),
            I::Factor { codes, .. } => self.int_vec(x, codes),
        }
    }

    fn extent<C: Container + ?Sized>(&self, x: &C) -> Result<usize, Signal> {
        axis_extent(x, self.axis, self.rank, &self.mode)
    }

    fn single_axis(&self) -> bool {
        self.rank == 1
    }

    fn missing<C: Container + ?Sized>(&self, x: &C) -> Resolved {
        if self.mode.is_exact() {
            return if self.mode.is_assignment() {
                Error::MissingSubscript.into()
            } else {
                Error::InvalidSubscriptType("symbol").into()
            };
        }

        // `x[]` hands back the object itself, attributes and all
        if !self.mode.is_assignment() && self.single_axis() {
            return Ok(Position::Missing);
        }

        match self.extent(x)? {
            1 => Ok(Position::Scalar(1)),
            n => Ok(Position::from_positions((1..=n).collect())),
        }
    }

    fn null<C: Container + ?Sized>(&self, x: &C) -> Resolved {
        if self.mode.is_subset() {
            Ok(Position::Scalar(0))
        } else if x.is_list() && !self.mode.is_assignment() {
            Ok(Position::Null)
        } else {
            Error::SelectLessThanOne.into()
        }
    }

    fn int_na<C: Container + ?Sized>(&self, x: &C) -> Resolved {
        let exact_read = self.mode.is_exact() && !self.mode.is_assignment();
        if x.is_list() && self.single_axis() && self.mode.is_exact() {
            Ok(Position::Null)
        } else if exact_read {
            Error::SubscriptOutOfBounds.into()
        } else {
            Ok(Position::NA)
        }
    }

    fn int<C: Container + ?Sized>(&self, x: &C, i: Integer) -> Resolved {
        let OptionNA::Some(i) = i else {
            return self.int_na(x);
        };

        let extent = self.extent(x)?;
        let magnitude = i.unsigned_abs() as usize;

        if i > 0 && magnitude > extent {
            let exact_read = self.mode.is_exact() && !self.mode.is_assignment();
            if !self.single_axis() || exact_read {
                Error::SubscriptOutOfBounds.into()
            } else if self.mode.is_assignment() {
                Ok(Position::Scalar(magnitude))
            } else {
                Ok(Position::NA)
            }
        } else if i > 0 {
            Ok(Position::Scalar(magnitude))
        } else if i == 0 {
            if self.mode.is_subset() {
                Ok(Position::Scalar(0))
            } else {
                Error::SelectLessThanOne.into()
            }
        } else if self.mode.is_exact() {
            exact_complement(extent, magnitude)
        } else if magnitude > extent {
            // e.g. c(7)[-2] keeps the only element, c(7, 42)[-7] keeps both
            if extent == 1 {
                Ok(Position::Scalar(1))
            } else {
                Ok(Position::from_positions((1..=extent).collect()))
            }
        } else if extent == 1 {
            Ok(Position::Scalar(0))
        } else {
            let kept = (1..=extent).filter(|&p| p != magnitude).collect();
            Ok(Position::from_positions(kept))
        }
    }

    fn double<C: Container + ?Sized>(&self, x: &C, d: &Double) -> Resolved {
        // A negative subscript reaching past the end is shifted down before
        // truncation, so that c(1, 2, 3)[-3.1] drops nothing.
        let i = match d {
            OptionNA::Some(f) if *f < 0.0 && f.abs() > x.len() as f64 => {
                truncate(&OptionNA::Some(f - 1.0))
            }
            _ => truncate(d),
        };
        self.int(x, i)
    }

    fn int_vec<C: Container + ?Sized>(&self, x: &C, v: &[Integer]) -> Resolved {
        match v {
            [one] => self.int(x, one.clone()),
            [] if self.mode.is_subset() => Ok(Position::Scalar(0)),
            [] => Error::SelectLessThanOne.into(),
            _ if self.mode.is_subset() => self.transform_into_positive(x, v),
            _ => Error::SelectMoreThanOne.into(),
        }
    }

    /// Resolve a multi-element integer subscript into positive positions
    fn transform_into_positive<C>(&self, x: &C, v: &[Integer]) -> Resolved
    where
        C: Container + ?Sized,
    {
        let extent = self.extent(x)?;

        let (mut positive, mut negative, mut zero, mut na, mut out_of_bounds) =
            (false, false, false, false, false);

        for i in v {
            match i {
                OptionNA::NA => na = true,
                OptionNA::Some(0) => zero = true,
                OptionNA::Some(i) if *i < 0 => negative = true,
                OptionNA::Some(i) => {
                    if *i as usize > extent {
                        if !self.single_axis() {
                            return Error::SubscriptOutOfBounds.into();
                        }
                        out_of_bounds = true;
                    }
                    positive = true;
                }
            }
        }

        if positive || na {
            if negative {
                return Error::OnlyZeroMixedWithNegative.into();
            }

            if !zero && !out_of_bounds {
                return Ok(Position::Vector(v.to_vec()));
            }

            let grow = self.mode.is_assignment();
            let positions = v
                .iter()
                .filter(|i| **i != OptionNA::Some(0))
                .map(|i| match i {
                    OptionNA::Some(i) if *i as usize > extent && !grow => OptionNA::NA,
                    i => i.clone(),
                })
                .collect();

            Ok(Position::Vector(positions))
        } else if negative {
            let mut excluded = vec![false; extent];
            for i in v {
                if let OptionNA::Some(i) = i {
                    let i = i.unsigned_abs() as usize;
                    if (1..=extent).contains(&i) {
                        excluded[i - 1] = true;
                    }
                }
            }

            let kept = (1..=extent).filter(|i| !excluded[i - 1]).collect();
            Ok(Position::from_positions(kept))
        } else {
            // all zeros
            Ok(Position::Scalar(0))
        }
    }

    fn logical<C: Container + ?Sized>(&self, x: &C, b: &Logical) -> Resolved {
        match b {
            OptionNA::NA if self.single_axis() && self.mode.is_exact() => {
                if x.is_list() && !self.mode.is_assignment() {
                    Ok(Position::Null)
                } else {
                    Ok(Position::NA)
                }
            }
            OptionNA::NA if self.mode.is_subset() && !self.mode.is_assignment() => {
                let n = if self.single_axis() {
                    x.len().max(1)
                } else {
                    self.extent(x)?
                };
                Ok(Position::Vector(vec![OptionNA::NA; n]))
            }
            OptionNA::NA => Ok(Position::NA),
            OptionNA::Some(true) if self.mode.is_subset() => {
                let extent = self.extent(x)?;
                Ok(Position::from_positions((1..=extent).collect()))
            }
            OptionNA::Some(false) if self.mode.is_subset() => Ok(Position::Scalar(0)),
            OptionNA::Some(b) => self.int(x, OptionNA::Some(*b as i32)),
        }
    }

    fn logical_vec<C: Container + ?Sized>(&self, x: &C, v: &[Logical]) -> Resolved {
        match v {
            [] if self.mode.is_subset() => Ok(Position::Scalar(0)),
            [] => Error::SelectLessThanOne.into(),
            [one] => self.logical(x, one),
            _ if self.mode.is_subset() => {
                let extent = self.extent(x)?;
                if v.len() > extent && !self.single_axis() {
                    return Error::LogicalSubscriptTooLong.into();
                }

                // recycled over the longer of the mask and the axis
                let n = v.len().max(extent);
                let grow = self.mode.is_assignment();
                let positions = (0..n)
                    .filter_map(|i| match &v[i % v.len()] {
                        // still grows the vector, leaving the new element NA
                        OptionNA::NA if i >= extent && grow => Some(OptionNA::Some(-(i as i32 + 1))),
                        OptionNA::NA => Some(OptionNA::NA),
                        OptionNA::Some(true) if i >= extent && !grow => Some(OptionNA::NA),
                        OptionNA::Some(true) => Some(OptionNA::Some(i as i32 + 1)),
                        OptionNA::Some(false) => None,
                    })
                    .collect();

                Ok(Position::Vector(positions))
            }
            _ => {
                let ints: Vec<Integer> = v.iter().map(|b| b.clone().map(|b| b as i32)).collect();
                self.int_vec(x, &ints)
            }
        }
    }

    fn string<C: Container + ?Sized>(&self, x: &C, s: &Character) -> Resolved {
        match s {
            OptionNA::Some(name) if self.single_axis() => self.string_one_dim(x, name),
            OptionNA::Some(name) => self.string_multi_dim(x, name),
            OptionNA::NA if !self.single_axis() => Error::SubscriptOutOfBounds.into(),
            OptionNA::NA if self.mode.is_assignment() => Ok(Position::Named(
                vec![OptionNA::Some(x.len() as i32 + 1)],
                vec![OptionNA::NA],
            )),
            OptionNA::NA => self.int_na(x),
        }
    }

    fn string_one_dim<C: Container + ?Sized>(&self, x: &C, name: &str) -> Resolved {
        if self.mode.is_assignment() {
            let position = x
                .names()
                .and_then(|names| find_exact(names, name))
                .unwrap_or(x.len() + 1);

            return Ok(Position::Named(
                vec![OptionNA::Some(position as i32)],
                vec![OptionNA::Some(name.to_string())],
            ));
        }

        let found = x
            .names()
            .and_then(|names| find_position(names, name, self.mode.exact));

        match found {
            Some(position) => Ok(Position::Scalar(position)),
            None if self.mode.is_subset() => Ok(Position::NA),
            None if x.is_list() => Ok(Position::Null),
            None => Error::SubscriptOutOfBounds.into(),
        }
    }

    fn string_multi_dim<C: Container + ?Sized>(&self, x: &C, name: &str) -> Resolved {
        if !x.has_dimnames() {
            return if self.mode.is_subset() || x.is_list() {
                Error::NoArrayDimnames.into()
            } else {
                Error::SubscriptOutOfBounds.into()
            };
        }

        let names = x.dimnames(self.axis);
        if self.mode.is_assignment() {
            let position = names
                .and_then(|names| find_exact(names, name))
                .unwrap_or(x.len() + 1);

            return Ok(Position::Named(
                vec![OptionNA::Some(position as i32)],
                vec![OptionNA::Some(name.to_string())],
            ));
        }

        match names.and_then(|names| find_position(names, name, self.mode.exact)) {
            Some(position) => Ok(Position::Scalar(position)),
            None => Error::SubscriptOutOfBounds.into(),
        }
    }

    fn string_vec<C: Container + ?Sized>(&self, x: &C, v: &[Character]) -> Resolved {
        match v {
            [] if self.mode.is_subset() => Ok(Position::Scalar(0)),
            [] => Error::SelectLessThanOne.into(),
            [one] => self.string(x, one),
            _ if !self.mode.is_subset() => Error::SelectMoreThanOne.into(),
            _ if self.single_axis() => {
                if self.mode.is_assignment() {
                    Ok(named_positions(x.len(), x.names(), v))
                } else if let Some(names) = x.names() {
                    let index = name_index(names);
                    let positions = v
                        .iter()
                        .map(|name| match name {
                            OptionNA::Some(name) => index.get(name.as_str()).map(|i| *i as i32 + 1).into(),
                            OptionNA::NA => OptionNA::NA,
                        })
                        .collect();
                    Ok(Position::Vector(positions))
                } else {
                    Ok(Position::Vector(vec![OptionNA::NA; v.len()]))
                }
            }
            _ => {
                if !x.has_dimnames() {
                    return Error::SubscriptOutOfBounds.into();
                }

                let names = x.dimnames(self.axis);
                if self.mode.is_assignment() {
                    return Ok(named_positions(x.len(), names, v));
                }

                let index = names.map(name_index).unwrap_or_default();
                let mut positions = Vec::with_capacity(v.len());
                for name in v {
                    let found = match name {
                        OptionNA::Some(name) => index.get(name.as_str()),
                        OptionNA::NA => None,
                    };
                    match found {
                        Some(i) => positions.push(OptionNA::Some(*i as i32 + 1)),
                        None => return Error::SubscriptOutOfBounds.into(),
                    }
                }
                Ok(Position::Vector(positions))
            }
        }
    }
}

/// Normalize the subscripts of every axis.
pub fn normalize_all<C>(x: &C, operands: &[IndexOperand], mode: Mode) -> Result<Vec<Position>, Signal>
where
    C: Container + ?Sized,
{
    let rank = operands.len();
    operands
        .iter()
        .enumerate()
        .map(|(axis, operand)| Normalizer::new(axis, rank, mode).normalize(x, operand))
        .collect()
}

/// Truncate a double subscript toward zero, `NA` when it has no integer
/// value.
fn truncate(d: &Double) -> Integer {
    match d {
        OptionNA::Some(f) if f.is_finite() && f.trunc().abs() <= i32::MAX as f64 => {
            OptionNA::Some(f.trunc() as i32)
        }
        _ => OptionNA::NA,
    }
}

/// `[[` with a negative subscript keeps the complement only when exactly
/// one element remains.
fn exact_complement(extent: usize, excluded: usize) -> Resolved {
    let mut kept = (1..=extent).filter(|&p| p != excluded);
    match (kept.next(), kept.next()) {
        (None, _) => Error::SelectLessThanOne.into(),
        (Some(p), None) => Ok(Position::Scalar(p)),
        (Some(_), Some(_)) => Error::SelectMoreThanOne.into(),
    }
}

/// First position of each distinct name
fn name_index(names: &[Character]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if let OptionNA::Some(name) = name {
            index.entry(name.as_str()).or_insert(i);
        }
    }
    index
}

fn find_exact(names: &[Character], name: &str) -> Option<usize> {
    names
        .iter()
        .position(|n| matches!(n, OptionNA::Some(n) if n == name))
        .map(|i| i + 1)
}

/// Look up a name, allowing a unique partial match when not `exact`
fn find_position(names: &[Character], name: &str, exact: bool) -> Option<usize> {
    if !exact {
        let mut prefixed = names
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n, OptionNA::Some(n) if n.starts_with(name)));

        if let (Some((i, _)), None) = (prefixed.next(), prefixed.next()) {
            return Some(i + 1);
        }
    }

    find_exact(names, name)
}

/// Positions for an assignment by names
///
/// Known names resolve to their first position. Unknown names are appended
/// after the end of the vector, a repeated unknown name reusing the
/// position given to its first occurrence. `NA` and empty names are always
/// appended anew.
///
fn named_positions(len: usize, names: Option<&[Character]>, operand: &[Character]) -> Position {
    let index = names.map(name_index).unwrap_or_default();
    let mut appended: HashMap<&str, usize> = HashMap::new();
    let mut next = len;

    let positions = operand
        .iter()
        .map(|name| {
            let position = match name {
                OptionNA::Some(name) if name.is_empty() => None,
                OptionNA::Some(name) => index
                    .get(name.as_str())
                    .map(|i| i + 1)
                    .or_else(|| appended.get(name.as_str()).copied()),
                OptionNA::NA => None,
            };

            let position = position.unwrap_or_else(|| {
                next += 1;
                if let OptionNA::Some(name) = name {
                    if !name.is_empty() {
                        appended.insert(name.as_str(), next);
                    }
                }
                next
            });

            OptionNA::Some(position as i32)
        })
        .collect();

    Position::Named(positions, operand.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Vector;
    use crate::subscript::mode::Operator;

    fn ints(v: &[i32]) -> Position {
        Position::Vector(v.iter().map(|i| OptionNA::Some(*i)).collect())
    }

    fn named() -> Vector {
        Vector::from(vec![1, 2, 3]).set_names(vec![
            OptionNA::Some("alpha".to_string()),
            OptionNA::Some("beta".to_string()),
            OptionNA::Some("bet".to_string()),
        ])
    }

    fn normalize(x: &Vector, operator: Operator, operand: IndexOperand) -> Resolved {
        let mode = Mode::new(operator, true, true);
        Normalizer::new(0, 1, mode).normalize(x, &operand)
    }

    fn err(e: Error) -> Resolved {
        Err(Signal::Error(e))
    }

    #[test]
    fn positive_integers_pass_through() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(normalize(&x, Operator::Subset, 2.into()), Ok(Position::Scalar(2)));
        assert_eq!(normalize(&x, Operator::Subset, vec![3, 1].into()), Ok(ints(&[3, 1])));
    }

    #[test]
    fn out_of_range_integers_by_mode() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(normalize(&x, Operator::Subset, 5.into()), Ok(Position::NA));
        assert_eq!(normalize(&x, Operator::SubsetAssign, 5.into()), Ok(Position::Scalar(5)));
        assert_eq!(normalize(&x, Operator::Subset2Assign, 5.into()), Ok(Position::Scalar(5)));
        assert_eq!(
            normalize(&x, Operator::Subset2, 5.into()),
            err(Error::SubscriptOutOfBounds)
        );
    }

    #[test]
    fn negative_integers_expand_to_complement() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(normalize(&x, Operator::Subset, (-2).into()), Ok(ints(&[1, 3])));
        assert_eq!(normalize(&x, Operator::Subset, (-7).into()), Ok(ints(&[1, 2, 3])));
        assert_eq!(normalize(&x, Operator::Subset, vec![-1, -3, -1].into()), Ok(ints(&[2])));
        assert_eq!(
            normalize(&x, Operator::Subset, vec![-1, -2, -3].into()),
            Ok(Position::Scalar(0))
        );
    }

    #[test]
    fn negative_integers_on_length_one_axis() {
        let x = Vector::from(vec![7]);
        assert_eq!(normalize(&x, Operator::Subset, (-1).into()), Ok(Position::Scalar(0)));
        assert_eq!(normalize(&x, Operator::Subset, (-2).into()), Ok(Position::Scalar(1)));
    }

    #[test]
    fn negative_integers_in_exact_mode() {
        let x = Vector::from(vec![1, 2]);
        assert_eq!(normalize(&x, Operator::Subset2, (-1).into()), Ok(Position::Scalar(2)));

        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(
            normalize(&x, Operator::Subset2, (-1).into()),
            err(Error::SelectMoreThanOne)
        );

        let x = Vector::from(vec![1]);
        assert_eq!(
            normalize(&x, Operator::Subset2, (-1).into()),
            err(Error::SelectLessThanOne)
        );
    }

    #[test]
    fn zero_subscripts() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(normalize(&x, Operator::Subset, 0.into()), Ok(Position::Scalar(0)));
        assert_eq!(
            normalize(&x, Operator::Subset2, 0.into()),
            err(Error::SelectLessThanOne)
        );
        assert_eq!(
            normalize(&x, Operator::Subset, vec![0, 2, 0, 3].into()),
            Ok(ints(&[2, 3]))
        );
        assert_eq!(
            normalize(&x, Operator::Subset, vec![0, 0].into()),
            Ok(Position::Scalar(0))
        );
    }

    #[test]
    fn mixed_signs_are_rejected() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(
            normalize(&x, Operator::Subset, vec![1, -1].into()),
            err(Error::OnlyZeroMixedWithNegative)
        );
        let op = IndexOperand::IntVec(vec![OptionNA::NA, OptionNA::Some(-1)]);
        assert_eq!(
            normalize(&x, Operator::Subset, op),
            err(Error::OnlyZeroMixedWithNegative)
        );
    }

    #[test]
    fn out_of_range_entries_of_vectors() {
        let x = Vector::from(vec![1, 2, 3]);
        let read = normalize(&x, Operator::Subset, vec![1, 5].into());
        assert_eq!(read, Ok(Position::Vector(vec![OptionNA::Some(1), OptionNA::NA])));

        let write = normalize(&x, Operator::SubsetAssign, vec![1, 5].into());
        assert_eq!(write, Ok(ints(&[1, 5])));
    }

    #[test]
    fn integer_na_by_mode() {
        let x = Vector::from(vec![1, 2, 3]);
        let na = IndexOperand::Int(OptionNA::NA);
        assert_eq!(normalize(&x, Operator::Subset, na.clone()), Ok(Position::NA));
        assert_eq!(normalize(&x, Operator::SubsetAssign, na.clone()), Ok(Position::NA));
        assert_eq!(
            normalize(&x, Operator::Subset2, na.clone()),
            err(Error::SubscriptOutOfBounds)
        );

        let l = Vector::from(vec![crate::object::Obj::Null]);
        assert_eq!(normalize(&l, Operator::Subset2, na.clone()), Ok(Position::Null));
        assert_eq!(normalize(&l, Operator::Subset2Assign, na), Ok(Position::Null));
    }

    #[test]
    fn doubles_truncate_toward_zero() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(normalize(&x, Operator::Subset, 2.9.into()), Ok(Position::Scalar(2)));
        assert_eq!(normalize(&x, Operator::Subset, (-1.5).into()), Ok(ints(&[2, 3])));
        assert_eq!(normalize(&x, Operator::Subset, f64::NAN.into()), Ok(Position::NA));
    }

    #[test]
    fn far_negative_doubles_shift_before_truncation() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(normalize(&x, Operator::Subset, (-3.1).into()), Ok(ints(&[1, 2, 3])));
        assert_eq!(normalize(&x, Operator::Subset, (-3.0).into()), Ok(ints(&[1, 2])));
    }

    #[test]
    fn logical_masks_recycle() {
        let x = Vector::from(vec![1, 2, 3, 4, 5, 6]);
        let p = normalize(&x, Operator::Subset, vec![true, false].into());
        assert_eq!(p, Ok(ints(&[1, 3, 5])));
    }

    #[test]
    fn long_logical_masks() {
        let x = Vector::from(vec![1, 2]);
        let mask = IndexOperand::from(vec![true, false, true]);
        let read = normalize(&x, Operator::Subset, mask.clone());
        assert_eq!(read, Ok(Position::Vector(vec![OptionNA::Some(1), OptionNA::NA])));

        let write = normalize(&x, Operator::SubsetAssign, mask);
        assert_eq!(write, Ok(ints(&[1, 3])));

        // an NA past the end still asks for growth
        let mask = IndexOperand::LogicalVec(vec![OptionNA::Some(true), OptionNA::NA, OptionNA::NA]);
        let write = normalize(&x, Operator::SubsetAssign, mask.clone());
        assert_eq!(
            write,
            Ok(Position::Vector(vec![OptionNA::Some(1), OptionNA::NA, OptionNA::Some(-3)]))
        );
        let read = normalize(&x, Operator::Subset, mask);
        assert_eq!(
            read,
            Ok(Position::Vector(vec![OptionNA::Some(1), OptionNA::NA, OptionNA::NA]))
        );
    }

    #[test]
    fn logical_scalars() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(normalize(&x, Operator::Subset, true.into()), Ok(ints(&[1, 2, 3])));
        assert_eq!(normalize(&x, Operator::Subset, false.into()), Ok(Position::Scalar(0)));
        assert_eq!(normalize(&x, Operator::Subset2, true.into()), Ok(Position::Scalar(1)));

        let na = IndexOperand::Logical(OptionNA::NA);
        assert_eq!(
            normalize(&x, Operator::Subset, na),
            Ok(Position::Vector(vec![OptionNA::NA; 3]))
        );
    }

    #[test]
    fn names_resolve_by_lookup() {
        let x = named();
        assert_eq!(normalize(&x, Operator::Subset, "beta".into()), Ok(Position::Scalar(2)));
        assert_eq!(normalize(&x, Operator::Subset, "zeta".into()), Ok(Position::NA));
        assert_eq!(
            normalize(&x, Operator::Subset2, "zeta".into()),
            err(Error::SubscriptOutOfBounds)
        );
        let p = normalize(&x, Operator::Subset, vec!["bet", "nope", "alpha"].into());
        assert_eq!(
            p,
            Ok(Position::Vector(vec![OptionNA::Some(3), OptionNA::NA, OptionNA::Some(1)]))
        );
    }

    #[test]
    fn partial_matching_needs_a_unique_prefix() {
        let x = named();
        let inexact = Mode::new(Operator::Subset2, false, true);
        let n = Normalizer::new(0, 1, inexact);
        assert_eq!(n.normalize(&x, &"al".into()), Ok(Position::Scalar(1)));
        // "be" prefixes both "beta" and "bet"
        assert_eq!(
            n.normalize(&x, &"be".into()),
            err(Error::SubscriptOutOfBounds)
        );
        // ambiguous prefix falls back to the exact name
        assert_eq!(n.normalize(&x, &"bet".into()), Ok(Position::Scalar(3)));
    }

    #[test]
    fn assignment_by_name_appends() {
        let x = named();
        let p = normalize(&x, Operator::SubsetAssign, "gamma".into());
        assert_eq!(
            p,
            Ok(Position::Named(
                vec![OptionNA::Some(4)],
                vec![OptionNA::Some("gamma".to_string())]
            ))
        );
    }

    #[test]
    fn assignment_names_deduplicate_except_na_and_empty() {
        let x = named();
        let operand = IndexOperand::StrVec(vec![
            OptionNA::Some("new".to_string()),
            OptionNA::Some("beta".to_string()),
            OptionNA::Some("new".to_string()),
            OptionNA::Some(String::new()),
            OptionNA::Some(String::new()),
            OptionNA::NA,
            OptionNA::NA,
        ]);
        let Ok(Position::Named(positions, _)) = normalize(&x, Operator::SubsetAssign, operand)
        else {
            panic!("expected named positions")
        };
        let positions: Vec<_> = positions.into_iter().map(|p| p.as_option().unwrap()).collect();
        assert_eq!(positions, vec![4, 2, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn missing_subscripts() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(normalize(&x, Operator::Subset, IndexOperand::Missing), Ok(Position::Missing));
        assert_eq!(
            normalize(&x, Operator::SubsetAssign, IndexOperand::Missing),
            Ok(ints(&[1, 2, 3]))
        );
        assert_eq!(
            normalize(&x, Operator::Subset2, IndexOperand::Missing),
            err(Error::InvalidSubscriptType("symbol"))
        );
        assert_eq!(
            normalize(&x, Operator::Subset2Assign, IndexOperand::Missing),
            err(Error::MissingSubscript)
        );
    }

    #[test]
    fn matrix_axes() {
        let m = Vector::from(vec![1, 2, 3, 4, 5, 6])
            .set_dim(vec![2, 3])
            .set_dimnames(vec![
                Some(vec![OptionNA::Some("r1".to_string()), OptionNA::Some("r2".to_string())]),
                None,
            ]);
        let mode = Mode::default();

        let rows = Normalizer::new(0, 2, mode);
        let cols = Normalizer::new(1, 2, mode);
        assert_eq!(cols.normalize(&m, &IndexOperand::Missing), Ok(ints(&[1, 2, 3])));
        assert_eq!(rows.normalize(&m, &"r2".into()), Ok(Position::Scalar(2)));
        assert_eq!(
            cols.normalize(&m, &"c1".into()),
            err(Error::SubscriptOutOfBounds)
        );
        assert_eq!(rows.normalize(&m, &3.into()), err(Error::SubscriptOutOfBounds));

        let plain = Vector::from(vec![1, 2, 3, 4]).set_dim(vec![2, 2]);
        assert_eq!(rows.normalize(&plain, &"a".into()), err(Error::NoArrayDimnames));

        let mask = IndexOperand::from(vec![true, false, true]);
        assert_eq!(rows.normalize(&m, &mask), err(Error::LogicalSubscriptTooLong));
    }

    #[test]
    fn invalid_operand_types() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(
            normalize(&x, Operator::Subset, IndexOperand::Function("f".into())),
            err(Error::InvalidSubscriptType("closure"))
        );
        assert_eq!(
            normalize(&x, Operator::Subset, IndexOperand::Symbol("s".into())),
            err(Error::InvalidSubscriptType("symbol"))
        );
    }

    #[test]
    fn null_subscripts() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(normalize(&x, Operator::Subset, IndexOperand::Null), Ok(Position::Scalar(0)));
        assert_eq!(
            normalize(&x, Operator::Subset2, IndexOperand::Null),
            err(Error::SelectLessThanOne)
        );
    }

    #[test]
    fn factors_resolve_through_codes() {
        let x = Vector::from(vec![10, 20, 30]);
        let f = IndexOperand::Factor {
            codes: vec![OptionNA::Some(3), OptionNA::Some(1)],
            levels: vec![OptionNA::Some("a".to_string()), OptionNA::Some("b".to_string())],
        };
        assert_eq!(normalize(&x, Operator::Subset, f), Ok(ints(&[3, 1])));
    }
}
