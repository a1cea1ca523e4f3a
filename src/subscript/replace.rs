use std::rc::Rc;

use hashbrown::HashSet;

use crate::error::Error;
use crate::internal_err;
use crate::lang::{EvalResult, Signal};
use crate::object::types::*;
use crate::object::*;

use super::cache::Specialization;
use super::check::check;
use super::extract::env_name;
use super::normalize::normalize_all;
use super::operand::IndexOperand;
use super::position::{Position, Selection};

impl Specialization {
    /// Assign `value` into `x` with this specialization's mode, returning
    /// the updated container.
    ///
    /// Storage shared with other bindings is copied before it is written,
    /// so `x` is the only object observably changed.
    ///
    pub fn assign(&self, x: Obj, indices: &[IndexOperand], value: Obj) -> EvalResult {
        match x {
            Obj::Function(_) => Error::ObjectNotSubsettable("closure").into(),
            Obj::Symbol(_) => Error::ObjectNotSubsettable("symbol").into(),
            Obj::Environment(env) => self.assign_environment(env, indices, value),
            Obj::Null if value == Obj::Null => Ok(Obj::Null),
            Obj::Null => {
                // NULL grows into a vector that can hold the value
                let kind = match &value {
                    Obj::Scalar(s) => s.kind(),
                    Obj::Vector(v) if self.mode().is_subset() || v.len() == 1 => v.kind(),
                    _ => VectorKind::List,
                };
                self.assign_vector(Vector::empty(kind), indices, value)
            }
            Obj::Scalar(s) => self.assign_vector(s.into_vector(), indices, value),
            Obj::Vector(v) => self.assign_vector(v, indices, value),
        }
    }

    fn assign_environment(&self, env: Rc<Environment>, indices: &[IndexOperand], value: Obj) -> EvalResult {
        if self.mode().is_subset() {
            return Error::ObjectNotSubsettable("environment").into();
        }

        let Some(name) = env_name(indices) else {
            return Error::WrongArgsSubsetEnvironment.into();
        };

        env.insert(name.to_string(), value);
        Ok(Obj::Environment(env))
    }

    fn assign_vector(&self, x: Vector, indices: &[IndexOperand], value: Obj) -> EvalResult {
        let mode = self.mode();
        let positions = normalize_all(&x, indices, *mode)?;
        let selection = check(&x, positions, mode)?;

        if value == Obj::Null {
            return if x.is_list() {
                delete(x, &selection)
            } else if selection.selected_count() == 0 {
                Ok(Obj::Vector(x))
            } else {
                Error::ReplacementLengthZero.into()
            };
        }

        let value = if mode.is_exact() {
            element_value(&x, value)?
        } else {
            subset_value(&x, value)?
        };

        write(x, &selection, value)
    }
}

/// The replacement of `x[[i]] <- value` as a one-element vector
fn element_value(x: &Vector, value: Obj) -> Result<Vector, Signal> {
    if x.is_list() {
        return Ok(Vector::from(vec![value]));
    }

    match value {
        Obj::Scalar(s) => Ok(s.into_vector()),
        Obj::Vector(v) if v.len() == 1 => Ok(v),
        Obj::Vector(v) if v.is_empty() => Error::ReplacementLengthZero.into(),
        Obj::Vector(_) => Error::MoreElementsSupplied.into(),
        other => Error::IncompatibleTypes(other.type_name(), kind_name(x)).into(),
    }
}

/// The replacement of `x[i] <- value` as a vector recycled over the
/// selection
fn subset_value(x: &Vector, value: Obj) -> Result<Vector, Signal> {
    match value {
        Obj::Scalar(s) => Ok(s.into_vector()),
        Obj::Vector(v) => Ok(v),
        other if x.is_list() => Ok(Vector::from(vec![other])),
        other => Error::IncompatibleTypes(other.type_name(), kind_name(x)).into(),
    }
}

fn kind_name(x: &Vector) -> &'static str {
    Obj::Vector(Vector::empty(x.kind())).type_name()
}

fn write(x: Vector, selection: &Selection, value: Vector) -> EvalResult {
    if selection.selected_count() == 0 {
        return Ok(Obj::Vector(x));
    }

    if value.is_empty() {
        return Error::ReplacementLengthZero.into();
    }

    if value.len() > 1 && selection.profiles.iter().any(|p| p.saw_na) {
        return Error::NAsInSubscriptedAssignment.into();
    }

    // both sides share the wider storage type
    let kind = x.kind().max(value.kind());
    let mut x = x.coerce_to(kind)?;
    let value = value.coerce_to(kind)?;

    if let [profile] = selection.profiles.as_slice() {
        let len = x.len();
        if profile.max_position > len {
            grow(&mut x, profile.max_position);
        }
        if let [Position::Named(positions, names)] = selection.positions.as_slice() {
            name_appended(&mut x, len, positions, names);
        }
    }

    let offsets = selection.offsets(x.len(), x.attrs().dim.as_deref())?;

    match (&mut x, &value) {
        (Vector::Logical(x), Vector::Logical(v)) => scatter(x, &offsets, v),
        (Vector::Integer(x), Vector::Integer(v)) => scatter(x, &offsets, v),
        (Vector::Double(x), Vector::Double(v)) => scatter(x, &offsets, v),
        (Vector::Character(x), Vector::Character(v)) => scatter(x, &offsets, v),
        (Vector::List(x, _), Vector::List(v, _)) => scatter(x, &offsets, v),
        _ => return internal_err!("replacement was not coerced to the container type"),
    }

    Ok(Obj::Vector(x))
}

/// Write `value`, recycled, at each present offset
fn scatter<T: Clone>(x: &mut Rep<T>, offsets: &[Option<usize>], value: &Rep<T>) {
    let n = value.len();
    x.values.with_inner_mut(|values| {
        for (k, offset) in offsets.iter().enumerate() {
            if let Some(slot) = offset.and_then(|i| values.get_mut(i)) {
                *slot = value.values[k % n].clone();
            }
        }
    });
}

/// Extend a vector to `len`, filling with missing elements
///
/// Names grow with empty strings. A grown vector is no longer an array.
///
fn grow(x: &mut Vector, len: usize) {
    crate::with_rep!(x, rep => rep.values.with_inner_mut(|v| v.resize_with(len, Default::default)));

    let attrs = x.attrs_mut();
    if let Some(names) = attrs.names.as_mut() {
        names.with_inner_mut(|n| n.resize(len, OptionNA::Some(String::new())));
    }
    attrs.dim = None;
    attrs.dimnames = None;
}

/// Name the elements appended by a character subscript
fn name_appended(x: &mut Vector, old_len: usize, positions: &[Integer], names: &[Character]) {
    let appended = |p: &Integer| matches!(p, OptionNA::Some(p) if *p as usize > old_len);
    if x.names().is_none() && !positions.iter().any(appended) {
        return;
    }

    let len = x.len();
    let attrs = x.attrs_mut();
    let mut current = attrs
        .names
        .take()
        .map(CowObj::into_inner)
        .unwrap_or_else(|| vec![OptionNA::Some(String::new()); old_len]);
    current.resize(len, OptionNA::Some(String::new()));

    for (position, name) in positions.iter().zip(names) {
        if let OptionNA::Some(p) = position {
            let p = *p as usize;
            if p > old_len && p <= len {
                current[p - 1] = name.clone();
            }
        }
    }

    attrs.names = Some(current.into());
}

/// Remove the selected elements of a list, as `x[i] <- NULL` does
fn delete(x: Vector, selection: &Selection) -> EvalResult {
    if selection.rank() != 1 {
        return Error::ReplacementLengthZero.into();
    }

    let Vector::List(rep, kind) = x else {
        return internal_err!("only lists have elements to delete");
    };

    let dropped: HashSet<usize> = selection
        .offsets(rep.len(), None)?
        .into_iter()
        .flatten()
        .collect();

    if dropped.iter().all(|&i| i >= rep.len()) {
        return Ok(Obj::Vector(Vector::List(rep, kind)));
    }

    let values: Vec<Obj> = rep
        .values
        .iter()
        .enumerate()
        .filter(|(i, _)| !dropped.contains(i))
        .map(|(_, v)| v.clone())
        .collect();

    let names = rep.attrs.names.map(|names| {
        names
            .iter()
            .enumerate()
            .filter(|(i, _)| !dropped.contains(i))
            .map(|(_, n)| n.clone())
            .collect::<Vec<_>>()
            .into()
    });

    let attrs = Attributes {
        names,
        ..Default::default()
    };
    Ok(Obj::Vector(Vector::List(Rep::new(values).with_attrs(attrs), kind)))
}
