use std::rc::Rc;

use crate::error::Error;
use crate::internal_err;
use crate::lang::{EvalResult, Signal};
use crate::object::types::*;
use crate::object::*;

use super::cache::Specialization;
use super::check::check;
use super::mode::Mode;
use super::normalize::{normalize_all, Normalizer};
use super::operand::IndexOperand;
use super::position::{Position, PositionProfile, Selection};

impl Vector {
    /// Gather the elements at `offsets` into a new vector without
    /// attributes. Missing offsets and offsets past the end produce `NA`,
    /// or `NULL` for lists.
    pub fn select(&self, offsets: &[Option<usize>]) -> Vector {
        match self {
            Vector::Logical(x) => Vector::Logical(gather(x, offsets)),
            Vector::Integer(x) => Vector::Integer(gather(x, offsets)),
            Vector::Double(x) => Vector::Double(gather(x, offsets)),
            Vector::Character(x) => Vector::Character(gather(x, offsets)),
            Vector::List(x, kind) => Vector::List(gather(x, offsets), kind.subset_kind()),
        }
    }

    /// The missing element of this vector's type as a bare object.
    pub fn na_element(&self) -> Obj {
        match self {
            Vector::Logical(_) => Obj::Scalar(Scalar::Logical(OptionNA::NA)),
            Vector::Integer(_) => Obj::Scalar(Scalar::Integer(OptionNA::NA)),
            Vector::Double(_) => Obj::Scalar(Scalar::Double(OptionNA::NA)),
            Vector::Character(_) => Obj::Scalar(Scalar::Character(OptionNA::NA)),
            Vector::List(..) => Obj::Null,
        }
    }
}

fn gather<T: VecElement>(rep: &Rep<T>, offsets: &[Option<usize>]) -> Rep<T> {
    offsets
        .iter()
        .map(|offset| {
            offset
                .and_then(|i| rep.values.get(i).cloned())
                .unwrap_or_else(T::na)
        })
        .collect::<Vec<T>>()
        .into()
}

impl Specialization {
    /// Extract from `x` with this specialization's mode.
    pub fn extract(&self, x: &Obj, indices: &[IndexOperand]) -> EvalResult {
        match x {
            Obj::Null => Ok(Obj::Null),
            Obj::Function(_) => Error::ObjectNotSubsettable("closure").into(),
            Obj::Symbol(_) => Error::ObjectNotSubsettable("symbol").into(),
            Obj::Environment(env) => extract_environment(env, indices, self.mode()),
            Obj::Scalar(s) => self.extract_vector(&s.clone().into_vector(), indices),
            Obj::Vector(v) => self.extract_vector(v, indices),
        }
    }

    fn extract_vector(&self, x: &Vector, indices: &[IndexOperand]) -> EvalResult {
        let mode = self.mode();

        if mode.is_exact() && x.is_list() {
            if let [operand] = indices {
                if let Some(path) = operand.elements().filter(|p| p.len() > 1) {
                    return extract_recursive(x, &path, mode);
                }
            }
        }

        let positions = normalize_all(x, indices, *mode)?;
        let selection = check(x, positions, mode)?;

        if mode.is_exact() {
            exact_selected(x, &selection)
        } else {
            self.subset_selected(x, &selection)
        }
    }

    /// Build the result of `[` for a validated selection
    pub fn subset_selected(&self, x: &Vector, selection: &Selection) -> EvalResult {
        if selection.missing_single_axis {
            return Ok(Obj::Vector(x.clone()));
        }

        let offsets = selection.offsets(x.len(), x.attrs().dim.as_deref())?;
        let mut result = x.select(&offsets);

        let metadata = if selection.rank() == 1 {
            match x.names() {
                Some(names) => {
                    let names = Vector::Character(Rep::from(names.clone()));
                    let names = self.extract_names(0, &names, &selection.positions[0], selection.profiles[0])?;
                    result.attrs_mut().names = Some(names.into());
                    true
                }
                None => false,
            }
        } else {
            self.apply_dimensions(x, &mut result, selection)?
        };

        if metadata {
            self.mark_metadata_applied();
        }

        let always_one = self.profile_selected(offsets.len());
        if always_one && !self.metadata_applied() && !result.is_list() {
            if let Some(element) = result.get(0) {
                return Ok(element);
            }
        }

        Ok(Obj::Vector(result))
    }

    /// Attach the dimensions of a multi-axis subset, returning whether any
    /// metadata was attached.
    fn apply_dimensions(&self, x: &Vector, result: &mut Vector, selection: &Selection) -> Result<bool, Signal> {
        let drop = self.mode().drop;
        let dimnames = x.attrs().dimnames.as_ref();

        let kept: Vec<usize> = (0..selection.rank())
            .filter(|&axis| !drop || selection.profiles[axis].selected_positions_count != 1)
            .collect();

        if kept.len() > 1 {
            let dim = kept
                .iter()
                .map(|&axis| selection.profiles[axis].selected_positions_count)
                .collect();
            result.attrs_mut().dim = Some(dim);

            if let Some(dimnames) = dimnames {
                let mut reduced = Vec::with_capacity(kept.len());
                for &axis in &kept {
                    let names = match dimnames.get(axis).and_then(Option::as_ref) {
                        Some(names) => Some(self.extract_names(
                            axis,
                            &Vector::from(names.clone()),
                            &selection.positions[axis],
                            selection.profiles[axis],
                        )?),
                        None => None,
                    };
                    reduced.push(names);
                }
                result.attrs_mut().dimnames = Some(reduced);
            }

            return Ok(true);
        }

        if let Some(dimnames) = dimnames {
            if let Some(names) = self.dimnames_to_names(dimnames, selection, result.len())? {
                result.attrs_mut().names = Some(names.into());
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Names of a subset that collapsed to a plain vector
    ///
    /// Taken from the one axis whose selection spans the whole result. When
    /// several axes qualify the result is left unnamed.
    ///
    fn dimnames_to_names(
        &self,
        dimnames: &[Option<Vec<Character>>],
        selection: &Selection,
        len: usize,
    ) -> Result<Option<Vec<Character>>, Signal> {
        let mut found = None;
        for axis in (0..selection.rank()).rev() {
            if selection.profiles[axis].selected_positions_count != len {
                continue;
            }
            let Some(names) = dimnames.get(axis).and_then(Option::as_ref) else {
                continue;
            };

            let names = self.extract_names(
                axis,
                &Vector::from(names.clone()),
                &selection.positions[axis],
                selection.profiles[axis],
            )?;

            if names.len() == len {
                if found.is_some() {
                    return Ok(None);
                }
                found = Some(names);
            }
        }
        Ok(found)
    }

    fn extract_names(
        &self,
        axis: usize,
        names: &Vector,
        position: &Position,
        profile: PositionProfile,
    ) -> Result<Vec<Character>, Signal> {
        let selection = Selection {
            positions: vec![position.clone()],
            profiles: vec![profile],
            missing_single_axis: false,
        };

        let names = self.names_site(axis)?.subset_selected(names, &selection)?;
        match names.into_vector() {
            Some(Vector::Character(names)) => Ok(names.values.into_inner()),
            _ => internal_err!("names did not extract to a character vector"),
        }
    }
}

/// The single element of an exact selection
fn exact_selected(x: &Vector, selection: &Selection) -> EvalResult {
    if selection.positions.contains(&Position::Null) {
        return Ok(Obj::Null);
    }

    let offsets = selection.offsets(x.len(), x.attrs().dim.as_deref())?;
    let [offset] = offsets.as_slice() else {
        return internal_err!("exact selection without exactly one position");
    };

    Ok(offset
        .and_then(|i| x.get(i))
        .unwrap_or_else(|| x.na_element()))
}

/// `[[` with a vector subscript on a list, descending one level per element
fn extract_recursive(x: &Vector, path: &[IndexOperand], mode: &Mode) -> EvalResult {
    let mut current = Obj::Vector(x.clone());

    for (i, operand) in path.iter().enumerate() {
        let level = i + 1;
        let last = level == path.len();

        let vector = match current.as_vector() {
            Some(v) if last || v.is_list() => v,
            None if last && current == Obj::Null => return Ok(Obj::Null),
            _ => return Error::RecursiveIndexingFailed(level).into(),
        };

        let position = match Normalizer::new(0, 1, *mode).normalize(&vector, operand) {
            Ok(Position::Null) if !last => return Error::NoSuchIndex(level).into(),
            Err(Signal::Error(Error::SubscriptOutOfBounds)) if !last => {
                return Error::NoSuchIndex(level).into()
            }
            position => position?,
        };

        let selection = check(&vector, vec![position], mode)?;
        current = exact_selected(&vector, &selection)?;
    }

    Ok(current)
}

/// `[[` on an environment looks up a single name
fn extract_environment(env: &Rc<Environment>, indices: &[IndexOperand], mode: &Mode) -> EvalResult {
    if mode.is_subset() {
        return Error::ObjectNotSubsettable("environment").into();
    }

    match env_name(indices) {
        Some(name) => Ok(env.get_local(name).unwrap_or(Obj::Null)),
        None => Error::WrongArgsSubsetEnvironment.into(),
    }
}

/// The name of an environment binding addressed by a subscript
pub(super) fn env_name(indices: &[IndexOperand]) -> Option<&str> {
    match indices {
        [IndexOperand::Str(OptionNA::Some(name))] => Some(name),
        [IndexOperand::StrVec(names)] => match names.as_slice() {
            [OptionNA::Some(name)] => Some(name),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscript::{CallSite, Operator};

    fn chr(values: &[&str]) -> Vec<Character> {
        values.iter().map(|s| OptionNA::Some(s.to_string())).collect()
    }

    fn subset(x: &Obj, indices: &[IndexOperand]) -> EvalResult {
        CallSite::new(Operator::Subset).extract(x, indices, true, true)
    }

    fn subset2(x: &Obj, indices: &[IndexOperand]) -> EvalResult {
        CallSite::new(Operator::Subset2).extract(x, indices, true, true)
    }

    fn named() -> Obj {
        Obj::Vector(Vector::from(vec![10, 20, 30]).set_names(chr(&["a", "b", "c"])))
    }

    fn matrix() -> Obj {
        Obj::Vector(
            Vector::from(vec![1, 2, 3, 4, 5, 6])
                .set_dim(vec![2, 3])
                .set_dimnames(vec![Some(chr(&["r1", "r2"])), Some(chr(&["c1", "c2", "c3"]))]),
        )
    }

    #[test]
    fn gather_fills_missing_offsets() {
        let x = Vector::from(vec![1.5, 2.5]);
        let result = x.select(&[Some(1), None, Some(7)]);
        assert_eq!(
            result,
            Vector::from(vec![OptionNA::Some(2.5), OptionNA::NA, OptionNA::NA])
        );

        let l = Vector::from(vec![Obj::from(1)]);
        assert_eq!(l.select(&[None]), Vector::from(vec![Obj::Null]));
    }

    #[test]
    fn names_follow_selection() {
        let result = subset(&named(), &[vec![3, 1].into()]).unwrap();
        let expected = Vector::from(vec![30, 10]).set_names(chr(&["c", "a"]));
        assert_eq!(result, Obj::Vector(expected));
    }

    #[test]
    fn single_unnamed_element_is_bare() {
        let x = Obj::Vector(Vector::from(vec![10, 20, 30]));
        assert!(matches!(subset(&x, &[2.into()]), Ok(Obj::Scalar(_))));

        // a named element keeps its name
        let result = subset(&named(), &[2.into()]).unwrap();
        assert_eq!(
            result,
            Obj::Vector(Vector::from(vec![20]).set_names(chr(&["b"])))
        );
    }

    #[test]
    fn matrix_rows_drop_to_named_vector() {
        let result = subset(&matrix(), &["r2".into(), IndexOperand::Missing]).unwrap();
        let expected = Vector::from(vec![2, 4, 6]).set_names(chr(&["c1", "c2", "c3"]));
        assert_eq!(result, Obj::Vector(expected));
    }

    #[test]
    fn matrix_without_drop_keeps_dimensions() {
        let site = CallSite::new(Operator::Subset);
        let result = site
            .extract(&matrix(), &[1.into(), vec![1, 3].into()], true, false)
            .unwrap();
        let expected = Vector::from(vec![1, 5])
            .set_dim(vec![1, 2])
            .set_dimnames(vec![Some(chr(&["r1"])), Some(chr(&["c1", "c3"]))]);
        assert_eq!(result, Obj::Vector(expected));
    }

    #[test]
    fn matrix_block_keeps_reduced_dimnames() {
        let result = subset(&matrix(), &[IndexOperand::Missing, vec![2, 3].into()]).unwrap();
        let expected = Vector::from(vec![3, 4, 5, 6])
            .set_dim(vec![2, 2])
            .set_dimnames(vec![Some(chr(&["r1", "r2"])), Some(chr(&["c2", "c3"]))]);
        assert_eq!(result, Obj::Vector(expected));
    }

    #[test]
    fn ambiguous_dimnames_leave_result_unnamed() {
        // a 1 x 1 selection matches both axes
        let m = Obj::Vector(
            Vector::from(vec![1])
                .set_dim(vec![1, 1])
                .set_dimnames(vec![Some(chr(&["r"])), Some(chr(&["c"]))]),
        );
        let result = subset(&m, &[1.into(), 1.into()]).unwrap();
        assert_eq!(result, Obj::from(1));
    }

    #[test]
    fn missing_subscript_returns_container() {
        let x = named();
        assert_eq!(subset(&x, &[IndexOperand::Missing]).unwrap(), x);
        assert_eq!(subset(&x, &[]).unwrap(), x);
    }

    #[test]
    fn exact_returns_bare_elements() {
        assert_eq!(subset2(&named(), &["b".into()]).unwrap(), Obj::from(20));

        let l = Obj::Vector(Vector::from(vec![
            Obj::from(1),
            Obj::Vector(Vector::from(vec![2, 3])),
        ]));
        assert_eq!(
            subset2(&l, &[2.into()]).unwrap(),
            Obj::Vector(Vector::from(vec![2, 3]))
        );

        let err = subset2(&named(), &[vec![1, 2].into()]).unwrap_err();
        assert_eq!(err, Signal::Error(Error::SelectMoreThanOne));
    }

    #[test]
    fn exact_na_is_typed() {
        let x = Obj::Vector(Vector::from(vec![1.5, 2.5]));
        let result = subset2(&x, &[IndexOperand::Int(OptionNA::NA)]);
        assert!(matches!(result, Err(Signal::Error(Error::SubscriptOutOfBounds))));

        let x = Obj::Vector(Vector::from(vec![1.5, 2.5]));
        let result = subset2(&x, &[IndexOperand::Logical(OptionNA::NA)]).unwrap();
        assert_eq!(result, Obj::Scalar(Scalar::Double(OptionNA::NA)));
    }

    #[test]
    fn exact_missing_name_on_list_is_null() {
        let l = Obj::Vector(Vector::from(vec![Obj::from(1)]).set_names(chr(&["a"])));
        assert_eq!(subset2(&l, &["z".into()]).unwrap(), Obj::Null);
    }

    #[test]
    fn recursive_exact_descends_lists() {
        let inner = Obj::Vector(Vector::from(vec![Obj::from(7), Obj::from(8)]).set_names(chr(&["x", "y"])));
        let l = Obj::Vector(Vector::from(vec![Obj::from(1), inner]).set_names(chr(&["a", "b"])));

        assert_eq!(subset2(&l, &[vec![2, 2].into()]).unwrap(), Obj::from(8));
        assert_eq!(subset2(&l, &[vec!["b", "x"].into()]).unwrap(), Obj::from(7));

        let err = subset2(&l, &[vec![1, 1, 1].into()]).unwrap_err();
        assert_eq!(err, Signal::Error(Error::RecursiveIndexingFailed(2)));

        let err = subset2(&l, &[vec![5, 1].into()]).unwrap_err();
        assert_eq!(err, Signal::Error(Error::NoSuchIndex(1)));
    }

    #[test]
    fn list_subsets_keep_their_kind() {
        let call = Vector::List(
            Rep::new(vec![Obj::Symbol("f".to_string()), Obj::from(1)]),
            ListKind::Language,
        );
        let result = subset(&Obj::Vector(call), &[vec![1, 2].into()]).unwrap();
        assert_eq!(result.type_name(), "language");

        let pairs = Vector::List(Rep::new(vec![Obj::from(1)]), ListKind::PairList);
        let result = subset(&Obj::Vector(pairs), &[1.into()]).unwrap();
        assert_eq!(result.type_name(), "list");
    }

    #[test]
    fn environments_support_exact_lookup_only() {
        let env = Environment::new();
        env.insert("x".to_string(), Obj::from(3));
        let env = Obj::Environment(env);

        assert_eq!(subset2(&env, &["x".into()]).unwrap(), Obj::from(3));
        assert_eq!(subset2(&env, &["y".into()]).unwrap(), Obj::Null);

        let err = subset2(&env, &[1.into()]).unwrap_err();
        assert_eq!(err, Signal::Error(Error::WrongArgsSubsetEnvironment));

        let err = subset(&env, &["x".into()]).unwrap_err();
        assert_eq!(err, Signal::Error(Error::ObjectNotSubsettable("environment")));
    }

    #[test]
    fn other_containers() {
        assert_eq!(subset(&Obj::Null, &[1.into()]).unwrap(), Obj::Null);

        let err = subset(&Obj::Function("f".to_string()), &[1.into()]).unwrap_err();
        assert_eq!(err, Signal::Error(Error::ObjectNotSubsettable("closure")));

        assert_eq!(subset(&Obj::from(4.5), &[1.into()]).unwrap(), Obj::from(4.5));
    }
}
