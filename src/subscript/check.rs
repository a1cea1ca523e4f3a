use crate::error::Error;
use crate::lang::Signal;
use crate::object::Container;

use super::mode::Mode;
use super::position::{Position, PositionProfile, Selection};

/// The axis-count error reported for a subscript in `mode`
pub fn dimensions_error(mode: &Mode, rank: usize) -> Error {
    match (mode.is_assignment(), mode.is_subset()) {
        (true, true) if rank == 2 => Error::IncorrectSubscriptsMatrix,
        (true, true) => Error::IncorrectSubscripts,
        (true, false) => Error::ImproperSubscript,
        (false, _) => Error::IncorrectDimensions,
    }
}

/// Extent of `axis` when a container is subscripted with `rank` subscripts
///
/// A single subscript addresses the container as a flat vector. Several
/// subscripts must each address one of the container's dimensions.
///
pub fn axis_extent<C>(container: &C, axis: usize, rank: usize, mode: &Mode) -> Result<usize, Signal>
where
    C: Container + ?Sized,
{
    match container.dim() {
        None if axis != 0 || rank > 1 => dimensions_error(mode, rank).into(),
        Some(dim) if rank > 1 && axis >= dim.len() => dimensions_error(mode, rank).into(),
        _ if rank == 1 => Ok(container.len()),
        _ => Ok(container.extent(axis)),
    }
}

/// Validate canonical positions against a container's shape
///
/// Produces one profile per axis. Reports the bounds and arity violations
/// that normalization leaves for the full set of axes.
///
pub fn check<C>(container: &C, positions: Vec<Position>, mode: &Mode) -> Result<Selection, Signal>
where
    C: Container + ?Sized,
{
    let rank = positions.len();
    if rank > 1 && container.dim().map(|d| d.len()) != Some(rank) {
        return dimensions_error(mode, rank).into();
    }

    // positions past the end are only meaningful when growing a vector
    let may_grow = mode.is_assignment() && rank == 1;

    let mut profiles = Vec::with_capacity(rank);
    for (axis, position) in positions.iter().enumerate() {
        let extent = axis_extent(container, axis, rank, mode)?;
        let mut profile = PositionProfile::default();

        match position {
            Position::Missing => profile.selected_positions_count = extent,
            Position::NA => {
                profile.selected_positions_count = 1;
                profile.saw_na = true;
            }
            Position::Null | Position::Scalar(0) => (),
            Position::Scalar(_) | Position::Vector(_) | Position::Named(..) => {
                let offsets = position.offsets(extent);
                profile.selected_positions_count = offsets.len();
                profile.saw_na = offsets.iter().any(|o| o.is_none());
                profile.max_position = position.max_position();
                profile.saw_out_of_bounds = profile.max_position > extent;
            }
        }

        if profile.saw_out_of_bounds && !may_grow {
            return Error::SubscriptOutOfBounds.into();
        }

        profiles.push(profile);
    }

    let selection = Selection {
        missing_single_axis: rank == 1 && positions[0] == Position::Missing,
        positions,
        profiles,
    };

    if mode.is_exact() && !selection.positions.contains(&Position::Null) {
        match selection.selected_count() {
            0 => return Error::SelectLessThanOne.into(),
            1 => (),
            _ => return Error::SelectMoreThanOne.into(),
        }
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{OptionNA, Vector};
    use crate::subscript::mode::Operator;

    fn matrix() -> Vector {
        Vector::from(vec![1, 2, 3, 4, 5, 6]).set_dim(vec![2, 3])
    }

    #[test]
    fn profiles_count_selected_positions() {
        let x = matrix();
        let mode = Mode::new(Operator::Subset, true, true);
        let positions = vec![Position::Scalar(1), Position::Missing];
        let selection = check(&x, positions, &mode).unwrap();
        assert_eq!(selection.profiles[0].selected_positions_count, 1);
        assert_eq!(selection.profiles[1].selected_positions_count, 3);
        assert_eq!(selection.selected_count(), 3);
        assert!(!selection.missing_single_axis);
    }

    #[test]
    fn axis_count_must_match_dimensions() {
        let x = matrix();
        let positions = vec![Position::Scalar(1), Position::Scalar(1), Position::Scalar(1)];

        let read = Mode::new(Operator::Subset, true, true);
        let err = check(&x, positions.clone(), &read).unwrap_err();
        assert_eq!(err, Signal::Error(Error::IncorrectDimensions));

        let write = Mode::new(Operator::SubsetAssign, true, true);
        let err = check(&x, positions.clone(), &write).unwrap_err();
        assert_eq!(err, Signal::Error(Error::IncorrectSubscripts));

        let write2 = Mode::new(Operator::Subset2Assign, true, true);
        let err = check(&x, positions, &write2).unwrap_err();
        assert_eq!(err, Signal::Error(Error::ImproperSubscript));

        let v = Vector::from(vec![1, 2]);
        let err = check(&v, vec![Position::Scalar(1), Position::Scalar(1)], &write).unwrap_err();
        assert_eq!(err, Signal::Error(Error::IncorrectSubscriptsMatrix));
    }

    #[test]
    fn growth_only_on_single_axis_assignment() {
        let v = Vector::from(vec![1, 2, 3]);
        let read = Mode::new(Operator::Subset, true, true);
        let err = check(&v, vec![Position::Scalar(5)], &read).unwrap_err();
        assert_eq!(err, Signal::Error(Error::SubscriptOutOfBounds));

        let write = Mode::new(Operator::SubsetAssign, true, true);
        let selection = check(&v, vec![Position::Scalar(5)], &write).unwrap();
        assert!(selection.profiles[0].saw_out_of_bounds);
        assert_eq!(selection.profiles[0].max_position, 5);

        let m = matrix();
        let positions = vec![Position::Scalar(3), Position::Scalar(1)];
        assert!(check(&m, positions, &write).is_err());
    }

    #[test]
    fn exact_requires_one_position() {
        let v = Vector::from(vec![1, 2, 3]);
        let mode = Mode::new(Operator::Subset2, true, true);
        let two = Position::Vector(vec![OptionNA::Some(1), OptionNA::Some(2)]);
        let err = check(&v, vec![two], &mode).unwrap_err();
        assert_eq!(err, Signal::Error(Error::SelectMoreThanOne));

        let err = check(&v, vec![Position::Scalar(0)], &mode).unwrap_err();
        assert_eq!(err, Signal::Error(Error::SelectLessThanOne));

        assert!(check(&v, vec![Position::Null], &mode).is_ok());
    }

    #[test]
    fn missing_single_axis_is_flagged() {
        let v = Vector::from(vec![1, 2, 3]);
        let mode = Mode::default();
        let selection = check(&v, vec![Position::Missing], &mode).unwrap();
        assert!(selection.missing_single_axis);
        assert_eq!(selection.selected_count(), 3);
    }
}
