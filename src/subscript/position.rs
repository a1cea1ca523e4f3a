use crate::internal_err;
use crate::lang::Signal;
use crate::object::types::*;
use crate::object::OptionNA;

/// Canonical subscript for one axis
///
/// Positions are 1-based. After normalization no raw negative, logical or
/// character subscript remains: complements have been expanded, masks
/// turned into positions and names looked up.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    /// Select the whole axis without expanding it
    Missing,
    /// A single missing position
    NA,
    /// A single position, where `0` selects nothing
    Scalar(usize),
    /// Positive positions or `NA`, in selection order
    ///
    /// A negative entry `-p` is a missing position that still extends a
    /// vector being assigned into to length `p`.
    Vector(Vec<Integer>),
    /// Positions paired with the names that produced them, for assignments
    /// that may append named elements
    Named(Vec<Integer>, Vec<Character>),
    /// The no-such-element sentinel of `[[` on lists
    Null,
}

impl Position {
    pub fn from_positions(positions: Vec<usize>) -> Self {
        match positions.as_slice() {
            [] => Position::Scalar(0),
            _ => Position::Vector(
                positions
                    .into_iter()
                    .map(|p| OptionNA::Some(p as i32))
                    .collect(),
            ),
        }
    }

    /// Zero-based element offsets along an axis of length `extent`
    ///
    /// `None` marks a missing position. `Missing` expands to the whole axis
    /// and `Null` selects nothing.
    ///
    pub fn offsets(&self, extent: usize) -> Vec<Option<usize>> {
        match self {
            Position::Missing => (0..extent).map(Some).collect(),
            Position::NA => vec![None],
            Position::Scalar(0) | Position::Null => vec![],
            Position::Scalar(i) => vec![Some(i - 1)],
            Position::Vector(v) | Position::Named(v, _) => v
                .iter()
                .filter_map(|i| match i {
                    OptionNA::Some(0) => None,
                    OptionNA::Some(i) if *i < 0 => Some(None),
                    OptionNA::Some(i) => Some(Some((*i as usize).saturating_sub(1))),
                    OptionNA::NA => Some(None),
                })
                .collect(),
        }
    }

    /// Largest position selected, if any
    pub fn max_position(&self) -> usize {
        match self {
            Position::Scalar(i) => *i,
            Position::Vector(v) | Position::Named(v, _) => v
                .iter()
                .filter_map(|i| i.clone().as_option())
                .map(|i| i.unsigned_abs() as usize)
                .max()
                .unwrap_or(0),
            Position::Missing | Position::NA | Position::Null => 0,
        }
    }
}

/// Per-axis selection statistics
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PositionProfile {
    pub selected_positions_count: usize,
    pub saw_na: bool,
    pub saw_out_of_bounds: bool,
    pub max_position: usize,
}

/// Validated positions of one subscript application
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub positions: Vec<Position>,
    pub profiles: Vec<PositionProfile>,
    /// Single missing subscript, as in `x[]`
    pub missing_single_axis: bool,
}

impl Selection {
    /// Number of elements selected across all axes
    pub fn selected_count(&self) -> usize {
        match self.profiles.as_slice() {
            [one] => one.selected_positions_count,
            profiles => profiles.iter().map(|p| p.selected_positions_count).product(),
        }
    }

    pub fn rank(&self) -> usize {
        self.positions.len()
    }

    /// Zero-based offsets into a container's storage, in selection order
    ///
    /// Several axes combine column-major: the first axis varies fastest.
    /// An offset is `None` when any of its axis positions is missing.
    ///
    pub fn offsets(&self, len: usize, dim: Option<&[usize]>) -> Result<Vec<Option<usize>>, Signal> {
        let offsets = match (self.positions.as_slice(), dim) {
            ([position], _) => position.offsets(len),
            (positions, Some(dim)) if dim.len() == positions.len() => {
                let axes: Vec<_> = positions
                    .iter()
                    .zip(dim)
                    .map(|(p, extent)| p.offsets(*extent))
                    .collect();
                column_major(&axes, dim)
            }
            _ => return internal_err!("selection rank does not match container dimensions"),
        };

        if offsets.len() != self.selected_count() {
            return internal_err!("selection profile disagrees with its positions");
        }

        Ok(offsets)
    }
}

fn column_major(axes: &[Vec<Option<usize>>], dim: &[usize]) -> Vec<Option<usize>> {
    let strides: Vec<usize> = dim
        .iter()
        .scan(1, |stride, extent| {
            let current = *stride;
            *stride *= extent;
            Some(current)
        })
        .collect();

    let total = axes.iter().map(Vec::len).product();
    let mut offsets = Vec::with_capacity(total);
    if total == 0 {
        return offsets;
    }

    let mut counter = vec![0; axes.len()];
    loop {
        let offset = counter
            .iter()
            .zip(axes)
            .zip(&strides)
            .try_fold(0, |acc, ((&i, axis), stride)| axis[i].map(|o| acc + o * stride));
        offsets.push(offset);

        let mut axis = 0;
        loop {
            if axis == axes.len() {
                return offsets;
            }
            counter[axis] += 1;
            if counter[axis] < axes[axis].len() {
                break;
            }
            counter[axis] = 0;
            axis += 1;
        }
    }
}
