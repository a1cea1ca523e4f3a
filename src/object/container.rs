use super::vector::types::Character;
use super::Vector;

/// Shape of an indexable container
///
/// Everything the subscript normalizer and validator need to know about a
/// container: its length, its per-axis extents and the names used to
/// resolve character subscripts. Element access stays with the concrete
/// type.
///
pub trait Container {
    fn len(&self) -> usize;

    fn dim(&self) -> Option<&[usize]>;

    fn names(&self) -> Option<&[Character]>;

    fn dimnames(&self, axis: usize) -> Option<&[Character]>;

    /// Whether a `dimnames` attribute is present, even if every axis is
    /// unnamed.
    fn has_dimnames(&self) -> bool;

    fn is_list(&self) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of axes, counting a plain vector as one.
    fn rank(&self) -> usize {
        self.dim().map_or(1, |d| d.len())
    }

    /// Extent of one axis, or the full length for a plain vector.
    fn extent(&self, axis: usize) -> usize {
        match self.dim() {
            Some(dim) => dim.get(axis).copied().unwrap_or(0),
            None => self.len(),
        }
    }
}

impl Container for Vector {
    fn len(&self) -> usize {
        Vector::len(self)
    }

    fn dim(&self) -> Option<&[usize]> {
        self.attrs().dim.as_deref()
    }

    fn names(&self) -> Option<&[Character]> {
        self.attrs().names.as_ref().map(|n| n.as_slice())
    }

    fn dimnames(&self, axis: usize) -> Option<&[Character]> {
        self.attrs().axis_names(axis).map(|n| n.as_slice())
    }

    fn has_dimnames(&self) -> bool {
        self.attrs().dimnames.is_some()
    }

    fn is_list(&self) -> bool {
        Vector::is_list(self)
    }
}
