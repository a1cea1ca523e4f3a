use std::iter::Iterator;
use std::ops::Deref;
use std::rc::Rc;

/// Internal data representation for copy-on-write semantics.
///
/// Cloning a `CowObj` only clones the pointer. Storage is duplicated the
/// first time a shared value is written through [`CowObj::with_inner_mut`],
/// so a container seen by more than one binding is never mutated in place.
#[derive(Debug, PartialEq, Default)]
pub struct CowObj<T: Clone>(Rc<T>);

impl<T: Clone> Clone for CowObj<T> {
    fn clone(&self) -> Self {
        CowObj(Rc::clone(&self.0))
    }
}

impl<T: Clone> From<T> for CowObj<T> {
    fn from(x: T) -> Self {
        CowObj(Rc::new(x))
    }
}

impl<T: Clone> Deref for CowObj<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Clone> CowObj<T> {
    /// Whether another binding currently shares this storage.
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.0) > 1
    }

    /// Detach from any other binding, copying the storage if needed.
    pub fn make_unique(&mut self) -> &mut T {
        Rc::make_mut(&mut self.0)
    }

    /// Get mutable access to the internal value.
    /// In case more than one reference to the internal data exists,
    /// the value is cloned first.
    pub fn with_inner_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(self.make_unique())
    }

    pub fn into_inner(self) -> T {
        Rc::try_unwrap(self.0).unwrap_or_else(|rc| (*rc).clone())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> CowObj<Vec<T>> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: Clone> FromIterator<T> for CowObj<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        CowObj::from(iter.into_iter().collect::<Vec<T>>())
    }
}
