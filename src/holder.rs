//! Owned storage bundled with a view into it.

use crate::view::{validate_bounds, Layout, StridedArray, StridedArrayView};
use crate::Result;

/// Owned storage together with the layout of a view into it.
///
/// The view is built on demand by [`Holder::view`], borrowing the holder, so it
/// can never outlive the storage. This is how a contiguous range taken from a
/// temporary (for example rows `2:` of a freshly gathered matrix) is returned
/// without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holder<T, const N: usize> {
    storage: Vec<T>,
    layout: Layout<N>,
}

impl<T, const N: usize> Holder<T, N> {
    /// Bundle `storage` with `layout`.
    ///
    /// # Errors
    /// Returns [`crate::IndexError::OffsetOverflow`] if the layout reaches outside the storage.
    pub fn new(storage: Vec<T>, layout: Layout<N>) -> Result<Self> {
        validate_bounds(storage.len(), &layout)?;
        Ok(Self { storage, layout })
    }

    #[inline]
    pub(crate) fn from_parts(storage: Vec<T>, layout: Layout<N>) -> Self {
        debug_assert!(validate_bounds(storage.len(), &layout).is_ok());
        Self { storage, layout }
    }

    /// The view this holder keeps alive.
    #[inline]
    pub fn view(&self) -> StridedArrayView<'_, T, N> {
        StridedArrayView::from_layout(&self.storage, self.layout)
    }

    #[inline]
    pub fn layout(&self) -> Layout<N> {
        self.layout
    }

    /// The whole owned storage, including elements outside the view.
    #[inline]
    pub fn storage(&self) -> &[T] {
        &self.storage
    }

    /// Give up the view and return the storage.
    #[inline]
    pub fn into_storage(self) -> Vec<T> {
        self.storage
    }
}

impl<T: Clone, const N: usize> Holder<T, N> {
    /// Materialize the view as a dense array.
    ///
    /// Reuses the storage when the view already covers all of it in order.
    pub fn into_owned(self) -> StridedArray<T, N> {
        if self.layout.covers(self.storage.len()) {
            StridedArray::from_parts(self.storage, *self.layout.size())
        } else {
            self.view().to_owned()
        }
    }
}
