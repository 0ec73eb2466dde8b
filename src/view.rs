//! Strided storage: layouts, borrowed views and owned row-major arrays.
//!
//! Key features:
//! - [`Layout`]: a `Copy` description of `(size, strides, offset)` over some storage
//! - [`StridedArrayView`]: zero-copy view over a borrowed slice
//! - [`StridedArray`]: owned row-major array, the vector/matrix container
//!
//! Layout transformations (narrowing an axis, taking a row or a column) only
//! touch the metadata and never read the underlying data.

use std::ops::Range;

use crate::{IndexError, Result};

/// Compute row-major strides (C default: last index varies fastest).
pub fn row_major_strides<const N: usize>(size: &[usize; N]) -> [isize; N] {
    let mut strides = [1isize; N];
    for i in (0..N.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * size[i + 1] as isize;
    }
    strides
}

// ============================================================================
// Layout
// ============================================================================

/// Size, strides and starting offset of a view into flat storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout<const N: usize> {
    size: [usize; N],
    strides: [isize; N],
    offset: usize,
}

impl<const N: usize> Layout<N> {
    /// Create a layout from its parts. Not checked against any storage.
    pub fn new(size: [usize; N], strides: [isize; N], offset: usize) -> Self {
        Self {
            size,
            strides,
            offset,
        }
    }

    /// Dense row-major layout starting at offset 0.
    pub fn row_major(size: [usize; N]) -> Self {
        Self::new(size, row_major_strides(&size), 0)
    }

    #[inline]
    pub fn size(&self) -> &[usize; N] {
        &self.size
    }

    #[inline]
    pub fn strides(&self) -> &[isize; N] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.size.iter().product()
    }

    /// Returns true if any dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.contains(&0)
    }

    /// Storage offset of a 0-based multi-dimensional index.
    #[inline]
    pub fn offset_of(&self, indices: &[usize; N]) -> usize {
        let mut idx = self.offset as isize;
        for i in 0..N {
            idx += indices[i] as isize * self.strides[i];
        }
        idx as usize
    }

    /// Check if the layout is contiguous in memory (row-major order).
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 1isize;
        for i in (0..N).rev() {
            if self.size[i] <= 1 {
                continue;
            }
            if self.strides[i] != expected {
                return false;
            }
            expected *= self.size[i] as isize;
        }
        true
    }

    /// True if the layout addresses every element of a storage of `len` exactly once, in order.
    pub fn covers(&self, len: usize) -> bool {
        self.len() == len && (len == 0 || (self.offset == 0 && self.is_contiguous()))
    }

    /// Restrict dimension `dim` to the 0-based `range`.
    ///
    /// An empty range keeps its start as anchor, so the offset still points at
    /// the position the range was taken from.
    pub fn narrow(&self, dim: usize, range: Range<usize>) -> Self {
        let mut out = *self;
        out.offset = (self.offset as isize + range.start as isize * self.strides[dim]) as usize;
        out.size[dim] = range.end.saturating_sub(range.start);
        out
    }
}

impl Layout<2> {
    /// The 0-based `row` as a 1-D layout.
    pub fn row(&self, row: usize) -> Layout<1> {
        Layout {
            size: [self.size[1]],
            strides: [self.strides[1]],
            offset: (self.offset as isize + row as isize * self.strides[0]) as usize,
        }
    }

    /// The 0-based `col` as a 1-D layout.
    pub fn col(&self, col: usize) -> Layout<1> {
        Layout {
            size: [self.size[0]],
            strides: [self.strides[0]],
            offset: (self.offset as isize + col as isize * self.strides[1]) as usize,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.size[0]
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.size[1]
    }
}

/// Validate that every offset a layout can produce stays within `[0, len)`.
pub(crate) fn validate_bounds<const N: usize>(len: usize, layout: &Layout<N>) -> Result<()> {
    if layout.is_empty() {
        // Empty array, no bounds to check
        return Ok(());
    }

    let mut min_offset = layout.offset as isize;
    let mut max_offset = layout.offset as isize;
    for i in 0..N {
        let end = layout.strides[i]
            .checked_mul(layout.size[i] as isize - 1)
            .ok_or(IndexError::OffsetOverflow)?;
        if end >= 0 {
            max_offset = max_offset
                .checked_add(end)
                .ok_or(IndexError::OffsetOverflow)?;
        } else {
            min_offset = min_offset
                .checked_add(end)
                .ok_or(IndexError::OffsetOverflow)?;
        }
    }

    if min_offset < 0 || max_offset as usize >= len {
        return Err(IndexError::OffsetOverflow);
    }
    Ok(())
}

// ============================================================================
// StridedArrayView
// ============================================================================

/// An immutable strided view over borrowed storage.
///
/// # Type Parameters
/// - `'a`: Lifetime of the underlying data
/// - `T`: Element type
/// - `N`: Number of dimensions (const generic)
///
/// # Example
/// ```
/// use strided_rvalue::StridedArrayView;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let view = StridedArrayView::new(&data, [2, 3], [3, 1], 0).unwrap();
/// assert_eq!(*view.get([1, 2]), 6.0);
/// ```
#[derive(Debug)]
pub struct StridedArrayView<'a, T, const N: usize> {
    data: &'a [T],
    layout: Layout<N>,
}

impl<T, const N: usize> Clone for StridedArrayView<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for StridedArrayView<'_, T, N> {}

impl<'a, T, const N: usize> StridedArrayView<'a, T, N> {
    /// Create a new strided view.
    ///
    /// # Errors
    /// Returns [`IndexError::OffsetOverflow`] if the view would access out-of-bounds memory.
    pub fn new(data: &'a [T], size: [usize; N], strides: [isize; N], offset: usize) -> Result<Self> {
        Self::with_layout(data, Layout::new(size, strides, offset))
    }

    /// Create a view from a layout, checking it against `data`.
    pub fn with_layout(data: &'a [T], layout: Layout<N>) -> Result<Self> {
        validate_bounds(data.len(), &layout)?;
        Ok(Self { data, layout })
    }

    /// Create a view from a layout already known to fit `data`.
    #[inline]
    pub(crate) fn from_layout(data: &'a [T], layout: Layout<N>) -> Self {
        debug_assert!(validate_bounds(data.len(), &layout).is_ok());
        Self { data, layout }
    }

    #[inline]
    pub fn layout(&self) -> Layout<N> {
        self.layout
    }

    /// Returns the size of each dimension.
    #[inline]
    pub fn size(&self) -> &[usize; N] {
        &self.layout.size
    }

    /// Returns the stride for each dimension.
    #[inline]
    pub fn strides(&self) -> &[isize; N] {
        &self.layout.strides
    }

    /// Returns the starting offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.layout.offset
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    /// Returns true if the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Returns the whole underlying storage, not just the viewed part.
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Get a reference to the element at a 0-based index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, indices: [usize; N]) -> &'a T {
        for i in 0..N {
            assert!(indices[i] < self.layout.size[i], "index out of bounds");
        }
        &self.data[self.layout.offset_of(&indices)]
    }

    /// Check if the view is contiguous in memory (row-major order).
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Returns an iterator over the elements in row-major order.
    pub fn iter(&self) -> StridedIter<'a, T, N> {
        StridedIter {
            data: self.data,
            layout: self.layout,
            indices: [0; N],
            exhausted: self.is_empty(),
        }
    }
}

impl<'a, T: Clone, const N: usize> StridedArrayView<'a, T, N> {
    /// Copy the viewed elements out in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Copy the viewed elements into a new dense array of the same size.
    pub fn to_owned(&self) -> StridedArray<T, N> {
        StridedArray::from_parts(self.to_vec(), self.layout.size)
    }
}

impl<'a, T> StridedArrayView<'a, T, 1> {
    /// Get the contiguous slice if the view has stride 1.
    pub fn as_slice(&self) -> Option<&'a [T]> {
        if self.layout.size[0] == 0 {
            return Some(&[]);
        }
        if self.layout.strides[0] == 1 || self.layout.size[0] == 1 {
            let start = self.layout.offset;
            Some(&self.data[start..start + self.layout.size[0]])
        } else {
            None
        }
    }
}

impl<'a, T> StridedArrayView<'a, T, 2> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.layout.size[0]
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.layout.size[1]
    }

    /// Select a single 0-based row.
    pub fn row(&self, row: usize) -> StridedArrayView<'a, T, 1> {
        assert!(row < self.layout.size[0], "row index out of bounds");
        StridedArrayView::from_layout(self.data, self.layout.row(row))
    }

    /// Select a single 0-based column.
    pub fn col(&self, col: usize) -> StridedArrayView<'a, T, 1> {
        assert!(col < self.layout.size[1], "column index out of bounds");
        StridedArrayView::from_layout(self.data, self.layout.col(col))
    }
}

// ============================================================================
// Iterator support
// ============================================================================

/// Iterator over elements of a [`StridedArrayView`] in row-major order.
pub struct StridedIter<'a, T, const N: usize> {
    data: &'a [T],
    layout: Layout<N>,
    indices: [usize; N],
    exhausted: bool,
}

impl<'a, T, const N: usize> Iterator for StridedIter<'a, T, N> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let value = &self.data[self.layout.offset_of(&self.indices)];

        // Advance indices (row-major order: last index changes fastest)
        let mut carry = true;
        for i in (0..N).rev() {
            if carry {
                self.indices[i] += 1;
                if self.indices[i] < self.layout.size[i] {
                    carry = false;
                } else {
                    self.indices[i] = 0;
                }
            }
        }

        if carry {
            self.exhausted = true;
        }

        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }

        let mut done = 0usize;
        let mut multiplier = 1usize;
        for i in (0..N).rev() {
            done += self.indices[i] * multiplier;
            multiplier *= self.layout.size[i];
        }

        let remaining = self.layout.len().saturating_sub(done);
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for StridedIter<'_, T, N> {}

// ============================================================================
// StridedArray
// ============================================================================

/// Owned, dense, row-major N-dimensional array.
///
/// `StridedArray<T, 1>` is the vector container and `StridedArray<T, 2>` the
/// matrix container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StridedArray<T, const N: usize> {
    data: Vec<T>,
    size: [usize; N],
}

impl<T, const N: usize> StridedArray<T, N> {
    /// Wrap row-major `data` of the given `size`.
    ///
    /// # Errors
    /// Returns [`IndexError::ShapeMismatch`] if `data.len()` is not the product of `size`.
    pub fn from_vec(data: Vec<T>, size: [usize; N]) -> Result<Self> {
        if data.len() != size.iter().product::<usize>() {
            return Err(IndexError::ShapeMismatch {
                size: size.to_vec(),
                len: data.len(),
            });
        }
        Ok(Self { data, size })
    }

    #[inline]
    pub(crate) fn from_parts(data: Vec<T>, size: [usize; N]) -> Self {
        debug_assert_eq!(data.len(), size.iter().product::<usize>());
        Self { data, size }
    }

    /// Create an array with values produced by a function of the 0-based index.
    ///
    /// The function is called with indices in row-major iteration order.
    pub fn from_fn_row_major(size: [usize; N], mut f: impl FnMut([usize; N]) -> T) -> Self {
        let total: usize = size.iter().product();
        let mut data = Vec::with_capacity(total);
        let mut idx = [0usize; N];
        for _ in 0..total {
            data.push(f(idx));
            for d in (0..N).rev() {
                idx[d] += 1;
                if idx[d] < size[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
        Self { data, size }
    }

    #[inline]
    pub fn size(&self) -> &[usize; N] {
        &self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn layout(&self) -> Layout<N> {
        Layout::row_major(self.size)
    }

    /// The storage in row-major order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Create an immutable view over this array.
    pub fn view(&self) -> StridedArrayView<'_, T, N> {
        StridedArrayView::from_layout(&self.data, self.layout())
    }

    /// Get a reference to the element at a 0-based index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, indices: [usize; N]) -> &T {
        self.view().get(indices)
    }

    /// Iterate over all elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> From<Vec<T>> for StridedArray<T, 1> {
    fn from(data: Vec<T>) -> Self {
        let size = [data.len()];
        Self { data, size }
    }
}

impl<T> StridedArray<T, 2> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.size[0]
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.size[1]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_row_major_strides() {
        assert_eq!(row_major_strides(&[3, 4]), [4, 1]);
        assert_eq!(row_major_strides(&[2, 3, 4]), [12, 4, 1]);
        assert_eq!(row_major_strides(&[5]), [1]);
    }

    #[test]
    fn test_strided_view_new() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = StridedArrayView::new(&data, [2, 3], [3, 1], 0).unwrap();
        assert_eq!(view.size(), &[2, 3]);
        assert_eq!(view.strides(), &[3, 1]);
        assert_eq!(view.len(), 6);
        assert!(view.is_contiguous());
    }

    #[test]
    fn test_strided_view_out_of_bounds() {
        let data = vec![1.0, 2.0, 3.0];
        assert_eq!(
            StridedArrayView::new(&data, [2, 2], [2, 1], 0).unwrap_err(),
            IndexError::OffsetOverflow
        );
        // empty views never touch memory
        assert!(StridedArrayView::new(&data, [0, 9], [9, 1], 99).is_ok());
    }

    #[test]
    fn test_strided_view_get() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = StridedArrayView::new(&data, [2, 3], [3, 1], 0).unwrap();
        assert_eq!(*view.get([0, 0]), 1.0);
        assert_eq!(*view.get([0, 2]), 3.0);
        assert_eq!(*view.get([1, 0]), 4.0);
        assert_eq!(*view.get([1, 2]), 6.0);
    }

    #[test]
    fn test_strided_view_row_col() {
        let a = StridedArray::from_fn_row_major([3, 4], |[i, j]| (i * 4 + j) as f64);
        let v = a.view();
        assert_eq!(v.row(1).to_vec(), vec![4.0, 5.0, 6.0, 7.0]);
        assert_eq!(v.col(2).to_vec(), vec![2.0, 6.0, 10.0]);
        assert_eq!(v.row(1).as_slice(), Some(&[4.0, 5.0, 6.0, 7.0][..]));
        assert_eq!(v.col(2).as_slice(), None);
    }

    #[test]
    fn test_layout_narrow() {
        let layout = Layout::row_major([4, 5]);
        let block = layout.narrow(0, 1..3).narrow(1, 2..5);
        assert_eq!(block.size(), &[2, 3]);
        assert_eq!(block.offset(), 7);
        assert!(!block.is_contiguous());
        let empty = layout.narrow(1, 4..4);
        assert_eq!(empty.size(), &[4, 0]);
        assert_eq!(empty.offset(), 4);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_layout_covers() {
        assert!(Layout::row_major([3, 2]).covers(6));
        assert!(!Layout::row_major([3, 2]).narrow(0, 1..3).covers(6));
        assert!(Layout::row_major([3, 2]).narrow(0, 0..3).covers(6));
        assert!(Layout::row_major([0]).covers(0));
    }

    #[test]
    fn test_iter_size_hint() {
        let a = StridedArray::from_fn_row_major([3, 3], |[i, j]| i * 3 + j);
        let v = StridedArrayView::with_layout(a.data(), a.layout().narrow(1, 1..3)).unwrap();
        let mut it = v.iter();
        assert_eq!(it.len(), 6);
        it.next();
        assert_eq!(it.len(), 5);
        assert_eq!(it.copied().collect::<Vec<_>>(), vec![2, 4, 5, 7, 8]);
    }

    #[test]
    fn test_array_from_vec_shape_mismatch() {
        let err = StridedArray::from_vec(vec![1, 2, 3], [2, 2]).unwrap_err();
        assert_eq!(
            err,
            IndexError::ShapeMismatch {
                size: vec![2, 2],
                len: 3
            }
        );
        assert!(err.to_string().contains("needs 4 elements"));
    }

    #[test]
    fn test_array_complex_elements() {
        let a = StridedArray::from_fn_row_major([2, 2], |[i, j]| {
            Complex64::new(i as f64, j as f64)
        });
        assert_eq!(*a.get([1, 0]), Complex64::new(1.0, 0.0));
        assert_eq!(
            a.view().col(1).to_vec(),
            vec![Complex64::new(0.0, 1.0), Complex64::new(1.0, 1.0)]
        );
    }
}
