//! 1-based subscript resolution over strided vectors, matrices and nested arrays.
//!
//! This crate is the runtime side of array subscripting for a modeling language:
//! given a base container and a sequence of index descriptors (`a[i]`, `a[2:5]`,
//! `a[{3, 1, 4}]`, `m[i, j]`, `m[:, 2:4]`, `a[i][j:k]`) it decides *which* elements
//! are selected and *how* they are handed back: as a scalar, as a zero-copy strided
//! view, or as a materialized copy.
//!
//! # Core Types
//!
//! - [`Index`]: The six descriptor kinds (`Uni`, `Multi`, `Omni`, `Min`, `Max`, `MinMax`)
//! - [`StridedArray`] / [`StridedArrayView`]: Owned row-major storage and borrowed strided views
//! - [`Rvalue`]: An intermediate 1-D/2-D result that is a view, an owned copy, or a [`Holder`]
//! - [`Value`] / [`Operand`] / [`Resolved`]: The dynamic container model, the ownership
//!   parameter at the call boundary, and the resolution result
//!
//! # Primary API
//!
//! - [`resolve`]: Resolve any descriptor sequence against any [`Value`]
//! - [`rvalue_vector`]: Resolve one descriptor against a vector
//! - [`rvalue_matrix`]: Resolve a (row, column) descriptor pair against a matrix
//! - [`check_range`]: The bounds validator shared by all resolvers
//!
//! # Example
//!
//! ```rust
//! use strided_rvalue::{resolve, Index, StridedArray, Value};
//!
//! // 4x4 matrix with m[i, j] = 10 * i + j (1-based)
//! let m = Value::Matrix(StridedArray::from_fn_row_major([4, 4], |[i, j]| {
//!     10 * (i as i64 + 1) + (j as i64 + 1)
//! }));
//!
//! let block = resolve(&m, "m", &[Index::MinMax(2, 3), Index::MinMax(2, 3)]).unwrap();
//! let block = block.into_matrix().unwrap();
//! assert!(block.is_view());
//! assert_eq!(block.to_vec(), vec![22, 23, 32, 33]);
//! ```
//!
//! # Views and ownership
//!
//! A borrowed base (`&Value`, [`Rvalue::View`]) yields views that borrow it. An owned
//! base (`Value`, [`Rvalue::Owned`]) is consumed: contiguous selections move its
//! storage into a [`Holder`] together with the view layout, so a view into a
//! temporary can be returned without copying and without outliving its storage.

mod check;
mod holder;
mod index;
mod matrix;
mod nested;
mod rvalue;
mod value;
mod vector;
pub mod view;

// ============================================================================
// Descriptors and validation
// ============================================================================
pub use check::{check_multi, check_range, Axis};
pub use index::Index;

// ============================================================================
// Storage
// ============================================================================
pub use holder::Holder;
pub use view::{row_major_strides, Layout, StridedArray, StridedArrayView, StridedIter};

// ============================================================================
// Resolution
// ============================================================================
pub use matrix::{rvalue_matrix, rvalue_matrix_rows};
pub use nested::resolve;
pub use rvalue::Rvalue;
pub use value::{Operand, Resolved, Value};
pub use vector::rvalue_vector;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while resolving an indexing expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// A 1-based index fell outside `1..=extent`.
    #[error(
        "{axis}[{kind}] indexing: accessing element out of range of `{name}`. \
         index {index} out of range; expecting index to be between 1 and {extent}"
    )]
    OutOfRange {
        axis: Axis,
        kind: &'static str,
        name: String,
        extent: usize,
        index: isize,
    },

    /// More descriptors were supplied than the container has axes or levels.
    #[error("{container} indexing: too many indexes for `{name}`: got {given}, expected at most {rank}")]
    TooManyIndexes {
        container: &'static str,
        name: String,
        rank: usize,
        given: usize,
    },

    /// Storage length does not match the requested shape.
    #[error("shape mismatch: size {size:?} needs {} elements, storage has {len}", .size.iter().product::<usize>())]
    ShapeMismatch { size: Vec<usize>, len: usize },

    /// A layout would address memory outside its storage.
    #[error("offset overflow: layout reaches outside its storage")]
    OffsetOverflow,
}

/// Result type for indexing operations.
pub type Result<T> = std::result::Result<T, IndexError>;
