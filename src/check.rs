//! Bounds validation for 1-based indices.

use std::fmt;

use crate::{IndexError, Result};

/// The axis (or nesting level) an index applies to, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The single axis of a vector.
    Vector,
    /// The row axis of a matrix.
    Row,
    /// The column axis of a matrix.
    Column,
    /// One level of a nested array.
    Array,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Vector => "vector",
            Axis::Row => "matrix row",
            Axis::Column => "matrix column",
            Axis::Array => "array",
        })
    }
}

/// Check a 1-based `index` against `extent` and return its 0-based position.
///
/// `axis` and `kind` name the operation (e.g. `matrix column` / `min_max max`),
/// `name` is the source-level variable label. Fails with
/// [`IndexError::OutOfRange`] when `index < 1` or `index > extent`.
#[inline]
pub fn check_range(
    axis: Axis,
    kind: &'static str,
    name: &str,
    extent: usize,
    index: isize,
) -> Result<usize> {
    if index >= 1 && index as usize <= extent {
        Ok(index as usize - 1)
    } else {
        Err(out_of_range(axis, kind, name, extent, index))
    }
}

#[inline]
pub(crate) fn out_of_range(
    axis: Axis,
    kind: &'static str,
    name: &str,
    extent: usize,
    index: isize,
) -> IndexError {
    IndexError::OutOfRange {
        axis,
        kind,
        name: name.to_owned(),
        extent,
        index,
    }
}

/// Check every entry of a multi-index in order.
///
/// The first out-of-range entry is the one reported. Returns the 0-based
/// positions in the order given.
pub fn check_multi(axis: Axis, name: &str, extent: usize, ns: &[isize]) -> Result<Vec<usize>> {
    ns.iter()
        .map(|&n| check_range(axis, "multi", name, extent, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_bounds() {
        assert_eq!(check_range(Axis::Vector, "uni", "v", 3, 1), Ok(0));
        assert_eq!(check_range(Axis::Vector, "uni", "v", 3, 3), Ok(2));
        assert!(check_range(Axis::Vector, "uni", "v", 3, 0).is_err());
        assert!(check_range(Axis::Vector, "uni", "v", 3, 4).is_err());
        assert!(check_range(Axis::Vector, "uni", "v", 3, -2).is_err());
        assert!(check_range(Axis::Vector, "uni", "v", 0, 1).is_err());
    }

    #[test]
    fn test_check_range_error_fields() {
        let err = check_range(Axis::Column, "min_max max", "m", 4, 7).unwrap_err();
        assert_eq!(
            err,
            IndexError::OutOfRange {
                axis: Axis::Column,
                kind: "min_max max",
                name: "m".to_string(),
                extent: 4,
                index: 7,
            }
        );
        let msg = err.to_string();
        assert!(msg.starts_with("matrix column[min_max max] indexing"));
        assert!(msg.contains("index 7 out of range"));
        assert!(msg.contains("between 1 and 4"));
    }

    #[test]
    fn test_check_multi_reports_first_bad_entry() {
        assert_eq!(check_multi(Axis::Array, "a", 4, &[4, 1, 1]), Ok(vec![3, 0, 0]));
        match check_multi(Axis::Array, "a", 4, &[2, 9, 0]) {
            Err(IndexError::OutOfRange { index, .. }) => assert_eq!(index, 9),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
