//! Index descriptors.
//!
//! All descriptor values are 1-based and unchecked: they are validated against
//! the extent of the axis they are applied to, at the moment they are applied.

use std::ops::Range;

use crate::check::{check_multi, check_range, out_of_range, Axis};
use crate::Result;

/// Which positions along one axis are selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Index {
    /// A single position; reduces the axis.
    Uni(isize),
    /// Positions in the order listed. Duplicates are allowed.
    Multi(Vec<isize>),
    /// Every position.
    Omni,
    /// Positions `min..=extent`.
    Min(isize),
    /// Positions `1..=max`. Empty when `max <= 0`.
    Max(isize),
    /// Positions `min..=max`. Empty when `max < min`.
    MinMax(isize, isize),
}

impl Index {
    /// Short descriptor label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Index::Uni(_) => "uni",
            Index::Multi(_) => "multi",
            Index::Omni => "omni",
            Index::Min(_) => "min",
            Index::Max(_) => "max",
            Index::MinMax(..) => "min_max",
        }
    }

    /// Number of positions selected against an axis of `extent`.
    ///
    /// No bounds checking is done; an out-of-range `Min` counts as empty and
    /// counts too large for `isize` saturate.
    pub fn size(&self, extent: usize) -> usize {
        self.signed_size(extent).max(0) as usize
    }

    /// Position count before clamping: negative only for a `Min` starting past `extent + 1`.
    fn signed_size(&self, extent: usize) -> isize {
        let extent = isize::try_from(extent).unwrap_or(isize::MAX);
        match *self {
            Index::Uni(_) => 1,
            Index::Multi(ref ns) => isize::try_from(ns.len()).unwrap_or(isize::MAX),
            Index::Omni => extent,
            Index::Min(min) => extent.saturating_sub(min).saturating_add(1),
            Index::Max(max) => max,
            Index::MinMax(min, max) if max < min => 0,
            Index::MinMax(min, max) => max.saturating_sub(min).saturating_add(1),
        }
    }

    /// 1-based position of the `i`-th selected element (0-based `i`).
    ///
    /// # Panics
    /// Panics if `i` is outside a `Multi`'s list.
    pub fn at(&self, i: usize) -> isize {
        match *self {
            Index::Uni(n) => n,
            Index::Multi(ref ns) => ns[i],
            Index::Omni | Index::Max(_) => i as isize + 1,
            Index::Min(min) | Index::MinMax(min, _) => min + i as isize,
        }
    }

    /// Iterate the 1-based positions selected against an axis of `extent`.
    pub fn positions(&self, extent: usize) -> impl Iterator<Item = isize> + '_ {
        (0..self.size(extent)).map(move |i| self.at(i))
    }

    /// Validate the descriptor against `extent` and convert it to 0-based positions.
    ///
    /// Only the endpoints a selection actually uses are checked: `Max(<= 0)`
    /// checks nothing, `MinMax` with `max < min` checks only `min`.
    pub(crate) fn span(&self, axis: Axis, name: &str, extent: usize) -> Result<Span> {
        Ok(match *self {
            Index::Uni(n) => Span::At(check_range(axis, "uni", name, extent, n)?),
            Index::Multi(ref ns) => Span::Pick(check_multi(axis, name, extent, ns)?),
            Index::Omni => Span::Range(0..extent),
            Index::Min(min) => {
                let start = check_range(axis, "min", name, extent, min)?;
                Span::Range(start..extent)
            }
            Index::Max(max) => {
                if max > 0 {
                    let last = check_range(axis, "max", name, extent, max)?;
                    Span::Range(0..last + 1)
                } else {
                    Span::Range(0..0)
                }
            }
            Index::MinMax(min, max) => {
                let start = check_range(axis, "min_max min", name, extent, min)?;
                if max >= min {
                    let last = check_range(axis, "min_max max", name, extent, max)?;
                    Span::Range(start..last + 1)
                } else {
                    Span::Range(start..start)
                }
            }
        })
    }

    /// Validate the positions a list selection visits, one at a time, in order.
    ///
    /// Unlike [`Index::span`], an empty selection checks nothing (`MinMax(5, 3)`
    /// and `Min(5)` on four elements are both empty), and a run that overshoots
    /// the list fails at the first position past its end.
    pub(crate) fn list_span(&self, name: &str, extent: usize) -> Result<Span> {
        let axis = Axis::Array;
        let kind = self.kind();
        match *self {
            Index::Uni(n) => return Ok(Span::At(check_range(axis, kind, name, extent, n)?)),
            Index::Multi(ref ns) => return Ok(Span::Pick(check_multi(axis, name, extent, ns)?)),
            _ => {}
        }

        let size = self.signed_size(extent);
        if size < 0 {
            return Err(out_of_range(axis, kind, name, extent, self.at(0)));
        }
        if size == 0 {
            return Ok(Span::Range(0..0));
        }
        let first = check_range(axis, kind, name, extent, self.at(0))?;
        // positions are consecutive, so the first one past the end is extent + 1
        let last = self.at(size as usize - 1);
        if last as usize > extent {
            return Err(out_of_range(axis, kind, name, extent, extent as isize + 1));
        }
        Ok(Span::Range(first..last as usize))
    }
}

/// Validated 0-based selection along one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Span {
    /// One position; callers that reduce rank handle this themselves.
    At(usize),
    /// A contiguous run.
    Range(Range<usize>),
    /// Explicit positions, possibly repeated or unordered.
    Pick(Vec<usize>),
}

impl Span {
    pub(crate) fn len(&self) -> usize {
        match self {
            Span::At(_) => 1,
            Span::Range(r) => r.len(),
            Span::Pick(ps) => ps.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IndexError;

    #[test]
    fn test_size_and_at() {
        assert_eq!(Index::Uni(3).size(10), 1);
        assert_eq!(Index::Multi(vec![3, 1, 3]).size(10), 3);
        assert_eq!(Index::Omni.size(4), 4);
        assert_eq!(Index::Min(2).size(4), 3);
        assert_eq!(Index::Min(6).size(4), 0);
        assert_eq!(Index::Max(0).size(4), 0);
        assert_eq!(Index::Max(-3).size(4), 0);
        assert_eq!(Index::MinMax(2, 3).size(4), 2);
        assert_eq!(Index::MinMax(5, 3).size(4), 0);

        assert_eq!(Index::Min(2).positions(4).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(Index::Max(2).positions(4).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            Index::Multi(vec![3, 1, 3]).positions(4).collect::<Vec<_>>(),
            vec![3, 1, 3]
        );
        assert_eq!(Index::MinMax(1, 0).positions(4).count(), 0);
    }

    #[test]
    fn test_span_ranges() {
        assert_eq!(Index::Omni.span(Axis::Vector, "v", 4), Ok(Span::Range(0..4)));
        assert_eq!(Index::Min(2).span(Axis::Vector, "v", 4), Ok(Span::Range(1..4)));
        assert_eq!(Index::Max(3).span(Axis::Vector, "v", 4), Ok(Span::Range(0..3)));
        assert_eq!(Index::Max(0).span(Axis::Vector, "v", 4), Ok(Span::Range(0..0)));
        assert_eq!(
            Index::MinMax(2, 3).span(Axis::Vector, "v", 4),
            Ok(Span::Range(1..3))
        );
        assert_eq!(
            Index::MinMax(4, 2).span(Axis::Vector, "v", 4),
            Ok(Span::Range(3..3))
        );
        assert_eq!(
            Index::Multi(vec![2, 2]).span(Axis::Vector, "v", 4),
            Ok(Span::Pick(vec![1, 1]))
        );
    }

    #[test]
    fn test_span_checks_only_used_endpoints() {
        // max < min: the max endpoint is never touched, so it is not checked
        assert!(Index::MinMax(2, -100).span(Axis::Vector, "v", 4).is_ok());
        // the min endpoint is always checked
        assert!(Index::MinMax(5, 3).span(Axis::Vector, "v", 4).is_err());
        assert!(Index::Max(-1).span(Axis::Vector, "v", 0).is_ok());

        match Index::MinMax(2, 9).span(Axis::Row, "m", 4) {
            Err(IndexError::OutOfRange { kind, index, .. }) => {
                assert_eq!(kind, "min_max max");
                assert_eq!(index, 9);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_size_saturates_at_extremes() {
        assert_eq!(Index::MinMax(isize::MIN, 0).size(4), isize::MAX as usize);
        assert_eq!(Index::MinMax(0, isize::MAX).size(4), isize::MAX as usize);
        assert_eq!(Index::MinMax(isize::MAX, isize::MIN).size(4), 0);
        assert_eq!(Index::MinMax(isize::MIN, isize::MIN).size(4), 1);
        assert_eq!(Index::Min(isize::MIN).size(4), isize::MAX as usize);
        assert_eq!(Index::Min(isize::MAX).size(4), 0);
        assert_eq!(Index::Max(isize::MIN).size(4), 0);
        assert_eq!(Index::Max(isize::MAX).size(4), isize::MAX as usize);
        assert_eq!(Index::MinMax(isize::MIN, 0).positions(4).next(), Some(isize::MIN));
    }

    fn list_err(index: Index, extent: usize) -> (&'static str, isize) {
        match index.list_span("a", extent) {
            Err(IndexError::OutOfRange {
                axis, kind, index, ..
            }) => {
                assert_eq!(axis, Axis::Array);
                (kind, index)
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_list_span_empty_selections_check_nothing() {
        assert_eq!(Index::MinMax(5, 3).list_span("a", 4), Ok(Span::Range(0..0)));
        assert_eq!(Index::Min(5).list_span("a", 4), Ok(Span::Range(0..0)));
        assert_eq!(Index::Max(-2).list_span("a", 4), Ok(Span::Range(0..0)));
        assert_eq!(Index::MinMax(9, -9).list_span("a", 0), Ok(Span::Range(0..0)));
        assert_eq!(Index::Omni.list_span("a", 0), Ok(Span::Range(0..0)));
    }

    #[test]
    fn test_list_span_ranges() {
        assert_eq!(Index::Min(2).list_span("a", 4), Ok(Span::Range(1..4)));
        assert_eq!(Index::Max(3).list_span("a", 4), Ok(Span::Range(0..3)));
        assert_eq!(Index::MinMax(2, 2).list_span("a", 4), Ok(Span::Range(1..2)));
        assert_eq!(Index::Omni.list_span("a", 4), Ok(Span::Range(0..4)));
        assert_eq!(Index::Uni(4).list_span("a", 4), Ok(Span::At(3)));
        assert_eq!(
            Index::Multi(vec![4, 4]).list_span("a", 4),
            Ok(Span::Pick(vec![3, 3]))
        );
    }

    #[test]
    fn test_list_span_reports_first_bad_position() {
        // Min past extent + 1 selects a negative count
        assert_eq!(list_err(Index::Min(6), 4), ("min", 6));
        assert_eq!(list_err(Index::Min(0), 4), ("min", 0));
        assert_eq!(list_err(Index::Max(6), 4), ("max", 5));
        assert_eq!(list_err(Index::MinMax(0, 2), 4), ("min_max", 0));
        assert_eq!(list_err(Index::MinMax(3, 9), 4), ("min_max", 5));
        assert_eq!(list_err(Index::MinMax(isize::MIN, 0), 4), ("min_max", isize::MIN));
        assert_eq!(list_err(Index::Max(isize::MAX), 4), ("max", 5));
        assert_eq!(list_err(Index::Uni(5), 4), ("uni", 5));
        assert_eq!(list_err(Index::Multi(vec![1, 0, 9]), 4), ("multi", 0));
    }
}
