//! Resolution of one descriptor against a one-dimensional container.

use log::trace;

use crate::check::Axis;
use crate::index::{Index, Span};
use crate::rvalue::{select, Rvalue};
use crate::value::Resolved;
use crate::Result;

/// Index a vector with a single descriptor.
///
/// | descriptor   | result                                    |
/// |--------------|-------------------------------------------|
/// | `Uni`        | scalar                                    |
/// | `Omni`       | the vector itself                         |
/// | `Multi`      | gathered copy in the listed order         |
/// | `Min`, `Max`, `MinMax` | contiguous view (possibly empty) |
///
/// # Example
/// ```
/// use strided_rvalue::{rvalue_vector, Index, StridedArray};
///
/// let v = StridedArray::from(vec![10, 20, 30, 40]);
/// let picked = rvalue_vector(v.view().into(), "v", &Index::Multi(vec![3, 1, 3])).unwrap();
/// assert_eq!(picked.into_vector().unwrap().to_vec(), vec![30, 10, 30]);
/// ```
pub fn rvalue_vector<'a, T: Clone>(
    v: Rvalue<'a, T, 1>,
    name: &str,
    index: &Index,
) -> Result<Resolved<'a, T>> {
    resolve_along(v, Axis::Vector, name, index)
}

/// Vector rules applied along a 1-D rvalue, reporting errors against `axis`.
///
/// The matrix resolver uses this for a selected row (`Axis::Column`) or a
/// selected column (`Axis::Row`).
pub(crate) fn resolve_along<'a, T: Clone>(
    v: Rvalue<'a, T, 1>,
    axis: Axis,
    name: &str,
    index: &Index,
) -> Result<Resolved<'a, T>> {
    trace!("{axis}[{}] on `{name}` of length {}", index.kind(), v.len());
    if let Index::Omni = index {
        return Ok(Resolved::Vector(v));
    }

    let layout = v.layout();
    match index.span(axis, name, layout.size()[0])? {
        Span::At(i) => Ok(Resolved::Scalar(v.element(layout.offset_of(&[i])))),
        span => Ok(Resolved::Vector(v.apply(select(&layout, 0, span)))),
    }
}
