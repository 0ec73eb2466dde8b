//! Resolution of (row, column) descriptor pairs against a two-dimensional container.
//!
//! The rule table, in dispatch order:
//!
//! | rows \ cols      | result                                                   |
//! |------------------|----------------------------------------------------------|
//! | `Omni`, `Omni`   | the matrix itself                                        |
//! | `Uni`, any       | row vector: vector rules along the selected row          |
//! | any, `Uni`       | column vector: vector rules along the selected column    |
//! | `Multi`, `Multi` | gathered copy, rows and columns in the listed order      |
//! | `Multi` on one axis | columns first, then rows on the intermediate          |
//! | range, range     | contiguous block view (either axis may be empty)         |
//!
//! Every index of a selection is validated before any plan is applied. Columns
//! are checked before rows, except that `m[i, ..]` and `Multi x Multi` check rows
//! first, and a `MinMax` block checks both lower endpoints before either upper
//! one.

use log::trace;

use crate::check::{check_multi, check_range, Axis};
use crate::index::{Index, Span};
use crate::rvalue::{gather, select, Plan, Rvalue};
use crate::value::Resolved;
use crate::vector::resolve_along;
use crate::Result;

/// Index a matrix with a row descriptor only; all columns are kept.
///
/// `m[i]` is a row vector, `m[{..}]` gathers rows, ranges give a block of rows.
pub fn rvalue_matrix_rows<'a, T: Clone>(
    m: Rvalue<'a, T, 2>,
    name: &str,
    rows: &Index,
) -> Result<Resolved<'a, T>> {
    rvalue_matrix(m, name, rows, &Index::Omni)
}

/// Index a matrix with a row and a column descriptor.
///
/// # Example
/// ```
/// use strided_rvalue::{rvalue_matrix, Index, StridedArray};
///
/// let m = StridedArray::from_fn_row_major([3, 3], |[i, j]| 10 * (i + 1) + j + 1);
/// let col = rvalue_matrix(m.view().into(), "m", &Index::Min(2), &Index::Uni(3)).unwrap();
/// assert_eq!(col.into_vector().unwrap().to_vec(), vec![23, 33]);
/// ```
pub fn rvalue_matrix<'a, T: Clone>(
    m: Rvalue<'a, T, 2>,
    name: &str,
    rows: &Index,
    cols: &Index,
) -> Result<Resolved<'a, T>> {
    let layout = m.layout();
    let (nrows, ncols) = (layout.nrows(), layout.ncols());
    trace!(
        "matrix[{}, {}] on `{name}` of size {nrows}x{ncols}",
        rows.kind(),
        cols.kind()
    );

    match (rows, cols) {
        (Index::Omni, Index::Omni) => Ok(Resolved::Matrix(m)),
        (Index::Uni(r), _) => {
            let r = check_range(Axis::Row, "uni", name, nrows, *r)?;
            resolve_along(m.apply(Plan::Slice(layout.row(r))), Axis::Column, name, cols)
        }
        (_, Index::Uni(c)) => {
            let c = check_range(Axis::Column, "uni", name, ncols, *c)?;
            resolve_along(m.apply(Plan::Slice(layout.col(c))), Axis::Row, name, rows)
        }
        (Index::Multi(rs), Index::Multi(cs)) => {
            let rs = check_multi(Axis::Row, name, nrows, rs)?;
            let cs = check_multi(Axis::Column, name, ncols, cs)?;
            let plan = gather(&layout, [Some(rs.as_slice()), Some(cs.as_slice())]);
            Ok(Resolved::Matrix(m.apply(plan)))
        }
        (Index::Multi(_), _) | (_, Index::Multi(_)) => {
            // Columns first against the full matrix, then rows on the intermediate.
            // Selecting columns leaves the row extent alone, so the row span is
            // validated up front as well.
            let cs = cols.span(Axis::Column, name, ncols)?;
            let rs = rows.span(Axis::Row, name, nrows)?;
            Ok(Resolved::Matrix(select_both(m, (1, cs), (0, rs))))
        }
        (Index::MinMax(r0, _), Index::MinMax(c0, _)) => {
            // both lower endpoints before either upper one
            check_range(Axis::Row, "min_max min", name, nrows, *r0)?;
            check_range(Axis::Column, "min_max min", name, ncols, *c0)?;
            let rs = rows.span(Axis::Row, name, nrows)?;
            let cs = cols.span(Axis::Column, name, ncols)?;
            Ok(Resolved::Matrix(select_both(m, (0, rs), (1, cs))))
        }
        _ => {
            let cs = cols.span(Axis::Column, name, ncols)?;
            let rs = rows.span(Axis::Row, name, nrows)?;
            Ok(Resolved::Matrix(select_both(m, (0, rs), (1, cs))))
        }
    }
}

/// Apply two validated single-axis selections, in order.
fn select_both<'a, T: Clone>(
    m: Rvalue<'a, T, 2>,
    (dim_a, span_a): (usize, Span),
    (dim_b, span_b): (usize, Span),
) -> Rvalue<'a, T, 2> {
    let layout = m.layout();
    let m = m.apply(select(&layout, dim_a, span_a));
    let layout = m.layout();
    m.apply(select(&layout, dim_b, span_b))
}
