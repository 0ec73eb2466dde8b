//! Resolution of a descriptor sequence against any [`Value`], level by level.
//!
//! A list consumes the head descriptor and resolves the tail against each
//! selected element. Vectors and matrices hand their descriptors to the typed
//! resolvers. The ownership of the base decides whether elements are borrowed,
//! moved or cloned:
//!
//! | list selection | borrowed base      | owned base              |
//! |----------------|--------------------|-------------------------|
//! | `Uni`          | element by ref     | element moved out       |
//! | ranges         | elements by ref    | contiguous run drained  |
//! | `Multi`        | elements by ref    | each element cloned     |
//!
//! List positions are checked as they are visited, so an empty range such as
//! `MinMax(5, 3)` or `Min(len + 1)` is never validated.

use std::borrow::Cow;

use log::trace;

use crate::index::{Index, Span};
use crate::matrix::{rvalue_matrix, rvalue_matrix_rows};
use crate::rvalue::Rvalue;
use crate::value::{Operand, Resolved, Value};
use crate::vector::rvalue_vector;
use crate::{IndexError, Result};

/// Resolve `indexes` against `base`.
///
/// Passing `&value` borrows it: ranges come back as views into `value`.
/// Passing `value` consumes it: nothing in the result borrows from the caller.
///
/// # Errors
/// [`IndexError::OutOfRange`] for the first index that falls outside its axis,
/// [`IndexError::TooManyIndexes`] when descriptors remain after a scalar, or a
/// vector or matrix is given more descriptors than it has axes.
///
/// # Example
/// ```
/// use strided_rvalue::{resolve, Index, StridedArray, Value};
///
/// let a = Value::List(vec![
///     Value::Vector(StridedArray::from(vec![1, 2])),
///     Value::Vector(StridedArray::from(vec![3, 4, 5])),
/// ]);
/// let x = resolve(&a, "a", &[Index::Uni(2), Index::Uni(3)]).unwrap();
/// assert_eq!(x.as_scalar(), Some(&5));
/// ```
pub fn resolve<'a, T: Clone>(
    base: impl Into<Operand<'a, T>>,
    name: &str,
    indexes: &[Index],
) -> Result<Resolved<'a, T>> {
    match base.into() {
        Operand::Owned(value) => resolve_owned(value, name, indexes),
        Operand::Borrowed(value) => resolve_borrowed(value, name, indexes),
    }
}

/// A non-list value, ready for the typed resolvers.
enum Leaf<'a, T: Clone> {
    Scalar(Cow<'a, T>),
    Vector(Rvalue<'a, T, 1>),
    Matrix(Rvalue<'a, T, 2>),
}

fn resolve_owned<'a, T: Clone>(
    value: Value<T>,
    name: &str,
    indexes: &[Index],
) -> Result<Resolved<'a, T>> {
    let shape = value.shape();
    let leaf = match value {
        Value::List(items) => return resolve_owned_list(items, name, indexes),
        Value::Scalar(x) => Leaf::Scalar(Cow::Owned(x)),
        Value::Vector(v) => Leaf::Vector(Rvalue::Owned(v)),
        Value::Matrix(m) => Leaf::Matrix(Rvalue::Owned(m)),
    };
    resolve_leaf(leaf, shape, name, indexes)
}

fn resolve_borrowed<'a, T: Clone>(
    value: &'a Value<T>,
    name: &str,
    indexes: &[Index],
) -> Result<Resolved<'a, T>> {
    let shape = value.shape();
    let leaf = match value {
        Value::List(items) => return resolve_borrowed_list(items, name, indexes),
        Value::Scalar(x) => Leaf::Scalar(Cow::Borrowed(x)),
        Value::Vector(v) => Leaf::Vector(Rvalue::View(v.view())),
        Value::Matrix(m) => Leaf::Matrix(Rvalue::View(m.view())),
    };
    resolve_leaf(leaf, shape, name, indexes)
}

fn resolve_leaf<'a, T: Clone>(
    leaf: Leaf<'a, T>,
    shape: &'static str,
    name: &str,
    indexes: &[Index],
) -> Result<Resolved<'a, T>> {
    match (leaf, indexes) {
        (Leaf::Scalar(x), []) => Ok(Resolved::Scalar(x)),
        (Leaf::Vector(v), []) => Ok(Resolved::Vector(v)),
        (Leaf::Vector(v), [index]) => rvalue_vector(v, name, index),
        (Leaf::Matrix(m), []) => Ok(Resolved::Matrix(m)),
        (Leaf::Matrix(m), [rows]) => rvalue_matrix_rows(m, name, rows),
        (Leaf::Matrix(m), [rows, cols]) => rvalue_matrix(m, name, rows, cols),
        (leaf, _) => {
            let rank = match leaf {
                Leaf::Scalar(_) => 0,
                Leaf::Vector(_) => 1,
                Leaf::Matrix(_) => 2,
            };
            Err(IndexError::TooManyIndexes {
                container: shape,
                name: name.to_owned(),
                rank,
                given: indexes.len(),
            })
        }
    }
}

fn resolve_owned_list<'a, T: Clone>(
    mut items: Vec<Value<T>>,
    name: &str,
    indexes: &[Index],
) -> Result<Resolved<'a, T>> {
    let Some((head, tail)) = indexes.split_first() else {
        return Ok(Resolved::from_value(Value::List(items)));
    };
    let span = head.list_span(name, items.len())?;
    trace!(
        "array[{}] on owned `{name}`: {} of {} elements, {} indexes left",
        head.kind(),
        span.len(),
        items.len(),
        tail.len()
    );

    match span {
        Span::At(i) => resolve_owned(items.swap_remove(i), name, tail),
        Span::Range(r) => items
            .drain(r)
            .map(|item| resolve_owned(item, name, tail))
            .collect::<Result<Vec<_>>>()
            .map(Resolved::List),
        // positions may repeat, so every pick gets its own copy
        Span::Pick(ps) => ps
            .iter()
            .map(|&p| resolve_owned(items[p].clone(), name, tail))
            .collect::<Result<Vec<_>>>()
            .map(Resolved::List),
    }
}

fn resolve_borrowed_list<'a, T: Clone>(
    items: &'a [Value<T>],
    name: &str,
    indexes: &[Index],
) -> Result<Resolved<'a, T>> {
    let Some((head, tail)) = indexes.split_first() else {
        return Ok(Resolved::List(items.iter().map(Resolved::from_ref).collect()));
    };
    let span = head.list_span(name, items.len())?;
    trace!(
        "array[{}] on `{name}`: {} of {} elements, {} indexes left",
        head.kind(),
        span.len(),
        items.len(),
        tail.len()
    );

    match span {
        Span::At(i) => resolve_borrowed(&items[i], name, tail),
        Span::Range(r) => items[r]
            .iter()
            .map(|item| resolve_borrowed(item, name, tail))
            .collect::<Result<Vec<_>>>()
            .map(Resolved::List),
        Span::Pick(ps) => ps
            .iter()
            .map(|&p| resolve_borrowed(&items[p], name, tail))
            .collect::<Result<Vec<_>>>()
            .map(Resolved::List),
    }
}
