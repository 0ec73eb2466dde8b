//! The dynamic container model, the ownership parameter and resolution results.

use std::borrow::Cow;

use crate::rvalue::Rvalue;
use crate::view::StridedArray;

/// A container that can be indexed: a scalar, a vector, a matrix, or a list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    Scalar(T),
    Vector(StridedArray<T, 1>),
    Matrix(StridedArray<T, 2>),
    List(Vec<Value<T>>),
}

impl<T> Value<T> {
    /// Shape name used in diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Vector(_) => "vector",
            Value::Matrix(_) => "matrix",
            Value::List(_) => "array",
        }
    }
}

impl<T> From<Vec<Value<T>>> for Value<T> {
    fn from(items: Vec<Value<T>>) -> Self {
        Value::List(items)
    }
}

impl<T> From<StridedArray<T, 1>> for Value<T> {
    fn from(vector: StridedArray<T, 1>) -> Self {
        Value::Vector(vector)
    }
}

impl<T> From<StridedArray<T, 2>> for Value<T> {
    fn from(matrix: StridedArray<T, 2>) -> Self {
        Value::Matrix(matrix)
    }
}

/// How the base of an indexing call is passed.
///
/// An `Owned` base is a temporary the resolver may consume: selected elements
/// are moved out and contiguous selections keep the storage alive in a
/// [`crate::Holder`]. A `Borrowed` base must outlive the result, which may hold
/// views into it.
#[derive(Debug)]
pub enum Operand<'a, T> {
    Owned(Value<T>),
    Borrowed(&'a Value<T>),
}

impl<T> From<Value<T>> for Operand<'_, T> {
    fn from(value: Value<T>) -> Self {
        Operand::Owned(value)
    }
}

impl<'a, T> From<&'a Value<T>> for Operand<'a, T> {
    fn from(value: &'a Value<T>) -> Self {
        Operand::Borrowed(value)
    }
}

/// The result of resolving an indexing expression.
#[derive(Debug, Clone)]
pub enum Resolved<'a, T: Clone> {
    /// A single element, borrowed from the base or moved out of it.
    Scalar(Cow<'a, T>),
    Vector(Rvalue<'a, T, 1>),
    Matrix(Rvalue<'a, T, 2>),
    /// One recursively resolved entry per selected list element.
    List(Vec<Resolved<'a, T>>),
}

impl<'a, T: Clone> Resolved<'a, T> {
    /// Wrap an owned value without indexing it.
    pub fn from_value(value: Value<T>) -> Self {
        match value {
            Value::Scalar(x) => Resolved::Scalar(Cow::Owned(x)),
            Value::Vector(v) => Resolved::Vector(Rvalue::Owned(v)),
            Value::Matrix(m) => Resolved::Matrix(Rvalue::Owned(m)),
            Value::List(items) => {
                Resolved::List(items.into_iter().map(Resolved::from_value).collect())
            }
        }
    }

    /// Borrow a value without indexing it.
    pub fn from_ref(value: &'a Value<T>) -> Self {
        match value {
            Value::Scalar(x) => Resolved::Scalar(Cow::Borrowed(x)),
            Value::Vector(v) => Resolved::Vector(Rvalue::View(v.view())),
            Value::Matrix(m) => Resolved::Matrix(Rvalue::View(m.view())),
            Value::List(items) => Resolved::List(items.iter().map(Resolved::from_ref).collect()),
        }
    }

    /// Detach the result from its base, copying whatever is still borrowed.
    pub fn into_value(self) -> Value<T> {
        match self {
            Resolved::Scalar(x) => Value::Scalar(x.into_owned()),
            Resolved::Vector(v) => Value::Vector(v.into_owned()),
            Resolved::Matrix(m) => Value::Matrix(m.into_owned()),
            Resolved::List(items) => {
                Value::List(items.into_iter().map(Resolved::into_value).collect())
            }
        }
    }

    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            Resolved::Scalar(x) => Some(&**x),
            _ => None,
        }
    }

    pub fn into_scalar(self) -> Option<Cow<'a, T>> {
        match self {
            Resolved::Scalar(x) => Some(x),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<Rvalue<'a, T, 1>> {
        match self {
            Resolved::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<Rvalue<'a, T, 2>> {
        match self {
            Resolved::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Resolved<'a, T>>> {
        match self {
            Resolved::List(items) => Some(items),
            _ => None,
        }
    }

    /// Number of elements (scalars count as one, lists count their entries).
    pub fn len(&self) -> usize {
        match self {
            Resolved::Scalar(_) => 1,
            Resolved::Vector(v) => v.len(),
            Resolved::Matrix(m) => m.len(),
            Resolved::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ref_borrows_storage() {
        let v: Value<f64> = StridedArray::from(vec![1.0, 2.0]).into();
        let r = Resolved::from_ref(&v);
        let Value::Vector(base) = &v else {
            unreachable!()
        };
        match &r {
            Resolved::Vector(Rvalue::View(view)) => {
                assert!(std::ptr::eq(view.data().as_ptr(), base.data().as_ptr()))
            }
            other => panic!("expected a view, got {other:?}"),
        }
    }

    #[test]
    fn test_into_value_roundtrips_lists() {
        let v = Value::List(vec![
            Value::Scalar(1),
            Value::List(vec![Value::Scalar(2), Value::Scalar(3)]),
        ]);
        assert_eq!(Resolved::from_ref(&v).into_value(), v);
        assert_eq!(Resolved::from_value(v.clone()).into_value(), v);
    }

    #[test]
    fn test_accessors() {
        let r: Resolved<'_, i32> = Resolved::Scalar(Cow::Owned(4));
        assert_eq!(r.as_scalar(), Some(&4));
        assert_eq!(r.len(), 1);
        assert!(r.clone().into_vector().is_none());
        assert_eq!(Value::<i32>::List(vec![]).shape(), "array");
    }
}
