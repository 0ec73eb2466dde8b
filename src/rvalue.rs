//! Ownership-aware intermediate results and selection plans.
//!
//! Resolvers never touch data directly. They validate descriptors, turn them
//! into a `Plan` over the current [`Layout`], and hand the plan to
//! `Rvalue::apply`. Applying a plan is the only step that reads elements, and
//! it is where the view-vs-copy and borrow-vs-move decisions are made:
//!
//! | base \ plan | `Slice`            | `Gather` |
//! |-------------|--------------------|----------|
//! | `View`      | `View` (borrowed)  | `Owned`  |
//! | `Owned`     | `Held` (moved)     | `Owned`  |
//! | `Held`      | `Held` (moved)     | `Owned`  |

use std::borrow::Cow;

use log::debug;

use crate::holder::Holder;
use crate::index::Span;
use crate::view::{Layout, StridedArray, StridedArrayView};

/// A vector (`N = 1`) or matrix (`N = 2`) produced by indexing.
#[derive(Debug)]
pub enum Rvalue<'a, T, const N: usize> {
    /// Shares storage with a base the caller keeps alive.
    View(StridedArrayView<'a, T, N>),
    /// Owns its storage: a materialized copy or a consumed base.
    Owned(StridedArray<T, N>),
    /// A view into storage owned by the result itself.
    Held(Holder<T, N>),
}

impl<T: Clone, const N: usize> Clone for Rvalue<'_, T, N> {
    fn clone(&self) -> Self {
        match self {
            Rvalue::View(v) => Rvalue::View(*v),
            Rvalue::Owned(a) => Rvalue::Owned(a.clone()),
            Rvalue::Held(h) => Rvalue::Held(h.clone()),
        }
    }
}

impl<'a, T, const N: usize> From<StridedArrayView<'a, T, N>> for Rvalue<'a, T, N> {
    fn from(view: StridedArrayView<'a, T, N>) -> Self {
        Rvalue::View(view)
    }
}

impl<T, const N: usize> From<StridedArray<T, N>> for Rvalue<'_, T, N> {
    fn from(array: StridedArray<T, N>) -> Self {
        Rvalue::Owned(array)
    }
}

impl<'a, T, const N: usize> Rvalue<'a, T, N> {
    /// Layout of the result within its storage.
    pub fn layout(&self) -> Layout<N> {
        match self {
            Rvalue::View(v) => v.layout(),
            Rvalue::Owned(a) => a.layout(),
            Rvalue::Held(h) => h.layout(),
        }
    }

    #[inline]
    pub fn size(&self) -> [usize; N] {
        *self.layout().size()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layout().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout().is_empty()
    }

    /// True if the result shares storage with something else (a base or a holder).
    pub fn is_view(&self) -> bool {
        !self.is_materialized()
    }

    /// True if the result owns dense storage of exactly its own elements.
    pub fn is_materialized(&self) -> bool {
        matches!(self, Rvalue::Owned(_))
    }

    /// Borrow the result as a strided view.
    pub fn view(&self) -> StridedArrayView<'_, T, N> {
        match self {
            Rvalue::View(v) => *v,
            Rvalue::Owned(a) => a.view(),
            Rvalue::Held(h) => h.view(),
        }
    }

    /// The storage `layout()` offsets refer to.
    fn storage(&self) -> &[T] {
        match self {
            Rvalue::View(v) => v.data(),
            Rvalue::Owned(a) => a.data(),
            Rvalue::Held(h) => h.storage(),
        }
    }

    /// Take the storage out of an owning result.
    fn into_storage(self) -> Result<Vec<T>, StridedArrayView<'a, T, N>> {
        match self {
            Rvalue::View(v) => Err(v),
            Rvalue::Owned(a) => Ok(a.into_vec()),
            Rvalue::Held(h) => Ok(h.into_storage()),
        }
    }
}

impl<'a, T: Clone, const N: usize> Rvalue<'a, T, N> {
    /// Copy the elements out in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.view().to_vec()
    }

    /// Detach the result from any borrowed base.
    pub fn into_owned(self) -> StridedArray<T, N> {
        match self {
            Rvalue::View(v) => v.to_owned(),
            Rvalue::Owned(a) => a,
            Rvalue::Held(h) => h.into_owned(),
        }
    }

    /// The element at storage `offset`: borrowed from a view, moved out of owned storage.
    pub(crate) fn element(self, offset: usize) -> Cow<'a, T> {
        match self.into_storage() {
            Err(v) => Cow::Borrowed(&v.data()[offset]),
            Ok(mut storage) => Cow::Owned(storage.swap_remove(offset)),
        }
    }

    /// Apply a validated plan.
    pub(crate) fn apply<const M: usize>(self, plan: Plan<M>) -> Rvalue<'a, T, M> {
        match plan {
            Plan::Slice(layout) => match self.into_storage() {
                Err(v) => Rvalue::View(StridedArrayView::from_layout(v.data(), layout)),
                Ok(storage) if layout.covers(storage.len()) => {
                    Rvalue::Owned(StridedArray::from_parts(storage, *layout.size()))
                }
                Ok(storage) => Rvalue::Held(Holder::from_parts(storage, layout)),
            },
            Plan::Gather { size, offsets } => {
                debug!("gathering {} elements into a {:?} copy", offsets.len(), size);
                let storage = self.storage();
                let data = offsets.iter().map(|&o| storage[o].clone()).collect();
                Rvalue::Owned(StridedArray::from_parts(data, size))
            }
        }
    }
}

// ============================================================================
// Plans
// ============================================================================

/// What a validated selection does to a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Plan<const N: usize> {
    /// A new layout over the same storage.
    Slice(Layout<N>),
    /// Storage offsets to copy, in row-major order of `size`.
    Gather { size: [usize; N], offsets: Vec<usize> },
}

/// Plan the selection of `span` along dimension `dim`, keeping the rank.
pub(crate) fn select<const N: usize>(layout: &Layout<N>, dim: usize, span: Span) -> Plan<N> {
    match span {
        Span::At(i) => Plan::Slice(layout.narrow(dim, i..i + 1)),
        Span::Range(r) => Plan::Slice(layout.narrow(dim, r)),
        Span::Pick(ps) => {
            let mut picks: [Option<&[usize]>; N] = [None; N];
            picks[dim] = Some(ps.as_slice());
            gather(layout, picks)
        }
    }
}

/// Plan a gather: dimensions with `Some(positions)` take those positions in
/// order, the others are kept whole.
pub(crate) fn gather<const N: usize>(layout: &Layout<N>, picks: [Option<&[usize]>; N]) -> Plan<N> {
    let mut size = *layout.size();
    for (d, pick) in picks.iter().enumerate() {
        if let Some(ps) = pick {
            size[d] = ps.len();
        }
    }

    let total: usize = size.iter().product();
    let offsets = (0..total)
        .map(|k| {
            let mut rem = k;
            let mut src = [0usize; N];
            for d in (0..N).rev() {
                let i = rem % size[d];
                rem /= size[d];
                src[d] = picks[d].map_or(i, |ps| ps[i]);
            }
            layout.offset_of(&src)
        })
        .collect();

    Plan::Gather { size, offsets }
}
