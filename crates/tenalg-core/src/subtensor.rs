//! Strided views selected by spans
//!
//! A subtensor borrows the owning tensor's buffer and reinterprets it
//! through span strides: the stride of axis `k` is the tensor stride
//! multiplied by the span step, and the view origin is the offset of the
//! span firsts. No elements are copied until `to_tensor`.

use crate::error::{Result, TensorError};
use crate::extents::{DynamicExtents, Extents, Shape};
use crate::index::{linear_to_multi, MultiIndexIter};
use crate::layout::Layout;
use crate::span::{ResolvedSpan, Span};
use crate::storage::Storage;
use crate::tensor::TensorBase;

/// Immutable span-selected view
#[derive(Debug, Clone)]
pub struct Subtensor<'a, T> {
    data: &'a [T],
    extents: DynamicExtents,
    spans: Vec<ResolvedSpan>,
    span_strides: Shape,
    offset: usize,
    layout: Layout,
}

/// Mutable span-selected view
#[derive(Debug)]
pub struct SubtensorMut<'a, T> {
    data: &'a mut [T],
    extents: DynamicExtents,
    span_strides: Shape,
    offset: usize,
    layout: Layout,
}

fn resolve_spans(
    spans: &[Span],
    dims: &[usize],
    strides: &[usize],
) -> Result<(Vec<ResolvedSpan>, DynamicExtents, Shape, usize)> {
    if spans.len() != dims.len() {
        return Err(TensorError::rank_mismatch(
            "subtensor",
            dims.len(),
            spans.len(),
        ));
    }
    let mut resolved = Vec::with_capacity(spans.len());
    for (span, &d) in spans.iter().zip(dims.iter()) {
        resolved.push(span.resolve(d)?);
    }
    let sizes: Shape = resolved.iter().map(|s| s.size()).collect();
    let span_strides: Shape = resolved
        .iter()
        .zip(strides.iter())
        .map(|(s, &w)| w * s.step())
        .collect();
    let offset = resolved
        .iter()
        .zip(strides.iter())
        .map(|(s, &w)| s.first() * w)
        .sum();
    let extents = DynamicExtents::from_shape_unchecked(sizes);
    Ok((resolved, extents, span_strides, offset))
}

fn view_offset(
    index: &[usize],
    extents: &DynamicExtents,
    span_strides: &[usize],
    offset: usize,
) -> Result<usize> {
    if index.len() != extents.rank() {
        return Err(TensorError::rank_mismatch(
            "subtensor index",
            extents.rank(),
            index.len(),
        ));
    }
    let mut pos = offset;
    for ((&i, &d), &w) in index
        .iter()
        .zip(extents.dims().iter())
        .zip(span_strides.iter())
    {
        if i >= d {
            return Err(TensorError::out_of_bounds("axis", i, d));
        }
        pos += i * w;
    }
    Ok(pos)
}

impl<T, E: Extents, S: Storage<T>> TensorBase<T, E, S> {
    /// Selects a view; one span per axis.
    ///
    /// # Errors
    ///
    /// Fails if the span count differs from the rank or any span does not
    /// resolve against its extent.
    pub fn subtensor(&self, spans: &[Span]) -> Result<Subtensor<'_, T>> {
        let (resolved, extents, span_strides, offset) =
            resolve_spans(spans, self.extents().dims(), self.strides().as_slice())?;
        Ok(Subtensor {
            data: self.data(),
            extents,
            spans: resolved,
            span_strides,
            offset,
            layout: self.layout(),
        })
    }

    /// Mutable counterpart of [`subtensor`](Self::subtensor)
    pub fn subtensor_mut(&mut self, spans: &[Span]) -> Result<SubtensorMut<'_, T>> {
        let (_, extents, span_strides, offset) =
            resolve_spans(spans, self.extents().dims(), self.strides().as_slice())?;
        let layout = self.layout();
        Ok(SubtensorMut {
            data: self.data_mut(),
            extents,
            span_strides,
            offset,
            layout,
        })
    }
}

impl<'a, T> Subtensor<'a, T> {
    pub fn extents(&self) -> &DynamicExtents {
        &self.extents
    }

    pub fn rank(&self) -> usize {
        self.extents.rank()
    }

    /// Number of selected elements
    pub fn len(&self) -> usize {
        self.extents.product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The resolved span of each axis
    pub fn spans(&self) -> &[ResolvedSpan] {
        &self.spans
    }

    /// Element at a multi-index relative to the view
    pub fn at(&self, index: &[usize]) -> Result<&T> {
        let pos = view_offset(index, &self.extents, &self.span_strides, self.offset)?;
        Ok(&self.data[pos])
    }

    /// Element at a linear index in layout order over the view shape
    pub fn at_linear(&self, linear: usize) -> Result<&T> {
        if linear >= self.len() {
            return Err(TensorError::out_of_bounds("linear index", linear, self.len()));
        }
        let mut multi = Shape::from_elem(0, self.rank());
        linear_to_multi(linear, self.extents.dims(), self.layout, &mut multi);
        self.at(&multi)
    }

    /// Iterates elements in layout order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        MultiIndexIter::new(self.extents.dims(), self.layout).map(move |idx| {
            let pos: usize = self.offset
                + idx
                    .iter()
                    .zip(self.span_strides.iter())
                    .map(|(&i, &w)| i * w)
                    .sum::<usize>();
            &self.data[pos]
        })
    }

    /// Narrows the view further; inner spans are relative to this view
    pub fn subtensor(&self, spans: &[Span]) -> Result<Subtensor<'a, T>> {
        if spans.len() != self.rank() {
            return Err(TensorError::rank_mismatch("subtensor", self.rank(), spans.len()));
        }
        let mut composed = Vec::with_capacity(spans.len());
        for (outer, inner) in self.spans.iter().zip(spans.iter()) {
            composed.push(outer.compose(inner)?);
        }
        let sizes: Shape = composed.iter().map(|s| s.size()).collect();
        // span strides already fold in the outer steps
        let span_strides: Shape = composed
            .iter()
            .zip(self.span_strides.iter().zip(self.spans.iter()))
            .map(|(c, (&w, outer))| w / outer.step() * c.step())
            .collect();
        let offset = self.offset
            + composed
                .iter()
                .zip(self.spans.iter().zip(self.span_strides.iter()))
                .map(|(c, (outer, &w))| (c.first() - outer.first()) * (w / outer.step()))
                .sum::<usize>();
        Ok(Subtensor {
            data: self.data,
            extents: DynamicExtents::from_shape_unchecked(sizes),
            spans: composed,
            span_strides,
            offset,
            layout: self.layout,
        })
    }
}

impl<'a, T: Clone> Subtensor<'a, T> {
    /// Copies the selected elements into an owning tensor with contiguous
    /// strides and the same layout
    pub fn to_tensor(&self) -> crate::tensor::Tensor<T> {
        let data: Vec<T> = self.iter().cloned().collect();
        crate::tensor::Tensor::from_parts_unchecked(self.extents.clone(), self.layout, data)
    }

    // caller guarantees the linear index is in range
    fn element(&self, linear: usize) -> &T {
        let mut multi = Shape::from_elem(0, self.rank());
        linear_to_multi(linear, self.extents.dims(), self.layout, &mut multi);
        let pos: usize = self.offset
            + multi
                .iter()
                .zip(self.span_strides.iter())
                .map(|(&i, &w)| i * w)
                .sum::<usize>();
        &self.data[pos]
    }
}

impl<'a, 'b, T: Clone> crate::expression::Expression for &'b Subtensor<'a, T> {
    type Elem = T;

    fn at(&self, i: usize) -> T {
        self.element(i).clone()
    }

    fn extents(&self) -> Option<DynamicExtents> {
        Some(self.extents.clone())
    }

    fn layout(&self) -> Option<Layout> {
        Some(self.layout)
    }

    fn all_extents_equal(&self, e: &DynamicExtents) -> bool {
        crate::extents::extents_equal(&self.extents, e)
    }
}

impl<'a, T> SubtensorMut<'a, T> {
    pub fn extents(&self) -> &DynamicExtents {
        &self.extents
    }

    pub fn rank(&self) -> usize {
        self.extents.rank()
    }

    pub fn len(&self) -> usize {
        self.extents.product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn at(&self, index: &[usize]) -> Result<&T> {
        let pos = view_offset(index, &self.extents, &self.span_strides, self.offset)?;
        Ok(&self.data[pos])
    }

    pub fn at_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        let pos = view_offset(index, &self.extents, &self.span_strides, self.offset)?;
        Ok(&mut self.data[pos])
    }
}

impl<'a, T: Clone> SubtensorMut<'a, T> {
    /// Overwrites every selected element
    pub fn fill(&mut self, value: T) {
        for idx in MultiIndexIter::new(&Shape::from_slice(self.extents.dims()), self.layout) {
            let pos: usize = self.offset
                + idx
                    .iter()
                    .zip(self.span_strides.iter())
                    .map(|(&i, &w)| i * w)
                    .sum::<usize>();
            self.data[pos] = value.clone();
        }
    }

    /// Copies elements from a same-shaped source into the selection.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` when the shapes differ.
    pub fn assign<E, S>(&mut self, src: &TensorBase<T, E, S>) -> Result<()>
    where
        E: Extents,
        S: Storage<T>,
    {
        if !crate::extents::extents_equal(&self.extents, src.extents()) {
            return Err(TensorError::shape_mismatch(
                "subtensor assign",
                self.extents.dims(),
                src.extents().dims(),
            ));
        }
        for idx in MultiIndexIter::new(&Shape::from_slice(self.extents.dims()), self.layout) {
            let pos: usize = self.offset
                + idx
                    .iter()
                    .zip(self.span_strides.iter())
                    .map(|(&i, &w)| i * w)
                    .sum::<usize>();
            self.data[pos] = src.at(&idx)?.clone();
        }
        Ok(())
    }
}
