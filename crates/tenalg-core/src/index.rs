//! Multi-index helpers
//!
//! Conversion between linear indices and multi-indices under a layout, and
//! an odometer-style iterator over all multi-indices of a shape. The
//! contraction engine drives its nested accumulation loops with these.

use crate::extents::Shape;
use crate::layout::Layout;

/// Decomposes a linear index into a multi-index under the given layout.
///
/// Inverse of `Strides::offset` for contiguous strides.
pub fn linear_to_multi(mut linear: usize, dims: &[usize], layout: Layout, out: &mut [usize]) {
    debug_assert_eq!(dims.len(), out.len());
    match layout {
        Layout::FirstOrder => {
            for (o, &d) in out.iter_mut().zip(dims.iter()) {
                *o = linear % d;
                linear /= d;
            }
        }
        Layout::LastOrder => {
            for (o, &d) in out.iter_mut().zip(dims.iter()).rev() {
                *o = linear % d;
                linear /= d;
            }
        }
    }
}

/// Advances a multi-index by one position in the given layout order.
///
/// Returns false when the index wraps around past the last position.
pub fn increment(index: &mut [usize], dims: &[usize], layout: Layout) -> bool {
    debug_assert_eq!(index.len(), dims.len());
    match layout {
        Layout::FirstOrder => {
            for (i, &d) in index.iter_mut().zip(dims.iter()) {
                *i += 1;
                if *i < d {
                    return true;
                }
                *i = 0;
            }
        }
        Layout::LastOrder => {
            for (i, &d) in index.iter_mut().zip(dims.iter()).rev() {
                *i += 1;
                if *i < d {
                    return true;
                }
                *i = 0;
            }
        }
    }
    false
}

/// Iterator over every multi-index of a shape in layout order
pub struct MultiIndexIter {
    dims: Shape,
    layout: Layout,
    current: Shape,
    remaining: usize,
}

impl MultiIndexIter {
    pub fn new(dims: &[usize], layout: Layout) -> Self {
        let remaining = if dims.is_empty() {
            0
        } else {
            dims.iter().product()
        };
        Self {
            dims: Shape::from_slice(dims),
            layout,
            current: Shape::from_elem(0, dims.len()),
            remaining,
        }
    }
}

impl Iterator for MultiIndexIter {
    type Item = Shape;

    fn next(&mut self) -> Option<Shape> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.current.clone();
        self.remaining -= 1;
        increment(&mut self.current, &self.dims, self.layout);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MultiIndexIter {}
