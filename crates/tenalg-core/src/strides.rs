//! Per-axis linear-offset multipliers derived from extents and a layout
//!
//! `strides[k]` is the distance in elements between two entries that differ
//! by one in axis `k`. For the first-order (column-major) layout the
//! cumulative product runs left to right; for the last-order (row-major)
//! layout it runs right to left. Scalar and vector shapes short-circuit to
//! all-ones strides since every multi-index computation degenerates to
//! linear indexing.

use crate::error::{Result, TensorError};
use crate::extents::{Extents, Shape};
use crate::layout::Layout;
use std::fmt;

/// Read-only stride sequence, computed once from an extents instance
///
/// # Examples
///
/// ```
/// use tenalg_core::{DynamicExtents, Layout, Strides};
///
/// let e = DynamicExtents::new(&[2, 3, 4]).unwrap();
/// let first = Strides::new(&e, Layout::FirstOrder).unwrap();
/// assert_eq!(first.as_slice(), &[1, 2, 6]);
///
/// let last = Strides::new(&e, Layout::LastOrder).unwrap();
/// assert_eq!(last.as_slice(), &[12, 4, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Strides {
    base: Shape,
    layout: Layout,
}

impl Strides {
    /// Computes strides for the given extents and layout.
    ///
    /// # Errors
    ///
    /// Fails with [`TensorError::InvalidShape`] if the extents are not a
    /// valid non-empty shape.
    pub fn new(extents: &impl Extents, layout: Layout) -> Result<Self> {
        let dims = extents.dims();
        if dims.is_empty() {
            return Ok(Self {
                base: Shape::new(),
                layout,
            });
        }

        if !extents.is_valid() {
            return Err(TensorError::invalid_shape(
                dims,
                "strides require a valid shape",
            ));
        }

        let mut base = Shape::from_elem(1, dims.len());
        if extents.is_vector() || extents.is_scalar() {
            return Ok(Self { base, layout });
        }

        // the recurrence needs at least two axes
        debug_assert!(base.len() >= 2);

        match layout {
            Layout::FirstOrder => {
                for k in 1..base.len() {
                    base[k] = base[k - 1] * dims[k - 1];
                }
            }
            Layout::LastOrder => {
                for k in (0..base.len() - 1).rev() {
                    base[k] = base[k + 1] * dims[k + 1];
                }
            }
        }

        Ok(Self { base, layout })
    }

    // Strides for internally produced shapes, such as view shapes where
    // every axis may have collapsed to one. Skips the validity gate but
    // keeps the same recurrence and short-circuits.
    pub(crate) fn from_dims_unchecked(dims: &[usize], layout: Layout) -> Self {
        let mut base = Shape::from_elem(1, dims.len());
        let nontrivial = dims.iter().filter(|&&d| d > 1).count();
        if dims.len() >= 2 && nontrivial > 1 {
            match layout {
                Layout::FirstOrder => {
                    for k in 1..base.len() {
                        base[k] = base[k - 1] * dims[k - 1];
                    }
                }
                Layout::LastOrder => {
                    for k in (0..base.len() - 1).rev() {
                        base[k] = base[k + 1] * dims[k + 1];
                    }
                }
            }
        }
        Self { base, layout }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Bounds-checked stride access
    pub fn at(&self, i: usize) -> Result<usize> {
        self.base
            .get(i)
            .copied()
            .ok_or_else(|| TensorError::out_of_bounds("strides", i, self.base.len()))
    }

    /// Maps a multi-index to its relative linear offset.
    ///
    /// The index length may be shorter than the rank (trailing axes are
    /// treated as zero), matching the partial multi-index access of the
    /// variadic element accessors.
    pub fn offset(&self, index: &[usize]) -> usize {
        index
            .iter()
            .zip(self.base.iter())
            .map(|(&i, &w)| i * w)
            .sum()
    }
}

impl std::ops::Index<usize> for Strides {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.base[i]
    }
}

impl fmt::Display for Strides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.base.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", w)?;
        }
        write!(f, "]")
    }
}
