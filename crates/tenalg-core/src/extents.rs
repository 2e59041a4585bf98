//! Multi-dimensional shape descriptors
//!
//! An extents object is an ordered sequence of per-axis sizes. Three
//! representations share the same invariants but differ in when the values
//! are known:
//!
//! - [`DynamicExtents`] — rank and values are runtime quantities
//! - [`FixedRankExtents`] — rank is a compile-time constant, values are runtime
//! - [`StaticExtents`] — rank and values are compile-time constants
//!
//! A shape is valid iff its rank is at least 2, every axis value is positive,
//! and (except for the degenerate `{1,1}` scalar) at least one axis exceeds 1.
//! The canonical empty shape (rank 0) is only produced by default construction
//! and never by explicit construction from a sequence.

use crate::error::{Result, TensorError};
use smallvec::SmallVec;

mod dynamic;
mod fixed_rank;
mod static_dims;

pub use dynamic::DynamicExtents;
pub use fixed_rank::FixedRankExtents;
pub use static_dims::{StaticDims, StaticExtents};

/// Inline shape buffer; heap allocation only above rank 6
pub type Shape = SmallVec<[usize; 6]>;

/// Validates a shape sequence.
///
/// Empty shapes, rank-1 shapes, shapes containing a zero, and all-unit
/// shapes of rank greater than 2 are rejected.
pub(crate) fn check_dims(dims: &[usize]) -> Result<()> {
    if dims.is_empty() {
        return Err(TensorError::invalid_shape(dims, "shape must not be empty"));
    }
    if dims.len() < 2 {
        return Err(TensorError::invalid_shape(
            dims,
            "shape must have rank of at least 2",
        ));
    }
    if dims.iter().any(|&d| d == 0) {
        return Err(TensorError::invalid_shape(
            dims,
            "shape must not contain a zero extent",
        ));
    }
    if dims.len() > 2 && dims.iter().all(|&d| d == 1) {
        return Err(TensorError::invalid_shape(
            dims,
            "shape of rank greater than 2 must have an extent greater than 1",
        ));
    }
    Ok(())
}

pub(crate) const fn product_of(dims: &[usize]) -> usize {
    if dims.is_empty() {
        return 0;
    }
    let mut acc = 1usize;
    let mut i = 0;
    while i < dims.len() {
        acc *= dims[i];
        i += 1;
    }
    acc
}

fn slice_is_scalar(dims: &[usize]) -> bool {
    !dims.is_empty() && dims.iter().all(|&d| d == 1)
}

fn slice_is_vector(dims: &[usize]) -> bool {
    match dims.len() {
        0 => false,
        1 => dims[0] > 1,
        _ => {
            dims[..2].iter().any(|&d| d > 1)
                && dims[..2].iter().any(|&d| d == 1)
                && dims[2..].iter().all(|&d| d == 1)
        }
    }
}

fn slice_is_matrix(dims: &[usize]) -> bool {
    dims.len() >= 2 && dims[0] > 1 && dims[1] > 1 && dims[2..].iter().all(|&d| d == 1)
}

fn slice_is_tensor(dims: &[usize]) -> bool {
    dims.len() >= 3 && dims[2..].iter().any(|&d| d > 1)
}

/// Common capability set of the three shape representations.
///
/// All classification predicates are pure functions of the axis values,
/// never stored flags.
pub trait Extents {
    /// Per-axis sizes as a slice
    fn dims(&self) -> &[usize];

    /// Number of axes (tensor order), not the element count
    fn rank(&self) -> usize {
        self.dims().len()
    }

    /// Alias for [`rank`](Extents::rank), matching sequence semantics
    fn size(&self) -> usize {
        self.rank()
    }

    fn is_empty(&self) -> bool {
        self.dims().is_empty()
    }

    /// Bounds-checked axis access
    fn at(&self, i: usize) -> Result<usize> {
        self.dims()
            .get(i)
            .copied()
            .ok_or_else(|| TensorError::out_of_bounds("extents", i, self.rank()))
    }

    /// Multiplicative reduction over all axis values; 0 for the empty shape
    fn product(&self) -> usize {
        product_of(self.dims())
    }

    fn is_valid(&self) -> bool {
        check_dims(self.dims()).is_ok()
    }

    /// True iff every axis equals 1
    fn is_scalar(&self) -> bool {
        slice_is_scalar(self.dims())
    }

    /// True iff exactly one of the first two axes exceeds 1 and all
    /// trailing axes equal 1
    fn is_vector(&self) -> bool {
        slice_is_vector(self.dims())
    }

    /// True iff both of the first two axes exceed 1 and all trailing axes
    /// equal 1
    fn is_matrix(&self) -> bool {
        slice_is_matrix(self.dims())
    }

    /// True iff some axis beyond the first two exceeds 1
    fn is_tensor(&self) -> bool {
        slice_is_tensor(self.dims())
    }

    /// Converts into the common dynamic representation
    fn to_dynamic(&self) -> DynamicExtents {
        DynamicExtents::from_dims_unchecked(self.dims())
    }

    /// Removes unit axes, keeping at least the two leading ones.
    ///
    /// Scalar and vector shapes keep their first two axes; higher-rank
    /// shapes drop every unit axis (used by printing).
    fn squeeze(&self) -> DynamicExtents {
        let dims = self.dims();
        if dims.len() <= 2 || slice_is_scalar(dims) || slice_is_vector(dims) {
            let take = dims.len().min(2);
            return DynamicExtents::from_dims_unchecked(&dims[..take]);
        }
        let mut out: Shape = dims.iter().copied().filter(|&d| d != 1).collect();
        while out.len() < 2 {
            out.push(1);
        }
        DynamicExtents::from_shape_unchecked(out)
    }
}

/// Element-wise equality across representations
pub fn extents_equal(lhs: &impl Extents, rhs: &impl Extents) -> bool {
    lhs.dims() == rhs.dims()
}
