//! Fixed-rank shape: rank is a compile-time constant, values are runtime

use super::{check_dims, DynamicExtents, Extents, StaticDims, StaticExtents};
use crate::error::{Result, TensorError};

/// Shape descriptor whose rank `R` is part of the type.
///
/// Default construction yields the all-zero placeholder, which is not a
/// valid shape and has product 0; it exists so fixed-rank tensors can be
/// default-constructed before being resized.
///
/// # Examples
///
/// ```
/// use tenalg_core::{Extents, FixedRankExtents};
///
/// let e = FixedRankExtents::<3>::new([2, 3, 4]).unwrap();
/// assert_eq!(e.rank(), 3);
/// assert_eq!(e.product(), 24);
///
/// let placeholder = FixedRankExtents::<3>::default();
/// assert_eq!(placeholder.product(), 0);
/// assert!(!placeholder.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRankExtents<const R: usize> {
    base: [usize; R],
}

impl<const R: usize> FixedRankExtents<R> {
    /// Constructs a validated shape from an array of axis sizes
    pub fn new(dims: [usize; R]) -> Result<Self> {
        check_dims(&dims)?;
        Ok(Self { base: dims })
    }

    /// Converts from any representation; the source rank must equal `R`
    pub fn from_extents(e: &impl Extents) -> Result<Self> {
        let dims = e.dims();
        if dims.len() != R {
            return Err(TensorError::rank_mismatch(
                "FixedRankExtents::from_extents",
                R,
                dims.len(),
            ));
        }
        let mut base = [0usize; R];
        base.copy_from_slice(dims);
        check_dims(&base)?;
        Ok(Self { base })
    }
}

impl<const R: usize> Default for FixedRankExtents<R> {
    /// All-zero placeholder with product 0
    fn default() -> Self {
        Self { base: [0; R] }
    }
}

impl<const R: usize> Extents for FixedRankExtents<R> {
    fn dims(&self) -> &[usize] {
        &self.base
    }

    fn rank(&self) -> usize {
        R
    }
}

impl<const R: usize> std::ops::Index<usize> for FixedRankExtents<R> {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.base[i]
    }
}

impl<const R: usize> PartialEq<DynamicExtents> for FixedRankExtents<R> {
    fn eq(&self, other: &DynamicExtents) -> bool {
        self.dims() == other.dims()
    }
}

impl<const R: usize, D: StaticDims> PartialEq<StaticExtents<D>> for FixedRankExtents<R> {
    fn eq(&self, other: &StaticExtents<D>) -> bool {
        self.dims() == other.dims()
    }
}
