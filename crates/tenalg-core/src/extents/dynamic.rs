//! Fully dynamic shape: rank and axis values are runtime quantities

use super::{check_dims, Extents, FixedRankExtents, Shape, StaticDims, StaticExtents};
use crate::error::Result;
use std::fmt;

/// Shape descriptor with runtime rank and values.
///
/// This is the common form every other representation converts into for
/// cross-representation comparison and for shape arithmetic in the
/// contraction engine.
///
/// # Examples
///
/// ```
/// use tenalg_core::{DynamicExtents, Extents};
///
/// let e = DynamicExtents::new(&[2, 3, 4]).unwrap();
/// assert_eq!(e.rank(), 3);
/// assert_eq!(e.product(), 24);
/// assert!(DynamicExtents::new(&[1, 0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DynamicExtents {
    base: Shape,
}

impl DynamicExtents {
    /// Constructs a validated shape from a slice of axis sizes
    pub fn new(dims: &[usize]) -> Result<Self> {
        check_dims(dims)?;
        Ok(Self {
            base: Shape::from_slice(dims),
        })
    }

    /// Constructs a validated shape from an iterator of axis sizes
    pub fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Result<Self> {
        let base: Shape = iter.into_iter().collect();
        check_dims(&base)?;
        Ok(Self { base })
    }

    /// The canonical empty (rank-0) shape
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copies from another representation without revalidating
    pub(crate) fn from_dims_unchecked(dims: &[usize]) -> Self {
        Self {
            base: Shape::from_slice(dims),
        }
    }

    pub(crate) fn from_shape_unchecked(base: Shape) -> Self {
        Self { base }
    }
}

impl Extents for DynamicExtents {
    fn dims(&self) -> &[usize] {
        &self.base
    }

    fn to_dynamic(&self) -> DynamicExtents {
        self.clone()
    }
}

impl std::ops::Index<usize> for DynamicExtents {
    type Output = usize;

    /// Unchecked axis access; use [`Extents::at`] for the checked form
    fn index(&self, i: usize) -> &usize {
        &self.base[i]
    }
}

impl TryFrom<&[usize]> for DynamicExtents {
    type Error = crate::error::TensorError;

    fn try_from(dims: &[usize]) -> Result<Self> {
        Self::new(dims)
    }
}

impl TryFrom<Vec<usize>> for DynamicExtents {
    type Error = crate::error::TensorError;

    fn try_from(dims: Vec<usize>) -> Result<Self> {
        Self::new(&dims)
    }
}

impl<const R: usize> PartialEq<FixedRankExtents<R>> for DynamicExtents {
    fn eq(&self, other: &FixedRankExtents<R>) -> bool {
        self.dims() == other.dims()
    }
}

impl<D: StaticDims> PartialEq<StaticExtents<D>> for DynamicExtents {
    fn eq(&self, other: &StaticExtents<D>) -> bool {
        self.dims() == other.dims()
    }
}

impl fmt::Display for DynamicExtents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.base.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_access() {
        let e = DynamicExtents::new(&[2, 3, 4]).unwrap();
        assert_eq!(e.rank(), 3);
        assert_eq!(e[1], 3);
        assert_eq!(e.at(2).unwrap(), 4);
        assert!(e.at(3).is_err());
    }

    #[test]
    fn test_empty_shape() {
        let e = DynamicExtents::empty();
        assert!(e.is_empty());
        assert_eq!(e.rank(), 0);
        assert_eq!(e.product(), 0);
        assert!(!e.is_valid());
    }

    #[test]
    fn test_from_iter_rejects_zero() {
        assert!(DynamicExtents::from_iter([2, 0, 3]).is_err());
        assert!(DynamicExtents::from_iter([2, 3]).is_ok());
    }

    #[test]
    fn test_display() {
        let e = DynamicExtents::new(&[2, 3]).unwrap();
        assert_eq!(e.to_string(), "[2,3]");
    }
}
