//! Fully static shape: rank and axis values are compile-time constants
//!
//! Stable Rust cannot carry an arbitrary-length list of values as a single
//! const parameter, so static shapes are encoded as zero-sized marker types
//! implementing [`StaticDims`], declared with the [`static_dims!`] macro:
//!
//! ```
//! use tenalg_core::{static_dims, Extents, StaticExtents};
//!
//! static_dims!(Dims2x3x4, 2, 3, 4);
//!
//! let e = StaticExtents::<Dims2x3x4>::new();
//! assert_eq!(e.dims(), &[2, 3, 4]);
//! assert_eq!(StaticExtents::<Dims2x3x4>::PRODUCT, 24);
//! ```

use super::{product_of, DynamicExtents, Extents, FixedRankExtents};
use std::marker::PhantomData;

/// Compile-time axis values carried by a marker type
pub trait StaticDims: 'static {
    const DIMS: &'static [usize];
}

/// Shape descriptor whose values live entirely in the type.
///
/// Zero-sized; validity is checked at compile time by [`static_dims!`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticExtents<D: StaticDims> {
    _marker: PhantomData<D>,
}

impl<D: StaticDims> StaticExtents<D> {
    /// Compile-time rank
    pub const RANK: usize = D::DIMS.len();

    /// Compile-time element count
    pub const PRODUCT: usize = product_of(D::DIMS);

    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<D: StaticDims> Extents for StaticExtents<D> {
    fn dims(&self) -> &[usize] {
        D::DIMS
    }

    fn rank(&self) -> usize {
        Self::RANK
    }

    fn product(&self) -> usize {
        Self::PRODUCT
    }
}

impl<D: StaticDims> PartialEq<DynamicExtents> for StaticExtents<D> {
    fn eq(&self, other: &DynamicExtents) -> bool {
        self.dims() == other.dims()
    }
}

impl<D: StaticDims, const R: usize> PartialEq<FixedRankExtents<R>> for StaticExtents<D> {
    fn eq(&self, other: &FixedRankExtents<R>) -> bool {
        self.dims() == other.dims()
    }
}

/// Declares a [`StaticDims`] marker type with the given axis values.
///
/// The shape is validated at compile time: at least two axes, no zero
/// axis, and (beyond rank 2) at least one axis greater than 1.
#[macro_export]
macro_rules! static_dims {
    ($name:ident, $($d:expr),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $crate::extents::StaticDims for $name {
            const DIMS: &'static [usize] = &[$($d),+];
        }

        const _: () = {
            let dims: &[usize] = &[$($d),+];
            assert!(dims.len() >= 2, "static shape must have rank of at least 2");
            let mut i = 0;
            let mut any_gt_one = false;
            while i < dims.len() {
                assert!(dims[i] > 0, "static shape must not contain a zero extent");
                if dims[i] > 1 {
                    any_gt_one = true;
                }
                i += 1;
            }
            assert!(
                dims.len() == 2 || any_gt_one,
                "static shape of rank greater than 2 must have an extent greater than 1"
            );
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    static_dims!(Dims4x3, 4, 3);
    static_dims!(Dims2x2x2, 2, 2, 2);

    #[test]
    fn test_static_extents_values() {
        let e = StaticExtents::<Dims4x3>::new();
        assert_eq!(e.dims(), &[4, 3]);
        assert_eq!(e.rank(), 2);
        assert_eq!(e.product(), 12);
        assert!(e.is_matrix());
    }

    #[test]
    fn test_static_constants() {
        assert_eq!(StaticExtents::<Dims2x2x2>::RANK, 3);
        assert_eq!(StaticExtents::<Dims2x2x2>::PRODUCT, 8);
    }

    #[test]
    fn test_equality_with_dynamic() {
        let s = StaticExtents::<Dims4x3>::new();
        let d = DynamicExtents::new(&[4, 3]).unwrap();
        assert!(s == d);
        assert!(d == s);
    }
}
