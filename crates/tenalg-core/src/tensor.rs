//! Dense tensor core
//!
//! [`TensorBase`] owns an extents instance, the strides derived from it, and
//! a contiguous storage buffer. The three public aliases differ only in
//! their shape representation and storage:
//!
//! - [`Tensor`] — dynamic rank and extents, growable storage
//! - [`FixedRankTensor`] — compile-time rank, runtime extents
//! - [`StaticTensor`] — compile-time extents, in-place storage
//!
//! The storage length equals the product of the extents at all times, and
//! the strides are always consistent with the current extents and layout.

use crate::error::{Result, TensorError};
use crate::extents::{DynamicExtents, Extents, FixedRankExtents, StaticDims, StaticExtents};
use crate::layout::Layout;
use crate::storage::{ArrayStorage, ResizableStorage, Storage, VecStorage};
use crate::strides::Strides;
use num_traits::{One, Zero};
use std::marker::PhantomData;

mod convert;
mod fmt;

/// Owning dense tensor over value type `T`, extents `E`, and storage `S`
#[derive(Debug, Clone)]
pub struct TensorBase<T, E, S> {
    pub(crate) extents: E,
    pub(crate) strides: Strides,
    pub(crate) storage: S,
    pub(crate) _elem: PhantomData<T>,
}

/// Tensor with runtime rank and extents
pub type Tensor<T> = TensorBase<T, DynamicExtents, VecStorage<T>>;

/// Tensor with compile-time rank `R` and runtime extents
pub type FixedRankTensor<T, const R: usize> = TensorBase<T, FixedRankExtents<R>, VecStorage<T>>;

/// Tensor with fully static extents `D` and in-place storage of capacity `N`
pub type StaticTensor<T, D, const N: usize> = TensorBase<T, StaticExtents<D>, ArrayStorage<T, N>>;

impl<T, E: Extents, S: Storage<T>> TensorBase<T, E, S> {
    pub fn extents(&self) -> &E {
        &self.extents
    }

    pub fn strides(&self) -> &Strides {
        &self.strides
    }

    pub fn layout(&self) -> Layout {
        self.strides.layout()
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.extents.rank()
    }

    /// Total element count
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Elements in linear-storage order
    pub fn data(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Bounds-checked multi-index access.
    ///
    /// # Errors
    ///
    /// Fails with `RankMismatch` if the index count differs from the rank
    /// and with `OutOfBounds` if any index exceeds its extent.
    pub fn at(&self, index: &[usize]) -> Result<&T> {
        let offset = self.checked_offset(index)?;
        Ok(&self.storage.as_slice()[offset])
    }

    pub fn at_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        let offset = self.checked_offset(index)?;
        Ok(&mut self.storage.as_mut_slice()[offset])
    }

    /// Bounds-checked linear access
    pub fn at_linear(&self, i: usize) -> Result<&T> {
        let len = self.len();
        self.storage
            .as_slice()
            .get(i)
            .ok_or_else(|| TensorError::out_of_bounds("tensor", i, len))
    }

    /// Multi-index access without panicking
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let offset = self.checked_offset(index).ok()?;
        self.storage.as_slice().get(offset)
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let offset = self.checked_offset(index).ok()?;
        self.storage.as_mut_slice().get_mut(offset)
    }

    /// Forward iteration in linear-storage order (restartable)
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.storage.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.storage.as_mut_slice().iter_mut()
    }

    fn checked_offset(&self, index: &[usize]) -> Result<usize> {
        let dims = self.extents.dims();
        if index.len() != dims.len() {
            return Err(TensorError::rank_mismatch(
                "tensor index",
                dims.len(),
                index.len(),
            ));
        }
        for (&i, &d) in index.iter().zip(dims.iter()) {
            if i >= d {
                return Err(TensorError::out_of_bounds("axis", i, d));
            }
        }
        Ok(self.strides.offset(index))
    }
}

impl<T: Clone, E: Extents, S: Storage<T>> TensorBase<T, E, S> {
    /// Broadcast-fills every element with `value`
    pub fn fill(&mut self, value: T) {
        for slot in self.storage.as_mut_slice() {
            *slot = value.clone();
        }
    }

    /// Applies `f` element-wise, producing a tensor of the same shape
    pub fn map<F>(&self, f: F) -> Self
    where
        Self: Clone,
        F: Fn(&T) -> T,
    {
        let mut out = self.clone();
        for slot in out.storage.as_mut_slice() {
            *slot = f(slot);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Dynamic-extents constructors
// ---------------------------------------------------------------------------

impl<T: Clone> Tensor<T> {
    /// Constructs a tensor of the given shape filled with `value`
    pub fn from_elem(dims: &[usize], value: T) -> Result<Self> {
        Self::from_elem_with_layout(dims, Layout::FirstOrder, value)
    }

    pub fn from_elem_with_layout(dims: &[usize], layout: Layout, value: T) -> Result<Self> {
        let extents = DynamicExtents::new(dims)?;
        let strides = Strides::new(&extents, layout)?;
        let storage = VecStorage::from_elem(extents.product(), value);
        Ok(Self {
            extents,
            strides,
            storage,
            _elem: PhantomData,
        })
    }

    /// Constructs a tensor from flat data in linear-storage order.
    ///
    /// # Errors
    ///
    /// Fails if `data.len()` does not equal the product of `dims`.
    pub fn from_vec(data: Vec<T>, dims: &[usize]) -> Result<Self> {
        Self::from_vec_with_layout(data, dims, Layout::FirstOrder)
    }

    pub fn from_vec_with_layout(data: Vec<T>, dims: &[usize], layout: Layout) -> Result<Self> {
        let extents = DynamicExtents::new(dims)?;
        if data.len() != extents.product() {
            return Err(TensorError::invalid_shape(
                dims,
                format!(
                    "shape requires {} elements, but {} were provided",
                    extents.product(),
                    data.len()
                ),
            ));
        }
        let strides = Strides::new(&extents, layout)?;
        Ok(Self {
            extents,
            strides,
            storage: VecStorage::from_vec(data),
            _elem: PhantomData,
        })
    }

    // Adopts an already-consistent extents/data pair, e.g. when
    // materializing a view or an expression whose shape was checked at
    // construction.
    pub(crate) fn from_parts_unchecked(
        extents: DynamicExtents,
        layout: Layout,
        data: Vec<T>,
    ) -> Self {
        let strides = Strides::from_dims_unchecked(extents.dims(), layout);
        Self {
            extents,
            strides,
            storage: VecStorage::from_vec(data),
            _elem: PhantomData,
        }
    }

    /// Wraps a single value as the canonical `{1,1}` scalar tensor
    pub fn scalar(value: T) -> Self {
        let extents = DynamicExtents::from_dims_unchecked(&[1, 1]);
        let strides = Strides::new(&extents, Layout::FirstOrder)
            .expect("the scalar shape {1,1} is always valid");
        Self {
            extents,
            strides,
            storage: VecStorage::from_vec(vec![value]),
            _elem: PhantomData,
        }
    }
}

impl<T: Clone + Zero> Tensor<T> {
    /// Zero-filled tensor of the given shape
    pub fn zeros(dims: &[usize]) -> Result<Self> {
        Self::from_elem(dims, T::zero())
    }

    pub fn zeros_with_layout(dims: &[usize], layout: Layout) -> Result<Self> {
        Self::from_elem_with_layout(dims, layout, T::zero())
    }

    /// Reallocates to a new shape, preserving the linear prefix of the old
    /// data and zero-filling any excess.
    ///
    /// Identity reshape round-trips: `t.reshape(t.extents().dims())` equals
    /// `t`.
    pub fn reshape(&self, dims: &[usize]) -> Result<Self> {
        let extents = DynamicExtents::new(dims)?;
        let strides = Strides::new(&extents, self.layout())?;
        let mut storage = self.storage.clone();
        storage.resize(extents.product(), T::zero());
        Ok(Self {
            extents,
            strides,
            storage,
            _elem: PhantomData,
        })
    }
}

impl<T: Clone + One> Tensor<T> {
    /// One-filled tensor of the given shape
    pub fn ones(dims: &[usize]) -> Result<Self> {
        Self::from_elem(dims, T::one())
    }
}

impl<T> Default for Tensor<T> {
    /// The empty tensor: rank-0 extents, no storage
    fn default() -> Self {
        Self {
            extents: DynamicExtents::empty(),
            strides: Strides::default(),
            storage: VecStorage::default(),
            _elem: PhantomData,
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed-rank constructors
// ---------------------------------------------------------------------------

impl<T: Clone, const R: usize> FixedRankTensor<T, R> {
    pub fn from_elem(dims: [usize; R], value: T) -> Result<Self> {
        Self::from_elem_with_layout(dims, Layout::FirstOrder, value)
    }

    pub fn from_elem_with_layout(dims: [usize; R], layout: Layout, value: T) -> Result<Self> {
        let extents = FixedRankExtents::new(dims)?;
        let strides = Strides::new(&extents, layout)?;
        let storage = VecStorage::from_elem(extents.product(), value);
        Ok(Self {
            extents,
            strides,
            storage,
            _elem: PhantomData,
        })
    }

    pub fn from_vec(data: Vec<T>, dims: [usize; R]) -> Result<Self> {
        let extents = FixedRankExtents::new(dims)?;
        if data.len() != extents.product() {
            return Err(TensorError::invalid_shape(
                dims.as_slice(),
                format!(
                    "shape requires {} elements, but {} were provided",
                    extents.product(),
                    data.len()
                ),
            ));
        }
        let strides = Strides::new(&extents, Layout::FirstOrder)?;
        Ok(Self {
            extents,
            strides,
            storage: VecStorage::from_vec(data),
            _elem: PhantomData,
        })
    }
}

impl<T: Clone + Zero, const R: usize> FixedRankTensor<T, R> {
    pub fn zeros(dims: [usize; R]) -> Result<Self> {
        Self::from_elem(dims, T::zero())
    }

    /// Same-rank reshape with the dynamic-variant resize semantics
    pub fn reshape(&self, dims: [usize; R]) -> Result<Self> {
        let extents = FixedRankExtents::new(dims)?;
        let strides = Strides::new(&extents, self.layout())?;
        let mut storage = self.storage.clone();
        storage.resize(extents.product(), T::zero());
        Ok(Self {
            extents,
            strides,
            storage,
            _elem: PhantomData,
        })
    }
}

impl<T: Clone + One, const R: usize> FixedRankTensor<T, R> {
    pub fn ones(dims: [usize; R]) -> Result<Self> {
        Self::from_elem(dims, T::one())
    }
}

// ---------------------------------------------------------------------------
// Static constructors
// ---------------------------------------------------------------------------

impl<T: Clone, D: StaticDims, const N: usize> StaticTensor<T, D, N> {
    // post-monomorphization check that the in-place capacity matches the shape
    const CAPACITY_OK: () = assert!(
        N == crate::extents::product_of(D::DIMS),
        "storage capacity must equal the product of the static extents"
    );

    pub fn from_elem(value: T) -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::CAPACITY_OK;
        let extents = StaticExtents::<D>::new();
        let strides = Strides::new(&extents, Layout::FirstOrder)
            .expect("static extents are validated at compile time");
        Self {
            extents,
            strides,
            storage: ArrayStorage::from_elem(value),
            _elem: PhantomData,
        }
    }

    pub fn from_array(data: [T; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::CAPACITY_OK;
        let extents = StaticExtents::<D>::new();
        let strides = Strides::new(&extents, Layout::FirstOrder)
            .expect("static extents are validated at compile time");
        Self {
            extents,
            strides,
            storage: ArrayStorage::new(data),
            _elem: PhantomData,
        }
    }
}

impl<T: Clone + Zero, D: StaticDims, const N: usize> StaticTensor<T, D, N> {
    pub fn zeros() -> Self {
        Self::from_elem(T::zero())
    }
}

impl<T: Clone + One, D: StaticDims, const N: usize> StaticTensor<T, D, N> {
    pub fn ones() -> Self {
        Self::from_elem(T::one())
    }
}

// ---------------------------------------------------------------------------
// Indexing
// ---------------------------------------------------------------------------

impl<T, E: Extents, S: Storage<T>> std::ops::Index<usize> for TensorBase<T, E, S> {
    type Output = T;

    /// Unchecked linear access in storage order
    fn index(&self, i: usize) -> &T {
        &self.storage.as_slice()[i]
    }
}

impl<T, E: Extents, S: Storage<T>> std::ops::IndexMut<usize> for TensorBase<T, E, S> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.storage.as_mut_slice()[i]
    }
}

impl<'a, T, E: Extents, S: Storage<T>> IntoIterator for &'a TensorBase<T, E, S> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_dims;

    #[test]
    fn test_from_elem_and_access() {
        let t = Tensor::from_elem(&[2, 3], 1.5f64).unwrap();
        assert_eq!(t.rank(), 2);
        assert_eq!(t.len(), 6);
        assert_eq!(*t.at(&[1, 2]).unwrap(), 1.5);
        assert_eq!(t[5], 1.5);
    }

    #[test]
    fn test_first_order_linear_layout() {
        // extents {2,3}, first-order, filled 0..5: strides {1,2}
        let t = Tensor::from_vec((0..6).collect(), &[2, 3]).unwrap();
        assert_eq!(t.strides().as_slice(), &[1, 2]);
        assert_eq!(*t.at(&[1, 2]).unwrap(), 5);
        assert_eq!(t[1 + 2 * 2], 5);
    }

    #[test]
    fn test_last_order_layout() {
        let t = Tensor::from_vec_with_layout((0..6).collect(), &[2, 3], Layout::LastOrder).unwrap();
        assert_eq!(t.strides().as_slice(), &[3, 1]);
        assert_eq!(*t.at(&[1, 2]).unwrap(), 5);
        assert_eq!(*t.at(&[1, 0]).unwrap(), 3);
    }

    #[test]
    fn test_at_errors() {
        let t = Tensor::<f64>::zeros(&[2, 3]).unwrap();
        assert!(matches!(
            t.at(&[0, 0, 0]),
            Err(TensorError::RankMismatch { .. })
        ));
        assert!(matches!(
            t.at(&[2, 0]),
            Err(TensorError::OutOfBounds { .. })
        ));
        assert!(t.at_linear(6).is_err());
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(Tensor::from_vec(vec![1.0; 5], &[2, 3]).is_err());
        assert!(Tensor::from_vec(vec![1.0; 6], &[2, 3]).is_ok());
    }

    #[test]
    fn test_reshape_preserves_prefix_and_zero_fills() {
        let t = Tensor::from_vec((1..=6).collect::<Vec<i64>>(), &[2, 3]).unwrap();
        let grown = t.reshape(&[2, 4]).unwrap();
        assert_eq!(grown.data(), &[1, 2, 3, 4, 5, 6, 0, 0]);
        let shrunk = t.reshape(&[2, 2]).unwrap();
        assert_eq!(shrunk.data(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_reshape_identity_roundtrip() {
        let t = Tensor::from_vec((0..24).collect::<Vec<i32>>(), &[2, 3, 4]).unwrap();
        let same = t.reshape(&[2, 3, 4]).unwrap();
        assert_eq!(same.data(), t.data());
        assert_eq!(same.extents(), t.extents());
    }

    #[test]
    fn test_fill_and_map() {
        let mut t = Tensor::<i32>::zeros(&[2, 2]).unwrap();
        t.fill(3);
        assert!(t.iter().all(|&x| x == 3));
        let doubled = t.map(|&x| x * 2);
        assert!(doubled.iter().all(|&x| x == 6));
    }

    #[test]
    fn test_default_is_empty() {
        let t = Tensor::<f32>::default();
        assert!(t.is_empty());
        assert_eq!(t.rank(), 0);
    }

    #[test]
    fn test_fixed_rank_tensor() {
        let t = FixedRankTensor::<f64, 3>::from_elem([2, 3, 4], 1.0).unwrap();
        assert_eq!(t.rank(), 3);
        assert_eq!(t.len(), 24);
        let r = t.reshape([2, 3, 2]).unwrap();
        assert_eq!(r.len(), 12);
    }

    static_dims!(Dims2x3, 2, 3);

    #[test]
    fn test_static_tensor() {
        let t = StaticTensor::<f64, Dims2x3, 6>::from_array([0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(t.rank(), 2);
        assert_eq!(t.strides().as_slice(), &[1, 2]);
        assert_eq!(*t.at(&[1, 2]).unwrap(), 5.0);
    }

    #[test]
    fn test_iteration_is_linear_storage_order() {
        let t = Tensor::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
        let forward: Vec<i32> = t.iter().copied().collect();
        assert_eq!(forward, vec![0, 1, 2, 3, 4, 5]);
        let reverse: Vec<i32> = t.iter().rev().copied().collect();
        assert_eq!(reverse, vec![5, 4, 3, 2, 1, 0]);
    }
}
