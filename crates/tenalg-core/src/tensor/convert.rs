//! Rank-lifting conversions between tensors and the matrix/vector proxies
//!
//! Element order and total count are preserved in both directions. A matrix
//! becomes a `{rows, cols}` first-order tensor (the column-major buffers
//! coincide); a vector becomes the canonical `{n, 1}` column tensor.

use super::{StaticTensor, Tensor, TensorBase};
use crate::error::{Result, TensorError};
use crate::extents::{Extents, StaticDims};
use crate::layout::Layout;
use crate::matrix::{Matrix, Vector};
use crate::storage::{ResizableStorage, Storage, VecStorage};
use crate::strides::Strides;
use std::marker::PhantomData;

impl<T: Clone> Tensor<T> {
    /// Lifts a matrix into a rank-2 first-order tensor
    pub fn from_matrix(m: &Matrix<T>) -> Result<Self> {
        Tensor::from_vec(m.data().to_vec(), &[m.rows(), m.cols()])
    }

    /// Lifts a vector into the canonical `{n, 1}` column tensor
    pub fn from_vector(v: &Vector<T>) -> Result<Self> {
        Tensor::from_vec(v.data().to_vec(), &[v.len(), 1])
    }

    /// Collapses a rank-2 (or trailing-unit padded) tensor into a matrix.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` if the shape is not matrix-like after
    /// squeezing trailing unit axes.
    pub fn to_matrix(&self) -> Result<Matrix<T>> {
        let e = self.extents();
        if !(e.is_matrix() || e.is_vector() || e.is_scalar()) {
            return Err(TensorError::shape_mismatch(
                "to_matrix",
                e.dims(),
                vec![0, 0],
            ));
        }
        let rows = e.at(0)?;
        let cols = if e.rank() > 1 { e.at(1)? } else { 1 };
        match self.layout() {
            Layout::FirstOrder => Matrix::from_vec(rows, cols, self.data().to_vec()),
            Layout::LastOrder => {
                // transpose the linear buffer into column-major order
                let mut data = Vec::with_capacity(self.len());
                for j in 0..cols {
                    for i in 0..rows {
                        data.push(self.data()[i * cols + j].clone());
                    }
                }
                Matrix::from_vec(rows, cols, data)
            }
        }
    }

    /// Collapses a vector-shaped tensor into a vector
    pub fn to_vector(&self) -> Result<Vector<T>> {
        let e = self.extents();
        if !(e.is_vector() || e.is_scalar()) {
            return Err(TensorError::shape_mismatch(
                "to_vector",
                e.dims(),
                vec![0, 1],
            ));
        }
        Ok(Vector::from_vec(self.data().to_vec()))
    }
}

impl<T: Clone, D: StaticDims, const N: usize> StaticTensor<T, D, N> {
    /// Lifts a matrix into a static tensor; the element count must equal
    /// the fixed capacity.
    pub fn from_matrix(m: &Matrix<T>) -> Result<Self> {
        let extents = crate::extents::StaticExtents::<D>::new();
        if m.len() != N || extents.dims() != [m.rows(), m.cols()] {
            return Err(TensorError::shape_mismatch(
                "StaticTensor::from_matrix",
                extents.dims(),
                vec![m.rows(), m.cols()],
            ));
        }
        let strides = Strides::new(&extents, Layout::FirstOrder)
            .expect("static extents are validated at compile time");
        let mut it = m.data().iter().cloned();
        let storage = crate::storage::ArrayStorage::new(std::array::from_fn(|_| {
            it.next().expect("length checked above")
        }));
        Ok(Self {
            extents,
            strides,
            storage,
            _elem: PhantomData,
        })
    }
}

impl<T: Clone, E: Extents, S: Storage<T>> TensorBase<T, E, S> {
    /// Copies into the fully dynamic representation
    pub fn to_dynamic(&self) -> Tensor<T> {
        Tensor {
            extents: self.extents.to_dynamic(),
            strides: self.strides.clone(),
            storage: VecStorage::from_vec(self.data().to_vec()),
            _elem: PhantomData,
        }
    }
}

impl<T: Clone> TryFrom<&Matrix<T>> for Tensor<T> {
    type Error = TensorError;

    fn try_from(m: &Matrix<T>) -> Result<Self> {
        Tensor::from_matrix(m)
    }
}

impl<T: Clone> TryFrom<&Vector<T>> for Tensor<T> {
    type Error = TensorError;

    fn try_from(v: &Vector<T>) -> Result<Self> {
        Tensor::from_vector(v)
    }
}
