//! Mode products (TTV - tensor times vector, TTM - tensor times matrix)
//!
//! A mode product contracts one axis of a tensor against a vector or a
//! matrix. For tensor A ∈ ℝ^(n₁×...×nₚ) and mode m (one-based), the
//! vector product removes axis m and the matrix product replaces its
//! extent with the matrix row count.
//!
//! Modes are one-based throughout, matching the established contraction
//! notation A ×₁ b, A ×₂ M.

use crate::error::{KernelError, KernelResult};
use num_traits::Zero;
use std::ops::{Add, Mul};
use tenalg_core::index::MultiIndexIter;
use tenalg_core::{Extents, Matrix, Shape, Tensor, Vector};

fn check_mode(operation: &str, rank: usize, mode: usize) -> KernelResult<()> {
    if mode == 0 {
        return Err(KernelError::invalid_mode(
            0,
            rank,
            format!("{} modes are one-based", operation),
        ));
    }
    if mode > rank {
        return Err(KernelError::invalid_mode(
            mode,
            rank,
            format!("{} operand has rank {}", operation, rank),
        ));
    }
    Ok(())
}

/// Compute the mode-`m` tensor-times-vector product.
///
/// For tensor A with extents (n₁, ..., nₚ) and vector b of length nₘ,
/// computes C = A ×ₘ b: axis m is contracted away and the remaining axes
/// keep their order, padded with unit extents up to rank two.
///
/// # Arguments
///
/// * `a` - Input tensor of rank p
/// * `b` - Vector whose length equals the extent of mode `m`
/// * `mode` - One-based contraction mode, 1 ≤ m ≤ p
///
/// # Errors
///
/// Returns an error if the mode is zero or exceeds the rank, either
/// operand is empty, or the vector length differs from the contracted
/// extent.
///
/// # Examples
///
/// ```
/// # use tenalg_core::Extents;
/// use tenalg_core::{Tensor, Vector};
/// use tenalg_kernels::ttv;
///
/// let a = Tensor::from_elem(&[3, 4], 2.0).unwrap();
/// let b = Vector::from_elem(3, 1.0);
/// let c = ttv(&a, &b, 1).unwrap();
/// assert_eq!(c.extents().dims(), &[4, 1]);
/// assert!(c.iter().all(|&x| x == 6.0));
/// ```
pub fn ttv<T>(a: &Tensor<T>, b: &Vector<T>, mode: usize) -> KernelResult<Tensor<T>>
where
    T: Clone + Zero + Mul<Output = T> + Add<Output = T>,
{
    let na = a.extents().dims();
    let p = na.len();

    check_mode("ttv", p, mode)?;
    if a.is_empty() {
        return Err(KernelError::empty_input("ttv", "tensor"));
    }
    if b.is_empty() {
        return Err(KernelError::empty_input("ttv", "vector"));
    }
    if b.len() != na[mode - 1] {
        return Err(KernelError::dimension_mismatch(
            "ttv",
            vec![na[mode - 1]],
            vec![b.len()],
            "Vector length must equal the contracted extent",
        ));
    }

    // remaining axes in order, padded with unit extents up to rank two
    let mut nc = vec![1usize; (p - 1).max(2)];
    let mut j = 0;
    for (i, &d) in na.iter().enumerate() {
        if i != mode - 1 {
            nc[j] = d;
            j += 1;
        }
    }

    let mut c = match Tensor::zeros_with_layout(&nc, a.layout()) {
        Ok(t) => t,
        Err(_) => {
            return Err(KernelError::incompatible_shapes(
                "ttv",
                na.to_vec(),
                nc,
                "result shape is not a valid tensor shape",
            ))
        }
    };

    let free: Vec<usize> = (0..p).filter(|&i| i != mode - 1).collect();
    let mut ia = Shape::from_elem(0, p);
    for ic in MultiIndexIter::new(c.extents().dims(), c.layout()) {
        for (slot, &axis) in free.iter().enumerate() {
            ia[axis] = ic[slot];
        }
        let mut sum = T::zero();
        for k in 0..na[mode - 1] {
            ia[mode - 1] = k;
            sum = sum + a[a.strides().offset(&ia)].clone() * b[k].clone();
        }
        let out = c.strides().offset(&ic);
        c[out] = sum;
    }
    Ok(c)
}

/// Compute the mode-`m` tensor-times-matrix product.
///
/// For tensor A with extents (n₁, ..., nₚ) and matrix B with shape
/// (q, nₘ), computes C = A ×ₘ B: the extent of axis m becomes q and
/// every other axis is untouched.
///
/// # Arguments
///
/// * `a` - Input tensor of rank p
/// * `b` - Matrix whose column count equals the extent of mode `m`
/// * `mode` - One-based contraction mode, 1 ≤ m ≤ p
///
/// # Errors
///
/// Returns an error if the mode is zero or exceeds the rank, either
/// operand is empty, or the matrix column count differs from the
/// contracted extent.
///
/// # Examples
///
/// ```
/// # use tenalg_core::Extents;
/// use tenalg_core::{Matrix, Tensor};
/// use tenalg_kernels::ttm;
///
/// let a = Tensor::from_elem(&[2, 3, 4], 1.0).unwrap();
/// let b = Matrix::from_elem(5, 3, 1.0);
/// let c = ttm(&a, &b, 2).unwrap();
/// assert_eq!(c.extents().dims(), &[2, 5, 4]);
/// assert!(c.iter().all(|&x| x == 3.0));
/// ```
pub fn ttm<T>(a: &Tensor<T>, b: &Matrix<T>, mode: usize) -> KernelResult<Tensor<T>>
where
    T: Clone + Zero + Mul<Output = T> + Add<Output = T>,
{
    let na = a.extents().dims();
    let p = na.len();

    check_mode("ttm", p, mode)?;
    if a.is_empty() {
        return Err(KernelError::empty_input("ttm", "tensor"));
    }
    if b.is_empty() {
        return Err(KernelError::empty_input("ttm", "matrix"));
    }
    if b.cols() != na[mode - 1] {
        return Err(KernelError::dimension_mismatch(
            "ttm",
            vec![na[mode - 1]],
            vec![b.cols()],
            "Matrix columns must equal the contracted extent",
        ));
    }

    let mut nc = na.to_vec();
    nc[mode - 1] = b.rows();

    let mut c = match Tensor::zeros_with_layout(&nc, a.layout()) {
        Ok(t) => t,
        Err(_) => {
            return Err(KernelError::incompatible_shapes(
                "ttm",
                na.to_vec(),
                nc,
                "result shape is not a valid tensor shape",
            ))
        }
    };

    let mut ia = Shape::from_elem(0, p);
    for ic in MultiIndexIter::new(c.extents().dims(), c.layout()) {
        ia.copy_from_slice(&ic);
        let row = ic[mode - 1];
        let mut sum = T::zero();
        for k in 0..na[mode - 1] {
            ia[mode - 1] = k;
            sum = sum + b[(row, k)].clone() * a[a.strides().offset(&ia)].clone();
        }
        let out = c.strides().offset(&ic);
        c[out] = sum;
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(dims: &[usize]) -> Tensor<f64> {
        let n: usize = dims.iter().product();
        Tensor::from_vec((0..n).map(|x| x as f64).collect(), dims).unwrap()
    }

    #[test]
    fn test_ttv_contracts_first_mode() {
        // A is {3,4} filled with 2; ones vector of length 3 sums each column
        let a = Tensor::from_elem(&[3, 4], 2.0).unwrap();
        let b = Vector::from_elem(3, 1.0);
        let c = ttv(&a, &b, 1).unwrap();
        assert_eq!(c.extents().dims(), &[4, 1]);
        assert!(c.iter().all(|&x| x == 6.0));
    }

    #[test]
    fn test_ttv_values_by_hand() {
        // {2,3} first-order holds [[0,2,4],[1,3,5]]
        let a = iota(&[2, 3]);
        let b = Vector::from_vec(vec![1.0, 10.0]);
        let c = ttv(&a, &b, 1).unwrap();
        assert_eq!(c.extents().dims(), &[3, 1]);
        assert_eq!(*c.at(&[0, 0]).unwrap(), 0.0 + 10.0);
        assert_eq!(*c.at(&[1, 0]).unwrap(), 2.0 + 30.0);
        assert_eq!(*c.at(&[2, 0]).unwrap(), 4.0 + 50.0);
    }

    #[test]
    fn test_ttv_rank3_keeps_free_axes() {
        let a = iota(&[2, 3, 4]);
        let b = Vector::from_elem(3, 1.0);
        let c = ttv(&a, &b, 2).unwrap();
        assert_eq!(c.extents().dims(), &[2, 4]);
        // c[i,k] = sum_j a[i,j,k]
        let expected: f64 = (0..3).map(|j| *a.at(&[1, j, 2]).unwrap()).sum();
        assert_eq!(*c.at(&[1, 2]).unwrap(), expected);
    }

    #[test]
    fn test_ttv_mode_validation() {
        let a = Tensor::from_elem(&[2, 3], 1.0).unwrap();
        let b = Vector::from_elem(2, 1.0);
        assert!(matches!(
            ttv(&a, &b, 0),
            Err(KernelError::InvalidMode { mode: 0, .. })
        ));
        assert!(matches!(
            ttv(&a, &b, 3),
            Err(KernelError::InvalidMode { mode: 3, .. })
        ));
    }

    #[test]
    fn test_mode_errors_name_the_operation() {
        let a = Tensor::from_elem(&[2, 3], 1.0).unwrap();
        let err = ttv(&a, &Vector::from_elem(2, 1.0), 0).unwrap_err();
        assert!(err.to_string().contains("ttv"));
        let err = ttm(&a, &Matrix::from_elem(2, 2, 1.0), 5).unwrap_err();
        assert!(err.to_string().contains("ttm"));
    }

    #[test]
    fn test_ttv_length_mismatch() {
        let a = Tensor::from_elem(&[2, 3], 1.0).unwrap();
        let b = Vector::from_elem(5, 1.0);
        assert!(matches!(
            ttv(&a, &b, 1),
            Err(KernelError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_ttv_empty_vector() {
        let a = Tensor::from_elem(&[2, 3], 1.0).unwrap();
        let b = Vector::<f64>::from_vec(vec![]);
        assert!(matches!(ttv(&a, &b, 1), Err(KernelError::EmptyInput { .. })));
    }

    #[test]
    fn test_ttm_replaces_mode_extent() {
        let a = Tensor::from_elem(&[2, 3, 4], 1.0).unwrap();
        let b = Matrix::from_elem(5, 3, 1.0);
        let c = ttm(&a, &b, 2).unwrap();
        assert_eq!(c.extents().dims(), &[2, 5, 4]);
        assert!(c.iter().all(|&x| x == 3.0));
    }

    #[test]
    fn test_ttm_identity_matrix_is_noop() {
        let a = iota(&[2, 3]);
        let mut id = Matrix::from_elem(3, 3, 0.0);
        for i in 0..3 {
            id[(i, i)] = 1.0;
        }
        let c = ttm(&a, &id, 2).unwrap();
        assert_eq!(c.extents().dims(), &[2, 3]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(c.at(&[i, j]).unwrap(), a.at(&[i, j]).unwrap());
            }
        }
    }

    #[test]
    fn test_ttm_matches_matmul_on_matrices() {
        // mode-1 product of a matrix-shaped tensor is plain B * A
        let a = iota(&[3, 2]);
        let b = Matrix::from_vec(2, 3, vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        let c = ttm(&a, &b, 1).unwrap();
        assert_eq!(c.extents().dims(), &[2, 2]);

        let am = a.to_matrix().unwrap();
        let expected = b.matmul(&am).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(*c.at(&[i, j]).unwrap(), expected[(i, j)]);
            }
        }
    }

    #[test]
    fn test_ttm_column_mismatch() {
        let a = Tensor::from_elem(&[2, 3], 1.0).unwrap();
        let b = Matrix::from_elem(4, 5, 1.0);
        assert!(matches!(
            ttm(&a, &b, 2),
            Err(KernelError::DimensionMismatch { .. })
        ));
    }
}
