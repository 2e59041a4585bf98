//! Outer product of two tensors
//!
//! The outer product concatenates the operand shapes: for A of rank p and
//! B of rank q, C has rank p+q and C[i..., j...] = A[i...] * B[j...].

use crate::error::{KernelError, KernelResult};
use num_traits::Zero;
use std::ops::{Add, Mul};
use tenalg_core::index::MultiIndexIter;
use tenalg_core::{Extents, Shape, Tensor};

/// Compute the outer product of two tensors.
///
/// # Errors
///
/// Returns an error if either operand is empty, or if the concatenated
/// result shape is not a valid tensor shape (two scalar operands).
///
/// # Examples
///
/// ```
/// # use tenalg_core::Extents;
/// use tenalg_core::Tensor;
/// use tenalg_kernels::outer_prod;
///
/// let a = Tensor::from_elem(&[2, 3], 2.0).unwrap();
/// let b = Tensor::from_elem(&[4, 5], 3.0).unwrap();
/// let c = outer_prod(&a, &b).unwrap();
/// assert_eq!(c.extents().dims(), &[2, 3, 4, 5]);
/// assert!(c.iter().all(|&x| x == 6.0));
/// ```
pub fn outer_prod<T>(a: &Tensor<T>, b: &Tensor<T>) -> KernelResult<Tensor<T>>
where
    T: Clone + Zero + Mul<Output = T> + Add<Output = T>,
{
    if a.is_empty() {
        return Err(KernelError::empty_input("outer_prod", "lhs"));
    }
    if b.is_empty() {
        return Err(KernelError::empty_input("outer_prod", "rhs"));
    }

    let na = a.extents().dims();
    let nb = b.extents().dims();
    let mut nc = Vec::with_capacity(na.len() + nb.len());
    nc.extend_from_slice(na);
    nc.extend_from_slice(nb);

    let mut c = match Tensor::zeros_with_layout(&nc, a.layout()) {
        Ok(t) => t,
        Err(_) => {
            return Err(KernelError::incompatible_shapes(
                "outer_prod",
                na.to_vec(),
                nc,
                "result shape is not a valid tensor shape",
            ))
        }
    };

    let mut ia = Shape::from_elem(0, na.len());
    let mut ib = Shape::from_elem(0, nb.len());
    for ic in MultiIndexIter::new(c.extents().dims(), c.layout()) {
        ia.copy_from_slice(&ic[..na.len()]);
        ib.copy_from_slice(&ic[na.len()..]);
        let out = c.strides().offset(&ic);
        c[out] = a[a.strides().offset(&ia)].clone() * b[b.strides().offset(&ib)].clone();
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outer_prod_shape_and_values() {
        let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let b = Tensor::from_vec(vec![10.0, 20.0], &[2, 1]).unwrap();
        let c = outer_prod(&a, &b).unwrap();
        assert_eq!(c.extents().dims(), &[2, 2, 2, 1]);
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    assert_eq!(
                        *c.at(&[i, j, k, 0]).unwrap(),
                        a.at(&[i, j]).unwrap() * b.at(&[k, 0]).unwrap()
                    );
                }
            }
        }
    }

    #[test]
    fn test_outer_prod_of_scalars_reports_result_shape() {
        // {1,1} x {1,1} would need the all-unit rank-4 shape {1,1,1,1}
        let a = Tensor::scalar(2.0);
        let b = Tensor::scalar(3.0);
        let err = outer_prod(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            KernelError::IncompatibleShapes { ref shape_b, .. } if shape_b == &vec![1, 1, 1, 1]
        ));
    }

    #[test]
    fn test_outer_prod_with_constant_operands() {
        let a = Tensor::from_elem(&[2, 3], 2.0).unwrap();
        let b = Tensor::from_elem(&[4, 5], 3.0).unwrap();
        let c = outer_prod(&a, &b).unwrap();
        assert_eq!(c.extents().dims(), &[2, 3, 4, 5]);
        assert_eq!(c.len(), 120);
        assert!(c.iter().all(|&x| x == 6.0));
    }
}
