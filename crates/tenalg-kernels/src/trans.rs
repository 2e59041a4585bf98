//! Axis transposition
//!
//! Reorders the axes of a tensor by a one-based permutation: axis i of
//! the input becomes axis tau[i] of the result. Elements are copied; the
//! result owns contiguous storage in the input's layout.

use crate::error::{KernelError, KernelResult};
use tenalg_core::index::MultiIndexIter;
use tenalg_core::{Extents, Shape, Tensor};

fn check_permutation(operation: &str, rank: usize, tau: &[usize]) -> KernelResult<()> {
    if tau.len() != rank {
        return Err(KernelError::invalid_permutation(
            operation,
            tau,
            format!("expected {} modes, got {}", rank, tau.len()),
        ));
    }
    let mut seen = vec![false; rank];
    for &m in tau {
        if m == 0 || m > rank {
            return Err(KernelError::invalid_mode(
                m,
                rank,
                "Permutation modes are one-based",
            ));
        }
        if seen[m - 1] {
            return Err(KernelError::invalid_permutation(
                operation,
                tau,
                format!("duplicate mode {}", m),
            ));
        }
        seen[m - 1] = true;
    }
    Ok(())
}

/// Transpose a tensor by a one-based axis permutation.
///
/// Axis i of `a` becomes axis `tau[i]` of the result, so
/// `trans(&a, &[2, 1])` swaps the two axes of a matrix-shaped tensor.
///
/// # Errors
///
/// Returns an error if `tau` is not a permutation of `1..=rank` or the
/// tensor is empty.
///
/// # Examples
///
/// ```
/// # use tenalg_core::Extents;
/// use tenalg_core::Tensor;
/// use tenalg_kernels::trans;
///
/// let a = Tensor::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
/// let t = trans(&a, &[2, 1]).unwrap();
/// assert_eq!(t.extents().dims(), &[3, 2]);
/// assert_eq!(t.at(&[2, 1]).unwrap(), a.at(&[1, 2]).unwrap());
/// ```
pub fn trans<T: Clone + Default>(a: &Tensor<T>, tau: &[usize]) -> KernelResult<Tensor<T>> {
    let na = a.extents().dims();
    let p = na.len();

    check_permutation("trans", p, tau)?;
    if a.is_empty() {
        return Err(KernelError::empty_input("trans", "tensor"));
    }

    let mut nc = vec![1usize; p];
    for (i, &m) in tau.iter().enumerate() {
        nc[m - 1] = na[i];
    }

    let mut c = match Tensor::from_elem_with_layout(&nc, a.layout(), T::default()) {
        Ok(t) => t,
        Err(_) => {
            return Err(KernelError::incompatible_shapes(
                "trans",
                na.to_vec(),
                nc,
                "result shape is not a valid tensor shape",
            ))
        }
    };

    let mut ic = Shape::from_elem(0, p);
    for ia in MultiIndexIter::new(na, a.layout()) {
        for (i, &m) in tau.iter().enumerate() {
            ic[m - 1] = ia[i];
        }
        let out = c.strides().offset(&ic);
        c[out] = a[a.strides().offset(&ia)].clone();
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trans_swaps_matrix_axes() {
        let a = Tensor::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
        let t = trans(&a, &[2, 1]).unwrap();
        assert_eq!(t.extents().dims(), &[3, 2]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t.at(&[j, i]).unwrap(), a.at(&[i, j]).unwrap());
            }
        }
    }

    #[test]
    fn test_trans_identity() {
        let a = Tensor::from_vec((0..24).collect::<Vec<i32>>(), &[2, 3, 4]).unwrap();
        let t = trans(&a, &[1, 2, 3]).unwrap();
        assert_eq!(t.extents().dims(), a.extents().dims());
        assert_eq!(t.data(), a.data());
    }

    #[test]
    fn test_trans_rotation() {
        // cycle axes left: axis 1 -> 3, axis 2 -> 1, axis 3 -> 2
        let a = Tensor::from_vec((0..24).collect::<Vec<i32>>(), &[2, 3, 4]).unwrap();
        let t = trans(&a, &[3, 1, 2]).unwrap();
        assert_eq!(t.extents().dims(), &[3, 4, 2]);
        assert_eq!(t.at(&[2, 3, 1]).unwrap(), a.at(&[1, 2, 3]).unwrap());
    }

    #[test]
    fn test_trans_involution() {
        let a = Tensor::from_vec((0..6).map(|x| x as f64).collect(), &[2, 3]).unwrap();
        let back = trans(&trans(&a, &[2, 1]).unwrap(), &[2, 1]).unwrap();
        assert_eq!(back.data(), a.data());
        assert_eq!(back.extents().dims(), a.extents().dims());
    }

    #[test]
    fn test_trans_validation() {
        let a = Tensor::from_elem(&[2, 3], 1.0).unwrap();
        assert!(matches!(
            trans(&a, &[1]),
            Err(KernelError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            trans(&a, &[0, 1]),
            Err(KernelError::InvalidMode { .. })
        ));
        assert!(matches!(
            trans(&a, &[1, 1]),
            Err(KernelError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            trans(&a, &[1, 3]),
            Err(KernelError::InvalidMode { .. })
        ));
    }
}
