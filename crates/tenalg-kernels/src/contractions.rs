//! General tensor contractions (TTT - tensor times tensor)
//!
//! Contracts an arbitrary set of mode pairs between two tensors. The
//! result keeps the free axes of the first operand followed by the free
//! axes of the second, padded with unit extents up to rank two; a full
//! contraction degenerates to the scalar shape {1,1}.
//!
//! Modes are one-based, as in the mode products.

use crate::error::{KernelError, KernelResult};
use num_traits::Zero;
use std::ops::{Add, Mul};
use tenalg_core::index::MultiIndexIter;
use tenalg_core::{extents_equal, Extents, Layout, Shape, Tensor};

fn check_modes(
    operation: &str,
    rank: usize,
    modes: &[usize],
) -> KernelResult<()> {
    for (i, &m) in modes.iter().enumerate() {
        if m == 0 || m > rank {
            return Err(KernelError::invalid_mode(
                m,
                rank,
                "Contraction modes are one-based",
            ));
        }
        if modes[..i].contains(&m) {
            return Err(KernelError::invalid_permutation(
                operation,
                modes,
                format!("duplicate mode {}", m),
            ));
        }
    }
    Ok(())
}

/// Contract two tensors over the given mode pairs.
///
/// Mode `phia[i]` of `a` is contracted against mode `phib[i]` of `b`; the
/// paired extents must match. The result's axes are the free axes of `a`
/// in order, then the free axes of `b` in order.
///
/// # Arguments
///
/// * `a`, `b` - Input tensors
/// * `phia`, `phib` - Equal-length lists of one-based modes, duplicate-free
///   within each operand
///
/// # Errors
///
/// Returns an error if the mode lists differ in length, any mode is out of
/// range or repeated, the paired extents differ, or an operand is empty.
///
/// # Examples
///
/// ```
/// # use tenalg_core::Extents;
/// use tenalg_core::Tensor;
/// use tenalg_kernels::ttt;
///
/// let a = Tensor::from_elem(&[2, 3], 1.0).unwrap();
/// let b = Tensor::from_elem(&[3, 4], 1.0).unwrap();
/// let c = ttt(&a, &b, &[2], &[1]).unwrap();
/// assert_eq!(c.extents().dims(), &[2, 4]);
/// assert!(c.iter().all(|&x| x == 3.0));
/// ```
pub fn ttt<T>(
    a: &Tensor<T>,
    b: &Tensor<T>,
    phia: &[usize],
    phib: &[usize],
) -> KernelResult<Tensor<T>>
where
    T: Clone + Zero + Mul<Output = T> + Add<Output = T>,
{
    let na = a.extents().dims();
    let nb = b.extents().dims();
    let pa = na.len();
    let pb = nb.len();

    if phia.len() != phib.len() {
        return Err(KernelError::invalid_permutation(
            "ttt",
            phia,
            format!(
                "mode lists must pair up, got {} and {} modes",
                phia.len(),
                phib.len()
            ),
        ));
    }
    check_modes("ttt", pa, phia)?;
    check_modes("ttt", pb, phib)?;
    if a.is_empty() {
        return Err(KernelError::empty_input("ttt", "lhs"));
    }
    if b.is_empty() {
        return Err(KernelError::empty_input("ttt", "rhs"));
    }
    for (&ma, &mb) in phia.iter().zip(phib.iter()) {
        if na[ma - 1] != nb[mb - 1] {
            return Err(KernelError::incompatible_shapes(
                "ttt",
                na.to_vec(),
                nb.to_vec(),
                format!(
                    "contracted extents differ at mode pair ({}, {})",
                    ma, mb
                ),
            ));
        }
    }

    let free_a: Vec<usize> = (0..pa).filter(|i| !phia.contains(&(i + 1))).collect();
    let free_b: Vec<usize> = (0..pb).filter(|i| !phib.contains(&(i + 1))).collect();
    let contracted: Vec<usize> = phia.iter().map(|&m| na[m - 1]).collect();

    let mut nc = vec![1usize; (free_a.len() + free_b.len()).max(2)];
    for (slot, &axis) in free_a.iter().enumerate() {
        nc[slot] = na[axis];
    }
    for (slot, &axis) in free_b.iter().enumerate() {
        nc[free_a.len() + slot] = nb[axis];
    }

    let mut c = match Tensor::zeros_with_layout(&nc, a.layout()) {
        Ok(t) => t,
        Err(_) => {
            return Err(KernelError::incompatible_shapes(
                "ttt",
                na.to_vec(),
                nc,
                "result shape is not a valid tensor shape",
            ))
        }
    };

    let mut ia = Shape::from_elem(0, pa);
    let mut ib = Shape::from_elem(0, pb);
    for ic in MultiIndexIter::new(c.extents().dims(), c.layout()) {
        for (slot, &axis) in free_a.iter().enumerate() {
            ia[axis] = ic[slot];
        }
        for (slot, &axis) in free_b.iter().enumerate() {
            ib[axis] = ic[free_a.len() + slot];
        }
        let mut sum = T::zero();
        if contracted.is_empty() {
            sum = a[a.strides().offset(&ia)].clone() * b[b.strides().offset(&ib)].clone();
        } else {
            for ik in MultiIndexIter::new(&contracted, Layout::FirstOrder) {
                for ((&ma, &mb), &k) in phia.iter().zip(phib.iter()).zip(ik.iter()) {
                    ia[ma - 1] = k;
                    ib[mb - 1] = k;
                }
                sum = sum
                    + a[a.strides().offset(&ia)].clone() * b[b.strides().offset(&ib)].clone();
            }
        }
        let out = c.strides().offset(&ic);
        c[out] = sum;
    }
    Ok(c)
}

/// Sum of products of corresponding elements.
///
/// Both tensors must have exactly the same shape; elements are paired by
/// multi-index, so operands may differ in layout.
///
/// # Errors
///
/// Returns an error if the shapes differ or an operand is empty.
pub fn inner_prod<T>(a: &Tensor<T>, b: &Tensor<T>) -> KernelResult<T>
where
    T: Clone + Zero + Mul<Output = T> + Add<Output = T>,
{
    if a.is_empty() {
        return Err(KernelError::empty_input("inner_prod", "lhs"));
    }
    if b.is_empty() {
        return Err(KernelError::empty_input("inner_prod", "rhs"));
    }
    if !extents_equal(a.extents(), b.extents()) {
        return Err(KernelError::incompatible_shapes(
            "inner_prod",
            a.extents().dims().to_vec(),
            b.extents().dims().to_vec(),
            "Inner product requires identical shapes",
        ));
    }
    let mut sum = T::zero();
    for idx in MultiIndexIter::new(a.extents().dims(), a.layout()) {
        sum = sum
            + a[a.strides().offset(&idx)].clone() * b[b.strides().offset(&idx)].clone();
    }
    Ok(sum)
}
