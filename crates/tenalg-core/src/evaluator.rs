//! Expression materialization
//!
//! A single pass over the linear index space in ascending order. Nodes are
//! re-read on every element; there is no caching of subtree results, so
//! evaluating an expression twice reads its operands twice.

use crate::error::{Result, TensorError};
use crate::expression::Expression;
use crate::extents::{extents_equal, Extents};
use crate::storage::Storage;
use crate::tensor::{Tensor, TensorBase};

/// Materializes an expression into a freshly allocated tensor.
///
/// The result adopts the left-biased shape and layout of the tree.
///
/// # Errors
///
/// Fails with `InvalidShape` when no operand carries a shape, such as a
/// tree of scalars only, or when shaped operands disagree.
///
/// # Examples
///
/// ```
/// use tenalg_core::{evaluator, Tensor};
///
/// let a = Tensor::from_elem(&[2, 2], 2.0).unwrap();
/// let b = evaluator::eval(&(&a + &a)).unwrap();
/// assert!(b.iter().all(|&x| x == 4.0));
/// ```
pub fn eval<X: Expression>(expr: &X) -> Result<Tensor<X::Elem>> {
    let extents = expr.extents().ok_or_else(|| {
        TensorError::invalid_shape(vec![], "expression has no shaped operand")
    })?;
    if !expr.all_extents_equal(&extents) {
        return Err(TensorError::invalid_shape(
            extents.dims(),
            "expression operands disagree in shape",
        ));
    }
    let layout = expr.layout().unwrap_or_default();
    let data: Vec<X::Elem> = (0..extents.product()).map(|i| expr.at(i)).collect();
    Ok(Tensor::from_parts_unchecked(extents, layout, data))
}

/// Materializes an expression into an existing tensor.
///
/// # Errors
///
/// Fails with `ShapeMismatch` when the destination shape differs from the
/// expression shape, in addition to the [`eval`] failure modes.
pub fn eval_into<X, E, S>(dest: &mut TensorBase<X::Elem, E, S>, expr: &X) -> Result<()>
where
    X: Expression,
    E: Extents,
    S: Storage<X::Elem>,
{
    if let Some(extents) = expr.extents() {
        if !extents_equal(dest.extents(), &extents) {
            return Err(TensorError::shape_mismatch(
                "evaluate into",
                dest.extents().dims(),
                extents.dims(),
            ));
        }
        if !expr.all_extents_equal(&extents) {
            return Err(TensorError::invalid_shape(
                extents.dims(),
                "expression operands disagree in shape",
            ));
        }
    }
    for (i, slot) in dest.data_mut().iter_mut().enumerate() {
        *slot = expr.at(i);
    }
    Ok(())
}

impl<T: Clone> Tensor<T> {
    /// Constructs a tensor by materializing an expression
    pub fn from_expr<X: Expression<Elem = T>>(expr: &X) -> Result<Self> {
        eval(expr)
    }
}

impl<T: Clone, E: Extents, S: Storage<T>> TensorBase<T, E, S> {
    /// Overwrites this tensor with the elements of an expression of the
    /// same shape
    pub fn assign<X: Expression<Elem = T>>(&mut self, expr: &X) -> Result<()> {
        eval_into(self, expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{BinaryExpr, ScalarExpr};
    use crate::layout::Layout;

    #[test]
    fn test_eval_adopts_shape_and_layout() {
        let a = Tensor::from_vec_with_layout(vec![1, 2, 3, 4], &[2, 2], Layout::LastOrder).unwrap();
        let node = BinaryExpr::new(&a, ScalarExpr::new(10), |x, y| x + y);
        let out = eval(&node).unwrap();
        assert_eq!(out.extents().dims(), &[2, 2]);
        assert_eq!(out.layout(), Layout::LastOrder);
        assert_eq!(out.data(), &[11, 12, 13, 14]);
    }

    #[test]
    fn test_eval_ascending_linear_order() {
        let a = Tensor::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
        let node = BinaryExpr::new(&a, &a, |x, y| x + y);
        let out = eval(&node).unwrap();
        assert_eq!(out.data(), &[0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_eval_rejects_scalar_only_tree() {
        let node = BinaryExpr::new(ScalarExpr::new(1.0), ScalarExpr::new(2.0), |x, y| x + y);
        assert!(eval(&node).is_err());
    }

    #[test]
    fn test_eval_into_checks_destination_shape() {
        let a = Tensor::from_elem(&[2, 2], 3).unwrap();
        let node = BinaryExpr::new(&a, ScalarExpr::new(1), |x, y| x * y);

        let mut good = Tensor::<i32>::zeros(&[2, 2]).unwrap();
        eval_into(&mut good, &node).unwrap();
        assert_eq!(good.data(), &[3, 3, 3, 3]);

        let mut bad = Tensor::<i32>::zeros(&[2, 3]).unwrap();
        assert!(matches!(
            eval_into(&mut bad, &node),
            Err(TensorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_assign_and_from_expr() {
        let a = Tensor::from_elem(&[2, 2], 2.0).unwrap();
        let b = Tensor::from_expr(&(&a + &a)).unwrap();
        assert!(b.iter().all(|&x| x == 4.0));

        let mut c = Tensor::<f64>::zeros(&[2, 2]).unwrap();
        c.assign(&(&a + &b)).unwrap();
        assert!(c.iter().all(|&x| x == 6.0));
    }
}
