//! Lazy element-wise expression nodes
//!
//! Arithmetic on tensors builds a tree of lightweight nodes instead of
//! allocating intermediates; the evaluator walks the tree once per output
//! element. Shapes are checked when a binary node is constructed, so a
//! mismatched tree can never reach evaluation.
//!
//! Scalar operands carry no shape. The shape of a tree is retrieved
//! left-biased: the first shaped operand in a left-to-right walk wins, and
//! [`Expression::all_extents_equal`] verifies that every other shaped
//! operand agrees.

use crate::error::{Result, TensorError};
use crate::extents::{extents_equal, DynamicExtents, Extents};
use crate::layout::Layout;
use crate::storage::Storage;
use crate::tensor::TensorBase;

/// Element producer over a linear index space
pub trait Expression {
    type Elem: Clone;

    /// Element at linear position `i` in storage order
    fn at(&self, i: usize) -> Self::Elem;

    /// Shape of the first shaped operand, left-biased; `None` for trees of
    /// scalars only
    fn extents(&self) -> Option<DynamicExtents>;

    /// Layout of the first shaped operand, left-biased
    fn layout(&self) -> Option<Layout> {
        None
    }

    /// Whether every shaped operand in the tree has exactly shape `e`
    fn all_extents_equal(&self, e: &DynamicExtents) -> bool;
}

impl<'a, T, E, S> Expression for &'a TensorBase<T, E, S>
where
    T: Clone,
    E: Extents,
    S: Storage<T>,
{
    type Elem = T;

    fn at(&self, i: usize) -> T {
        self.data()[i].clone()
    }

    fn extents(&self) -> Option<DynamicExtents> {
        Some(TensorBase::extents(self).to_dynamic())
    }

    fn layout(&self) -> Option<Layout> {
        Some(TensorBase::layout(self))
    }

    fn all_extents_equal(&self, e: &DynamicExtents) -> bool {
        extents_equal(TensorBase::extents(self), e)
    }
}

/// Shapeless scalar operand
#[derive(Debug, Clone, Copy)]
pub struct ScalarExpr<T> {
    value: T,
}

impl<T> ScalarExpr<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone> Expression for ScalarExpr<T> {
    type Elem = T;

    fn at(&self, _i: usize) -> T {
        self.value.clone()
    }

    fn extents(&self) -> Option<DynamicExtents> {
        None
    }

    fn all_extents_equal(&self, _e: &DynamicExtents) -> bool {
        true
    }
}

/// Element-wise application of `f` to one operand
#[derive(Debug, Clone)]
pub struct UnaryExpr<E, F> {
    expr: E,
    f: F,
}

impl<E, F> UnaryExpr<E, F>
where
    E: Expression,
    F: Fn(E::Elem) -> E::Elem,
{
    pub fn new(expr: E, f: F) -> Self {
        Self { expr, f }
    }
}

impl<E, F> Expression for UnaryExpr<E, F>
where
    E: Expression,
    F: Fn(E::Elem) -> E::Elem,
{
    type Elem = E::Elem;

    fn at(&self, i: usize) -> E::Elem {
        (self.f)(self.expr.at(i))
    }

    fn extents(&self) -> Option<DynamicExtents> {
        self.expr.extents()
    }

    fn layout(&self) -> Option<Layout> {
        self.expr.layout()
    }

    fn all_extents_equal(&self, e: &DynamicExtents) -> bool {
        self.expr.all_extents_equal(e)
    }
}

/// Element-wise combination of two operands.
///
/// Construction is where shape agreement is enforced; see
/// [`BinaryExpr::try_new`].
#[derive(Debug, Clone)]
pub struct BinaryExpr<L, R, F> {
    left: L,
    right: R,
    f: F,
}

impl<L, R, F> BinaryExpr<L, R, F>
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
    F: Fn(L::Elem, L::Elem) -> L::Elem,
{
    /// Combines two operands, verifying their shapes agree.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` when both operands are shaped and their
    /// shapes differ, and with `InvalidShape` when their layouts differ.
    pub fn try_new(left: L, right: R, f: F) -> Result<Self> {
        if let (Some(le), Some(re)) = (left.extents(), right.extents()) {
            if le != re {
                return Err(TensorError::shape_mismatch(
                    "element-wise expression",
                    le.dims(),
                    re.dims(),
                ));
            }
            if left.layout() != right.layout() {
                return Err(TensorError::invalid_shape(
                    le.dims(),
                    "element-wise operands must share a layout",
                ));
            }
        }
        Ok(Self { left, right, f })
    }

    /// Combines two operands.
    ///
    /// # Panics
    ///
    /// Panics if the operand shapes or layouts disagree. The operator sugar
    /// goes through here; use [`try_new`](Self::try_new) to handle the
    /// mismatch as a value.
    pub fn new(left: L, right: R, f: F) -> Self {
        match Self::try_new(left, right, f) {
            Ok(node) => node,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<L, R, F> Expression for BinaryExpr<L, R, F>
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
    F: Fn(L::Elem, L::Elem) -> L::Elem,
{
    type Elem = L::Elem;

    fn at(&self, i: usize) -> L::Elem {
        (self.f)(self.left.at(i), self.right.at(i))
    }

    fn extents(&self) -> Option<DynamicExtents> {
        self.left.extents().or_else(|| self.right.extents())
    }

    fn layout(&self) -> Option<Layout> {
        self.left.layout().or_else(|| self.right.layout())
    }

    fn all_extents_equal(&self, e: &DynamicExtents) -> bool {
        self.left.all_extents_equal(e) && self.right.all_extents_equal(e)
    }
}

/// Wrapper that carries the operator implementations for composed nodes.
///
/// Operators yield `Expr<...>` values so that further arithmetic keeps
/// building the tree without evaluating.
#[derive(Debug, Clone)]
pub struct Expr<X>(pub(crate) X);

impl<X: Expression> Expr<X> {
    pub fn into_inner(self) -> X {
        self.0
    }

    /// Materializes the tree; see [`eval`](crate::evaluator::eval)
    pub fn eval(&self) -> Result<crate::tensor::Tensor<X::Elem>> {
        crate::evaluator::eval(&self.0)
    }
}

impl<X: Expression> Expression for Expr<X> {
    type Elem = X::Elem;

    fn at(&self, i: usize) -> X::Elem {
        self.0.at(i)
    }

    fn extents(&self) -> Option<DynamicExtents> {
        self.0.extents()
    }

    fn layout(&self) -> Option<Layout> {
        self.0.layout()
    }

    fn all_extents_equal(&self, e: &DynamicExtents) -> bool {
        self.0.all_extents_equal(e)
    }
}
