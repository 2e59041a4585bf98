//! Operator sugar over the expression nodes
//!
//! `+ - * /` on tensor references, subtensor views, and already-built
//! nodes produce [`Expr`] trees; nothing is computed until evaluation.
//! Scalar operands are the primitive numeric types, lifted to
//! [`ScalarExpr`] on either side.
//!
//! Shape agreement is enforced when the node is built, so the operators
//! panic on mismatched operands. Build nodes with
//! [`BinaryExpr::try_new`] to handle the mismatch as a value.

use crate::expression::{BinaryExpr, Expr, Expression, ScalarExpr, UnaryExpr};
use crate::extents::{extents_equal, Extents};
use crate::storage::Storage;
use crate::subtensor::Subtensor;
use crate::tensor::TensorBase;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

type BinNode<L, R, T> = Expr<BinaryExpr<L, R, fn(T, T) -> T>>;
type UnNode<X, T> = Expr<UnaryExpr<X, fn(T) -> T>>;

macro_rules! impl_elementwise {
    ($op:ident, $method:ident) => {
        impl<'a, 'b, T, E1, S1, E2, S2> $op<&'b TensorBase<T, E2, S2>>
            for &'a TensorBase<T, E1, S1>
        where
            T: Clone + $op<Output = T>,
            E1: Extents,
            S1: Storage<T>,
            E2: Extents,
            S2: Storage<T>,
        {
            type Output = BinNode<&'a TensorBase<T, E1, S1>, &'b TensorBase<T, E2, S2>, T>;

            fn $method(self, rhs: &'b TensorBase<T, E2, S2>) -> Self::Output {
                Expr(BinaryExpr::new(self, rhs, <T as $op>::$method))
            }
        }

        impl<'a, T, E1, S1, X> $op<Expr<X>> for &'a TensorBase<T, E1, S1>
        where
            T: Clone + $op<Output = T>,
            E1: Extents,
            S1: Storage<T>,
            X: Expression<Elem = T>,
        {
            type Output = BinNode<&'a TensorBase<T, E1, S1>, X, T>;

            fn $method(self, rhs: Expr<X>) -> Self::Output {
                Expr(BinaryExpr::new(self, rhs.0, <T as $op>::$method))
            }
        }

        impl<'b, T, E2, S2, X> $op<&'b TensorBase<T, E2, S2>> for Expr<X>
        where
            T: Clone + $op<Output = T>,
            E2: Extents,
            S2: Storage<T>,
            X: Expression<Elem = T>,
        {
            type Output = BinNode<X, &'b TensorBase<T, E2, S2>, T>;

            fn $method(self, rhs: &'b TensorBase<T, E2, S2>) -> Self::Output {
                Expr(BinaryExpr::new(self.0, rhs, <T as $op>::$method))
            }
        }

        impl<X, Y> $op<Expr<Y>> for Expr<X>
        where
            X: Expression,
            Y: Expression<Elem = X::Elem>,
            X::Elem: $op<Output = X::Elem>,
        {
            type Output = BinNode<X, Y, X::Elem>;

            fn $method(self, rhs: Expr<Y>) -> Self::Output {
                Expr(BinaryExpr::new(self.0, rhs.0, <X::Elem as $op>::$method))
            }
        }

        impl<'a, 'b, 'c, 'd, T> $op<&'d Subtensor<'c, T>> for &'b Subtensor<'a, T>
        where
            T: Clone + $op<Output = T>,
        {
            type Output = BinNode<&'b Subtensor<'a, T>, &'d Subtensor<'c, T>, T>;

            fn $method(self, rhs: &'d Subtensor<'c, T>) -> Self::Output {
                Expr(BinaryExpr::new(self, rhs, <T as $op>::$method))
            }
        }

        impl<'a, 'b, 'c, T, E, S> $op<&'b TensorBase<T, E, S>> for &'c Subtensor<'a, T>
        where
            T: Clone + $op<Output = T>,
            E: Extents,
            S: Storage<T>,
        {
            type Output = BinNode<&'c Subtensor<'a, T>, &'b TensorBase<T, E, S>, T>;

            fn $method(self, rhs: &'b TensorBase<T, E, S>) -> Self::Output {
                Expr(BinaryExpr::new(self, rhs, <T as $op>::$method))
            }
        }

        impl<'a, 'b, 'c, T, E, S> $op<&'c Subtensor<'a, T>> for &'b TensorBase<T, E, S>
        where
            T: Clone + $op<Output = T>,
            E: Extents,
            S: Storage<T>,
        {
            type Output = BinNode<&'b TensorBase<T, E, S>, &'c Subtensor<'a, T>, T>;

            fn $method(self, rhs: &'c Subtensor<'a, T>) -> Self::Output {
                Expr(BinaryExpr::new(self, rhs, <T as $op>::$method))
            }
        }

        impl<'a, 'b, T, X> $op<Expr<X>> for &'b Subtensor<'a, T>
        where
            T: Clone + $op<Output = T>,
            X: Expression<Elem = T>,
        {
            type Output = BinNode<&'b Subtensor<'a, T>, X, T>;

            fn $method(self, rhs: Expr<X>) -> Self::Output {
                Expr(BinaryExpr::new(self, rhs.0, <T as $op>::$method))
            }
        }

        impl<'a, 'b, T, X> $op<&'b Subtensor<'a, T>> for Expr<X>
        where
            T: Clone + $op<Output = T>,
            X: Expression<Elem = T>,
        {
            type Output = BinNode<X, &'b Subtensor<'a, T>, T>;

            fn $method(self, rhs: &'b Subtensor<'a, T>) -> Self::Output {
                Expr(BinaryExpr::new(self.0, rhs, <T as $op>::$method))
            }
        }
    };
}

impl_elementwise!(Add, add);
impl_elementwise!(Sub, sub);
impl_elementwise!(Mul, mul);
impl_elementwise!(Div, div);

macro_rules! impl_scalar_ops {
    ($($p:ty),* $(,)?) => {$(
        impl_scalar_ops!(@op $p, Add, add);
        impl_scalar_ops!(@op $p, Sub, sub);
        impl_scalar_ops!(@op $p, Mul, mul);
        impl_scalar_ops!(@op $p, Div, div);
        impl_scalar_ops!(@assign $p, AddAssign, add_assign, Add, add);
        impl_scalar_ops!(@assign $p, SubAssign, sub_assign, Sub, sub);
        impl_scalar_ops!(@assign $p, MulAssign, mul_assign, Mul, mul);
        impl_scalar_ops!(@assign $p, DivAssign, div_assign, Div, div);
    )*};

    (@op $p:ty, $op:ident, $method:ident) => {
        impl<'a, E, S> $op<$p> for &'a TensorBase<$p, E, S>
        where
            E: Extents,
            S: Storage<$p>,
        {
            type Output = BinNode<&'a TensorBase<$p, E, S>, ScalarExpr<$p>, $p>;

            fn $method(self, rhs: $p) -> Self::Output {
                Expr(BinaryExpr::new(self, ScalarExpr::new(rhs), <$p as $op>::$method))
            }
        }

        impl<'a, E, S> $op<&'a TensorBase<$p, E, S>> for $p
        where
            E: Extents,
            S: Storage<$p>,
        {
            type Output = BinNode<ScalarExpr<$p>, &'a TensorBase<$p, E, S>, $p>;

            fn $method(self, rhs: &'a TensorBase<$p, E, S>) -> Self::Output {
                Expr(BinaryExpr::new(ScalarExpr::new(self), rhs, <$p as $op>::$method))
            }
        }

        impl<X: Expression<Elem = $p>> $op<$p> for Expr<X> {
            type Output = BinNode<X, ScalarExpr<$p>, $p>;

            fn $method(self, rhs: $p) -> Self::Output {
                Expr(BinaryExpr::new(self.0, ScalarExpr::new(rhs), <$p as $op>::$method))
            }
        }

        impl<X: Expression<Elem = $p>> $op<Expr<X>> for $p {
            type Output = BinNode<ScalarExpr<$p>, X, $p>;

            fn $method(self, rhs: Expr<X>) -> Self::Output {
                Expr(BinaryExpr::new(ScalarExpr::new(self), rhs.0, <$p as $op>::$method))
            }
        }

        impl<'a, 'b> $op<$p> for &'b Subtensor<'a, $p> {
            type Output = BinNode<&'b Subtensor<'a, $p>, ScalarExpr<$p>, $p>;

            fn $method(self, rhs: $p) -> Self::Output {
                Expr(BinaryExpr::new(self, ScalarExpr::new(rhs), <$p as $op>::$method))
            }
        }

        impl<'a, 'b> $op<&'b Subtensor<'a, $p>> for $p {
            type Output = BinNode<ScalarExpr<$p>, &'b Subtensor<'a, $p>, $p>;

            fn $method(self, rhs: &'b Subtensor<'a, $p>) -> Self::Output {
                Expr(BinaryExpr::new(ScalarExpr::new(self), rhs, <$p as $op>::$method))
            }
        }
    };

    (@assign $p:ty, $op:ident, $method:ident, $binop:ident, $binmethod:ident) => {
        impl<E, S> $op<$p> for TensorBase<$p, E, S>
        where
            E: Extents,
            S: Storage<$p>,
        {
            fn $method(&mut self, rhs: $p) {
                for slot in self.data_mut() {
                    *slot = <$p as $binop>::$binmethod(*slot, rhs);
                }
            }
        }
    };
}

impl_scalar_ops!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl<'a, T, E, S> Neg for &'a TensorBase<T, E, S>
where
    T: Clone + Neg<Output = T>,
    E: Extents,
    S: Storage<T>,
{
    type Output = UnNode<&'a TensorBase<T, E, S>, T>;

    fn neg(self) -> Self::Output {
        Expr(UnaryExpr::new(self, <T as Neg>::neg))
    }
}

impl<X> Neg for Expr<X>
where
    X: Expression,
    X::Elem: Neg<Output = X::Elem>,
{
    type Output = UnNode<X, X::Elem>;

    fn neg(self) -> Self::Output {
        Expr(UnaryExpr::new(self.0, <X::Elem as Neg>::neg))
    }
}

impl<'a, 'b, T> Neg for &'b Subtensor<'a, T>
where
    T: Clone + Neg<Output = T>,
{
    type Output = UnNode<&'b Subtensor<'a, T>, T>;

    fn neg(self) -> Self::Output {
        Expr(UnaryExpr::new(self, <T as Neg>::neg))
    }
}

macro_rules! impl_compound_assign {
    ($op:ident, $method:ident, $binop:ident, $binmethod:ident) => {
        impl<'b, T, E, S, E2, S2> $op<&'b TensorBase<T, E2, S2>> for TensorBase<T, E, S>
        where
            T: Clone + $binop<Output = T>,
            E: Extents,
            S: Storage<T>,
            E2: Extents,
            S2: Storage<T>,
        {
            /// # Panics
            ///
            /// Panics if the operand shapes differ.
            fn $method(&mut self, rhs: &'b TensorBase<T, E2, S2>) {
                if !extents_equal(self.extents(), rhs.extents()) {
                    panic!(
                        "{}",
                        crate::error::TensorError::shape_mismatch(
                            "compound assignment",
                            self.extents().dims(),
                            rhs.extents().dims(),
                        )
                    );
                }
                for (slot, r) in self.data_mut().iter_mut().zip(rhs.data().iter()) {
                    *slot = <T as $binop>::$binmethod(slot.clone(), r.clone());
                }
            }
        }

        impl<T, E, S, X> $op<Expr<X>> for TensorBase<T, E, S>
        where
            T: Clone + $binop<Output = T>,
            E: Extents,
            S: Storage<T>,
            X: Expression<Elem = T>,
        {
            /// # Panics
            ///
            /// Panics if the expression shape differs from this tensor.
            fn $method(&mut self, rhs: Expr<X>) {
                if let Some(re) = rhs.extents() {
                    if !extents_equal(self.extents(), &re) || !rhs.all_extents_equal(&re) {
                        panic!(
                            "{}",
                            crate::error::TensorError::shape_mismatch(
                                "compound assignment",
                                self.extents().dims(),
                                re.dims(),
                            )
                        );
                    }
                }
                for (i, slot) in self.data_mut().iter_mut().enumerate() {
                    *slot = <T as $binop>::$binmethod(slot.clone(), rhs.at(i));
                }
            }
        }
    };
}

impl_compound_assign!(AddAssign, add_assign, Add, add);
impl_compound_assign!(SubAssign, sub_assign, Sub, sub);
impl_compound_assign!(MulAssign, mul_assign, Mul, mul);
impl_compound_assign!(DivAssign, div_assign, Div, div);

#[cfg(test)]
mod tests {
    use crate::evaluator::eval;
    use crate::extents::Extents;
    use crate::span::Span;
    use crate::tensor::Tensor;

    #[test]
    fn test_tensor_tensor_arithmetic() {
        let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let b = Tensor::from_elem(&[2, 2], 10.0).unwrap();
        assert_eq!(eval(&(&a + &b)).unwrap().data(), &[11.0, 12.0, 13.0, 14.0]);
        assert_eq!(eval(&(&b - &a)).unwrap().data(), &[9.0, 8.0, 7.0, 6.0]);
        assert_eq!(eval(&(&a * &a)).unwrap().data(), &[1.0, 4.0, 9.0, 16.0]);
        assert_eq!(eval(&(&b / &a)).unwrap().data(), &[10.0, 5.0, 10.0 / 3.0, 2.5]);
    }

    #[test]
    fn test_scalar_operands_on_both_sides() {
        let a = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        assert_eq!(eval(&(&a + 1)).unwrap().data(), &[2, 3, 4, 5]);
        assert_eq!(eval(&(10 - &a)).unwrap().data(), &[9, 8, 7, 6]);
        assert_eq!(eval(&(3 * &a)).unwrap().data(), &[3, 6, 9, 12]);
        assert_eq!(eval(&(&a / 2)).unwrap().data(), &[0, 1, 1, 2]);
    }

    #[test]
    fn test_composed_tree_evaluates_once() {
        // b = a + 3*a over a 2-filled tensor is 8 everywhere
        let a = Tensor::from_elem(&[2, 2], 2.0).unwrap();
        let b = eval(&(&a + 3.0 * &a)).unwrap();
        assert!(b.iter().all(|&x| x == 8.0));
        assert_eq!(b.extents().dims(), &[2, 2]);
    }

    #[test]
    fn test_add_then_sub_scalar_roundtrip() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let back = eval(&((&t + 4.0) - 4.0)).unwrap();
        assert_eq!(back.data(), t.data());
    }

    #[test]
    fn test_negation() {
        let a = Tensor::from_vec(vec![1, -2, 3, -4], &[2, 2]).unwrap();
        assert_eq!(eval(&-&a).unwrap().data(), &[-1, 2, -3, 4]);
        assert_eq!(eval(&-(&a + 1i32)).unwrap().data(), &[-2, 1, -4, 3]);
    }

    #[test]
    #[should_panic]
    fn test_operator_panics_on_shape_mismatch() {
        let a = Tensor::<f64>::zeros(&[2, 3]).unwrap();
        let b = Tensor::<f64>::zeros(&[3, 2]).unwrap();
        let _ = &a + &b;
    }

    #[test]
    fn test_subtensor_operands() {
        let t = Tensor::from_vec((0..16).collect::<Vec<i32>>(), &[4, 4]).unwrap();
        let v = t.subtensor(&[Span::new(0, 1), Span::new(0, 1)]).unwrap();
        let w = t.subtensor(&[Span::new(2, 3), Span::new(2, 3)]).unwrap();
        let sum = eval(&(&v + &w)).unwrap();
        assert_eq!(sum.extents().dims(), &[2, 2]);
        assert_eq!(*sum.at(&[0, 0]).unwrap(), 0 + 10);
        assert_eq!(*sum.at(&[1, 1]).unwrap(), 5 + 15);

        let scaled = eval(&(2 * &v)).unwrap();
        assert_eq!(*scaled.at(&[1, 1]).unwrap(), 10);
    }

    #[test]
    fn test_compound_assignment() {
        let mut a = Tensor::from_elem(&[2, 2], 1.0).unwrap();
        let b = Tensor::from_elem(&[2, 2], 2.0).unwrap();
        a += &b;
        assert!(a.iter().all(|&x| x == 3.0));
        a *= 2.0;
        assert!(a.iter().all(|&x| x == 6.0));
        a -= &b;
        assert!(a.iter().all(|&x| x == 4.0));
        a /= 4.0;
        assert!(a.iter().all(|&x| x == 1.0));
        a += 2.0 * &b;
        assert!(a.iter().all(|&x| x == 5.0));
    }

    #[test]
    #[should_panic]
    fn test_compound_assignment_panics_on_mismatch() {
        let mut a = Tensor::<i32>::zeros(&[2, 2]).unwrap();
        let b = Tensor::<i32>::zeros(&[2, 3]).unwrap();
        a += &b;
    }
}
