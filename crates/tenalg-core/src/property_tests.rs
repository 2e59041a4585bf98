//! Property-based tests for the tensor core
//!
//! This module uses proptest to verify structural invariants of extents,
//! strides, and expression arithmetic across randomly generated shapes.

#[cfg(test)]
mod tests {
    use crate::comparison::equal;
    use crate::evaluator::eval;
    use crate::{DynamicExtents, Extents, Layout, Strides, Tensor};
    use proptest::prelude::*;

    // Strategy for generating valid tensor shapes (2-4D, reasonable sizes)
    fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(2usize..10, 2..=4)
    }

    #[test]
    fn test_proptest_smoke() {
        let tensor = Tensor::<f64>::zeros(&[2, 3]).unwrap();
        assert_eq!(tensor.extents().dims(), &[2, 3]);
    }

    proptest! {
        #[test]
        fn prop_strides_boundary_is_one(shape in shape_strategy()) {
            let e = DynamicExtents::new(&shape).unwrap();
            let first = Strides::new(&e, Layout::FirstOrder).unwrap();
            prop_assert_eq!(first[0], 1);
            let last = Strides::new(&e, Layout::LastOrder).unwrap();
            prop_assert_eq!(last[shape.len() - 1], 1);
        }

        #[test]
        fn prop_strides_cover_every_element_once(shape in shape_strategy()) {
            // the largest offset plus one equals the element count
            let e = DynamicExtents::new(&shape).unwrap();
            for layout in [Layout::FirstOrder, Layout::LastOrder] {
                let w = Strides::new(&e, layout).unwrap();
                let max_index: Vec<usize> = shape.iter().map(|&d| d - 1).collect();
                prop_assert_eq!(w.offset(&max_index) + 1, e.product());
            }
        }

        #[test]
        fn prop_product_matches_len(shape in shape_strategy()) {
            let t = Tensor::<f64>::zeros(&shape).unwrap();
            prop_assert_eq!(t.len(), t.extents().product());
        }

        #[test]
        fn prop_reshape_identity_roundtrip(shape in shape_strategy()) {
            let t = Tensor::<f64>::ones(&shape).unwrap();
            let same = t.reshape(&shape).unwrap();
            prop_assert_eq!(same.data(), t.data());
        }

        #[test]
        fn prop_reshape_preserves_prefix(shape in shape_strategy()) {
            let n: usize = shape.iter().product();
            let t = Tensor::from_vec((0..n as i64).collect(), &shape).unwrap();
            let mut grown = shape.clone();
            grown[0] += 1;
            let g = t.reshape(&grown).unwrap();
            prop_assert_eq!(&g.data()[..n], t.data());
            prop_assert!(g.data()[n..].iter().all(|&x| x == 0));
        }

        #[test]
        fn prop_add_scalar_then_subtract_is_identity(
            shape in shape_strategy(),
            c in -1000i64..1000,
        ) {
            let n: usize = shape.iter().product();
            let t = Tensor::from_vec((0..n as i64).collect(), &shape).unwrap();
            let back = eval(&((&t + c) - c)).unwrap();
            prop_assert_eq!(back.data(), t.data());
        }

        #[test]
        fn prop_scalar_addition_commutes(
            shape in shape_strategy(),
            c in -1000i64..1000,
        ) {
            let n: usize = shape.iter().product();
            let t = Tensor::from_vec((0..n as i64).collect(), &shape).unwrap();
            prop_assert!(equal(&(&t + c), &(c + &t)));
        }

        #[test]
        fn prop_expression_shape_is_left_biased(shape in shape_strategy()) {
            use crate::expression::Expression;
            let t = Tensor::<i32>::ones(&shape).unwrap();
            let node = 5 * &t;
            let e = node.extents().unwrap();
            prop_assert_eq!(e.dims(), shape.as_slice());
            prop_assert!(node.all_extents_equal(&e));
        }

        #[test]
        fn prop_eval_matches_elementwise(shape in shape_strategy()) {
            let n: usize = shape.iter().product();
            let a = Tensor::from_vec((0..n as i64).collect(), &shape).unwrap();
            let b = Tensor::from_vec((0..n as i64).map(|x| x * 2).collect(), &shape).unwrap();
            let sum = eval(&(&a + &b)).unwrap();
            for i in 0..n {
                prop_assert_eq!(sum[i], a[i] + b[i]);
            }
        }
    }
}
