//! Integration tests for tenalg-kernels
//!
//! These tests verify end-to-end contraction pipelines over the core
//! tensor types, including interaction with lazy expressions.

use tenalg_core::{eval, Extents, Layout, Matrix, Tensor, Vector};
use tenalg_kernels::{inner_prod, outer_prod, trans, ttm, ttt, ttv};

#[test]
fn test_mode_product_pipeline() {
    // A is {3,4} filled with 2; contracting mode 1 with ones gives 6s
    let a = Tensor::from_elem(&[3, 4], 2.0).unwrap();
    let ones = Vector::from_elem(3, 1.0);
    let c = ttv(&a, &ones, 1).unwrap();
    assert_eq!(c.extents().dims(), &[4, 1]);
    assert!(c.iter().all(|&x| x == 6.0));

    // feeding the result into an expression keeps working
    let scaled = eval(&(2.0 * &c)).unwrap();
    assert!(scaled.iter().all(|&x| x == 12.0));
}

#[test]
fn test_chained_mode_products_collapse_to_grand_total() {
    let a = Tensor::from_vec((1..=24).map(|x| x as f64).collect(), &[2, 3, 4]).unwrap();
    let total: f64 = a.iter().sum();

    let s1 = ttv(&a, &Vector::from_elem(2, 1.0), 1).unwrap();
    assert_eq!(s1.extents().dims(), &[3, 4]);
    let s2 = ttv(&s1, &Vector::from_elem(3, 1.0), 1).unwrap();
    assert_eq!(s2.extents().dims(), &[4, 1]);
    let s3 = ttv(&s2, &Vector::from_elem(4, 1.0), 1).unwrap();
    assert_eq!(s3.extents().dims(), &[1, 1]);
    assert_eq!(*s3.at(&[0, 0]).unwrap(), total);
}

#[test]
fn test_ttm_then_ttv_matches_ttv_of_transformed() {
    // applying a matrix on mode 2 then contracting mode 1 commutes with
    // doing the contraction first
    let a = Tensor::from_vec((0..24).map(|x| x as f64).collect(), &[2, 3, 4]).unwrap();
    let m = Matrix::from_vec(5, 3, (0..15).map(|x| (x % 4) as f64).collect()).unwrap();
    let v = Vector::from_vec(vec![1.0, -1.0]);

    let lhs = ttv(&ttm(&a, &m, 2).unwrap(), &v, 1).unwrap();
    let rhs = ttm(&ttv(&a, &v, 1).unwrap(), &m, 1).unwrap();
    assert_eq!(lhs.extents().product(), rhs.extents().product());
    for (x, y) in lhs.iter().zip(rhs.iter()) {
        assert!((x - y).abs() < 1e-9);
    }
}

#[test]
fn test_ttt_reproduces_matrix_multiplication() {
    let a = Tensor::from_vec((0..6).map(|x| x as f64).collect(), &[2, 3]).unwrap();
    let b = Tensor::from_vec((0..12).map(|x| x as f64).collect(), &[3, 4]).unwrap();
    let c = ttt(&a, &b, &[2], &[1]).unwrap();

    let expected = a
        .to_matrix()
        .unwrap()
        .matmul(&b.to_matrix().unwrap())
        .unwrap();
    for i in 0..2 {
        for j in 0..4 {
            assert_eq!(*c.at(&[i, j]).unwrap(), expected[(i, j)]);
        }
    }
}

#[test]
fn test_outer_then_full_contraction_is_product_of_totals() {
    let a = Tensor::from_elem(&[2, 2], 3.0).unwrap();
    let b = Tensor::from_elem(&[2, 2], 5.0).unwrap();

    let outer = outer_prod(&a, &b).unwrap();
    assert_eq!(outer.extents().dims(), &[2, 2, 2, 2]);

    let sum: f64 = outer.iter().sum();
    let total_a: f64 = a.iter().sum();
    let total_b: f64 = b.iter().sum();
    assert_eq!(sum, total_a * total_b);
}

#[test]
fn test_inner_prod_on_expression_results() {
    // B = A + 3A over a 2-filled tensor is 8 everywhere
    let a = Tensor::from_elem(&[2, 2], 2.0).unwrap();
    let b = eval(&(&a + 3.0 * &a)).unwrap();
    assert!(b.iter().all(|&x| x == 8.0));

    assert_eq!(inner_prod(&a, &b).unwrap(), 4.0 * (2.0 * 8.0));
    assert_eq!(inner_prod(&b, &b).unwrap(), 4.0 * 64.0);
}

#[test]
fn test_trans_respects_layout() {
    let first = Tensor::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
    let t_first = trans(&first, &[2, 1]).unwrap();
    assert_eq!(t_first.layout(), Layout::FirstOrder);

    let last =
        Tensor::from_vec_with_layout((0..6).collect::<Vec<i32>>(), &[2, 3], Layout::LastOrder)
            .unwrap();
    let t_last = trans(&last, &[2, 1]).unwrap();
    assert_eq!(t_last.layout(), Layout::LastOrder);

    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(t_first.at(&[j, i]).unwrap(), first.at(&[i, j]).unwrap());
            assert_eq!(t_last.at(&[j, i]).unwrap(), last.at(&[i, j]).unwrap());
        }
    }
}

#[test]
fn test_kernel_errors_surface_cleanly() {
    let a = Tensor::from_elem(&[2, 3], 1.0).unwrap();

    let err = ttv(&a, &Vector::from_elem(9, 1.0), 1).unwrap_err();
    assert!(err.to_string().contains("ttv"));

    let err = ttv(&a, &Vector::from_elem(2, 1.0), 0).unwrap_err();
    assert!(err.to_string().contains("Invalid mode 0"));

    let err = trans(&a, &[1, 2, 3]).unwrap_err();
    assert!(err.to_string().contains("permutation"));
}
