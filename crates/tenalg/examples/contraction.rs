//! Contraction walkthrough: mode products, general contraction, and views
//!
//! Run with: cargo run -p tenalg --example contraction

use anyhow::Result;
use tenalg::prelude::*;

fn main() -> Result<()> {
    // A {3,4} tensor of twos, contracted over mode 1 with a ones vector
    let a = Tensor::from_elem(&[3, 4], 2.0)?;
    let summed = ttv(&a, &Vector::from_elem(3, 1.0), 1)?;
    println!("ttv(A, 1) = {}", summed);

    // lazy arithmetic: nothing is allocated until eval
    let b = eval(&(&a + 3.0 * &a))?;
    println!("A + 3A = {}", b);

    // general contraction reproducing a matrix product
    let x = Tensor::from_vec((0..6).map(f64::from).collect(), &[2, 3])?;
    let y = Tensor::from_vec((0..12).map(f64::from).collect(), &[3, 4])?;
    let xy = ttt(&x, &y, &[2], &[1])?;
    println!("X ttt Y = {}", xy);

    // subtensor views select without copying
    let t = Tensor::from_vec((0..16).collect::<Vec<i32>>(), &[4, 4])?;
    let corner = t.subtensor(&[Span::new(2, 3), Span::new(2, 3)])?;
    println!("lower corner = {}", corner.to_tensor());

    // inner product of a tensor with itself
    println!("<X, X> = {}", inner_prod(&x, &x)?);

    Ok(())
}
