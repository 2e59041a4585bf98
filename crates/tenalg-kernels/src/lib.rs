//! # tenalg-kernels
//!
//! Tensor contraction kernels for Tenalg.
//!
//! This crate implements the dense contraction operations over the tensor
//! types from `tenalg-core`:
//!
//! - **Mode products** ([`ttv`], [`ttm`]) contracting one axis against a
//!   vector or matrix
//! - **General contraction** ([`ttt`]) over arbitrary mode pairs
//! - **Inner and outer products** ([`inner_prod`], [`outer_prod`])
//! - **Axis transposition** ([`trans`])
//!
//! Contraction modes are one-based throughout, following the conventional
//! A ×₁ b notation; mode zero is always rejected.
//!
//! ## Quick Start
//!
//! ```
//! # use tenalg_core::Extents;
//! use tenalg_core::{Tensor, Vector};
//! use tenalg_kernels::ttv;
//!
//! let a = Tensor::from_elem(&[3, 4], 2.0).unwrap();
//! let ones = Vector::from_elem(3, 1.0);
//! let c = ttv(&a, &ones, 1).unwrap();
//! assert_eq!(c.extents().dims(), &[4, 1]);
//! assert!(c.iter().all(|&x| x == 6.0));
//! ```

pub mod contractions;
pub mod error;
pub mod nmode;
pub mod outer;
pub mod trans;


pub use contractions::{inner_prod, ttt};
pub use error::{KernelError, KernelResult};
pub use nmode::{ttm, ttv};
pub use outer::outer_prod;
pub use trans::trans;
