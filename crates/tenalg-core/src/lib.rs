//! # tenalg-core
//!
//! Core tensor types, shape metadata, views, and lazy element-wise
//! arithmetic for Tenalg.
//!
//! This crate provides the foundational building blocks of the stack:
//!
//! - **Shape representations** ([`DynamicExtents`], [`FixedRankExtents`],
//!   [`StaticExtents`]) trading flexibility against compile-time checking
//! - **Dense tensors** ([`Tensor`], [`FixedRankTensor`], [`StaticTensor`])
//!   over a shared [`TensorBase`] core
//! - **Strided views** ([`Subtensor`]) selected by [`Span`]s without copying
//! - **Lazy expressions** built by the arithmetic operators and materialized
//!   by [`evaluator::eval`]
//! - **Matrix and vector proxies** ([`Matrix`], [`Vector`]) for the rank-2
//!   boundary with numerical algorithms
//!
//! ## Memory Layout
//!
//! Tensors default to the first-order (column-major) layout; the last-order
//! (row-major) layout is selected per tensor with the `_with_layout`
//! constructors. Strides are derived from the extents once and kept
//! consistent through every operation.
//!
//! ## Shape Discipline
//!
//! A valid shape has rank two or more and no zero extents; vectors and
//! scalars are modelled as rank-2 shapes with unit axes. Element-wise
//! expressions verify operand shapes when the node is built, so shape
//! errors surface at the construction site rather than at evaluation.
//!
//! ## Quick Start
//!
//! ```
//! # use tenalg_core::Extents;
//! use tenalg_core::{evaluator, Tensor};
//!
//! let a = Tensor::from_elem(&[2, 2], 2.0).unwrap();
//! let b = evaluator::eval(&(&a + 3.0 * &a)).unwrap();
//! assert!(b.iter().all(|&x| x == 8.0));
//!
//! let v = a.subtensor(&[tenalg_core::Span::at(0), tenalg_core::Span::all()]).unwrap();
//! assert_eq!(v.extents().dims(), &[1, 2]);
//! ```

pub mod comparison;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod extents;
pub mod index;
pub mod layout;
pub mod matrix;
pub mod ops;
pub mod span;
pub mod storage;
pub mod strides;
pub mod subtensor;
pub mod tensor;

mod property_tests;

pub use comparison::{equal, greater, greater_equal, less, less_equal};
pub use error::{Result, TensorError};
pub use evaluator::{eval, eval_into};
pub use expression::{BinaryExpr, Expr, Expression, ScalarExpr, UnaryExpr};
pub use extents::{
    extents_equal, DynamicExtents, Extents, FixedRankExtents, Shape, StaticDims, StaticExtents,
};
pub use layout::Layout;
pub use matrix::{Matrix, Vector};
pub use span::{ResolvedSpan, Span};
pub use storage::{ArrayStorage, ResizableStorage, Storage, VecStorage};
pub use strides::Strides;
pub use subtensor::{Subtensor, SubtensorMut};
pub use tensor::{FixedRankTensor, StaticTensor, Tensor, TensorBase};
