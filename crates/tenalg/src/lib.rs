//! # Tenalg - Dense Tensor Algebra
//!
//! **Dense tensor algebra** with multi-layout storage, lazy element-wise
//! expressions, subtensor views, and one-based contraction kernels.
//!
//! This is the **meta crate** that re-exports all Tenalg components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use tenalg::prelude::*;
//!
//! // A is {3,4} filled with 2; contract mode 1 with a ones vector
//! let a = Tensor::from_elem(&[3, 4], 2.0).unwrap();
//! let c = ttv(&a, &Vector::from_elem(3, 1.0), 1).unwrap();
//! assert_eq!(c.extents().dims(), &[4, 1]);
//! assert!(c.iter().all(|&x| x == 6.0));
//! ```
//!
//! ## Components
//!
//! ### Core Tensor Types ([`core`])
//!
//! Extents in three representations, layout-aware strides, dense tensors,
//! spans and subtensor views, and lazy expressions.
//!
//! ```
//! # use tenalg::core::Extents;
//! use tenalg::core::{eval, Span, Tensor};
//!
//! let a = Tensor::from_elem(&[2, 2], 2.0).unwrap();
//! let b = eval(&(&a + 3.0 * &a)).unwrap();
//! assert!(b.iter().all(|&x| x == 8.0));
//!
//! let v = a.subtensor(&[Span::at(0), Span::all()]).unwrap();
//! assert_eq!(v.extents().dims(), &[1, 2]);
//! ```
//!
//! ### Contraction Kernels ([`kernels`])
//!
//! Tensor-times-vector, tensor-times-matrix, general contraction over
//! mode pairs, inner and outer products, and axis transposition. Modes
//! are one-based.
//!
//! ```
//! # use tenalg::core::Extents;
//! use tenalg::core::Tensor;
//! use tenalg::kernels::ttt;
//!
//! let a = Tensor::from_elem(&[2, 3], 1.0).unwrap();
//! let b = Tensor::from_elem(&[3, 4], 1.0).unwrap();
//! let c = ttt(&a, &b, &[2], &[1]).unwrap();
//! assert_eq!(c.extents().dims(), &[2, 4]);
//! ```
//!
//! ## Shape Discipline
//!
//! Every tensor shape has rank two or more with no zero extents; scalars
//! and vectors are rank-2 shapes with unit axes. Element-wise operand
//! shapes are checked when an expression node is built, and the ordering
//! comparisons refuse mismatched shapes while `==` simply answers false.

// Re-export all components
pub use tenalg_core as core;
pub use tenalg_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tenalg::prelude::*;
    //!
    //! let tensor = Tensor::<f64>::zeros(&[2, 3, 4]).unwrap();
    //! ```

    // Core types
    pub use crate::core::{
        eval, eval_into, DynamicExtents, Extents, FixedRankTensor, Layout, Matrix, Span,
        StaticTensor, Subtensor, Tensor, TensorBase, TensorError, Vector,
    };

    // Comparison predicates
    pub use crate::core::{equal, greater, greater_equal, less, less_equal};

    // Contraction kernels
    pub use crate::kernels::{inner_prod, outer_prod, trans, ttm, ttt, ttv, KernelError};
}
