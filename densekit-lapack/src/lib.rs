// Numeric kernels use index loops on packed arrays where iterators hurt readability.
#![allow(clippy::needless_range_loop)]

//! # densekit-lapack
//!
//! Dense factorization utilities built on the `densekit-blas` kernels:
//!
//! - **Scaling**: [`scale_cols`] / [`scale_rows`] by a diagonal, either order
//! - **Rank updates**: [`sub_atdb`], [`sub_adbt`] and [`sub_adbt_col_major`],
//!   the `C −= ·diag(d)·` downdates of LDLᵗ-type eliminations
//! - **Schur complement**: [`calc_schur_complement`] and
//!   [`schur_complement_in_place`] onto a masked index subset
//! - **Eigensystem**: [`calc_eigen_system`], cyclic Jacobi for symmetric
//!   matrices
//!
//! Temporaries come from a caller-owned [`LocalHeap`](densekit_core::LocalHeap),
//! so none of these touch the global allocator.
//!
//! ```
//! use densekit_core::{BitArray, LocalHeap, MatMut, MatRef};
//! use densekit_lapack::calc_schur_complement;
//!
//! // eliminate index 0 of [[4, 2], [2, 3]]
//! let a = [4.0, 2.0, 2.0, 3.0];
//! let heap = LocalHeap::with_capacity(64);
//! let mut s = [0.0];
//! calc_schur_complement(
//!     MatRef::from_slice(&a, 2, 2),
//!     MatMut::from_slice(&mut s, 1, 1),
//!     &BitArray::from_indices(2, &[1]),
//!     &heap,
//! )?;
//! assert!((s[0] - 2.0).abs() < 1e-15);
//! # Ok::<(), densekit_core::Error>(())
//! ```

pub mod eigen;
pub mod rank_update;
pub mod scale;
pub mod schur;

pub use eigen::{calc_eigen_system, calc_eigen_system_with, EigenConfig, EigenReport};
pub use rank_update::{sub_adbt, sub_adbt_col_major, sub_atdb, sub_atdb_complex};
pub use scale::{scale_cols, scale_rows};
pub use schur::{calc_schur_complement, schur_complement_in_place};
