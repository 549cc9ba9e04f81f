//! # densekit-core
//!
//! Shared building blocks for the densekit kernels.
//!
//! This crate provides:
//! - **Storage orders**: the [`RowMajor`] / [`ColMajor`] markers and the
//!   runtime [`Layout`] tag.
//! - **Views**: non-owning vector and matrix descriptors over caller memory,
//!   in checked ([`MatRef`], [`MatMut`]) and bare ([`BareMat`], [`BareMatMut`])
//!   flavors. Transposition is metadata only. Complex operands use the
//!   row-major [`ZMatRef`] / [`ZMatMut`] pair over [`Complex64`].
//! - **Masks**: the [`Mask`] interface and the [`BitArray`] implementation.
//! - **Local heap**: [`LocalHeap`], the bump arena factorization utilities
//!   draw their temporaries from.
//! - **Errors**: [`Error`] for view construction and heap exhaustion, and the
//!   [`check_dims!`] macro for call-boundary preconditions.

pub mod arena;
pub mod complex;
pub mod error;
pub mod layout;
pub mod mask;
pub mod rng;
pub mod view;

pub use arena::{HeapMark, LocalHeap};
pub use complex::{ZMatMut, ZMatRef};
pub use error::{Error, Result};
pub use layout::{ColMajor, Layout, Order, RowMajor};
pub use mask::{BitArray, Mask};
pub use rng::SplitMix64;
pub use view::{BareMat, BareMatMut, MatMut, MatRef, SliceVec, SliceVecMut};

pub use num_complex::Complex64;
