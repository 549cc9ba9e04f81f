// Kernels take explicit dimensions next to their views; the argument lists are inherent.
// Numeric kernels use index loops on packed arrays where iterators hurt readability.
#![allow(clippy::too_many_arguments, clippy::needless_range_loop)]

//! # densekit-blas
//!
//! Size-specialized dense kernels for the small matrices of element-level
//! finite-element work, behind per-family dispatch tables.
//!
//! ## Layers
//!
//! - **Kernels** (`vector`, `matvec`, `matmat`): exact-size const-generic
//!   specializations plus a generic fallback per family. Row-major views,
//!   explicit dimensions.
//! - **Dispatch** (`dispatch`): one [`DispatchTable`](dispatch::DispatchTable)
//!   per family, indexed by `min(d, N - 1)`, published once through
//!   [`init`].
//! - **GEMM/GEMV** (`gemm`): one contract over every storage-order
//!   combination and the four accumulate/sign [`Update`]s, reduced onto the
//!   row-major kernels at compile time.
//! - **Masked and multi-vector** helpers, and [`DenseOps`] sugar on views.
//! - **Complex** (`complex`): untabled `Complex64` loops for `A·Bᵗ`
//!   accumulation and the multi-vector operations.
//!
//! ## Example
//!
//! ```
//! use densekit_blas::{gemm, SubFrom};
//! use densekit_core::{ColMajor, MatMut, MatRef, RowMajor};
//!
//! densekit_blas::init();
//!
//! let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let b = [1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
//! let mut c = [10.0; 4];
//!
//! // C -= A·B with A row-major 2x3, B column-major 3x2
//! gemm::<SubFrom, _, _, _>(
//!     MatRef::<RowMajor>::from_slice(&a, 2, 3),
//!     MatRef::<ColMajor>::from_slice(&b, 3, 2),
//!     MatMut::<RowMajor>::from_slice(&mut c, 2, 2),
//! );
//! assert_eq!(c, [9.0, 4.0, 6.0, -5.0]);
//! ```

pub mod complex;
pub mod dispatch;
pub mod gemm;
pub mod masked;
pub mod matmat;
pub mod matvec;
pub mod multivector;
pub mod ops;
pub mod update;
pub mod vector;

pub use complex::{add_abt_complex, add_abt_sym_complex};
pub use dispatch::{init, tables, KernelTables};
pub use gemm::{gemm, gemm_dyn, gemv, gemv_dyn, GemmOrder};
pub use masked::{masked_dot, masked_scale};
pub use matmat::{
    add_ab, add_abt, add_abt_sym, mat_mat_ab, mat_mat_abt, mat_mat_atb, mat_mat_atbt,
    minus_mult_ab, minus_mult_abt, mult_abt, mult_atb, mult_mat_mat, sub_ab, sub_abt,
    transpose_matrix,
};
pub use matvec::{
    mult_add_mat_trans_vec, mult_add_mat_trans_vec_indirect, mult_add_mat_vec,
    mult_mat_trans_vec, mult_mat_vec,
};
pub use multivector::{
    multi_vector_add, multi_vector_add_complex, pairwise_inner_product,
    pairwise_inner_product_complex,
};
pub use ops::DenseOps;
pub use update::{Accumulate, AddTo, Assign, AssignNeg, Sign, SubFrom, Update};
pub use vector::{add_slice_vector, add_vector, copy_slice_vector, copy_vector, dot, scale_vector};
