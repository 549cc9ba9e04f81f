//! One logical GEMM/GEMV contract over every storage-order combination.
//!
//! `gemm::<U, _, _, _>(A, B, C)` computes `C {U} A·B` for any orders of `A`,
//! `B` and `C`. The orders are type parameters, so the reduction onto the
//! row-major primitives of [`matmat`](crate::matmat) happens during
//! monomorphization:
//!
//! ```text
//!   C row-major:
//!     A row, B row  ->  ab    (A, B)
//!     A row, B col  ->  abt   (A, Bᵗ)     Bᵗ is row-major
//!     A col, B row  ->  atb   (Aᵗ, B)     Aᵗ is row-major
//!     A col, B col  ->  atbt  (Aᵗ, Bᵗ)
//!   C col-major:
//!     Cᵗ {U} Bᵗ·Aᵗ  with Cᵗ row-major, then the table above
//! ```
//!
//! Transposing a view is metadata only, so none of this touches memory.
//! `gemv` does the same for matrix-vector products: a column-major `A` is a
//! row-major `Aᵗ` read through the transposed-vector kernels.

use densekit_core::{ColMajor, MatMut, MatRef, Order, RowMajor};

use crate::matmat::{mat_mat_ab, mat_mat_abt, mat_mat_atb, mat_mat_atbt};
use crate::matvec::{mult_add_mat_trans_vec, mult_add_mat_vec, mult_mat_trans_vec, mult_mat_vec};
use crate::update::{Accumulate, AddTo, Assign, AssignNeg, Sign, SubFrom, Update};
use crate::vector::scale_vector;

/// Storage orders the GEMM/GEMV reduction knows how to route.
///
/// Implemented for [`RowMajor`] and [`ColMajor`]. Each method handles one
/// step of the double dispatch over the operand orders.
pub trait GemmOrder: Order {
    /// Order of the transposed view, itself routable.
    type Flip: GemmOrder<Flip = Self>;

    fn flip_ref(m: MatRef<'_, Self>) -> MatRef<'_, Self::Flip>;

    /// `C {U} A·B` into a `C` stored in this order.
    fn gemm_into<U: Update, OA: GemmOrder, OB: GemmOrder>(
        a: MatRef<'_, OA>,
        b: MatRef<'_, OB>,
        c: MatMut<'_, Self>,
    );

    /// Row-major `C`, `A` stored in this order.
    fn gemm_a<U: Update, OB: GemmOrder>(a: MatRef<'_, Self>, b: MatRef<'_, OB>, c: MatMut<'_>);

    /// Row-major `C` and `A`, `B` stored in this order.
    fn gemm_b_after_row_a<U: Update>(a: MatRef<'_>, b: MatRef<'_, Self>, c: MatMut<'_>);

    /// Row-major `C`, column-major `A`, `B` stored in this order.
    fn gemm_b_after_col_a<U: Update>(
        a: MatRef<'_, ColMajor>,
        b: MatRef<'_, Self>,
        c: MatMut<'_>,
    );

    /// `y {U} A·x` with `A` stored in this order.
    fn gemv<U: Update>(a: MatRef<'_, Self>, x: &[f64], y: &mut [f64]);
}

impl GemmOrder for RowMajor {
    type Flip = ColMajor;

    #[inline(always)]
    fn flip_ref(m: MatRef<'_, Self>) -> MatRef<'_, ColMajor> {
        m.trans()
    }

    #[inline]
    fn gemm_into<U: Update, OA: GemmOrder, OB: GemmOrder>(
        a: MatRef<'_, OA>,
        b: MatRef<'_, OB>,
        c: MatMut<'_>,
    ) {
        OA::gemm_a::<U, OB>(a, b, c)
    }

    #[inline]
    fn gemm_a<U: Update, OB: GemmOrder>(a: MatRef<'_>, b: MatRef<'_, OB>, c: MatMut<'_>) {
        OB::gemm_b_after_row_a::<U>(a, b, c)
    }

    #[inline]
    fn gemm_b_after_row_a<U: Update>(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
        mat_mat_ab::<U>(a, b, c)
    }

    #[inline]
    fn gemm_b_after_col_a<U: Update>(a: MatRef<'_, ColMajor>, b: MatRef<'_>, c: MatMut<'_>) {
        mat_mat_atb::<U>(a.trans(), b, c)
    }

    fn gemv<U: Update>(a: MatRef<'_>, x: &[f64], y: &mut [f64]) {
        match U::ACCUMULATE {
            Accumulate::Overwrite => {
                mult_mat_vec(a, x, y);
                if U::SIGN == Sign::Negate {
                    scale_vector(-1.0, y);
                }
            }
            Accumulate::Add => mult_add_mat_vec(U::SIGN.factor(), a, x, y),
        }
    }
}

impl GemmOrder for ColMajor {
    type Flip = RowMajor;

    #[inline(always)]
    fn flip_ref(m: MatRef<'_, Self>) -> MatRef<'_, RowMajor> {
        m.trans()
    }

    #[inline]
    fn gemm_into<U: Update, OA: GemmOrder, OB: GemmOrder>(
        a: MatRef<'_, OA>,
        b: MatRef<'_, OB>,
        c: MatMut<'_, ColMajor>,
    ) {
        // (A·B)ᵗ = Bᵗ·Aᵗ
        <OB::Flip as GemmOrder>::gemm_a::<U, OA::Flip>(OB::flip_ref(b), OA::flip_ref(a), c.trans())
    }

    #[inline]
    fn gemm_a<U: Update, OB: GemmOrder>(
        a: MatRef<'_, ColMajor>,
        b: MatRef<'_, OB>,
        c: MatMut<'_>,
    ) {
        OB::gemm_b_after_col_a::<U>(a, b, c)
    }

    #[inline]
    fn gemm_b_after_row_a<U: Update>(a: MatRef<'_>, b: MatRef<'_, ColMajor>, c: MatMut<'_>) {
        mat_mat_abt::<U>(a, b.trans(), c)
    }

    #[inline]
    fn gemm_b_after_col_a<U: Update>(
        a: MatRef<'_, ColMajor>,
        b: MatRef<'_, ColMajor>,
        c: MatMut<'_>,
    ) {
        mat_mat_atbt::<U>(a.trans(), b.trans(), c)
    }

    fn gemv<U: Update>(a: MatRef<'_, ColMajor>, x: &[f64], y: &mut [f64]) {
        let at = a.trans();
        match U::ACCUMULATE {
            Accumulate::Overwrite => {
                mult_mat_trans_vec(at, x, y);
                if U::SIGN == Sign::Negate {
                    scale_vector(-1.0, y);
                }
            }
            Accumulate::Add => mult_add_mat_trans_vec(U::SIGN.factor(), at, x, y),
        }
    }
}

/// `C {U} A·B` for any storage orders.
#[inline]
pub fn gemm<U: Update, OA: GemmOrder, OB: GemmOrder, OC: GemmOrder>(
    a: MatRef<'_, OA>,
    b: MatRef<'_, OB>,
    c: MatMut<'_, OC>,
) {
    OC::gemm_into::<U, OA, OB>(a, b, c)
}

/// `y {U} A·x` for either storage order of `A`.
#[inline]
pub fn gemv<U: Update, O: GemmOrder>(a: MatRef<'_, O>, x: &[f64], y: &mut [f64]) {
    O::gemv::<U>(a, x, y)
}

/// [`gemm`] with the update chosen at run time. Branches once per call.
pub fn gemm_dyn<OA: GemmOrder, OB: GemmOrder, OC: GemmOrder>(
    accumulate: Accumulate,
    sign: Sign,
    a: MatRef<'_, OA>,
    b: MatRef<'_, OB>,
    c: MatMut<'_, OC>,
) {
    match (accumulate, sign) {
        (Accumulate::Overwrite, Sign::Positive) => gemm::<Assign, _, _, _>(a, b, c),
        (Accumulate::Overwrite, Sign::Negate) => gemm::<AssignNeg, _, _, _>(a, b, c),
        (Accumulate::Add, Sign::Positive) => gemm::<AddTo, _, _, _>(a, b, c),
        (Accumulate::Add, Sign::Negate) => gemm::<SubFrom, _, _, _>(a, b, c),
    }
}

/// [`gemv`] with the update chosen at run time.
pub fn gemv_dyn<O: GemmOrder>(
    accumulate: Accumulate,
    sign: Sign,
    a: MatRef<'_, O>,
    x: &[f64],
    y: &mut [f64],
) {
    match (accumulate, sign) {
        (Accumulate::Overwrite, Sign::Positive) => gemv::<Assign, O>(a, x, y),
        (Accumulate::Overwrite, Sign::Negate) => gemv::<AssignNeg, O>(a, x, y),
        (Accumulate::Add, Sign::Positive) => gemv::<AddTo, O>(a, x, y),
        (Accumulate::Add, Sign::Negate) => gemv::<SubFrom, O>(a, x, y),
    }
}
