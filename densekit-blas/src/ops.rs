//! Arithmetic sugar on mutable matrix views.
//!
//! Every method is a thin call into a dispatched primitive; none carries
//! its own loop nest over the full matrix.

use densekit_core::{MatMut, MatRef};

use crate::gemm::{gemm, GemmOrder};
use crate::matmat::transpose_matrix;
use crate::update::{AddTo, Assign, AssignNeg, SubFrom};
use crate::vector::{add_slice_vector, copy_slice_vector};

/// Assignment and product helpers for a destination view.
pub trait DenseOps {
    /// Storage order of the destination.
    type Order: GemmOrder;

    /// `self = src`
    fn assign_copy(&mut self, src: MatRef<'_, Self::Order>);

    /// `self += alpha·src`
    fn add_scaled(&mut self, alpha: f64, src: MatRef<'_, Self::Order>);

    /// `self = A·B`
    fn assign_product<OA: GemmOrder, OB: GemmOrder>(&mut self, a: MatRef<'_, OA>, b: MatRef<'_, OB>);

    /// `self = −A·B`
    fn assign_neg_product<OA: GemmOrder, OB: GemmOrder>(
        &mut self,
        a: MatRef<'_, OA>,
        b: MatRef<'_, OB>,
    );

    /// `self += A·B`
    fn add_product<OA: GemmOrder, OB: GemmOrder>(&mut self, a: MatRef<'_, OA>, b: MatRef<'_, OB>);

    /// `self −= A·B`
    fn sub_product<OA: GemmOrder, OB: GemmOrder>(&mut self, a: MatRef<'_, OA>, b: MatRef<'_, OB>);

    /// `self = Aᵗ`
    fn assign_transpose<OA: GemmOrder>(&mut self, a: MatRef<'_, OA>);
}

impl<O: GemmOrder> DenseOps for MatMut<'_, O> {
    type Order = O;

    fn assign_copy(&mut self, src: MatRef<'_, O>) {
        debug_assert_eq!((self.rows(), self.cols()), (src.rows(), src.cols()));
        for i in 0..src.rows() {
            copy_slice_vector(src.row(i), self.row_mut(i));
        }
    }

    fn add_scaled(&mut self, alpha: f64, src: MatRef<'_, O>) {
        debug_assert_eq!((self.rows(), self.cols()), (src.rows(), src.cols()));
        for i in 0..src.rows() {
            add_slice_vector(alpha, src.row(i), self.row_mut(i));
        }
    }

    fn assign_product<OA: GemmOrder, OB: GemmOrder>(&mut self, a: MatRef<'_, OA>, b: MatRef<'_, OB>) {
        gemm::<Assign, OA, OB, O>(a, b, self.rb_mut())
    }

    fn assign_neg_product<OA: GemmOrder, OB: GemmOrder>(
        &mut self,
        a: MatRef<'_, OA>,
        b: MatRef<'_, OB>,
    ) {
        gemm::<AssignNeg, OA, OB, O>(a, b, self.rb_mut())
    }

    fn add_product<OA: GemmOrder, OB: GemmOrder>(&mut self, a: MatRef<'_, OA>, b: MatRef<'_, OB>) {
        gemm::<AddTo, OA, OB, O>(a, b, self.rb_mut())
    }

    fn sub_product<OA: GemmOrder, OB: GemmOrder>(&mut self, a: MatRef<'_, OA>, b: MatRef<'_, OB>) {
        gemm::<SubFrom, OA, OB, O>(a, b, self.rb_mut())
    }

    fn assign_transpose<OA: GemmOrder>(&mut self, a: MatRef<'_, OA>) {
        transpose_matrix(a, self.rb_mut())
    }
}
