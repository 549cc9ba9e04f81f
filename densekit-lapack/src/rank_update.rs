//! Diagonally scaled rank-k downdates, the trailing-block update of
//! LDLᵗ-type eliminations.
//!
//! Both forms sweep the rank index `l` on the outside so a zero `d[l]` drops
//! a whole rank-one term, then hand each row update to the dispatched
//! `add_slice_vector` kernel.

use densekit_blas::add_slice_vector;
use densekit_blas::complex::axpy;
use densekit_core::{
    check_dims, ColMajor, Complex64, MatMut, MatRef, SliceVec, ZMatMut, ZMatRef,
};

/// `C −= Aᵗ·diag(d)·B` with `A` k x m, `B` k x n and `C` m x n.
pub fn sub_atdb(a: MatRef<'_>, diag: SliceVec<'_>, b: MatRef<'_>, mut c: MatMut<'_>) {
    let (k, m, n) = (a.rows(), a.cols(), b.cols());
    check_dims!(
        b.rows() == k && c.rows() == m && c.cols() == n && diag.len() >= k,
        "sub_atdb: A is {}x{}, B is {}x{}, C is {}x{}, diag has {}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        c.rows(),
        c.cols(),
        diag.len()
    );
    for l in 0..k {
        let dl = diag.get(l);
        if dl == 0.0 {
            continue;
        }
        let bl = b.row(l);
        for i in 0..m {
            add_slice_vector(-a.at(l, i) * dl, bl, c.row_mut(i));
        }
    }
}

/// Complex `C −= Aᵗ·diag(d)·B` with `A` k x m, `B` k x n and `C` m x n.
/// No entry is conjugated.
pub fn sub_atdb_complex(
    a: ZMatRef<'_>,
    diag: &[Complex64],
    b: ZMatRef<'_>,
    mut c: ZMatMut<'_>,
) {
    let (k, m, n) = (a.rows(), a.cols(), b.cols());
    check_dims!(
        b.rows() == k && c.rows() == m && c.cols() == n && diag.len() >= k,
        "sub_atdb_complex: A is {}x{}, B is {}x{}, C is {}x{}, diag has {}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        c.rows(),
        c.cols(),
        diag.len()
    );
    for (l, &dl) in diag[..k].iter().enumerate() {
        if dl == Complex64::new(0.0, 0.0) {
            continue;
        }
        let bl = b.row(l);
        for i in 0..m {
            axpy(-a.at(l, i) * dl, bl, c.row_mut(i));
        }
    }
}

/// `C −= A·diag(d)·Bᵗ` with `A` m x k, `B` n x k and `C` m x n, all
/// row-major.
pub fn sub_adbt(a: MatRef<'_>, diag: SliceVec<'_>, b: MatRef<'_>, mut c: MatMut<'_>) {
    let (m, k, n) = (a.rows(), a.cols(), b.rows());
    check_dims!(
        b.cols() == k && c.rows() == m && c.cols() == n && diag.len() >= k,
        "sub_adbt: A is {}x{}, B is {}x{}, C is {}x{}, diag has {}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        c.rows(),
        c.cols(),
        diag.len()
    );
    for l in 0..k {
        let dl = diag.get(l);
        if dl == 0.0 {
            continue;
        }
        // column l of B, strided by its leading dimension
        let bl = b.col(l);
        for i in 0..m {
            add_slice_vector(-a.at(i, l) * dl, bl, c.row_mut(i));
        }
    }
}

/// Column-major `C −= A·diag(d)·Bᵗ`, evaluated as the row-major
/// `Cᵗ −= B·diag(d)·Aᵗ` on the transposed views.
#[inline]
pub fn sub_adbt_col_major(
    a: MatRef<'_, ColMajor>,
    diag: SliceVec<'_>,
    b: MatRef<'_, ColMajor>,
    c: MatMut<'_, ColMajor>,
) {
    sub_atdb(b.trans(), diag, a.trans(), c.trans())
}
