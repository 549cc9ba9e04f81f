//! `Complex64` kernels: level-1 helpers and the `A·Bᵗ` accumulation used
//! by complex-valued element matrices.
//!
//! These are plain generic loops with no dispatch table. Transposes are
//! never conjugated; only [`dotc`] conjugates its first argument.

use densekit_core::{check_dims, Complex64, ZMatMut, ZMatRef};

/// `Σ x[i]·y[i]`
#[inline]
pub fn dotu(x: &[Complex64], y: &[Complex64]) -> Complex64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// `Σ conj(x[i])·y[i]`
#[inline]
pub fn dotc(x: &[Complex64], y: &[Complex64]) -> Complex64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y).map(|(a, b)| a.conj() * b).sum()
}

/// `y += alpha·x`
#[inline]
pub fn axpy(alpha: Complex64, x: &[Complex64], y: &mut [Complex64]) {
    debug_assert_eq!(x.len(), y.len());
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}

/// `C += A·Bᵗ` with `A` m x k, `B` n x k and `C` m x n.
pub fn add_abt_complex(a: ZMatRef<'_>, b: ZMatRef<'_>, mut c: ZMatMut<'_>) {
    let (m, n, k) = (a.rows(), b.rows(), a.cols());
    check_dims!(
        b.cols() == k && c.rows() == m && c.cols() == n,
        "add_abt_complex: A is {}x{}, B is {}x{}, C is {}x{}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        c.rows(),
        c.cols()
    );
    if k == 0 {
        return;
    }
    for i in 0..m {
        let ai = a.row(i);
        for (j, cij) in c.row_mut(i).iter_mut().enumerate() {
            *cij += dotu(ai, b.row(j));
        }
    }
}

/// Lower triangle (`j <= i`) of `C += A·Bᵗ`; the strict upper triangle is
/// left untouched.
pub fn add_abt_sym_complex(a: ZMatRef<'_>, b: ZMatRef<'_>, mut c: ZMatMut<'_>) {
    let (m, k) = (c.rows(), a.cols());
    check_dims!(
        c.cols() == m && a.rows() == m && b.rows() == m && b.cols() == k,
        "add_abt_sym_complex: A is {}x{}, B is {}x{}, C is {}x{}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        c.rows(),
        c.cols()
    );
    if k == 0 {
        return;
    }
    for i in 0..m {
        let ai = a.row(i);
        for (j, cij) in c.row_mut(i)[..=i].iter_mut().enumerate() {
            *cij += dotu(ai, b.row(j));
        }
    }
}
