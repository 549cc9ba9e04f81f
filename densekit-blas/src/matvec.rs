//! Matrix-vector kernels on row-major bare views.
//!
//! - `y = A·x` and `y += s·A·x` walk the rows of `A` and reduce each against
//!   `x`; they dispatch on `x.len()`, the contraction length.
//! - `y = Aᵗ·x` and `y += s·Aᵗ·x` walk the rows of `A` and accumulate each,
//!   scaled by one entry of `x`, into `y`. They also dispatch on `x.len()`,
//!   here the row count of `A`.
//! - The indirect variant gathers rows of `A` through an index list:
//!   `y[j] += s·Σₖ A[ind[k], j]·x[k]`, i.e. `y += s·(A_{ind,:})ᵗ·x`. It
//!   dispatches on `y.len()` and keeps `y` in registers for the specialized
//!   widths.
//!
//! Column-major callers reach these through the transpose identities in
//! [`gemm`](mod@crate::gemm).

use densekit_core::{check_dims, BareMat, MatRef};

use crate::dispatch::tables;
use crate::vector::dot;

// ============================================================================
// y = A·x
// ============================================================================

pub(crate) fn mat_vec_fixed<const K: usize>(a: BareMat<'_>, x: &[f64], y: &mut [f64]) {
    let x = &x[..K];
    for (i, yi) in y.iter_mut().enumerate() {
        let row = a.row(i, K);
        let mut sum = 0.0;
        for l in 0..K {
            sum += row[l] * x[l];
        }
        *yi = sum;
    }
}

pub(crate) fn mat_vec_fallback(a: BareMat<'_>, x: &[f64], y: &mut [f64]) {
    let k = x.len();
    for (i, yi) in y.iter_mut().enumerate() {
        *yi = dot(a.row(i, k), x);
    }
}

// ============================================================================
// y += s·A·x
// ============================================================================

pub(crate) fn add_mat_vec_fixed<const K: usize>(s: f64, a: BareMat<'_>, x: &[f64], y: &mut [f64]) {
    if K == 0 {
        return;
    }
    let x = &x[..K];
    for (i, yi) in y.iter_mut().enumerate() {
        let row = a.row(i, K);
        let mut sum = 0.0;
        for l in 0..K {
            sum += row[l] * x[l];
        }
        *yi += s * sum;
    }
}

pub(crate) fn add_mat_vec_fallback(s: f64, a: BareMat<'_>, x: &[f64], y: &mut [f64]) {
    let k = x.len();
    if k == 0 {
        return;
    }
    for (i, yi) in y.iter_mut().enumerate() {
        *yi += s * dot(a.row(i, k), x);
    }
}

// ============================================================================
// y = Aᵗ·x
// ============================================================================

pub(crate) fn mat_trans_vec_fixed<const K: usize>(a: BareMat<'_>, x: &[f64], y: &mut [f64]) {
    let n = y.len();
    y.fill(0.0);
    for l in 0..K {
        let xl = x[l];
        let row = a.row(l, n);
        for (yj, &alj) in y.iter_mut().zip(row) {
            *yj += alj * xl;
        }
    }
}

pub(crate) fn mat_trans_vec_fallback(a: BareMat<'_>, x: &[f64], y: &mut [f64]) {
    let n = y.len();
    y.fill(0.0);
    for (l, &xl) in x.iter().enumerate() {
        let row = a.row(l, n);
        for (yj, &alj) in y.iter_mut().zip(row) {
            *yj += alj * xl;
        }
    }
}

// ============================================================================
// y += s·Aᵗ·x
// ============================================================================

pub(crate) fn add_mat_trans_vec_fixed<const K: usize>(
    s: f64,
    a: BareMat<'_>,
    x: &[f64],
    y: &mut [f64],
) {
    let n = y.len();
    for l in 0..K {
        let sx = s * x[l];
        let row = a.row(l, n);
        for (yj, &alj) in y.iter_mut().zip(row) {
            *yj += alj * sx;
        }
    }
}

pub(crate) fn add_mat_trans_vec_fallback(s: f64, a: BareMat<'_>, x: &[f64], y: &mut [f64]) {
    let n = y.len();
    for (l, &xl) in x.iter().enumerate() {
        let sx = s * xl;
        let row = a.row(l, n);
        for (yj, &alj) in y.iter_mut().zip(row) {
            *yj += alj * sx;
        }
    }
}

// ============================================================================
// y[j] += s·Σₖ A[ind[k], j]·x[k]
// ============================================================================

pub(crate) fn indirect_fixed<const N: usize>(
    s: f64,
    a: BareMat<'_>,
    x: &[f64],
    ind: &[usize],
    y: &mut [f64],
) {
    if x.is_empty() {
        return;
    }
    let mut acc = [0.0f64; N];
    for (&r, &xk) in ind.iter().zip(x) {
        let row = a.row(r, N);
        for j in 0..N {
            acc[j] += row[j] * xk;
        }
    }
    let y = &mut y[..N];
    for j in 0..N {
        y[j] += s * acc[j];
    }
}

pub(crate) fn indirect_fallback(s: f64, a: BareMat<'_>, x: &[f64], ind: &[usize], y: &mut [f64]) {
    let n = y.len();
    for (&r, &xk) in ind.iter().zip(x) {
        let sx = s * xk;
        let row = a.row(r, n);
        for (yj, &arj) in y.iter_mut().zip(row) {
            *yj += arj * sx;
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// `y = A·x`
pub fn mult_mat_vec(a: MatRef<'_>, x: &[f64], y: &mut [f64]) {
    check_dims!(
        a.rows() == y.len() && a.cols() == x.len(),
        "mult_mat_vec: A is {}x{}, x has {}, y has {}",
        a.rows(),
        a.cols(),
        x.len(),
        y.len()
    );
    (tables().mat_vec.select(x.len()))(a.bare(), x, y)
}

/// `y += s·A·x`
pub fn mult_add_mat_vec(s: f64, a: MatRef<'_>, x: &[f64], y: &mut [f64]) {
    check_dims!(
        a.rows() == y.len() && a.cols() == x.len(),
        "mult_add_mat_vec: A is {}x{}, x has {}, y has {}",
        a.rows(),
        a.cols(),
        x.len(),
        y.len()
    );
    (tables().add_mat_vec.select(x.len()))(s, a.bare(), x, y)
}

/// `y = Aᵗ·x`
pub fn mult_mat_trans_vec(a: MatRef<'_>, x: &[f64], y: &mut [f64]) {
    check_dims!(
        a.rows() == x.len() && a.cols() == y.len(),
        "mult_mat_trans_vec: A is {}x{}, x has {}, y has {}",
        a.rows(),
        a.cols(),
        x.len(),
        y.len()
    );
    (tables().mat_trans_vec.select(x.len()))(a.bare(), x, y)
}

/// `y += s·Aᵗ·x`
pub fn mult_add_mat_trans_vec(s: f64, a: MatRef<'_>, x: &[f64], y: &mut [f64]) {
    check_dims!(
        a.rows() == x.len() && a.cols() == y.len(),
        "mult_add_mat_trans_vec: A is {}x{}, x has {}, y has {}",
        a.rows(),
        a.cols(),
        x.len(),
        y.len()
    );
    (tables().add_mat_trans_vec.select(x.len()))(s, a.bare(), x, y)
}

/// `y[j] += s·Σₖ A[ind[k], j]·x[k]`: the transposed product against the rows
/// of `A` listed in `ind`. Scatter-style assembly uses it to accumulate
/// element contributions gathered from a larger matrix.
pub fn mult_add_mat_trans_vec_indirect(
    s: f64,
    a: MatRef<'_>,
    x: &[f64],
    ind: &[usize],
    y: &mut [f64],
) {
    check_dims!(
        ind.len() == x.len() && a.cols() == y.len(),
        "mult_add_mat_trans_vec_indirect: A is {}x{}, x has {}, ind has {}, y has {}",
        a.rows(),
        a.cols(),
        x.len(),
        ind.len(),
        y.len()
    );
    check_dims!(
        ind.iter().all(|&r| r < a.rows()),
        "mult_add_mat_trans_vec_indirect: row index out of range for {} rows",
        a.rows()
    );
    (tables().add_mat_trans_vec_indirect.select(y.len()))(s, a.bare(), x, ind, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2x3 row-major
    const A: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    #[test]
    fn test_mult_mat_vec() {
        let a = MatRef::from_slice(&A, 2, 3);
        let x = [1.0, 1.0, 1.0];
        let mut y = [0.0; 2];
        mult_mat_vec(a, &x, &mut y);
        assert_eq!(y, [6.0, 15.0]);
        mult_add_mat_vec(-2.0, a, &x, &mut y);
        assert_eq!(y, [-6.0, -15.0]);
    }

    #[test]
    fn test_mult_mat_trans_vec() {
        let a = MatRef::from_slice(&A, 2, 3);
        let x = [1.0, 2.0];
        let mut y = [7.0; 3];
        mult_mat_trans_vec(a, &x, &mut y);
        assert_eq!(y, [9.0, 12.0, 15.0]);
        mult_add_mat_trans_vec(1.0, a, &x, &mut y);
        assert_eq!(y, [18.0, 24.0, 30.0]);
    }

    #[test]
    fn test_padded_leading_dimension() {
        // 2x2 view with ld = 3 over A
        let a = MatRef::new(&A, 2, 2, 3);
        let mut y = [0.0; 2];
        mult_mat_vec(a, &[1.0, -1.0], &mut y);
        assert_eq!(y, [-1.0, -1.0]);
    }

    #[test]
    fn test_indirect() {
        // 4x2 matrix; gather rows 3 and 1
        let a_data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let a = MatRef::from_slice(&a_data, 4, 2);
        let mut y = [1.0, 1.0];
        mult_add_mat_trans_vec_indirect(0.5, a, &[2.0, 4.0], &[3, 1], &mut y);
        // 0.5 * (2*[7,8] + 4*[3,4]) = [13, 16]
        assert_eq!(y, [14.0, 17.0]);
    }

    #[test]
    fn test_indirect_fixed_matches_fallback() {
        let a_data: Vec<f64> = (0..30).map(|i| (i as f64).sqrt()).collect();
        let a = BareMat::new(&a_data, 5);
        let x = [0.25, -1.0, 3.0];
        let ind = [5, 0, 2];
        let mut y1 = [1.0; 5];
        let mut y2 = [1.0; 5];
        indirect_fixed::<5>(2.0, a, &x, &ind, &mut y1);
        indirect_fallback(2.0, a, &x, &ind, &mut y2);
        for (p, q) in y1.iter().zip(&y2) {
            assert!((p - q).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_contraction() {
        let a = MatRef::<densekit_core::RowMajor>::new(&[], 2, 0, 0);
        let mut y = [-0.0, 5.0];
        mult_add_mat_vec(1.0, a, &[], &mut y);
        assert_eq!(y[0].to_bits(), (-0.0f64).to_bits());
        mult_mat_vec(a, &[], &mut y);
        assert_eq!(y, [0.0, 0.0]);
    }
}
