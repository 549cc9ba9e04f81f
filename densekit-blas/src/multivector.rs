//! Operations on small sets of vectors of a common length.

use densekit_core::{check_dims, Complex64, MatMut, MatRef, ZMatMut, ZMatRef};

use crate::complex::{axpy, dotc, dotu};
use crate::vector::{add_vector, dot};

/// `ip(i, j) = ⟨x_i[..n], y_j[..n]⟩`
pub fn pairwise_inner_product(n: usize, x: &[&[f64]], y: &[&[f64]], mut ip: MatMut<'_>) {
    check_dims!(
        ip.rows() == x.len() && ip.cols() == y.len(),
        "pairwise_inner_product: {} x-vectors, {} y-vectors, ip is {}x{}",
        x.len(),
        y.len(),
        ip.rows(),
        ip.cols()
    );
    for (i, xi) in x.iter().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            ip.set(i, j, dot(&xi[..n], &yj[..n]));
        }
    }
}

/// `x_i[..n] += Σ_j a(i, j)·y_j[..n]`
pub fn multi_vector_add(n: usize, x: &mut [&mut [f64]], y: &[&[f64]], a: MatRef<'_>) {
    check_dims!(
        a.rows() == x.len() && a.cols() == y.len(),
        "multi_vector_add: {} x-vectors, {} y-vectors, a is {}x{}",
        x.len(),
        y.len(),
        a.rows(),
        a.cols()
    );
    for (i, xi) in x.iter_mut().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            add_vector(a.at(i, j), &yj[..n], &mut xi[..n]);
        }
    }
}

/// Complex `ip(i, j) = Σ_k x_i[k]·y_j[k]` over `k < n`. With `conj` the
/// `x` entries are conjugated, giving the Hermitian inner product.
pub fn pairwise_inner_product_complex(
    n: usize,
    x: &[&[Complex64]],
    y: &[&[Complex64]],
    mut ip: ZMatMut<'_>,
    conj: bool,
) {
    check_dims!(
        ip.rows() == x.len() && ip.cols() == y.len(),
        "pairwise_inner_product_complex: {} x-vectors, {} y-vectors, ip is {}x{}",
        x.len(),
        y.len(),
        ip.rows(),
        ip.cols()
    );
    let inner = if conj { dotc } else { dotu };
    for (i, xi) in x.iter().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            ip.set(i, j, inner(&xi[..n], &yj[..n]));
        }
    }
}

/// Complex `x_i[..n] += Σ_j a(i, j)·y_j[..n]`
pub fn multi_vector_add_complex(
    n: usize,
    x: &mut [&mut [Complex64]],
    y: &[&[Complex64]],
    a: ZMatRef<'_>,
) {
    check_dims!(
        a.rows() == x.len() && a.cols() == y.len(),
        "multi_vector_add_complex: {} x-vectors, {} y-vectors, a is {}x{}",
        x.len(),
        y.len(),
        a.rows(),
        a.cols()
    );
    for (i, xi) in x.iter_mut().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            axpy(a.at(i, j), &yj[..n], &mut xi[..n]);
        }
    }
}
