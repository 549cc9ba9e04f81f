//! Naive reference implementations shared by the integration tests.

#![allow(dead_code)]

use densekit_core::SplitMix64;

/// Random row-major `rows x cols` buffer with leading dimension `ld`.
/// Padding entries hold a sentinel so reads past the view show up.
pub fn padded(rng: &mut SplitMix64, rows: usize, cols: usize, ld: usize) -> Vec<f64> {
    let mut v = vec![f64::NAN; rows.saturating_sub(1) * ld + cols];
    if rows == 0 || cols == 0 {
        return vec![];
    }
    for i in 0..rows {
        for j in 0..cols {
            v[i * ld + j] = rng.next_range(-1.0, 1.0);
        }
    }
    v
}

/// `C[i][j] = Σ_l a(i, l)·b(l, j)` for an `m x n` result.
pub fn naive_product(
    m: usize,
    n: usize,
    k: usize,
    a: impl Fn(usize, usize) -> f64,
    b: impl Fn(usize, usize) -> f64,
) -> Vec<f64> {
    let mut c = vec![0.0; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            for l in 0..k {
                sum += a(i, l) * b(l, j);
            }
            c[i * n + j] = sum;
        }
    }
    c
}

pub fn assert_close(got: &[f64], expect: &[f64], tol: f64, what: &str) {
    assert_eq!(got.len(), expect.len(), "{what}: length");
    for (i, (g, e)) in got.iter().zip(expect).enumerate() {
        assert!(
            (g - e).abs() <= tol * (1.0 + e.abs()),
            "{what}: entry {i}: got {g}, expected {e}"
        );
    }
}
