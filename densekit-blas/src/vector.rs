//! Vector-vector kernels: copy and scaled add, flat and strided.
//!
//! The `*_fixed::<N>` kernels serve one exact length each and are only
//! reached through the dispatch tables. The `*_fallback` kernels take any
//! length. Public entry points check dimensions and dispatch on the length.

use densekit_core::{check_dims, SliceVec, SliceVecMut};

use crate::dispatch::tables;

// ============================================================================
// Kernels
// ============================================================================

pub(crate) fn copy_fixed<const N: usize>(x: &[f64], y: &mut [f64]) {
    let (x, y) = (&x[..N], &mut y[..N]);
    for i in 0..N {
        y[i] = x[i];
    }
}

pub(crate) fn copy_fallback(x: &[f64], y: &mut [f64]) {
    y[..x.len()].copy_from_slice(x);
}

pub(crate) fn copy_slice_fixed<const N: usize>(x: SliceVec<'_>, mut y: SliceVecMut<'_>) {
    for i in 0..N {
        y.set(i, x.get(i));
    }
}

pub(crate) fn copy_slice_fallback(x: SliceVec<'_>, mut y: SliceVecMut<'_>) {
    if let (Some(src), Some(dst)) = (x.as_flat(), y.as_flat_mut()) {
        dst.copy_from_slice(src);
        return;
    }
    for i in 0..x.len() {
        y.set(i, x.get(i));
    }
}

pub(crate) fn add_fixed<const N: usize>(alpha: f64, x: &[f64], y: &mut [f64]) {
    let (x, y) = (&x[..N], &mut y[..N]);
    for i in 0..N {
        y[i] += alpha * x[i];
    }
}

pub(crate) fn add_fallback(alpha: f64, x: &[f64], y: &mut [f64]) {
    let n = x.len();
    let y = &mut y[..n];
    let chunks = n / 4;
    for c in 0..chunks {
        let i = c * 4;
        y[i] += alpha * x[i];
        y[i + 1] += alpha * x[i + 1];
        y[i + 2] += alpha * x[i + 2];
        y[i + 3] += alpha * x[i + 3];
    }
    for i in chunks * 4..n {
        y[i] += alpha * x[i];
    }
}

pub(crate) fn add_slice_fixed<const N: usize>(alpha: f64, x: SliceVec<'_>, mut y: SliceVecMut<'_>) {
    for i in 0..N {
        *y.get_mut(i) += alpha * x.get(i);
    }
}

pub(crate) fn add_slice_fallback(alpha: f64, x: SliceVec<'_>, mut y: SliceVecMut<'_>) {
    if let (Some(src), Some(dst)) = (x.as_flat(), y.as_flat_mut()) {
        add_fallback(alpha, src, dst);
        return;
    }
    for i in 0..x.len() {
        *y.get_mut(i) += alpha * x.get(i);
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// `y = x`
pub fn copy_vector(x: &[f64], y: &mut [f64]) {
    check_dims!(
        x.len() == y.len(),
        "copy_vector: x has {} entries, y has {}",
        x.len(),
        y.len()
    );
    (tables().copy.select(x.len()))(x, y)
}

/// `y = x` for strided vectors.
pub fn copy_slice_vector(x: SliceVec<'_>, y: SliceVecMut<'_>) {
    check_dims!(
        x.len() == y.len(),
        "copy_slice_vector: x has {} entries, y has {}",
        x.len(),
        y.len()
    );
    (tables().copy_slice.select(x.len()))(x, y)
}

/// `y += alpha·x`
pub fn add_vector(alpha: f64, x: &[f64], y: &mut [f64]) {
    check_dims!(
        x.len() == y.len(),
        "add_vector: x has {} entries, y has {}",
        x.len(),
        y.len()
    );
    (tables().add.select(x.len()))(alpha, x, y)
}

/// `y += alpha·x` for strided vectors.
pub fn add_slice_vector(alpha: f64, x: SliceVec<'_>, y: SliceVecMut<'_>) {
    check_dims!(
        x.len() == y.len(),
        "add_slice_vector: x has {} entries, y has {}",
        x.len(),
        y.len()
    );
    (tables().add_slice.select(x.len()))(alpha, x, y)
}

/// `y *= alpha`
pub fn scale_vector(alpha: f64, y: &mut [f64]) {
    for v in y.iter_mut() {
        *v *= alpha;
    }
}

/// Inner product of two equal-length flat vectors.
#[inline]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    check_dims!(
        x.len() == y.len(),
        "dot: x has {} entries, y has {}",
        x.len(),
        y.len()
    );
    let n = x.len();
    let y = &y[..n];
    let mut acc = [0.0f64; 4];
    let chunks = n / 4;
    for c in 0..chunks {
        let i = c * 4;
        acc[0] += x[i] * y[i];
        acc[1] += x[i + 1] * y[i + 1];
        acc[2] += x[i + 2] * y[i + 2];
        acc[3] += x[i + 3] * y[i + 3];
    }
    let mut sum = (acc[0] + acc[1]) + (acc[2] + acc[3]);
    for i in chunks * 4..n {
        sum += x[i] * y[i];
    }
    sum
}
