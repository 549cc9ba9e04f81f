//! Reductions and scaling restricted to the indices a [`Mask`] selects.
//!
//! Positions outside the mask contribute exactly zero: they are skipped, so
//! their contents (NaN, garbage from a reused arena buffer) never reach the
//! result.

use densekit_core::{check_dims, Mask, SliceVecMut};

/// `Σ a[i·da]·b[i·db]` over the `i < n` with `mask.test(i)`.
pub fn masked_dot<M: Mask + ?Sized>(
    n: usize,
    a: &[f64],
    da: usize,
    b: &[f64],
    db: usize,
    mask: &M,
) -> f64 {
    check_dims!(
        mask.len() >= n,
        "masked_dot: mask of {} bits for {} entries",
        mask.len(),
        n
    );
    let mut sum = 0.0;
    for i in 0..n {
        if mask.test(i) {
            sum += a[i * da] * b[i * db];
        }
    }
    sum
}

/// `x[i] *= alpha` for the masked-in entries of `x`.
pub fn masked_scale<M: Mask + ?Sized>(alpha: f64, mut x: SliceVecMut<'_>, mask: &M) {
    check_dims!(
        mask.len() >= x.len(),
        "masked_scale: mask of {} bits for {} entries",
        mask.len(),
        x.len()
    );
    for i in 0..x.len() {
        if mask.test(i) {
            *x.get_mut(i) *= alpha;
        }
    }
}
