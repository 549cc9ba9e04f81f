//! Schur complement of a symmetric matrix onto a retained index subset.
//!
//! With `R` the indices selected by the mask and `E` the rest,
//!
//! ```text
//! S = A_RR − A_RE · A_EE⁻¹ · A_ER
//! ```
//!
//! `A_EE` is factored as `P·A_EE·Pᵗ = L·D·Lᵗ` with symmetric diagonal
//! pivoting (the largest remaining |diagonal| moves to the front at every
//! step). The same row operations turn `P·A_ER` into `W = L⁻¹·P·A_ER`, and
//! the complement is finished by the downdate `S −= Wᵗ·D⁻¹·W`.
//!
//! `A_EE` must be nonsingular. A zero pivot yields non-finite entries in
//! `S`; it is not reported.
//!
//! The eliminated block, `W` and `D⁻¹` are drawn from the caller's
//! [`LocalHeap`]. Inconsistent shapes and running out of heap are reported
//! as errors.

use densekit_blas::add_vector;
use densekit_core::{Error, LocalHeap, Mask, MatMut, MatRef, Result, SliceVec};

use crate::rank_update::sub_atdb;

/// `s = A_RR − A_RE·A_EE⁻¹·A_ER` where `R` is the set of indices `used`
/// selects. `a` is n x n symmetric, `s` is `|R| x |R|`.
pub fn calc_schur_complement<M: Mask + ?Sized>(
    a: MatRef<'_>,
    mut s: MatMut<'_>,
    used: &M,
    heap: &LocalHeap,
) -> Result<()> {
    let n = a.rows();
    let nr = used.count_ones();
    Error::check_shape("calc_schur_complement: A", (n, n), (a.rows(), a.cols()))?;
    Error::check_shape("calc_schur_complement: mask", (n, 1), (used.len(), 1))?;
    Error::check_shape("calc_schur_complement: S", (nr, nr), (s.rows(), s.cols()))?;
    let ne = n - nr;
    log::trace!("schur complement: {n} rows, {nr} retained, {ne} eliminated");

    // S = A_RR
    let mut si = 0;
    for i in (0..n).filter(|&i| used.test(i)) {
        let mut sj = 0;
        for j in (0..n).filter(|&j| used.test(j)) {
            s.set(si, sj, a.at(i, j));
            sj += 1;
        }
        si += 1;
    }
    if nr == 0 || ne == 0 {
        return Ok(());
    }

    let e = heap.alloc(ne * ne)?;
    let w = heap.alloc(ne * nr)?;
    let dinv = heap.alloc(ne)?;

    // E = A_EE, W = A_ER
    let mut ei = 0;
    for i in (0..n).filter(|&i| !used.test(i)) {
        let (mut ej, mut wj) = (0, 0);
        for j in 0..n {
            if used.test(j) {
                w[ei * nr + wj] = a.at(i, j);
                wj += 1;
            } else {
                e[ei * ne + ej] = a.at(i, j);
                ej += 1;
            }
        }
        ei += 1;
    }

    eliminate(e, w, dinv, ne, nr);

    let w: &[f64] = w;
    sub_atdb(
        MatRef::from_slice(w, ne, nr),
        SliceVec::from_flat(dinv),
        MatRef::from_slice(w, ne, nr),
        s,
    );
    Ok(())
}

/// Replace the retained rows and columns of `a` by the Schur complement
/// onto them. Eliminated rows and columns are left as they were.
pub fn schur_complement_in_place<M: Mask + ?Sized>(
    mut a: MatMut<'_>,
    used: &M,
    heap: &LocalHeap,
) -> Result<()> {
    let n = a.rows();
    let nr = used.count_ones();
    if nr == 0 {
        Error::check_shape("schur_complement_in_place: A", (n, n), (a.rows(), a.cols()))?;
        return Error::check_shape("schur_complement_in_place: mask", (n, 1), (used.len(), 1));
    }
    let buf = heap.alloc(nr * nr)?;
    calc_schur_complement(a.rb(), MatMut::from_slice(&mut *buf, nr, nr), used, heap)?;

    let mut si = 0;
    for i in (0..n).filter(|&i| used.test(i)) {
        let mut sj = 0;
        for j in (0..n).filter(|&j| used.test(j)) {
            a.set(i, j, buf[si * nr + sj]);
            sj += 1;
        }
        si += 1;
    }
    Ok(())
}

/// In-place LDLᵗ elimination of the `ne x ne` block `e`, applied alongside
/// to the `ne x nr` block `w`. On return `w` holds `L⁻¹·P·W` and `dinv` the
/// reciprocal pivots. Only the trailing part of `e` stays meaningful.
fn eliminate(e: &mut [f64], w: &mut [f64], dinv: &mut [f64], ne: usize, nr: usize) {
    for k in 0..ne {
        let p = (k..ne)
            .max_by(|&x, &y| e[x * ne + x].abs().total_cmp(&e[y * ne + y].abs()))
            .unwrap_or(k);
        if p != k {
            swap_sym(e, ne, k, p);
            swap_rows(w, nr, k, p);
        }

        let pivot = e[k * ne + k];
        debug_assert!(pivot != 0.0, "singular eliminated block at step {k}");
        dinv[k] = 1.0 / pivot;

        let (head, tail) = e.split_at_mut((k + 1) * ne);
        let ek = &head[k * ne + k + 1..];
        let (whead, wtail) = w.split_at_mut((k + 1) * nr);
        let wk = &whead[k * nr..];
        for i in k + 1..ne {
            let row = (i - k - 1) * ne;
            let l = tail[row + k] * dinv[k];
            if l == 0.0 {
                continue;
            }
            add_vector(-l, ek, &mut tail[row + k + 1..row + ne]);
            let wrow = (i - k - 1) * nr;
            add_vector(-l, wk, &mut wtail[wrow..wrow + nr]);
        }
    }
}

/// Symmetric permutation: swap rows `i`, `j` and then columns `i`, `j`.
fn swap_sym(e: &mut [f64], n: usize, i: usize, j: usize) {
    swap_rows(e, n, i, j);
    for r in 0..n {
        e.swap(r * n + i, r * n + j);
    }
}

fn swap_rows(m: &mut [f64], cols: usize, i: usize, j: usize) {
    let (lo, hi) = (i.min(j), i.max(j));
    let (a, b) = m.split_at_mut(hi * cols);
    a[lo * cols..(lo + 1) * cols].swap_with_slice(&mut b[..cols]);
}
