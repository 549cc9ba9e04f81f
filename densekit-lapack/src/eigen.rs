//! Symmetric eigendecomposition by cyclic Jacobi sweeps.
//!
//! Each sweep visits every pair `p < q` once and applies the rotation that
//! zeroes `A[p, q]`:
//!
//! ```text
//! τ = (a_qq − a_pp) / (2·a_pq)
//! t = sign(τ) / (|τ| + √(1 + τ²))
//! c = 1 / √(1 + t²),  s = t·c
//! ```
//!
//! The same rotation is accumulated into the eigenvector matrix. Sweeps stop
//! once the off-diagonal Frobenius norm falls to `tolerance·‖A‖_F`, or at
//! the sweep cap. Reaching the cap is not an error: the current diagonal and
//! rotations are returned with [`EigenReport::converged`] unset and a
//! warning logged.

use densekit_core::{Error, LocalHeap, MatMut, MatRef, Order, Result};

/// Stopping criteria for [`calc_eigen_system_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenConfig {
    /// Off-diagonal norm relative to `‖A‖_F` at which iteration stops.
    pub tolerance: f64,
    /// Maximum number of full sweeps.
    pub max_sweeps: usize,
}

impl Default for EigenConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-14,
            max_sweeps: 50,
        }
    }
}

/// How an eigensolve ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenReport {
    /// Sweeps performed.
    pub sweeps: usize,
    /// Off-diagonal Frobenius norm of the rotated matrix at exit.
    pub off_diagonal: f64,
    /// Whether the tolerance was met within the sweep cap.
    pub converged: bool,
}

/// Eigenvalues (ascending, into `lami`) and eigenvectors (column `i` of
/// `evecs` belongs to `lami[i]`) of the symmetric matrix `a`, with the
/// default [`EigenConfig`]. Only the lower triangle of `a` is read.
pub fn calc_eigen_system<O: Order>(
    a: MatRef<'_>,
    lami: &mut [f64],
    evecs: MatMut<'_, O>,
    heap: &LocalHeap,
) -> Result<EigenReport> {
    calc_eigen_system_with(a, lami, evecs, heap, &EigenConfig::default())
}

/// [`calc_eigen_system`] with explicit stopping criteria.
///
/// The rotated work copy of `a` comes from `heap`. Errors are inconsistent
/// shapes and an exhausted heap.
pub fn calc_eigen_system_with<O: Order>(
    a: MatRef<'_>,
    lami: &mut [f64],
    mut evecs: MatMut<'_, O>,
    heap: &LocalHeap,
    config: &EigenConfig,
) -> Result<EigenReport> {
    let n = a.rows();
    Error::check_shape("calc_eigen_system: A", (n, n), (a.rows(), a.cols()))?;
    Error::check_shape("calc_eigen_system: lami", (n, 1), (lami.len(), 1))?;
    Error::check_shape("calc_eigen_system: evecs", (n, n), (evecs.rows(), evecs.cols()))?;
    if n == 0 {
        return Ok(EigenReport {
            sweeps: 0,
            off_diagonal: 0.0,
            converged: true,
        });
    }

    let work = heap.alloc(n * n)?;
    for i in 0..n {
        for j in 0..=i {
            let v = a.at(i, j);
            work[i * n + j] = v;
            work[j * n + i] = v;
        }
    }
    evecs.fill(0.0);
    for i in 0..n {
        evecs.set(i, i, 1.0);
    }

    let norm = work.iter().map(|v| v * v).sum::<f64>().sqrt();
    let threshold = config.tolerance * norm;
    // Entries this small are rounding noise next to the diagonal.
    let negligible = f64::EPSILON * norm / (n.max(1) as f64);

    let mut sweeps = 0;
    let mut off = off_norm(work, n);
    while off > threshold && sweeps < config.max_sweeps {
        for p in 0..n {
            for q in p + 1..n {
                let apq = work[p * n + q];
                if apq.abs() <= negligible {
                    work[p * n + q] = 0.0;
                    work[q * n + p] = 0.0;
                    continue;
                }
                let (c, s) = rotation(work[p * n + p], work[q * n + q], apq);
                rotate(work, n, p, q, c, s);
                rotate_columns(&mut evecs, p, q, c, s);
            }
        }
        sweeps += 1;
        off = off_norm(work, n);
    }

    let converged = off <= threshold;
    if converged {
        log::trace!("jacobi: n = {n} converged in {sweeps} sweeps");
    } else {
        log::warn!(
            "jacobi: n = {n} stopped after {sweeps} sweeps, off-diagonal {off:e} > {threshold:e}"
        );
    }

    for (i, l) in lami.iter_mut().enumerate() {
        *l = work[i * n + i];
    }
    sort_ascending(lami, &mut evecs);

    Ok(EigenReport {
        sweeps,
        off_diagonal: off,
        converged,
    })
}

/// `(c, s)` of the rotation that annihilates `a_pq`.
#[inline]
fn rotation(app: f64, aqq: f64, apq: f64) -> (f64, f64) {
    let tau = (aqq - app) / (2.0 * apq);
    let t = if tau >= 0.0 {
        1.0 / (tau + (1.0 + tau * tau).sqrt())
    } else {
        -1.0 / (-tau + (1.0 + tau * tau).sqrt())
    };
    let c = 1.0 / (1.0 + t * t).sqrt();
    (c, t * c)
}

/// `A ← Jᵗ·A·J` on the full symmetric work matrix.
fn rotate(w: &mut [f64], n: usize, p: usize, q: usize, c: f64, s: f64) {
    let (app, aqq, apq) = (w[p * n + p], w[q * n + q], w[p * n + q]);
    for k in 0..n {
        if k == p || k == q {
            continue;
        }
        let (akp, akq) = (w[k * n + p], w[k * n + q]);
        let kp = c * akp - s * akq;
        let kq = s * akp + c * akq;
        w[k * n + p] = kp;
        w[p * n + k] = kp;
        w[k * n + q] = kq;
        w[q * n + k] = kq;
    }
    let (c2, s2, cs2) = (c * c, s * s, 2.0 * c * s);
    w[p * n + p] = c2 * app - cs2 * apq + s2 * aqq;
    w[q * n + q] = s2 * app + cs2 * apq + c2 * aqq;
    w[p * n + q] = 0.0;
    w[q * n + p] = 0.0;
}

/// `[v_p, v_q] ← [v_p, v_q]·[[c, s], [−s, c]]`
fn rotate_columns<O: Order>(v: &mut MatMut<'_, O>, p: usize, q: usize, c: f64, s: f64) {
    for i in 0..v.rows() {
        let (vp, vq) = (v.at(i, p), v.at(i, q));
        v.set(i, p, c * vp - s * vq);
        v.set(i, q, s * vp + c * vq);
    }
}

fn off_norm(w: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for i in 0..n {
        for j in i + 1..n {
            sum += w[i * n + j] * w[i * n + j];
        }
    }
    (2.0 * sum).sqrt()
}

/// Selection sort of the eigenpairs; `n` is small and each swap moves a
/// whole eigenvector column.
fn sort_ascending<O: Order>(lami: &mut [f64], v: &mut MatMut<'_, O>) {
    let n = lami.len();
    for i in 0..n {
        let Some(m) = (i..n).min_by(|&x, &y| lami[x].total_cmp(&lami[y])) else {
            continue;
        };
        if m != i {
            lami.swap(i, m);
            for r in 0..v.rows() {
                let t = v.at(r, i);
                v.set(r, i, v.at(r, m));
                v.set(r, m, t);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use densekit_core::{ColMajor, RowMajor, SplitMix64};

    #[test]
    fn test_diagonal_input_needs_no_sweeps() {
        let a = [3.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 2.0];
        let heap = LocalHeap::with_capacity(64);
        let mut lami = [0.0; 3];
        let mut v = [0.0; 9];
        let report = calc_eigen_system(
            MatRef::from_slice(&a, 3, 3),
            &mut lami,
            MatMut::<RowMajor>::from_slice(&mut v, 3, 3),
            &heap,
        )
        .unwrap();
        assert_eq!(report.sweeps, 0);
        assert!(report.converged);
        assert_eq!(lami, [-1.0, 2.0, 3.0]);
        // permutation matrix: column 0 is e_1, column 1 is e_2, column 2 is e_0
        assert_eq!(v, [0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_two_by_two() {
        // [[2, 1], [1, 2]]: eigenvalues 1 and 3
        let a = [2.0, 1.0, 1.0, 2.0];
        let heap = LocalHeap::with_capacity(64);
        let mut lami = [0.0; 2];
        let mut v = [0.0; 4];
        let report = calc_eigen_system(
            MatRef::from_slice(&a, 2, 2),
            &mut lami,
            MatMut::<ColMajor>::from_slice(&mut v, 2, 2),
            &heap,
        )
        .unwrap();
        assert!(report.converged);
        assert!((lami[0] - 1.0).abs() < 1e-14);
        assert!((lami[1] - 3.0).abs() < 1e-14);
        // column-major: first column is ±(1, −1)/√2
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!((v[0].abs() - h).abs() < 1e-14);
        assert!((v[0] + v[1]).abs() < 1e-14);
    }

    #[test]
    fn test_reads_lower_triangle_only() {
        let a = [2.0, f64::NAN, 1.0, 2.0];
        let heap = LocalHeap::with_capacity(64);
        let mut lami = [0.0; 2];
        let mut v = [0.0; 4];
        calc_eigen_system(
            MatRef::from_slice(&a, 2, 2),
            &mut lami,
            MatMut::<RowMajor>::from_slice(&mut v, 2, 2),
            &heap,
        )
        .unwrap();
        assert!((lami[0] - 1.0).abs() < 1e-14 && (lami[1] - 3.0).abs() < 1e-14);
    }

    #[test]
    fn test_sweep_cap_returns_best_effort() {
        let mut rng = SplitMix64::new(3);
        let n = 8;
        let a = rng.symmetric(n);
        let heap = LocalHeap::with_capacity(128);
        let mut lami = vec![0.0; n];
        let mut v = vec![0.0; n * n];
        let config = EigenConfig {
            tolerance: 1e-14,
            max_sweeps: 1,
        };
        let report = calc_eigen_system_with(
            MatRef::from_slice(&a, n, n),
            &mut lami,
            MatMut::<RowMajor>::from_slice(&mut v, n, n),
            &heap,
            &config,
        )
        .unwrap();
        assert_eq!(report.sweeps, 1);
        assert!(!report.converged);
        assert!(report.off_diagonal.is_finite());
        assert!(lami.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_matrix() {
        let heap = LocalHeap::with_capacity(0);
        let report = calc_eigen_system(
            MatRef::from_slice(&[], 0, 0),
            &mut [],
            MatMut::<RowMajor>::from_slice(&mut [], 0, 0),
            &heap,
        )
        .unwrap();
        assert!(report.converged);
        assert_eq!(report.sweeps, 0);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = [1.0; 6];
        let heap = LocalHeap::with_capacity(64);
        let mut lami = [0.0; 2];
        let mut v = [0.0; 4];
        let res = calc_eigen_system(
            MatRef::from_slice(&a, 2, 3),
            &mut lami,
            MatMut::<RowMajor>::from_slice(&mut v, 2, 2),
            &heap,
        );
        assert!(matches!(res, Err(Error::DimensionMismatch { got: (2, 3), .. })));
    }

    #[test]
    fn test_heap_too_small() {
        let a = [1.0; 9];
        let heap = LocalHeap::with_capacity(4);
        let mut lami = [0.0; 3];
        let mut v = [0.0; 9];
        let res = calc_eigen_system(
            MatRef::from_slice(&a, 3, 3),
            &mut lami,
            MatMut::<RowMajor>::from_slice(&mut v, 3, 3),
            &heap,
        );
        assert!(matches!(res, Err(Error::HeapExhausted { .. })));
    }
}
