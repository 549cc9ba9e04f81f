//! Matrix-matrix kernels on row-major bare views.
//!
//! Three tabled families, each generic over an [`Update`]:
//!
//! | family | product   | `A`   | `B`   | dispatch on       |
//! |--------|-----------|-------|-------|-------------------|
//! | ab     | `A·B`     | m x k | k x n | `k`               |
//! | atb    | `Aᵗ·B`    | k x m | k x n | `m` (rows of `C`) |
//! | abt    | `A·Bᵗ`    | m x k | n x k | `k`               |
//!
//! plus the untabled `atbt` (`Aᵗ·Bᵗ`, which keeps the storage-order
//! reduction total), `add_abt_sym` (lower triangle of `C += A·Bᵗ`) and
//! `transpose_matrix`.
//!
//! All kernels receive `(m, n, k)` explicitly. `C` is always `m x n`.
//! Accumulating updates with `k == 0` return before touching `C`; assigning
//! updates write the zero product.

use densekit_core::{check_dims, BareMat, BareMatMut, MatMut, MatRef, Order};

use crate::dispatch::tables;
use crate::update::{AddTo, Assign, AssignNeg, SubFrom, Update};

// ============================================================================
// ab: C {U} A·B
// ============================================================================

pub(crate) fn ab_fixed<U: Update, const K: usize>(
    m: usize,
    n: usize,
    k: usize,
    a: BareMat<'_>,
    b: BareMat<'_>,
    mut c: BareMatMut<'_>,
) {
    debug_assert_eq!(k, K);
    if U::is_noop(K) {
        return;
    }
    for i in 0..m {
        let ai = a.row(i, K);
        let ci = c.row_mut(i, n);
        for (j, cij) in ci.iter_mut().enumerate() {
            let mut sum = 0.0;
            for l in 0..K {
                sum += ai[l] * b.at(l, j);
            }
            U::store(cij, sum);
        }
    }
}

/// Four columns of `C` per pass so each row of `A` is read once per block.
pub(crate) fn ab_fallback<U: Update>(
    m: usize,
    n: usize,
    k: usize,
    a: BareMat<'_>,
    b: BareMat<'_>,
    mut c: BareMatMut<'_>,
) {
    if U::is_noop(k) {
        return;
    }
    let blocks = n / 4;
    for i in 0..m {
        let ai = a.row(i, k);
        let ci = c.row_mut(i, n);
        for jb in 0..blocks {
            let j = jb * 4;
            let mut s = [0.0f64; 4];
            for (l, &ail) in ai.iter().enumerate() {
                let bl = &b.row(l, n)[j..j + 4];
                s[0] += ail * bl[0];
                s[1] += ail * bl[1];
                s[2] += ail * bl[2];
                s[3] += ail * bl[3];
            }
            for (cij, &v) in ci[j..j + 4].iter_mut().zip(&s) {
                U::store(cij, v);
            }
        }
        for j in blocks * 4..n {
            let mut sum = 0.0;
            for (l, &ail) in ai.iter().enumerate() {
                sum += ail * b.at(l, j);
            }
            U::store(&mut ci[j], sum);
        }
    }
}

// ============================================================================
// atb: C {U} Aᵗ·B
// ============================================================================

/// One column of `C` per pass, accumulated in an `M`-wide register block.
pub(crate) fn atb_fixed<U: Update, const M: usize>(
    m: usize,
    n: usize,
    k: usize,
    a: BareMat<'_>,
    b: BareMat<'_>,
    mut c: BareMatMut<'_>,
) {
    debug_assert_eq!(m, M);
    if U::is_noop(k) {
        return;
    }
    for j in 0..n {
        let mut acc = [0.0f64; M];
        for l in 0..k {
            let blj = b.at(l, j);
            let al = a.row(l, M);
            for i in 0..M {
                acc[i] += al[i] * blj;
            }
        }
        for (i, &v) in acc.iter().enumerate() {
            U::store(c.at_mut(i, j), v);
        }
    }
}

pub(crate) fn atb_fallback<U: Update>(
    m: usize,
    n: usize,
    k: usize,
    a: BareMat<'_>,
    b: BareMat<'_>,
    mut c: BareMatMut<'_>,
) {
    if U::is_noop(k) {
        return;
    }
    for i in 0..m {
        let ci = c.row_mut(i, n);
        for (j, cij) in ci.iter_mut().enumerate() {
            let mut sum = 0.0;
            for l in 0..k {
                sum += a.at(l, i) * b.at(l, j);
            }
            U::store(cij, sum);
        }
    }
}

// ============================================================================
// abt: C {U} A·Bᵗ
// ============================================================================

pub(crate) fn abt_fixed<U: Update, const K: usize>(
    m: usize,
    n: usize,
    k: usize,
    a: BareMat<'_>,
    b: BareMat<'_>,
    mut c: BareMatMut<'_>,
) {
    debug_assert_eq!(k, K);
    if U::is_noop(K) {
        return;
    }
    for i in 0..m {
        let ai = a.row(i, K);
        let ci = c.row_mut(i, n);
        for (j, cij) in ci.iter_mut().enumerate() {
            let bj = b.row(j, K);
            let mut sum = 0.0;
            for l in 0..K {
                sum += ai[l] * bj[l];
            }
            U::store(cij, sum);
        }
    }
}

pub(crate) fn abt_fallback<U: Update>(
    m: usize,
    n: usize,
    k: usize,
    a: BareMat<'_>,
    b: BareMat<'_>,
    mut c: BareMatMut<'_>,
) {
    if U::is_noop(k) {
        return;
    }
    for i in 0..m {
        let ai = a.row(i, k);
        let ci = c.row_mut(i, n);
        for (j, cij) in ci.iter_mut().enumerate() {
            U::store(cij, crate::vector::dot(ai, b.row(j, k)));
        }
    }
}

// ============================================================================
// atbt: C {U} Aᵗ·Bᵗ (generic only)
// ============================================================================

fn atbt_kernel<U: Update>(
    m: usize,
    n: usize,
    k: usize,
    a: BareMat<'_>,
    b: BareMat<'_>,
    mut c: BareMatMut<'_>,
) {
    if U::is_noop(k) {
        return;
    }
    for i in 0..m {
        let ci = c.row_mut(i, n);
        for (j, cij) in ci.iter_mut().enumerate() {
            let bj = b.row(j, k);
            let mut sum = 0.0;
            for (l, &bjl) in bj.iter().enumerate() {
                sum += a.at(l, i) * bjl;
            }
            U::store(cij, sum);
        }
    }
}

// ============================================================================
// Generic entry points
// ============================================================================

/// `C {U} A·B` with `A` m x k, `B` k x n, `C` m x n.
pub fn mat_mat_ab<U: Update>(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    let (m, n, k) = (c.rows(), c.cols(), a.cols());
    check_dims!(
        a.rows() == m && b.rows() == k && b.cols() == n,
        "mat_mat_ab: A is {}x{}, B is {}x{}, C is {}x{}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        m,
        n
    );
    (tables().ab::<U>().select(k))(m, n, k, a.bare(), b.bare(), c.bare_mut())
}

/// `C {U} Aᵗ·B` with `A` k x m, `B` k x n, `C` m x n.
pub fn mat_mat_atb<U: Update>(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    let (m, n, k) = (c.rows(), c.cols(), a.rows());
    check_dims!(
        a.cols() == m && b.rows() == k && b.cols() == n,
        "mat_mat_atb: A is {}x{}, B is {}x{}, C is {}x{}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        m,
        n
    );
    (tables().atb::<U>().select(m))(m, n, k, a.bare(), b.bare(), c.bare_mut())
}

/// `C {U} A·Bᵗ` with `A` m x k, `B` n x k, `C` m x n.
pub fn mat_mat_abt<U: Update>(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    let (m, n, k) = (c.rows(), c.cols(), a.cols());
    check_dims!(
        a.rows() == m && b.rows() == n && b.cols() == k,
        "mat_mat_abt: A is {}x{}, B is {}x{}, C is {}x{}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        m,
        n
    );
    (tables().abt::<U>().select(k))(m, n, k, a.bare(), b.bare(), c.bare_mut())
}

/// `C {U} Aᵗ·Bᵗ` with `A` k x m, `B` n x k, `C` m x n.
pub fn mat_mat_atbt<U: Update>(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    let (m, n, k) = (c.rows(), c.cols(), a.rows());
    check_dims!(
        a.cols() == m && b.rows() == n && b.cols() == k,
        "mat_mat_atbt: A is {}x{}, B is {}x{}, C is {}x{}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        m,
        n
    );
    atbt_kernel::<U>(m, n, k, a.bare(), b.bare(), c.bare_mut())
}

// ============================================================================
// Named entry points
// ============================================================================

/// `C = A·B`
pub fn mult_mat_mat(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    mat_mat_ab::<Assign>(a, b, c)
}

/// `C = −A·B`
pub fn minus_mult_ab(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    mat_mat_ab::<AssignNeg>(a, b, c)
}

/// `C += A·B`
pub fn add_ab(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    mat_mat_ab::<AddTo>(a, b, c)
}

/// `C −= A·B`
pub fn sub_ab(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    mat_mat_ab::<SubFrom>(a, b, c)
}

/// `C = Aᵗ·B`
pub fn mult_atb(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    mat_mat_atb::<Assign>(a, b, c)
}

/// `C = A·Bᵗ`
pub fn mult_abt(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    mat_mat_abt::<Assign>(a, b, c)
}

/// `C = −A·Bᵗ`
pub fn minus_mult_abt(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    mat_mat_abt::<AssignNeg>(a, b, c)
}

/// `C += A·Bᵗ`
pub fn add_abt(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    mat_mat_abt::<AddTo>(a, b, c)
}

/// `C −= A·Bᵗ`
pub fn sub_abt(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    mat_mat_abt::<SubFrom>(a, b, c)
}

/// `C += A·Bᵗ` on the lower triangle (`j <= i`) only. For when `C` is known
/// to be symmetric; the strict upper triangle is left untouched.
pub fn add_abt_sym(a: MatRef<'_>, b: MatRef<'_>, c: MatMut<'_>) {
    let (m, k) = (c.rows(), a.cols());
    check_dims!(
        c.cols() == m && a.rows() == m && b.rows() == m && b.cols() == k,
        "add_abt_sym: A is {}x{}, B is {}x{}, C is {}x{}",
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
    let (a, b, mut c) = (a.bare(), b.bare(), c.bare_mut());
    for i in 0..m {
        let ai = a.row(i, k);
        let ci = c.row_mut(i, i + 1);
        for (j, cij) in ci.iter_mut().enumerate() {
            *cij += crate::vector::dot(ai, b.row(j, k));
        }
    }
}

/// `B = Aᵗ`, any storage orders.
pub fn transpose_matrix<OA: Order, OB: Order>(a: MatRef<'_, OA>, mut b: MatMut<'_, OB>) {
    check_dims!(
        a.rows() == b.cols() && a.cols() == b.rows(),
        "transpose_matrix: A is {}x{}, B is {}x{}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols()
    );
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            b.set(j, i, a.at(i, j));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use densekit_core::{ColMajor, RowMajor};

    // 2x3 and 3x2, row-major
    const A: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    const B: [f64; 6] = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
    // A·B
    const AB: [f64; 4] = [58.0, 64.0, 139.0, 154.0];

    #[test]
    fn test_mult_mat_mat() {
        let mut c = [0.0; 4];
        mult_mat_mat(
            MatRef::from_slice(&A, 2, 3),
            MatRef::from_slice(&B, 3, 2),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, AB);
    }

    #[test]
    fn test_update_variants() {
        let a = MatRef::from_slice(&A, 2, 3);
        let b = MatRef::from_slice(&B, 3, 2);
        let mut c = [1.0; 4];
        add_ab(a, b, MatMut::from_slice(&mut c, 2, 2));
        assert_eq!(c, [59.0, 65.0, 140.0, 155.0]);
        sub_ab(a, b, MatMut::from_slice(&mut c, 2, 2));
        assert_eq!(c, [1.0; 4]);
        minus_mult_ab(a, b, MatMut::from_slice(&mut c, 2, 2));
        assert_eq!(c, AB.map(|v| -v));
    }

    #[test]
    fn test_atb_and_abt() {
        // Aᵗ stored row-major is 3x2
        let at = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let mut c = [0.0; 4];
        mult_atb(
            MatRef::from_slice(&at, 3, 2),
            MatRef::from_slice(&B, 3, 2),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, AB);

        // Bᵗ stored row-major is 2x3
        let bt = [7.0, 9.0, 11.0, 8.0, 10.0, 12.0];
        let mut c = [0.0; 4];
        mult_abt(
            MatRef::from_slice(&A, 2, 3),
            MatRef::from_slice(&bt, 2, 3),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, AB);
        add_abt(
            MatRef::from_slice(&A, 2, 3),
            MatRef::from_slice(&bt, 2, 3),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, AB.map(|v| 2.0 * v));
        sub_abt(
            MatRef::from_slice(&A, 2, 3),
            MatRef::from_slice(&bt, 2, 3),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, AB);
        minus_mult_abt(
            MatRef::from_slice(&A, 2, 3),
            MatRef::from_slice(&bt, 2, 3),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, AB.map(|v| -v));
    }

    #[test]
    fn test_atbt() {
        let at = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let bt = [7.0, 9.0, 11.0, 8.0, 10.0, 12.0];
        let mut c = [0.0; 4];
        mat_mat_atbt::<Assign>(
            MatRef::from_slice(&at, 3, 2),
            MatRef::from_slice(&bt, 2, 3),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, AB);
    }

    #[test]
    fn test_add_abt_sym_lower_only() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let mut c = [0.0, -1.0, 0.0, 0.0];
        add_abt_sym(
            MatRef::from_slice(&a, 2, 2),
            MatRef::from_slice(&a, 2, 2),
            MatMut::from_slice(&mut c, 2, 2),
        );
        // A·Aᵗ = [[5, 11], [11, 25]]
        assert_eq!(c, [5.0, -1.0, 11.0, 25.0]);
    }

    #[test]
    fn test_transpose_matrix() {
        let mut t = [0.0; 6];
        transpose_matrix(
            MatRef::<RowMajor>::from_slice(&A, 2, 3),
            MatMut::<RowMajor>::from_slice(&mut t, 3, 2),
        );
        assert_eq!(t, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);

        // Transposing into a column-major target reproduces the buffer.
        let mut u = [0.0; 6];
        transpose_matrix(
            MatRef::<RowMajor>::from_slice(&A, 2, 3),
            MatMut::<ColMajor>::from_slice(&mut u, 3, 2),
        );
        assert_eq!(u, A);
    }

    #[test]
    fn test_fallback_blocks_match_fixed() {
        // 3x5 = 3x4 · 4x5: fallback takes one 4-wide block plus a tail column
        let a: Vec<f64> = (0..12).map(|i| i as f64 - 5.0).collect();
        let b: Vec<f64> = (0..20).map(|i| (i % 7) as f64).collect();
        let mut c1 = [0.5; 15];
        let mut c2 = [0.5; 15];
        ab_fixed::<SubFrom, 4>(
            3,
            5,
            4,
            BareMat::new(&a, 4),
            BareMat::new(&b, 5),
            BareMatMut::new(&mut c1, 5),
        );
        ab_fallback::<SubFrom>(
            3,
            5,
            4,
            BareMat::new(&a, 4),
            BareMat::new(&b, 5),
            BareMatMut::new(&mut c2, 5),
        );
        assert_eq!(c1, c2);
    }
}
