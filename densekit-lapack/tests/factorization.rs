//! Schur complement and eigensystem against dense reference computations.

use densekit_core::{BitArray, LocalHeap, MatMut, MatRef, RowMajor, SplitMix64};
use densekit_lapack::{
    calc_eigen_system, calc_schur_complement, schur_complement_in_place, EigenReport,
};

/// Solve `M·X = R` (M is n x n, R is n x r, both row-major) by Gaussian
/// elimination with partial pivoting.
fn solve(mut m: Vec<f64>, mut r: Vec<f64>, n: usize, nr: usize) -> Vec<f64> {
    for k in 0..n {
        let p = (k..n)
            .max_by(|&x, &y| m[x * n + k].abs().total_cmp(&m[y * n + k].abs()))
            .unwrap();
        for j in 0..n {
            m.swap(k * n + j, p * n + j);
        }
        for j in 0..nr {
            r.swap(k * nr + j, p * nr + j);
        }
        for i in k + 1..n {
            let l = m[i * n + k] / m[k * n + k];
            for j in k..n {
                m[i * n + j] -= l * m[k * n + j];
            }
            for j in 0..nr {
                r[i * nr + j] -= l * r[k * nr + j];
            }
        }
    }
    for k in (0..n).rev() {
        for j in 0..nr {
            let mut v = r[k * nr + j];
            for c in k + 1..n {
                v -= m[k * n + c] * r[c * nr + j];
            }
            r[k * nr + j] = v / m[k * n + k];
        }
    }
    r
}

/// `A_RR − A_RE·A_EE⁻¹·A_ER` by explicit block extraction and a reference solve.
fn reference_schur(a: &[f64], n: usize, keep: &[usize]) -> Vec<f64> {
    let elim: Vec<usize> = (0..n).filter(|i| !keep.contains(i)).collect();
    let (nr, ne) = (keep.len(), elim.len());
    let block = |rows: &[usize], cols: &[usize]| -> Vec<f64> {
        rows.iter()
            .flat_map(|&i| cols.iter().map(move |&j| a[i * n + j]))
            .collect()
    };
    let x = solve(block(&elim, &elim), block(&elim, keep), ne, nr);
    let are = block(keep, &elim);
    let mut s = block(keep, keep);
    for i in 0..nr {
        for j in 0..nr {
            for l in 0..ne {
                s[i * nr + j] -= are[i * ne + l] * x[l * nr + j];
            }
        }
    }
    s
}

#[test]
fn schur_complement_of_spd_matches_block_elimination() {
    let n = 6;
    let keep = [1, 3, 5];
    let mut heap = LocalHeap::with_capacity(256);
    let used = BitArray::from_indices(n, &keep);

    for seed in 0..10 {
        let a = SplitMix64::new(seed).spd(n);
        let expect = reference_schur(&a, n, &keep);

        let mut s = [0.0; 9];
        calc_schur_complement(
            MatRef::from_slice(&a, n, n),
            MatMut::from_slice(&mut s, 3, 3),
            &used,
            &heap,
        )
        .unwrap();
        for (got, want) in s.iter().zip(&expect) {
            assert!((got - want).abs() < 1e-10, "seed {seed}: {got} vs {want}");
        }
        // symmetric result
        for i in 0..3 {
            for j in 0..3 {
                assert!((s[i * 3 + j] - s[j * 3 + i]).abs() < 1e-12);
            }
        }

        let mut b = a.clone();
        schur_complement_in_place(MatMut::from_slice(&mut b, n, n), &used, &heap).unwrap();
        for (si, &i) in keep.iter().enumerate() {
            for (sj, &j) in keep.iter().enumerate() {
                assert!((b[i * n + j] - s[si * 3 + sj]).abs() < 1e-14);
            }
            // eliminated columns untouched
            assert_eq!(b[i * n], a[i * n]);
        }
        heap.reset();
    }
}

#[test]
fn schur_complement_of_indefinite_block() {
    // The eliminated block of a symmetric indefinite matrix needs pivoting
    // past a small leading diagonal.
    let n = 5;
    let mut rng = SplitMix64::new(42);
    let mut a = rng.symmetric(n);
    a[0] = 1e-3;
    let keep = [2, 4];
    let expect = reference_schur(&a, n, &keep);

    let heap = LocalHeap::with_capacity(256);
    let mut s = [0.0; 4];
    calc_schur_complement(
        MatRef::from_slice(&a, n, n),
        MatMut::from_slice(&mut s, 2, 2),
        &BitArray::from_indices(n, &keep),
        &heap,
    )
    .unwrap();
    for (got, want) in s.iter().zip(&expect) {
        assert!((got - want).abs() < 1e-9 * (1.0 + want.abs()), "{got} vs {want}");
    }
}

fn check_eigensystem(a: &[f64], n: usize, lami: &[f64], v: &[f64], report: &EigenReport) {
    assert!(report.converged, "{report:?}");
    assert!(lami.windows(2).all(|w| w[0] <= w[1]), "not ascending: {lami:?}");

    // ‖A·v_i − λ_i·v_i‖
    for i in 0..n {
        let mut res = 0.0;
        for r in 0..n {
            let av: f64 = (0..n).map(|c| a[r * n + c] * v[c * n + i]).sum();
            let d = av - lami[i] * v[r * n + i];
            res += d * d;
        }
        assert!(res.sqrt() < 1e-8, "residual {} for eigenpair {i}", res.sqrt());
    }

    // Vᵗ·V = I
    for i in 0..n {
        for j in 0..n {
            let dot: f64 = (0..n).map(|r| v[r * n + i] * v[r * n + j]).sum();
            let want = if i == j { 1.0 } else { 0.0 };
            assert!((dot - want).abs() < 1e-8, "(VᵗV)[{i},{j}] = {dot}");
        }
    }
}

#[test]
fn eigensystem_of_random_symmetric() {
    let n = 5;
    let mut heap = LocalHeap::with_capacity(64);
    for seed in 0..20 {
        let a = SplitMix64::new(seed).symmetric(n);
        let mut lami = [0.0; 5];
        let mut v = [0.0; 25];
        let report = calc_eigen_system(
            MatRef::from_slice(&a, n, n),
            &mut lami,
            MatMut::<RowMajor>::from_slice(&mut v, n, n),
            &heap,
        )
        .unwrap();
        check_eigensystem(&a, n, &lami, &v, &report);

        // trace is preserved
        let trace: f64 = (0..n).map(|i| a[i * n + i]).sum();
        assert!((trace - lami.iter().sum::<f64>()).abs() < 1e-12);
        heap.reset();
    }
}

#[test]
fn eigensystem_with_repeated_eigenvalues() {
    // 2·I + e·eᵗ with e = (1, 1, 1, 1): eigenvalues 2, 2, 2, 6
    let n = 4;
    let a: Vec<f64> = (0..n * n)
        .map(|k| if k / n == k % n { 3.0 } else { 1.0 })
        .collect();
    let heap = LocalHeap::with_capacity(64);
    let mut lami = [0.0; 4];
    let mut v = [0.0; 16];
    let report = calc_eigen_system(
        MatRef::from_slice(&a, n, n),
        &mut lami,
        MatMut::<RowMajor>::from_slice(&mut v, n, n),
        &heap,
    )
    .unwrap();
    check_eigensystem(&a, n, &lami, &v, &report);
    for (got, want) in lami.iter().zip([2.0, 2.0, 2.0, 6.0]) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn empty_operands_on_a_nearly_full_heap() {
    let heap = LocalHeap::with_capacity(10);
    let _ = heap.alloc(9).unwrap();

    let report = calc_eigen_system(
        MatRef::from_slice(&[], 0, 0),
        &mut [],
        MatMut::<RowMajor>::from_slice(&mut [], 0, 0),
        &heap,
    )
    .unwrap();
    assert!(report.converged);

    let mut a = [4.0, 2.0, 2.0, 3.0];
    schur_complement_in_place(MatMut::from_slice(&mut a, 2, 2), &[false, false][..], &heap)
        .unwrap();
    assert_eq!(a, [4.0, 2.0, 2.0, 3.0]);

    let mut s: [f64; 0] = [];
    calc_schur_complement(
        MatRef::from_slice(&a, 2, 2),
        MatMut::from_slice(&mut s, 0, 0),
        &BitArray::from_indices(2, &[]),
        &heap,
    )
    .unwrap();
    assert_eq!(heap.used(), 9);
}
