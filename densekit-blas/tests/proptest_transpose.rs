//! Property tests for the storage-order reduction of `gemm`.
//!
//! - `(A·B)ᵗ = Bᵗ·Aᵗ` whichever order the operands and destination use
//! - a column-major destination holds the same numbers as the transposed
//!   row-major one
//! - `AddTo` followed by `SubFrom` of the same product restores `C`

use proptest::prelude::*;

use densekit_blas::{gemm, init, AddTo, Assign, SubFrom};
use densekit_core::{ColMajor, MatMut, MatRef, RowMajor};

fn close(x: f64, y: f64) -> bool {
    (x - y).abs() <= 1e-12 * (1.0 + x.abs().max(y.abs()))
}

/// `(m, k, n, A, B)` with `A` m x k and `B` k x n, both row-major. Sizes
/// straddle the dispatch table boundaries.
fn arb_product() -> impl Strategy<Value = (usize, usize, usize, Vec<f64>, Vec<f64>)> {
    (0usize..20, 0usize..30, 0usize..20).prop_flat_map(|(m, k, n)| {
        (
            Just(m),
            Just(k),
            Just(n),
            proptest::collection::vec(-10.0f64..10.0, m * k),
            proptest::collection::vec(-10.0f64..10.0, k * n),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_product_transpose_law((m, k, n, a, b) in arb_product()) {
        init();
        let av = MatRef::<RowMajor>::from_slice(&a, m, k);
        let bv = MatRef::<RowMajor>::from_slice(&b, k, n);

        let mut c = vec![0.0; m * n];
        gemm::<Assign, _, _, _>(av, bv, MatMut::<RowMajor>::from_slice(&mut c, m, n));

        // Bᵗ·Aᵗ through column-major views of the same buffers.
        let mut d = vec![0.0; n * m];
        gemm::<Assign, _, _, _>(
            bv.trans(),
            av.trans(),
            MatMut::<RowMajor>::from_slice(&mut d, n, m),
        );

        for i in 0..m {
            for j in 0..n {
                let (x, y) = (c[i * n + j], d[j * m + i]);
                prop_assert!(close(x, y), "C[{},{}] = {} but (BᵗAᵗ)[{},{}] = {}", i, j, x, j, i, y);
            }
        }
    }

    #[test]
    fn prop_col_major_destination((m, k, n, a, b) in arb_product()) {
        init();
        let av = MatRef::<RowMajor>::from_slice(&a, m, k);
        let bv = MatRef::<RowMajor>::from_slice(&b, k, n);

        let mut c = vec![0.0; m * n];
        gemm::<Assign, _, _, _>(av, bv, MatMut::<RowMajor>::from_slice(&mut c, m, n));

        let mut cc = vec![0.0; m * n];
        gemm::<Assign, _, _, _>(av, bv, MatMut::<ColMajor>::from_slice(&mut cc, m, n));

        for i in 0..m {
            for j in 0..n {
                prop_assert!(close(c[i * n + j], cc[j * m + i]));
            }
        }
    }

    #[test]
    fn prop_add_then_sub_restores(
        (m, k, n, a, b) in arb_product(),
        seed in -5.0f64..5.0,
    ) {
        init();
        let av = MatRef::<RowMajor>::from_slice(&a, m, k);
        let bv = MatRef::<RowMajor>::from_slice(&b, k, n);
        let c0: Vec<f64> = (0..m * n).map(|i| seed + i as f64).collect();

        let mut c = c0.clone();
        gemm::<AddTo, _, _, _>(av, bv, MatMut::<ColMajor>::from_slice(&mut c, n, m).trans());
        gemm::<SubFrom, _, _, _>(av, bv, MatMut::<ColMajor>::from_slice(&mut c, n, m).trans());

        // Cancellation error scales with the size of the product entries.
        let bound = 1e-12 * (k as f64 + 1.0) * 100.0;
        for (x, y) in c.iter().zip(&c0) {
            prop_assert!((x - y).abs() <= bound * (1.0 + y.abs()));
        }
    }
}
