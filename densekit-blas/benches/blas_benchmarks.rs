use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use densekit_blas::{add_vector, gemm, init, mult_add_mat_vec, mult_mat_mat, AddTo, SubFrom};
use densekit_core::{ColMajor, MatMut, MatRef, RowMajor};

fn bench_add_vector(c: &mut Criterion) {
    init();
    let mut group = c.benchmark_group("add_vector");
    for &n in &[3, 8, 15, 16, 64, 1024] {
        let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.001).collect();
        let mut y: Vec<f64> = (0..n).map(|i| i as f64 * 0.002).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_n| {
            b.iter(|| add_vector(black_box(0.5), &x, &mut y));
        });
    }
    group.finish();
}

fn bench_mat_vec(c: &mut Criterion) {
    init();
    let mut group = c.benchmark_group("mult_add_mat_vec");
    // contraction lengths inside and past the table
    for &k in &[4, 12, 24, 40] {
        let m = 12;
        let a: Vec<f64> = (0..m * k).map(|i| (i as f64 * 0.001).sin()).collect();
        let x: Vec<f64> = (0..k).map(|i| (i as f64 * 0.002).cos()).collect();
        let mut y = vec![0.0; m];
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            let av = MatRef::<RowMajor>::from_slice(&a, m, k);
            b.iter(|| mult_add_mat_vec(1.0, av, &x, &mut y));
        });
    }
    group.finish();
}

fn bench_mat_mat(c: &mut Criterion) {
    init();
    let mut group = c.benchmark_group("mult_mat_mat");
    for &n in &[4, 8, 13, 32, 64] {
        let a: Vec<f64> = (0..n * n).map(|i| (i as f64 * 0.001).sin()).collect();
        let b: Vec<f64> = (0..n * n).map(|i| (i as f64 * 0.002).cos()).collect();
        let mut c_mat = vec![0.0; n * n];
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            bench.iter(|| {
                mult_mat_mat(
                    MatRef::from_slice(&a, n, n),
                    MatRef::from_slice(&b, n, n),
                    MatMut::from_slice(&mut c_mat, n, n),
                );
            });
        });
    }
    group.finish();
}

fn bench_gemm_orders(c: &mut Criterion) {
    init();
    let mut group = c.benchmark_group("gemm_orders");
    let n = 24;
    let a: Vec<f64> = (0..n * n).map(|i| (i as f64 * 0.001).sin()).collect();
    let b: Vec<f64> = (0..n * n).map(|i| (i as f64 * 0.002).cos()).collect();
    let mut c_mat = vec![0.0; n * n];

    group.bench_function("row_row_into_row", |bench| {
        bench.iter(|| {
            gemm::<AddTo, _, _, _>(
                MatRef::<RowMajor>::from_slice(&a, n, n),
                MatRef::<RowMajor>::from_slice(&b, n, n),
                MatMut::<RowMajor>::from_slice(&mut c_mat, n, n),
            );
        });
    });
    group.bench_function("col_row_into_col", |bench| {
        bench.iter(|| {
            gemm::<SubFrom, _, _, _>(
                MatRef::<ColMajor>::from_slice(&a, n, n),
                MatRef::<RowMajor>::from_slice(&b, n, n),
                MatMut::<ColMajor>::from_slice(&mut c_mat, n, n),
            );
        });
    });
    group.finish();
}

criterion_group!(benches, bench_add_vector, bench_mat_vec, bench_mat_mat, bench_gemm_orders);
criterion_main!(benches);
