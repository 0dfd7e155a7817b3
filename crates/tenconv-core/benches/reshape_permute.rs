//! Benchmarks for the layout operations used by the im2col convolution path.
//!
//! Reshape is a reinterpretation of a contiguous buffer; permute followed by
//! `to_contiguous` is a full copy. These benchmarks keep that distinction visible.
//!
//! Run with:
//! ```bash
//! cargo bench -p tenconv-core --bench reshape_permute
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tenconv_core::DenseND;

/// Benchmark reshapes between window buffers and im2col matrices
fn bench_reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("reshape");

    let test_cases = vec![
        ("window_to_rows", vec![32, 3, 3, 3], vec![32, 27]),
        ("im2col_4d_to_2d", vec![8, 30, 30, 27], vec![7200, 27]),
        ("gemm_out_to_nhwc", vec![7200, 16], vec![8, 30, 30, 16]),
        ("filter_flatten", vec![64, 32, 3, 3], vec![64, 288]),
    ];

    for (name, from_shape, to_shape) in test_cases {
        let tensor = DenseND::<f64>::ones(&from_shape);
        let total: usize = from_shape.iter().product();
        group.throughput(Throughput::Elements(total as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(&tensor, &to_shape),
            |b, (tensor, to_shape)| {
                b.iter(|| {
                    let reshaped = tensor.reshape(black_box(to_shape)).unwrap();
                    black_box(reshaped);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark channel-last to channel-first permutes, with and without the copy
fn bench_permute(c: &mut Criterion) {
    let mut group = c.benchmark_group("permute");

    for &(n, h, w, k) in [(1, 32, 32, 16), (8, 30, 30, 16), (16, 56, 56, 64)].iter() {
        let nhwc = DenseND::<f64>::ones(&[n, h, w, k]);
        let total = n * h * w * k;
        group.throughput(Throughput::Elements(total as u64));
        let label = format!("{}x{}x{}x{}", n, h, w, k);

        group.bench_with_input(BenchmarkId::new("strided", &label), &nhwc, |b, t| {
            b.iter(|| black_box(t.permute(black_box(&[0, 3, 1, 2])).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("contiguous", &label), &nhwc, |b, t| {
            b.iter(|| {
                black_box(
                    t.permute(black_box(&[0, 3, 1, 2]))
                        .unwrap()
                        .to_contiguous(),
                )
            });
        });
    }

    group.finish();
}

/// Benchmark the GEMM primitive at im2col-like aspect ratios
fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");

    for &(rows, inner, cols) in [(900, 27, 16), (7200, 27, 16), (3136, 576, 64)].iter() {
        let a = DenseND::<f64>::from_shape_fn(&[rows, inner], |idx| (idx[0] + idx[1]) as f64);
        let b = DenseND::<f64>::from_shape_fn(&[inner, cols], |idx| (idx[0] * idx[1]) as f64);
        group.throughput(Throughput::Elements((rows * inner * cols) as u64));

        group.bench_function(format!("{}x{}x{}", rows, inner, cols), |bencher| {
            bencher.iter(|| black_box(a.matmul(black_box(&b)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reshape, bench_permute, bench_matmul);
criterion_main!(benches);
