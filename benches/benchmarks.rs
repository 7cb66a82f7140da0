use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use rampshare::{HashedSecretSharing, SecretSharing, ThresholdScheme};

fn secret_size_scaling(c: &mut Criterion) {
    let sss = SecretSharing::default();
    let (n, t) = (10, 5);

    let mut group = c.benchmark_group("split_secret_size");
    for size in [16usize, 64, 256, 1024] {
        let secret = vec![b'X'; size];
        group.bench_with_input(BenchmarkId::from_parameter(size), &secret, |b, secret| {
            b.iter(|| sss.split(black_box(secret), n, t).unwrap())
        });
    }
    group.finish();

    let mut group = c.benchmark_group("reconstruct_secret_size");
    for size in [16usize, 64, 256, 1024] {
        let secret = vec![b'X'; size];
        let shares = sss.split(&secret, n, t).unwrap();
        let subset = &shares[..t];
        group.bench_with_input(BenchmarkId::from_parameter(size), &subset, |b, subset| {
            b.iter(|| sss.reconstruct(black_box(subset)).unwrap())
        });
    }
    group.finish();
}

fn threshold_scaling(c: &mut Criterion) {
    let sss = SecretSharing::default();
    let secret = vec![b'X'; 64];
    let n = 20;

    let mut group = c.benchmark_group("split_threshold");
    for t in [2usize, 5, 10, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(t), &t, |b, &t| {
            b.iter(|| sss.split(black_box(&secret), n, t).unwrap())
        });
    }
    group.finish();

    let mut group = c.benchmark_group("reconstruct_threshold");
    for t in [2usize, 5, 10, 20] {
        let shares = sss.split(&secret, n, t).unwrap();
        let subset = shares[..t].to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(t), &subset, |b, subset| {
            b.iter(|| sss.reconstruct(black_box(subset)).unwrap())
        });
    }
    group.finish();
}

fn share_count_scaling(c: &mut Criterion) {
    let sss = SecretSharing::default();
    let secret = vec![b'X'; 64];
    let t = 5;

    let mut group = c.benchmark_group("split_share_count");
    for n in [5usize, 10, 25, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| sss.split(black_box(&secret), n, t).unwrap())
        });
    }
    group.finish();

    // Reconstruction over the full share set, so the subset size scales
    // with n rather than staying pinned at t.
    let mut group = c.benchmark_group("reconstruct_share_count");
    for n in [5usize, 10, 25, 50] {
        let shares = sss.split(&secret, n, t).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &shares, |b, shares| {
            b.iter(|| sss.reconstruct(black_box(shares)).unwrap())
        });
    }
    group.finish();
}

fn scheme_round_trip<S: ThresholdScheme>(scheme: &S, secret: &[u8], n: usize, t: usize) -> Vec<u8>
where
    S::SplitError: std::fmt::Debug,
    S::ReconstructError: std::fmt::Debug,
{
    let (shares, artifact) = scheme.split_secret(secret, n, t).unwrap();
    scheme.reconstruct_secret(&shares[..t], &artifact).unwrap()
}

fn plain_vs_hashed(c: &mut Criterion) {
    let secret = [b'X'; 8];
    let (n, t) = (10, 5);

    let plain = SecretSharing::default();
    c.bench_function("round_trip_plain", |b| {
        b.iter(|| scheme_round_trip(&plain, black_box(&secret), n, t))
    });

    let hashed = HashedSecretSharing::default();
    c.bench_function("round_trip_hashed", |b| {
        b.iter(|| scheme_round_trip(&hashed, black_box(&secret), n, t))
    });
}

criterion_group!(
    benches,
    secret_size_scaling,
    threshold_scaling,
    share_count_scaling,
    plain_vs_hashed
);
criterion_main!(benches);
