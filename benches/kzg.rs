use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kzg_pcs::{commit, prove, setup, verify, Polynomial, F};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_setup(c: &mut Criterion) {
    let mut group = c.benchmark_group("kzg_setup");
    for &log_size in &[6usize, 10] {
        group.bench_function(BenchmarkId::from_parameter(log_size), |b| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| setup((1 << log_size) - 1, &mut rng).unwrap());
        });
    }
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("kzg_commit");
    let rng = &mut StdRng::seed_from_u64(2);
    for &log_size in &[6usize, 10] {
        let degree = (1 << log_size) - 1;
        let (pp, _) = setup(degree, rng).unwrap();
        let f = Polynomial::random(degree, rng);
        group.bench_function(BenchmarkId::from_parameter(log_size), |b| {
            b.iter(|| commit(&pp, f.coefficients()).unwrap());
        });
    }
    group.finish();
}

fn bench_prove(c: &mut Criterion) {
    let mut group = c.benchmark_group("kzg_prove");
    let rng = &mut StdRng::seed_from_u64(3);
    for &log_size in &[6usize, 10] {
        let degree = (1 << log_size) - 1;
        let (pp, _) = setup(degree, rng).unwrap();
        let f = Polynomial::random(degree, rng);
        let u = F::from(12345u64);
        group.bench_function(BenchmarkId::from_parameter(log_size), |b| {
            b.iter(|| prove(&pp, f.coefficients(), u).unwrap());
        });
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let rng = &mut StdRng::seed_from_u64(4);
    let (pp, vk) = setup(63, rng).unwrap();
    let f = Polynomial::random(63, rng);
    let u = F::from(7u64);
    let com_f = commit(&pp, f.coefficients()).unwrap();
    let com_q = prove(&pp, f.coefficients(), u).unwrap();
    let v = f.evaluate(u);

    c.bench_function("kzg_verify", |b| {
        b.iter(|| assert!(verify(&com_f, &com_q, u, v, &vk)));
    });
}

criterion_group!(benches, bench_setup, bench_commit, bench_prove, bench_verify);
criterion_main!(benches);
