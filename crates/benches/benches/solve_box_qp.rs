use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use quadra_api::{Scalar, Settings, Workspace};
use quadra_benches::random_box_qp;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn solve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("admm_box_qp");
    let mut rng = SmallRng::seed_from_u64(42);
    for (n, m) in [(20, 30), (50, 75)] {
        group.bench_function(format!("n={n}_m={m}"), |b| {
            b.iter_batched(
                || random_box_qp(n, m, &mut rng),
                |data| {
                    let settings = Settings::<Scalar>::default();
                    let mut workspace = Workspace::setup(&data, &settings).unwrap();
                    let _ = workspace.solve();
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, solve_benchmark);
criterion_main!(benches);
