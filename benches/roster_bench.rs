use criterion::{black_box, criterion_group, criterion_main, Criterion};

use u_roster::roster::{RosterBuilder, RosterConfig};
use u_roster::solver::{SearchSolver, Solve, SolverConfig};

fn bench_build_default(c: &mut Criterion) {
    c.bench_function("build_default_model", |b| {
        b.iter(|| {
            let builder = RosterBuilder::new(black_box(RosterConfig::default())).unwrap();
            black_box(builder.build())
        })
    });
}

fn bench_solve_small(c: &mut Criterion) {
    let roster = RosterBuilder::new(RosterConfig::small()).unwrap().build();
    let config = SolverConfig::default();
    c.bench_function("solve_small_feasibility", |b| {
        b.iter(|| black_box(SearchSolver::new().solve(&roster.model, &config)))
    });
}

fn bench_minimize_small(c: &mut Criterion) {
    let roster = RosterBuilder::new(RosterConfig::small())
        .unwrap()
        .build()
        .with_objective();
    let config = SolverConfig::default();
    c.bench_function("minimize_small_workload", |b| {
        b.iter(|| black_box(SearchSolver::new().solve(&roster.model, &config)))
    });
}

criterion_group!(
    benches,
    bench_build_default,
    bench_solve_small,
    bench_minimize_small
);
criterion_main!(benches);
