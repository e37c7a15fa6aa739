//! Evaluation Benchmarks
//!
//! Measures single-scenario evaluation, multi-scenario comparison and
//! report rendering. Evaluation is a pure function over a handful of
//! floating-point lines, so regressions here usually mean allocation
//! crept into the hot path.
//!
//! Run with: cargo bench --bench evaluation_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pnlsim::prelude::*;
use pnlsim::report::export::render_workbook;

fn scenarios(n: usize) -> Vec<ScenarioInput> {
    let plan = catalog().default_values();
    (0..n)
        .map(|i| {
            let scale = 1.0 + i as f64 * 0.05;
            let values = VariableId::ALL.iter().fold(VarValues::new(), |acc, &id| {
                acc.with(id, contribution_of(&plan, id) * scale)
            });
            ScenarioInput::new(format!("scenario-{i}"), values)
        })
        .collect()
}

/// Single evaluation of the default plan.
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    group.sample_size(100);
    group.confidence_level(0.95);

    let plan = catalog().default_values();
    let params = GlobalParams::new();
    group.bench_function("default_plan", |b| {
        b.iter(|| black_box(evaluate(black_box(&plan), &params)));
    });

    let zero = VarValues::new();
    group.bench_function("empty_input", |b| {
        b.iter(|| black_box(evaluate(black_box(&zero), &params)));
    });

    group.finish();
}

/// Comparison over a growing number of scenarios.
fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    group.sample_size(100);
    group.confidence_level(0.95);

    let params = GlobalParams::new();
    for n in [1_usize, 5, 25].iter() {
        let inputs = scenarios(*n);
        group.bench_with_input(BenchmarkId::new("scenarios", n), &inputs, |b, inputs| {
            b.iter(|| black_box(compare(black_box(inputs), &params)));
        });
    }

    group.finish();
}

/// Report construction and workbook rendering.
fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    group.sample_size(20);

    let results = compare(&scenarios(5), &GlobalParams::new()).unwrap_or_default();
    group.bench_function("build_report", |b| {
        b.iter(|| black_box(build_report(black_box(&results))));
    });

    let report = build_report(&results);
    group.bench_function("render_workbook", |b| {
        b.iter(|| black_box(render_workbook(black_box(&report))));
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_compare, bench_report);
criterion_main!(benches);
