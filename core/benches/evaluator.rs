//! Benchmarks for the Paxl evaluator.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. eval_only: pure evaluation of pre-parsed programs
//! 2. full_pipeline: parse + eval together (for comparison)
//! 3. block_calls: recursion through `this` and loops calling blocks

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use paxl_core::{
    Scope,
    evaluator::{Evaluator, EvaluatorOptions},
    parser,
};

/// Generate an arithmetic expression like "1 + 1 + 1 + ... + 1" with `n` additions.
fn generate_arithmetic_chain(n: usize) -> String {
    let mut expr = String::from("1");
    for _ in 0..n {
        expr.push_str(" + 1");
    }
    expr
}

fn bench_eval_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_only");

    for size in [100, 200, 400, 800] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let source = generate_arithmetic_chain(size);
            let program = parser::parse(&source).expect("Parse failed");

            b.iter(|| {
                let scope = Scope::new();
                let mut evaluator = Evaluator::new(EvaluatorOptions::default());
                black_box(evaluator.evaluate(black_box(&program), &scope)).expect("Eval failed")
            });
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for size in [100, 200, 400, 800] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let source = generate_arithmetic_chain(size);

            b.iter(|| {
                let program = parser::parse(black_box(&source)).expect("Parse failed");
                let mut evaluator = Evaluator::new(EvaluatorOptions::default());
                black_box(evaluator.evaluate(&program, &Scope::new())).expect("Eval failed")
            });
        });
    }

    group.finish();
}

fn bench_block_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_calls");

    let factorial = parser::parse(
        "factorial = { |x| if (x == 0) { 1 } else { x * (this(x - 1)) } }; factorial(20)",
    )
    .expect("Parse failed");
    group.bench_function("factorial_20", |b| {
        b.iter(|| {
            let mut evaluator = Evaluator::new(EvaluatorOptions::default());
            black_box(evaluator.evaluate(&factorial, &Scope::new())).expect("Eval failed")
        });
    });

    let sum_loop = parser::parse(
        "add = { |a, b| a + b }; s = 0; for (i = 0; i < 1000; i = i + 1) { s = add(s; i) }; s",
    )
    .expect("Parse failed");
    group.bench_function("loop_1000_calls", |b| {
        b.iter(|| {
            let mut evaluator = Evaluator::new(EvaluatorOptions::default());
            black_box(evaluator.evaluate(&sum_loop, &Scope::new())).expect("Eval failed")
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_eval_only,
    bench_full_pipeline,
    bench_block_calls
);
criterion_main!(benches);
