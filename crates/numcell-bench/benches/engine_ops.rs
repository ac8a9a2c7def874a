//! Criterion micro-benchmarks for the arithmetic engine.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use numcell_bench::{operand_pair, OPERAND_SIZES};
use numcell_int::BigInt;

fn bench_add_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/add_mul");
    for digits in OPERAND_SIZES {
        let (a, b) = operand_pair(1, digits);
        group.bench_with_input(BenchmarkId::new("add", digits), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a) + black_box(*b));
        });
        group.bench_with_input(BenchmarkId::new("mul", digits), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a) * black_box(*b));
        });
        let pow2 = BigInt::one() << 1000;
        group.bench_with_input(BenchmarkId::new("mul_pow2", digits), &(&a, &pow2), |bench, (a, p)| {
            bench.iter(|| black_box(*a) * black_box(*p));
        });
    }
    group.finish();
}

fn bench_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/division");
    for digits in OPERAND_SIZES {
        let (a, b) = operand_pair(2, digits);
        group.bench_with_input(BenchmarkId::new("div_rem", digits), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a).div_rem(black_box(*b)));
        });
        group.bench_with_input(BenchmarkId::new("div_rem_digit", digits), &a, |bench, a| {
            bench.iter(|| black_box(a).div_rem(&black_box(1_000_000_007u64)));
        });
        group.bench_with_input(BenchmarkId::new("gcd", digits), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a).gcd(black_box(*b)));
        });
    }
    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/text");
    for digits in OPERAND_SIZES {
        let (a, _) = operand_pair(3, digits);
        let decimal = a.to_string();
        group.bench_with_input(BenchmarkId::new("to_string", digits), &a, |bench, a| {
            bench.iter(|| black_box(a).to_string_radix(10, 0));
        });
        group.bench_with_input(BenchmarkId::new("parse", digits), &decimal, |bench, s| {
            bench.iter(|| black_box(s.as_str()).parse::<BigInt>());
        });
    }
    group.finish();
}

fn bench_increment(c: &mut Criterion) {
    c.bench_function("engine/increment_exclusive", |bench| {
        let mut v = BigInt::from(u64::MAX - 1);
        bench.iter(|| {
            v.increment().unwrap();
            black_box(&v);
        });
    });
}

criterion_group!(
    benches,
    bench_add_mul,
    bench_division,
    bench_text,
    bench_increment
);
criterion_main!(benches);
