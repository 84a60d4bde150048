use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fixed_engine::{Fixed, Q16_16, Q64_64, Rounding, Saturating};
use std::hint::black_box;

fn bench_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul");
    let roundings = [Rounding::TowardZero, Rounding::Up, Rounding::Down];

    let a = Q16_16::from_f64(3.25).unwrap();
    let b = Q16_16::from_f64(-2.75).unwrap();
    for rounding in roundings {
        group.bench_with_input(BenchmarkId::new("q16_16", format!("{rounding:?}")), &rounding, |bench, &rounding| {
            bench.iter(|| black_box(black_box(a).mul_with::<Saturating>(black_box(b), rounding)));
        });
    }

    let a = Q64_64::from_f64(3.25).unwrap();
    let b = Q64_64::from_f64(-2.75).unwrap();
    for rounding in roundings {
        group.bench_with_input(BenchmarkId::new("q64_64", format!("{rounding:?}")), &rounding, |bench, &rounding| {
            bench.iter(|| black_box(black_box(a).mul_with::<Saturating>(black_box(b), rounding)));
        });
    }

    group.finish();
}

fn bench_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("div");

    let a = Q16_16::from_int(1).unwrap();
    let b = Q16_16::from_int(3).unwrap();
    group.bench_function("q16_16", |bench| {
        bench.iter(|| black_box(black_box(a).div_with::<Saturating>(black_box(b), Rounding::Up)));
    });

    let a = Q64_64::from_int(1).unwrap();
    let b = Q64_64::from_int(3).unwrap();
    group.bench_function("q64_64", |bench| {
        bench.iter(|| black_box(black_box(a).div_with::<Saturating>(black_box(b), Rounding::Up)));
    });

    group.finish();
}

fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let value = Q16_16::from_f64(-1234.5678).unwrap();

    group.bench_function("from_f64", |bench| {
        bench.iter(|| black_box(Q16_16::from_f64(black_box(-1234.5678))));
    });
    group.bench_function("to_f64", |bench| {
        bench.iter(|| black_box(black_box(value).to_f64()));
    });
    group.bench_function("cast_q16_16_to_q8_24", |bench| {
        bench.iter(|| black_box(black_box(value).cast_with::<Saturating, i32, 8, 24>()));
    });
    group.bench_function("compare_cross_format", |bench| {
        let other = Fixed::<i64, 40, 24>::from_f64(-1234.5).unwrap();
        bench.iter(|| black_box(black_box(value) < black_box(other)));
    });

    group.finish();
}

criterion_group!(arithmetic, bench_multiplication, bench_division, bench_conversions);
criterion_main!(arithmetic);
