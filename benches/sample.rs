#![feature(test)]
extern crate test;
use test::Bencher;

use diskspline::{BasisTable, ControlDisk, DiskSpline, NullSink, SampleOpts, SplineConfig};

fn wave(count: usize) -> Vec<ControlDisk> {
    (0..count)
        .map(|i| {
            let x = i as f64 * 25.0;
            ControlDisk::from_xyr(x, 40.0 * (x * 0.05).sin(), 2.0 + (i % 3) as f64)
        })
        .collect()
}

#[bench]
fn bench_basis_table(b: &mut Bencher) {
    let spline = DiskSpline::with_sink(wave(32), SplineConfig::default(), NullSink);
    let knots = spline.knots().unwrap();
    b.iter(|| BasisTable::eval(knots, test::black_box(12.345)))
}

#[bench]
fn bench_evaluate(b: &mut Bencher) {
    let spline = DiskSpline::with_sink(wave(32), SplineConfig::default(), NullSink);
    b.iter(|| spline.evaluate_at(test::black_box(12.345)))
}

#[bench]
fn bench_sample(b: &mut Bencher) {
    let spline = DiskSpline::with_sink(wave(32), SplineConfig::default(), NullSink);
    b.iter(|| spline.sample(test::black_box(100), 500))
}

#[bench]
fn bench_outline_closed(b: &mut Bencher) {
    let spline = DiskSpline::with_sink(
        wave(16),
        SplineConfig::default().with_closed(true),
        NullSink,
    );
    b.iter(|| spline.outline(test::black_box(&SampleOpts::default())))
}
