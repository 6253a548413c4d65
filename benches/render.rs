#[macro_use]
extern crate criterion;
extern crate flame;

use criterion::Criterion;
use flame::{AffineMatrix, FlameConfig, Renderer, Variation};

fn config(threads: usize) -> FlameConfig {
    FlameConfig::new(320, 240, Variation::Fisheye, AffineMatrix::preset(1).unwrap())
        .points(2_000)
        .iterations(50)
        .symmetry(2)
        .threads(threads)
        .seed(1)
}

fn single_thread(c: &mut Criterion) {
    let renderer = Renderer::new(config(1)).unwrap();
    c.bench_function("fisheye 320x240 one thread", move |b| b.iter(|| renderer.render().unwrap()));
}

fn four_threads(c: &mut Criterion) {
    let renderer = Renderer::new(config(4)).unwrap();
    c.bench_function("fisheye 320x240 four threads", move |b| b.iter(|| renderer.render().unwrap()));
}

criterion_group!(benches, single_thread, four_threads);
criterion_main!(benches);
