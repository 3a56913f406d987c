// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use imgswitch_gesture::{GestureTracker, SegmentRow};
use imgswitch_select::{Direction, Intent, SelectionController};
use imgswitch_source::{ColorScheme, Configuration, Environment, ImageOption, Source, resolve};
use kurbo::{Point, Rect};

fn gen_options(n: usize) -> Configuration {
    let options = (0..n)
        .map(|i| {
            ImageOption::new(format!("Option {i}"), format!("img/{i}.svg"))
                .with_source(
                    Source::new(format!("img/{i}.avif 1x, img/{i}@2x.avif 2x"))
                        .with_type("image/avif"),
                )
                .with_source(
                    Source::new(format!("img/{i}-dark.svg"))
                        .with_media("screen and (prefers-color-scheme: dark)"),
                )
        })
        .collect();
    Configuration::new(options)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let config = gen_options(64);
    group.throughput(Throughput::Elements(config.len() as u64));
    let cases = [
        ("dark", Environment::new(ColorScheme::Dark)),
        (
            "avif_2x",
            Environment::new(ColorScheme::Light)
                .with_pixel_ratio(2.0)
                .with_supported_types(["image/avif"]),
        ),
        (
            "fallback",
            Environment::new(ColorScheme::Light).with_supported_types(["image/png"]),
        ),
    ];
    for (name, env) in &cases {
        group.bench_function(*name, |b| {
            b.iter(|| {
                for option in &config {
                    let _ = black_box(resolve(option, env));
                }
            })
        });
    }
    group.finish();
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_path(len: usize, width: f64, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..len)
        .map(|_| Point::new(rng.next_f64() * width * 1.2 - width * 0.1, 20.0))
        .collect()
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture");
    for &segments in &[4usize, 16, 64] {
        let row = SegmentRow::new(Rect::new(0.0, 0.0, 375.0, 40.0), segments);
        let path = gen_path(256, 375.0, 0x5eed + segments as u64);
        group.throughput(Throughput::Elements(path.len() as u64));
        group.bench_function(format!("drag_n{segments}"), |b| {
            b.iter_batched(
                GestureTracker::new,
                |mut tracker| {
                    tracker.touch_start(row, &path[..1]);
                    for pt in &path[1..] {
                        black_box(tracker.touch_move(core::slice::from_ref(pt)));
                    }
                    black_box(tracker.touch_end(&[]))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    let mut rng = Rng::new(42);
    let intents: Vec<Intent> = (0..1024)
        .map(|_| match rng.next_u64() % 5 {
            0 => Intent::Move(Direction::Previous),
            1 => Intent::Move(Direction::Next),
            2 => Intent::First,
            3 => Intent::Last,
            _ => Intent::Select((rng.next_u64() % 10) as usize),
        })
        .collect();
    group.throughput(Throughput::Elements(intents.len() as u64));
    group.bench_function("apply_mixed", |b| {
        b.iter_batched(
            || SelectionController::with_count(8),
            |mut controller| {
                for intent in &intents {
                    black_box(controller.apply(*intent));
                }
                controller
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_gesture, bench_selection);
criterion_main!(benches);
