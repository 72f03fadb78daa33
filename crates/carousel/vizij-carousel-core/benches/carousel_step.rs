//! Benchmarks for per-frame carousel updates and geometry recompute.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use vizij_carousel_core::{Carousel, FixedLayout, GeometrySnapshot, InputEvent, Inputs, Settings};

fn layout(slides: usize) -> FixedLayout {
    let widths = (0..slides).map(|i| 200.0 + (i % 7) as f64 * 40.0).collect();
    FixedLayout::new(960.0, widths, 16.0)
}

fn mounted(slides: usize) -> Carousel {
    let settings = Settings {
        autoplay: true,
        autoplay_speed_ms: 1000,
        r#loop: true,
        ..Settings::default()
    };
    let mut c = Carousel::new(settings, layout(slides));
    c.mount();
    c
}

fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");
    for slides in [8usize, 64, 512] {
        let l = layout(slides);
        group.bench_with_input(BenchmarkId::from_parameter(slides), &l, |b, l| {
            b.iter(|| GeometrySnapshot::measure(black_box(l)))
        });
    }
    group.finish();
}

fn bench_idle_frame(c: &mut Criterion) {
    let mut carousel = mounted(64);
    c.bench_function("idle_frame_16ms", |b| {
        b.iter(|| {
            let out = carousel.update(black_box(16.0), Inputs::default());
            black_box(out.changes.len());
        })
    });
}

fn bench_drag(c: &mut Criterion) {
    c.bench_function("drag_60_moves", |b| {
        b.iter_batched(
            || mounted(64),
            |mut carousel| {
                let mut events = Vec::with_capacity(62);
                events.push(InputEvent::PointerDown { x: 800.0 });
                for i in 0..60 {
                    events.push(InputEvent::PointerMove {
                        x: 800.0 - i as f64 * 5.0,
                    });
                }
                events.push(InputEvent::PointerUp);
                let out = carousel.update(16.0, Inputs::new(events));
                black_box(out.changes.len());
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_measure, bench_idle_frame, bench_drag);
criterion_main!(benches);
