//! Calculator and encoder benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ohm_lab::config::ChartParameters;
use ohm_lab::export::{encode_table, render_chart, Viewport};
use ohm_lab::{total_resistance, Experiment, ResistancePair, Topology};

/// 100-point sweep from 0.5 V to 50 V
fn sweep() -> Experiment {
    let mut exp = Experiment::new(Topology::Parallel);
    exp.set_resistances(ResistancePair::new(47.0, 22.0)).unwrap();
    for i in 1..=100 {
        exp.commit(i as f64 * 0.5).unwrap();
    }
    exp
}

fn bench_total_resistance(c: &mut Criterion) {
    c.bench_function("total_resistance_parallel", |b| {
        b.iter(|| total_resistance(black_box(Topology::Parallel), black_box(47.0), black_box(22.0)))
    });
}

fn bench_encode_table(c: &mut Criterion) {
    let snapshot = sweep().snapshot();

    c.bench_function("encode_table_100", |b| b.iter(|| encode_table(black_box(&snapshot))));
}

fn bench_render_chart(c: &mut Criterion) {
    let exp = sweep();
    let style = ChartParameters::default();
    let viewport = Viewport {
        width_px: style.width_px,
        height_px: style.height_px,
    };

    c.bench_function("render_chart_100", |b| {
        b.iter(|| render_chart(black_box(exp.series().all()), viewport, &style))
    });
}

criterion_group!(benches, bench_total_resistance, bench_encode_table, bench_render_chart);
criterion_main!(benches);
