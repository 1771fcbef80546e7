use stripchart_core::{
    ChartOptions, Color, RecordingSurface, SeriesOptions, SharedSeries, StreamingChart,
    TimeSeriesOptions,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn build_chart(series_count: usize, samples: i64) -> (StreamingChart, Vec<SharedSeries>) {
    let mut chart = StreamingChart::new(ChartOptions::default());
    let mut handles = Vec::with_capacity(series_count);
    for k in 0..series_count {
        let s = SharedSeries::new(TimeSeriesOptions::default());
        for t in 0..samples {
            s.append(t * 20, (t as f64 * 0.01 + k as f64).sin() * 10.0);
        }
        chart.add_series(
            &s,
            SeriesOptions { fill_style: Some(Color::from_argb(96, 0, 255, 0)), ..Default::default() },
        );
        handles.push(s);
    }
    (chart, handles)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_recording");
    for &n in &[1_000i64, 10_000i64] {
        group.bench_with_input(BenchmarkId::new("series_x4", n), &n, |b, &n| {
            // 800 px at 20 ms/px shows 800 samples; older ones are evicted on the first frame.
            let (chart, _series) = build_chart(4, n);
            let now = n * 20;
            let mut surface = RecordingSurface::new(800, 300);
            b.iter(|| {
                surface.clear();
                chart.render(&mut surface, black_box(now));
                black_box(surface.ops().len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
