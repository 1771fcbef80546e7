// File: crates/stripchart-core/tests/render.rs
// Purpose: Per-frame render pipeline against a recording surface.

use stripchart_core::{
    ChartOptions, Color, DrawOp, DrawSurface, PathCmd, Point, RecordingSurface, Rect,
    SeriesOptions, SharedSeries, StreamingChart, TimeSeriesOptions,
};

fn series_with(samples: &[(i64, f64)]) -> SharedSeries {
    let s = SharedSeries::new(TimeSeriesOptions::default());
    for &(t, v) in samples {
        s.append(t, v);
    }
    s
}

fn chart_with(series: &SharedSeries, draw: SeriesOptions) -> StreamingChart {
    let mut chart = StreamingChart::new(ChartOptions::default());
    chart.add_series(series, draw);
    chart
}

#[test]
fn peak_sample_is_topmost() {
    let s = series_with(&[(0, 0.0), (500, 10.0), (1000, 0.0)]);
    let chart = chart_with(&s, SeriesOptions::default());
    let scale = chart.value_bounds().expect("scale");
    assert_eq!((scale.max, scale.min), (10.0, 0.0));

    let mut surface = RecordingSurface::new(100, 100);
    chart.render(&mut surface, 1000);

    let (path, _) = surface.stroked_paths().last().expect("curve stroked");
    let pts: Vec<Point> = path.vertices().collect();
    assert_eq!(pts, vec![Point::new(50.0, 99.0), Point::new(75.0, 1.0), Point::new(100.0, 99.0)]);
    let mid = pts[1].y;
    assert!(pts.iter().all(|p| p.y >= mid));
}

#[test]
fn segments_use_horizontal_tangent_controls() {
    let s = series_with(&[(0, 0.0), (500, 10.0), (1000, 0.0)]);
    let chart = chart_with(&s, SeriesOptions::default());
    let mut surface = RecordingSurface::new(100, 100);
    chart.render(&mut surface, 1000);

    let (path, _) = surface.stroked_paths().last().unwrap();
    let cmds = path.commands();
    assert_eq!(cmds[0], PathCmd::MoveTo(Point::new(50.0, 99.0)));
    assert_eq!(
        cmds[1],
        PathCmd::CubicTo(Point::new(62.5, 99.0), Point::new(62.5, 1.0), Point::new(75.0, 1.0))
    );
    assert_eq!(
        cmds[2],
        PathCmd::CubicTo(Point::new(87.5, 1.0), Point::new(87.5, 99.0), Point::new(100.0, 99.0))
    );
}

#[test]
fn window_edges_map_to_surface_edges() {
    // mpp 20, width 272, render time 100000: left edge 94560.
    let s = series_with(&[(94_560, 1.0), (100_000, 2.0)]);
    let chart = chart_with(&s, SeriesOptions::default());
    let mut surface = RecordingSurface::new(272, 50);
    chart.render(&mut surface, 100_000);

    let (path, _) = surface.stroked_paths().last().unwrap();
    let xs: Vec<f32> = path.vertices().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 272.0]);
}

#[test]
fn render_time_is_quantized_to_pixels() {
    let s = series_with(&[(99_000, 1.0), (100_000, 2.0)]);
    let chart = chart_with(&s, SeriesOptions::default());
    let mut a = RecordingSurface::new(272, 50);
    let mut b = RecordingSurface::new(272, 50);
    chart.render(&mut a, 100_000);
    chart.render(&mut b, 100_019);
    assert_eq!(a.ops(), b.ops());
}

#[test]
fn flat_signal_renders_on_fixed_row() {
    let s = series_with(&[(0, 5.0), (100, 5.0), (200, 5.0)]);
    let chart = chart_with(&s, SeriesOptions::default());
    let mut surface = RecordingSurface::new(100, 40);
    chart.render(&mut surface, 200);

    let (path, _) = surface.stroked_paths().last().unwrap();
    let ys: Vec<f32> = path.vertices().map(|p| p.y).collect();
    assert_eq!(ys.len(), 3);
    assert!(ys.iter().all(|&y| y == ys[0] && y.is_finite()));
}

#[test]
fn empty_chart_draws_background_and_grid_only() {
    let empty = SharedSeries::new(TimeSeriesOptions::default());
    let chart = chart_with(&empty, SeriesOptions::default());
    let mut surface = RecordingSurface::new(200, 100);
    chart.render(&mut surface, 10_000);

    let ops = surface.ops();
    assert_eq!(ops.first(), Some(&DrawOp::Save));
    assert_eq!(ops.get(1), Some(&DrawOp::Clip(Rect::from_ltwh(0.0, 0.0, 200.0, 100.0))));
    assert_eq!(
        ops.get(2),
        Some(&DrawOp::FillRect(Rect::from_ltwh(0.0, 0.0, 200.0, 100.0), Color::BLACK))
    );
    assert_eq!(ops.last(), Some(&DrawOp::Restore));
    assert_eq!(surface.texts().count(), 0);
    // Only the grid path is stroked.
    assert_eq!(surface.stroked_paths().count(), 1);

    let no_series = StreamingChart::new(ChartOptions::default());
    let mut surface = RecordingSurface::new(200, 100);
    no_series.render(&mut surface, 10_000);
    assert!(no_series.value_bounds().is_none());
    assert_eq!(surface.texts().count(), 0);
}

#[test]
fn grid_lines_follow_time_and_sections() {
    let mut options = ChartOptions::default();
    options.grid.vertical_sections = 4;
    let chart = StreamingChart::new(options);
    let mut surface = RecordingSurface::new(272, 100);
    chart.render(&mut surface, 100_000);

    let (grid, stroke) = surface.stroked_paths().next().expect("grid");
    assert_eq!(stroke.color, Color::GRAY);
    let xs: Vec<f32> = grid
        .commands()
        .iter()
        .filter_map(|c| match c {
            PathCmd::MoveTo(p) if p.y == 0.0 => Some(p.x),
            _ => None,
        })
        .collect();
    // Lines every 1000 ms = 50 px, newest at the right edge.
    assert_eq!(xs, vec![272.0, 222.0, 172.0, 122.0, 72.0, 22.0]);
    let ys: Vec<f32> = grid
        .commands()
        .iter()
        .filter_map(|c| match c {
            PathCmd::MoveTo(p) if p.x == 0.0 => Some(p.y),
            _ => None,
        })
        .collect();
    assert_eq!(ys, vec![25.0, 50.0, 75.0]);
    assert!(surface
        .ops()
        .iter()
        .any(|op| matches!(op, DrawOp::StrokeRect(r, _) if *r == Rect::from_ltwh(0.0, 0.0, 272.0, 100.0))));
}

#[test]
fn fill_closes_area_below_curve_before_stroke() {
    let fill = Color::from_argb(102, 0, 255, 0);
    let s = series_with(&[(0, 0.0), (1000, 10.0)]);
    let chart = chart_with(
        &s,
        SeriesOptions { line_width: 3.0, stroke_style: Color::rgb(0, 255, 0), fill_style: Some(fill) },
    );
    let mut surface = RecordingSurface::new(100, 50);
    chart.render(&mut surface, 1000);

    let fill_idx = surface.ops().iter().position(|op| matches!(op, DrawOp::FillPath(..))).unwrap();
    let stroke_idx = surface.ops().iter().rposition(|op| matches!(op, DrawOp::StrokePath(..))).unwrap();
    assert!(fill_idx < stroke_idx, "fill must come before the line stroke");

    let (outline, color) = surface.filled_paths().next().unwrap();
    assert_eq!(*color, fill);
    let cmds = outline.commands();
    let n = cmds.len();
    assert_eq!(cmds[n - 1], PathCmd::Close);
    assert_eq!(cmds[n - 4], PathCmd::LineTo(Point::new(104.0, 1.0)));
    assert_eq!(cmds[n - 3], PathCmd::LineTo(Point::new(104.0, 54.0)));
    assert_eq!(cmds[n - 2], PathCmd::LineTo(Point::new(50.0, 54.0)));

    let (line, stroke) = surface.stroked_paths().last().unwrap();
    assert_eq!(stroke.width, 3.0);
    assert!(!line.commands().contains(&PathCmd::Close));
}

#[test]
fn labels_show_scale_right_aligned() {
    let s = series_with(&[(0, 0.0), (1000, 10.0)]);
    let mut chart = chart_with(&s, SeriesOptions::default());
    chart.options.max_value_scale = 1.2;
    let mut surface = RecordingSurface::new(200, 60);
    chart.render(&mut surface, 1000);

    let texts: Vec<(&str, f32, f32)> = surface.texts().collect();
    // 5 px per char at the default 10 px size.
    assert_eq!(texts, vec![("12.00", 173.0, 10.0), ("0.00", 178.0, 58.0)]);

    chart.options.labels.disabled = true;
    let mut surface = RecordingSurface::new(200, 60);
    chart.render(&mut surface, 1000);
    assert_eq!(surface.texts().count(), 0);
}

#[test]
fn fixed_min_value_overrides_computed_minimum() {
    let s = series_with(&[(0, 4.0), (1000, 10.0)]);
    let mut chart = chart_with(&s, SeriesOptions::default());
    chart.options.min_value = Some(-10.0);
    let scale = chart.value_bounds().unwrap();
    assert_eq!((scale.max, scale.min), (10.0, -10.0));

    let mut surface = RecordingSurface::new(100, 100);
    chart.render(&mut surface, 1000);
    let (path, _) = surface.stroked_paths().last().unwrap();
    let ys: Vec<f32> = path.vertices().map(|p| p.y).collect();
    assert_eq!(ys, vec![30.0, 1.0]);
}

#[test]
fn shared_scale_spans_all_series_in_z_order() {
    let low = series_with(&[(0, -5.0), (1000, 0.0)]);
    let high = series_with(&[(0, 1.0), (1000, 20.0)]);
    let empty = SharedSeries::new(TimeSeriesOptions::default());
    let mut chart = StreamingChart::new(ChartOptions::default());
    chart.add_series(&low, SeriesOptions { stroke_style: Color::rgb(255, 0, 0), ..Default::default() });
    chart.add_series(&empty, SeriesOptions::default());
    chart.add_series(&high, SeriesOptions { stroke_style: Color::rgb(0, 0, 255), ..Default::default() });

    let scale = chart.value_bounds().unwrap();
    assert_eq!((scale.max, scale.min), (20.0, -5.0));

    let mut surface = RecordingSurface::new(100, 100);
    chart.render(&mut surface, 1000);
    let colors: Vec<Color> = surface.stroked_paths().skip(1).map(|(_, s)| s.color).collect();
    assert_eq!(colors, vec![Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)]);
}

#[test]
fn remove_series_matches_identity() {
    let a = series_with(&[(0, 1.0)]);
    let b = series_with(&[(0, 1.0)]);
    let stranger = series_with(&[(0, 1.0)]);
    let mut chart = StreamingChart::new(ChartOptions::default());
    chart.add_series(&a, SeriesOptions::default());
    chart.add_series(&b, SeriesOptions::default());

    assert!(!chart.remove_series(&stranger));
    assert_eq!(chart.len(), 2);
    assert!(chart.remove_series(&a.clone()));
    assert_eq!(chart.len(), 1);
    assert!(SharedSeries::ptr_eq(&chart.series()[0].series, &b));
    assert!(!chart.remove_series(&a));
}

#[test]
fn surface_size_is_read_every_frame() {
    let s = series_with(&[(0, 0.0), (1000, 1.0)]);
    let chart = chart_with(&s, SeriesOptions::default());
    let mut surface = RecordingSurface::new(100, 50);
    chart.render(&mut surface, 1000);
    surface.clear();
    surface.resize(300, 80);
    chart.render(&mut surface, 1000);

    assert_eq!(surface.width(), 300);
    assert_eq!(surface.ops()[1], DrawOp::Clip(Rect::from_ltwh(0.0, 0.0, 300.0, 80.0)));
    let (path, _) = surface.stroked_paths().last().unwrap();
    assert_eq!(path.vertices().last().map(|p| p.x), Some(300.0));
}

#[test]
fn tiny_surface_does_not_panic() {
    let s = series_with(&[(0, 0.0), (10, 3.0), (20, -1.0)]);
    let chart = chart_with(
        &s,
        SeriesOptions { fill_style: Some(Color::WHITE), ..Default::default() },
    );
    for (w, h) in [(0, 0), (1, 1), (2, 1), (1, 2)] {
        let mut surface = RecordingSurface::new(w, h);
        chart.render(&mut surface, 20);
        assert_eq!(surface.ops().last(), Some(&DrawOp::Restore));
    }
}

#[test]
fn replay_reissues_ops_in_order() {
    let s = series_with(&[(0, 2.0), (500, 4.0), (1000, 3.0)]);
    let chart = chart_with(&s, SeriesOptions { fill_style: Some(Color::WHITE), ..Default::default() });
    let mut first = RecordingSurface::new(120, 60);
    chart.render(&mut first, 1000);

    let mut copy = RecordingSurface::new(120, 60);
    first.replay(&mut copy);
    assert_eq!(copy.ops(), first.ops());
}

#[test]
fn sub_millisecond_grid_spacing_renders_at_epoch_time() {
    let mut options = ChartOptions::default();
    options.grid.millis_per_line = 0.0001;
    assert!(options.validate().is_ok());
    let chart = StreamingChart::new(options);

    let mut surface = RecordingSurface::new(272, 100);
    chart.render(&mut surface, 1_700_000_000_000);

    let (grid, _) = surface.stroked_paths().next().expect("grid");
    // 273 vertical lines plus the single horizontal divider, two commands each.
    assert_eq!(grid.commands().len(), (273 + 1) * 2);
}
