// File: crates/stripchart-core/src/chart.rs
// Summary: StreamingChart and its per-tick render pipeline (grid, shared scale, eviction, curves, labels).

use std::sync::{Arc, Mutex};

use crate::geometry::{Path, Rect};
use crate::grid::{horizontal_line_ys, vertical_line_times};
use crate::options::{ChartOptions, SeriesOptions};
use crate::scale::{TimeWindow, ValueScale};
use crate::series::{Sample, SharedSeries};
use crate::surface::{DrawSurface, Stroke};

/// A series as drawn by one chart: the shared buffer plus its styling.
#[derive(Clone, Debug)]
pub struct SeriesEntry {
    pub series: SharedSeries,
    pub options: SeriesOptions,
}

/// Scrolling line chart over a set of [`SharedSeries`].
///
/// The chart stores no samples of its own; `render` reads the series and
/// evicts what scrolled off the left edge.
#[derive(Debug, Default)]
pub struct StreamingChart {
    pub options: ChartOptions,
    series_set: Vec<SeriesEntry>,
}

/// Chart shared between the host and a render loop.
pub type SharedChart = Arc<Mutex<StreamingChart>>;

/// Curve of one series in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub path: Path,
    pub first_x: f32,
    pub last_y: f32,
}

impl StreamingChart {
    pub fn new(options: ChartOptions) -> Self {
        Self { options, series_set: Vec::new() }
    }

    pub fn into_shared(self) -> SharedChart {
        Arc::new(Mutex::new(self))
    }

    /// Add `series` on top of the existing ones. Adding the same series twice
    /// is not checked.
    pub fn add_series(&mut self, series: &SharedSeries, options: SeriesOptions) {
        self.series_set.push(SeriesEntry { series: series.clone(), options });
    }

    /// Remove the first entry for `series`. Returns `false` when it was not present.
    pub fn remove_series(&mut self, series: &SharedSeries) -> bool {
        match self.series_set.iter().position(|e| SharedSeries::ptr_eq(&e.series, series)) {
            Some(idx) => {
                self.series_set.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Entries in draw order (later entries on top).
    pub fn series(&self) -> &[SeriesEntry] {
        &self.series_set
    }

    pub fn len(&self) -> usize {
        self.series_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series_set.is_empty()
    }

    /// Start the bounds-reset timer of every series that enables one.
    pub fn start_series_timers(&self) -> crate::error::Result<()> {
        for entry in &self.series_set {
            entry.series.start()?;
        }
        Ok(())
    }

    /// Cancel every series' bounds-reset timer.
    pub fn stop_series_timers(&self) {
        for entry in &self.series_set {
            entry.series.stop();
        }
    }

    /// Scale shared by all series: max over series maxima times
    /// `max_value_scale`, min over series minima unless `min_value` is fixed.
    /// `None` while no series has seen a sample.
    pub fn value_bounds(&self) -> Option<ValueScale> {
        let mut max: Option<f64> = None;
        let mut min: Option<f64> = None;
        for entry in &self.series_set {
            let s = entry.series.lock();
            if let Some(v) = s.max_value() {
                max = Some(max.map_or(v, |m| m.max(v)));
            }
            if let Some(v) = s.min_value() {
                min = Some(min.map_or(v, |m| m.min(v)));
            }
        }
        let max = max? * self.options.max_value_scale;
        let min = self.options.min_value.or(min)?;
        Some(ValueScale { max, min })
    }

    /// Paint one frame for wall-clock time `now_millis`.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S, now_millis: i64) {
        let width = surface.width();
        let height = surface.height();
        let window = TimeWindow::quantize(now_millis, self.options.millis_per_pixel, width);
        let bounds = Rect::from_size(width, height);

        surface.save();
        surface.clip_rect(bounds);
        surface.fill_rect(bounds, self.options.grid.fill_style);
        self.draw_grid(surface, &window, height);

        if let Some(scale) = self.value_bounds() {
            for entry in &self.series_set {
                self.draw_series(surface, entry, &window, &scale, height);
            }
            if !self.options.labels.disabled {
                self.draw_labels(surface, &scale, width, height);
            }
        }

        surface.restore();
    }

    fn draw_grid<S: DrawSurface + ?Sized>(&self, surface: &mut S, window: &TimeWindow, height: u32) {
        let grid = &self.options.grid;
        let stroke = Stroke::new(grid.stroke_style, positive_or_one(grid.line_width));
        let w = window.width as f32;
        let h = height as f32;

        let mut lines = Path::new();
        for t in vertical_line_times(window, grid.millis_per_line) {
            let gx = window.x_for(t);
            lines.move_to(gx, 0.0).line_to(gx, h);
        }
        for gy in horizontal_line_ys(height, grid.vertical_sections) {
            lines.move_to(0.0, gy).line_to(w, gy);
        }
        if !lines.is_empty() {
            surface.stroke_path(&lines, stroke);
        }
        surface.stroke_rect(Rect::from_size(window.width, height), stroke);
    }

    fn draw_series<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        entry: &SeriesEntry,
        window: &TimeWindow,
        scale: &ValueScale,
        height: u32,
    ) {
        let curve = {
            let mut series = entry.series.lock();
            let dropped = series.drop_expired(window.left_edge());
            if dropped > 0 {
                tracing::trace!(dropped, retained = series.len(), "evicted expired samples");
            }
            build_curve(series.data().iter(), window, scale, height)
        };
        let Some(curve) = curve else { return };

        let line_width = positive_or_one(entry.options.line_width);
        if let Some(fill) = entry.options.fill_style {
            let outline = fill_outline(&curve, window.width, height, line_width);
            surface.fill_path(&outline, fill);
        }
        surface.stroke_path(&curve.path, Stroke::new(entry.options.stroke_style, line_width));
    }

    fn draw_labels<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        scale: &ValueScale,
        width: u32,
        height: u32,
    ) {
        let labels = &self.options.labels;
        let size = labels.font_size;
        let right = width as f32 - 2.0;

        let max_text = format!("{:.2}", scale.max);
        let max_w = surface.measure_text(&max_text, size);
        surface.fill_text(&max_text, right - max_w, size, size, labels.fill_style);

        let min_text = format!("{:.2}", scale.min);
        let min_w = surface.measure_text(&min_text, size);
        surface.fill_text(&min_text, right - min_w, height as f32 - 2.0, size, labels.fill_style);
    }
}

/// Map samples to pixels and join them with horizontal-tangent cubics: each
/// segment's control points share the x midway between its end points and the
/// y of the end point they sit next to, so the curve passes through every
/// sample without kinks at the joins.
pub fn build_curve<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    window: &TimeWindow,
    scale: &ValueScale,
    height: u32,
) -> Option<Curve> {
    let mut path = Path::new();
    let mut first_x = None;
    let (mut last_x, mut last_y) = (0.0f32, 0.0f32);

    for sample in samples {
        let x = window.x_for(sample.timestamp as f64);
        let y = scale.y_for(sample.value, height);
        if first_x.is_none() {
            first_x = Some(x);
            path.move_to(x, y);
        } else {
            let mid = (last_x + x) / 2.0;
            path.cubic_to(mid, last_y, mid, y, x, y);
        }
        last_x = x;
        last_y = y;
    }

    first_x.map(|first_x| Curve { path, first_x, last_y })
}

/// Close the area under `curve`: out past the right edge, down past the
/// bottom, back under the first point. Overshooting by the line width keeps
/// the fill's own edges outside the clip.
pub fn fill_outline(curve: &Curve, width: u32, height: u32, line_width: f32) -> Path {
    let right = width as f32 + line_width + 1.0;
    let bottom = height as f32 + line_width + 1.0;
    let mut outline = curve.path.clone();
    outline
        .line_to(right, curve.last_y)
        .line_to(right, bottom)
        .line_to(curve.first_x, bottom)
        .close();
    outline
}

fn positive_or_one(w: f32) -> f32 {
    if w.is_finite() && w > 0.0 { w } else { 1.0 }
}
