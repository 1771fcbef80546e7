// File: crates/stripchart-core/src/options.rs
// Summary: Chart, grid, label, series and time-series options with their defaults.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ChartError, Result};

/// Options for a single [`TimeSeries`](crate::TimeSeries).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeriesOptions {
    /// Period of the bounds-reset timer.
    pub reset_bounds_interval_ms: u64,
    /// Whether the bounds-reset timer runs at all.
    pub reset_bounds: bool,
}

impl Default for TimeSeriesOptions {
    fn default() -> Self {
        Self { reset_bounds_interval_ms: 3000, reset_bounds: true }
    }
}

impl TimeSeriesOptions {
    pub fn validate(&self) -> Result<()> {
        if self.reset_bounds && self.reset_bounds_interval_ms == 0 {
            return Err(ChartError::Config("reset_bounds_interval_ms must be at least 1".into()));
        }
        Ok(())
    }

    /// Bounds-reset period, never shorter than 1 ms.
    pub fn reset_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reset_bounds_interval_ms.max(1))
    }
}

/// Per-series draw styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    pub line_width: f32,
    pub stroke_style: Color,
    /// Area under the curve is filled when set.
    pub fill_style: Option<Color>,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self { line_width: 1.0, stroke_style: Color::WHITE, fill_style: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Background fill of the whole chart.
    pub fill_style: Color,
    pub stroke_style: Color,
    pub line_width: f32,
    /// Spacing of vertical time lines; `0` disables them.
    pub millis_per_line: f64,
    /// Number of horizontal bands; `n - 1` lines are drawn between them.
    pub vertical_sections: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            fill_style: Color::BLACK,
            stroke_style: Color::GRAY,
            line_width: 1.0,
            millis_per_line: 1000.0,
            vertical_sections: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOptions {
    pub fill_style: Color,
    pub disabled: bool,
    pub font_size: f32,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self { fill_style: Color::WHITE, disabled: false, font_size: 10.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub grid: GridOptions,
    pub labels: LabelOptions,
    /// Wall-clock milliseconds represented by one horizontal pixel.
    pub millis_per_pixel: f64,
    /// Redraw cadence of [`stream_to`](crate::stream::stream_to).
    pub fps: f64,
    /// Headroom multiplier applied to the computed maximum.
    pub max_value_scale: f64,
    /// Fixed bottom of the value scale; computed from the data when unset.
    pub min_value: Option<f64>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            grid: GridOptions::default(),
            labels: LabelOptions::default(),
            millis_per_pixel: 20.0,
            fps: 20.0,
            max_value_scale: 1.0,
            min_value: None,
        }
    }
}

impl ChartOptions {
    /// Reject values that would make the time axis or redraw cadence meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.millis_per_pixel.is_finite() && self.millis_per_pixel > 0.0) {
            return Err(ChartError::Config(format!(
                "millis_per_pixel must be positive, got {}",
                self.millis_per_pixel
            )));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ChartError::Config(format!("fps must be positive, got {}", self.fps)));
        }
        if !self.max_value_scale.is_finite() {
            return Err(ChartError::Config("max_value_scale must be finite".into()));
        }
        if self.grid.vertical_sections == 0 {
            return Err(ChartError::Config("grid.vertical_sections must be at least 1".into()));
        }
        if !(self.grid.millis_per_line.is_finite() && self.grid.millis_per_line >= 0.0) {
            return Err(ChartError::Config("grid.millis_per_line must be >= 0".into()));
        }
        Ok(())
    }

    /// Delay between two render ticks.
    pub fn frame_interval(&self) -> std::time::Duration {
        let fps = if self.fps.is_finite() && self.fps > 0.0 { self.fps } else { 20.0 };
        std::time::Duration::from_secs_f64(1.0 / fps)
    }
}
