// File: crates/stripchart-core/src/scale.rs
// Summary: Time (X) and value (Y) transforms for one render tick.

use crate::options::ChartOptions;

/// Visible time window of one frame, right edge snapped to a pixel boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWindow {
    /// Timestamp shown at the right edge (`x == width`).
    pub render_time: f64,
    pub millis_per_pixel: f64,
    pub width: u32,
}

impl TimeWindow {
    /// Snap `now_millis` down to a multiple of `millis_per_pixel` so the scroll
    /// advances in whole pixels. Non-positive scales fall back to the default.
    pub fn quantize(now_millis: i64, millis_per_pixel: f64, width: u32) -> Self {
        let mpp = if millis_per_pixel.is_finite() && millis_per_pixel > 0.0 {
            millis_per_pixel
        } else {
            ChartOptions::default().millis_per_pixel
        };
        let now = now_millis as f64;
        Self { render_time: now - now.rem_euclid(mpp), millis_per_pixel: mpp, width }
    }

    /// Oldest timestamp still inside the window (`x == 0`).
    pub fn left_edge(&self) -> f64 {
        self.render_time - self.width as f64 * self.millis_per_pixel
    }

    /// Pixel column of `timestamp`, rounded to whole pixels.
    pub fn x_for(&self, timestamp: f64) -> f32 {
        (self.width as f64 - (self.render_time - timestamp) / self.millis_per_pixel).round() as f32
    }
}

/// Shared vertical scale: `max` maps to the top, `min` to the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub max: f64,
    pub min: f64,
}

impl ValueScale {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Pixel row of `value`, kept strictly inside `1..=height-1`. A flat or
    /// inverted scale puts every value on row 0 instead of dividing by zero.
    pub fn y_for(&self, value: f64, height: u32) -> f32 {
        let range = self.range();
        if !(range > 0.0) {
            return 0.0;
        }
        let h = height as f64;
        let scaled = ((self.max - value) / range * h).round();
        // max-of-min rather than clamp: tiny surfaces have 1 > height - 1.
        scaled.min(h - 1.0).max(1.0) as f32
    }
}
