// File: crates/stripchart-core/src/grid.rs
// Summary: Grid line layout for the scrolling background.

use crate::scale::TimeWindow;

/// Timestamps of vertical grid lines inside `window`, newest first.
/// Lines sit on multiples of `millis_per_line`; `0` (or less) yields none.
/// At most `width + 1` lines are produced; denser spacing is truncated.
pub fn vertical_line_times(window: &TimeWindow, millis_per_line: f64) -> Vec<f64> {
    if !(millis_per_line.is_finite() && millis_per_line > 0.0) {
        return Vec::new();
    }
    let left = window.left_edge();
    let max_lines = window.width as usize + 1;
    // Step on the line index: subtracting a spacing below the ULP of an
    // epoch timestamp would leave `t` unchanged.
    let mut k = (window.render_time / millis_per_line).floor() as i64;
    let mut out = Vec::new();
    while out.len() < max_lines {
        let t = k as f64 * millis_per_line;
        if t < left {
            break;
        }
        out.push(t);
        k -= 1;
    }
    out
}

/// Rows of the `sections - 1` horizontal dividers, rounded to whole pixels.
pub fn horizontal_line_ys(height: u32, sections: u32) -> Vec<f32> {
    (1..sections)
        .map(|v| (v as f64 * height as f64 / sections as f64).round() as f32)
        .collect()
}
