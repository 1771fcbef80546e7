// File: crates/stripchart-core/src/surface.rs
// Summary: Immediate-mode 2D drawing contract the chart paints into.

use crate::color::Color;
use crate::geometry::{Path, Rect};

/// Stroke style for lines and outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A 2D drawing surface of known pixel size.
///
/// `width`/`height` are read at the start of every render, so implementations
/// may be resized between ticks. `save`/`restore` bracket clip state the same
/// way a canvas state stack does.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn save(&mut self);
    fn restore(&mut self);
    /// Intersect the current clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
    fn fill_path(&mut self, path: &Path, color: Color);
    fn stroke_path(&mut self, path: &Path, stroke: Stroke);

    /// Advance width of `text` at `size` px.
    fn measure_text(&mut self, text: &str, size: f32) -> f32;
    /// Draw `text` with its left edge at `x` and its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn width(&self) -> u32 { (**self).width() }
    fn height(&self) -> u32 { (**self).height() }
    fn save(&mut self) { (**self).save() }
    fn restore(&mut self) { (**self).restore() }
    fn clip_rect(&mut self, rect: Rect) { (**self).clip_rect(rect) }
    fn fill_rect(&mut self, rect: Rect, color: Color) { (**self).fill_rect(rect, color) }
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) { (**self).stroke_rect(rect, stroke) }
    fn fill_path(&mut self, path: &Path, color: Color) { (**self).fill_path(path, color) }
    fn stroke_path(&mut self, path: &Path, stroke: Stroke) { (**self).stroke_path(path, stroke) }
    fn measure_text(&mut self, text: &str, size: f32) -> f32 { (**self).measure_text(text, size) }
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        (**self).fill_text(text, x, y, size, color)
    }
}
