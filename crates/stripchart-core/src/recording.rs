// File: crates/stripchart-core/src/recording.rs
// Summary: Display-list surface that records draw calls instead of rasterizing them.

use crate::color::Color;
use crate::geometry::{Path, Rect};
use crate::surface::{DrawSurface, Stroke};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Clip(Rect),
    FillRect(Rect, Color),
    StrokeRect(Rect, Stroke),
    FillPath(Path, Color),
    StrokePath(Path, Stroke),
    Text { text: String, x: f32, y: f32, size: f32, color: Color },
}

/// Records every call as a [`DrawOp`]. Text is measured with a fixed advance
/// of `advance_ratio * size` per character.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    advance_ratio: f32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, advance_ratio: 0.5, ops: Vec::new() }
    }

    pub fn with_advance_ratio(mut self, ratio: f32) -> Self {
        self.advance_ratio = ratio.max(0.0);
        self
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded ops, e.g. between frames.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Re-issue the recorded ops, in order, against another surface.
    pub fn replay<T: DrawSurface + ?Sized>(&self, target: &mut T) {
        replay_ops(&self.ops, target);
    }

    pub fn stroked_paths(&self) -> impl Iterator<Item = (&Path, &Stroke)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokePath(p, s) => Some((p, s)),
            _ => None,
        })
    }

    pub fn filled_paths(&self) -> impl Iterator<Item = (&Path, &Color)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillPath(p, c) => Some((p, c)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }
}

/// Draw a captured frame onto `target`. Used to move frames recorded on a
/// render thread to a surface owned by another thread.
pub fn replay_ops<T: DrawSurface + ?Sized>(ops: &[DrawOp], target: &mut T) {
    for op in ops {
        match op {
            DrawOp::Save => target.save(),
            DrawOp::Restore => target.restore(),
            DrawOp::Clip(r) => target.clip_rect(*r),
            DrawOp::FillRect(r, c) => target.fill_rect(*r, *c),
            DrawOp::StrokeRect(r, s) => target.stroke_rect(*r, *s),
            DrawOp::FillPath(p, c) => target.fill_path(p, *c),
            DrawOp::StrokePath(p, s) => target.stroke_path(p, *s),
            DrawOp::Text { text, x, y, size, color } => target.fill_text(text, *x, *y, *size, *color),
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clip(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.ops.push(DrawOp::StrokeRect(rect, stroke));
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.ops.push(DrawOp::FillPath(path.clone(), color));
    }

    fn stroke_path(&mut self, path: &Path, stroke: Stroke) {
        self.ops.push(DrawOp::StrokePath(path.clone(), stroke));
    }

    fn measure_text(&mut self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance_ratio
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.ops.push(DrawOp::Text { text: text.to_string(), x, y, size, color });
    }
}
