// File: crates/stripchart-render-skia/src/lib.rs
// Summary: CPU raster DrawSurface backed by Skia, with PNG and RGBA export.

mod text;

use std::path::Path as FsPath;

use anyhow::{anyhow, Result};
use skia_safe as skia;
use stripchart_core::{Color, DrawSurface, Path, PathCmd, Rect, Stroke, StreamingChart};

pub use text::TextShaper;

/// Raster surface the chart can paint into directly.
pub struct SkiaSurface {
    surface: skia::Surface,
    width: u32,
    height: u32,
    text: TextShaper,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let surface = raster(width, height)?;
        Ok(Self { surface, width, height, text: TextShaper::new() })
    }

    /// Replace the backing raster. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        self.surface = raster(width, height)?;
        self.width = width;
        self.height = height;
        tracing::debug!(width, height, "resized raster surface");
        Ok(())
    }

    pub fn to_png_bytes(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn write_png(&mut self, path: impl AsRef<FsPath>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_png_bytes()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Unpremultiplied RGBA8 pixels, row-major. Returns (pixels, width, height, row_bytes).
    pub fn to_rgba8(&mut self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let info = skia::ImageInfo::new(
            (self.width as i32, self.height as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let row_bytes = self.width as usize * 4;
        let mut pixels = vec![0u8; row_bytes * self.height as usize];
        if !self.surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(anyhow!("read_pixels failed"));
        }
        Ok((pixels, self.width, self.height, row_bytes))
    }

    fn canvas(&mut self) -> &skia::Canvas {
        self.surface.canvas()
    }
}

/// Render one frame of `chart` at `now_millis` and return it as PNG bytes.
pub fn render_png(chart: &StreamingChart, width: u32, height: u32, now_millis: i64) -> Result<Vec<u8>> {
    let mut surface = SkiaSurface::new(width, height)?;
    chart.render(&mut surface, now_millis);
    surface.to_png_bytes()
}

fn raster(width: u32, height: u32) -> Result<skia::Surface> {
    skia::surfaces::raster_n32_premul((width.max(1) as i32, height.max(1) as i32))
        .ok_or_else(|| anyhow!("failed to create {width}x{height} raster surface"))
}

fn sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn sk_rect(r: Rect) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

fn sk_path(path: &Path) -> skia::Path {
    let mut out = skia::Path::new();
    for cmd in path.commands() {
        match *cmd {
            PathCmd::MoveTo(p) => {
                out.move_to((p.x, p.y));
            }
            PathCmd::LineTo(p) => {
                out.line_to((p.x, p.y));
            }
            PathCmd::CubicTo(c1, c2, p) => {
                out.cubic_to((c1.x, c1.y), (c2.x, c2.y), (p.x, p.y));
            }
            PathCmd::Close => {
                out.close();
            }
        }
    }
    out
}

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(sk_color(color));
    paint
}

fn stroke_paint(stroke: Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width);
    paint.set_color(sk_color(stroke.color));
    paint
}

impl DrawSurface for SkiaSurface {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }

    fn save(&mut self) {
        self.canvas().save();
    }

    fn restore(&mut self) {
        self.canvas().restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.canvas().clip_rect(sk_rect(rect), skia::ClipOp::Intersect, false);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.canvas().draw_rect(sk_rect(rect), &fill_paint(color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.canvas().draw_rect(sk_rect(rect), &stroke_paint(stroke));
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.canvas().draw_path(&sk_path(path), &fill_paint(color));
    }

    fn stroke_path(&mut self, path: &Path, stroke: Stroke) {
        self.canvas().draw_path(&sk_path(path), &stroke_paint(stroke));
    }

    fn measure_text(&mut self, text: &str, size: f32) -> f32 {
        self.text.measure_width(text, size)
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let canvas = self.surface.canvas();
        self.text.draw_left(canvas, text, x, y, size, sk_color(color));
    }
}
