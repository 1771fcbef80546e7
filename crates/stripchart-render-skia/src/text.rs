// File: crates/stripchart-render-skia/src/text.rs
// Summary: Label shaping and drawing via Skia textlayout, with baseline-anchored placement.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

/// Families tried in order for scale labels; tabular digits keep the
/// right-aligned numbers from jittering as values change.
const LABEL_FAMILIES: &[&str] = &["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(LABEL_FAMILIES);

        let mut builder = ParagraphBuilder::new(&pstyle, self.fonts.clone());
        builder.push_style(&ts);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT).longest_line()
    }

    /// Draw with the left edge at `x` and the alphabetic baseline at `y`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        let paragraph = self.layout(text, size, color);
        // Paragraphs paint from their top-left corner.
        paragraph.paint(canvas, (x, y - paragraph.alphabetic_baseline()));
    }
}
