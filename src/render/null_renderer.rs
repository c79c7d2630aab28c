use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, TextMeasurer, estimate_label_text_width_px};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content and records what it was asked to draw so
/// tests can inspect the last applied frame.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_line_count: usize,
    pub last_path_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl TextMeasurer for NullRenderer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        estimate_label_text_width_px(text, font_size_px)
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_line_count = frame.lines.len();
        self.last_path_count = frame.paths.len();
        self.last_text_count = frame.texts.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
