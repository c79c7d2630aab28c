mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;

pub use frame::{LayerPrimitives, RenderFrame};
pub use layer_stack::CanvasLayerKind;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, PathPrimitive, TextHAlign, TextPrimitive};

use crate::error::ChartResult;

/// Text measurement capability supplied by the host renderer.
///
/// Axis layout measures tick labels through this trait instead of guessing
/// glyph metrics itself.
pub trait TextMeasurer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64;
}

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer: TextMeasurer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

/// Measurer for headless use: a deterministic per-glyph width table.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        estimate_label_text_width_px(text, font_size_px)
    }
}

#[must_use]
pub fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    if text.is_empty() {
        0.0
    } else {
        (units * font_size_px).max(font_size_px)
    }
}
