use crate::core::Viewport;
use crate::render::{Color, LayerPrimitives, LinePrimitive, TextHAlign, TextPrimitive};

use super::{AxisLayout, AxisStyle, Threshold};

pub(super) const EMPTY_STATE_TEXT: &str = "No data";
const DEFAULT_THRESHOLD_COLOR: Color = Color::rgb(0.84, 0.15, 0.16);
const THRESHOLD_STROKE_WIDTH: f64 = 1.0;
const THRESHOLD_LABEL_LIFT_PX: f64 = 4.0;

/// Threshold lines inside the resolved y domain. Thresholds never widen the
/// domain, so values outside it are skipped.
pub(super) fn build_threshold_layer(
    layout: &AxisLayout,
    thresholds: &[Threshold],
    style: AxisStyle,
) -> LayerPrimitives {
    let mut layer = LayerPrimitives::default();
    let (left, right) = layout.x_scale.range();
    let (d0, d1) = layout.y_scale.domain();
    let (low, high) = (d0.min(d1), d0.max(d1));

    for threshold in thresholds {
        if !(low..=high).contains(&threshold.value) {
            continue;
        }
        let y = layout.y_scale.map(threshold.value);
        let color = threshold.color.unwrap_or(DEFAULT_THRESHOLD_COLOR);
        layer.lines.push(LinePrimitive::new(
            left,
            y,
            right,
            y,
            THRESHOLD_STROKE_WIDTH,
            color,
        ));
        if let Some(label) = threshold.label.as_deref().filter(|label| !label.is_empty()) {
            layer.texts.push(TextPrimitive::new(
                label,
                right,
                y - THRESHOLD_LABEL_LIFT_PX,
                style.font_size_px,
                color,
                TextHAlign::Right,
            ));
        }
    }
    layer
}

/// Centered placeholder drawn when there is no renderable domain.
pub(super) fn build_empty_state_layer(viewport: Viewport, style: AxisStyle) -> LayerPrimitives {
    let x = (viewport.plot_left() + viewport.plot_right()) / 2.0;
    let y = (viewport.plot_top() + viewport.plot_bottom()) / 2.0;
    LayerPrimitives {
        texts: vec![TextPrimitive::new(
            EMPTY_STATE_TEXT,
            x,
            y,
            style.font_size_px,
            style.label_color,
            TextHAlign::Center,
        )],
        ..LayerPrimitives::default()
    }
}
