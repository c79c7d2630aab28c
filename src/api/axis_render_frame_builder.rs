use crate::core::Viewport;
use crate::render::{LayerPrimitives, LinePrimitive, TextHAlign, TextPrimitive};

use super::{AxisLayout, AxisStyle};

const GRID_STROKE_WIDTH: f64 = 1.0;
const AXIS_STROKE_WIDTH: f64 = 1.0;
/// Baseline offset that visually centers a label on its tick.
const LABEL_BASELINE_RATIO: f64 = 0.35;

/// Horizontal grid line at every y tick, spanning the x range.
pub(super) fn build_grid_layer(layout: &AxisLayout, style: AxisStyle) -> LayerPrimitives {
    let (left, right) = layout.x_scale.range();
    LayerPrimitives {
        lines: layout
            .y_ticks
            .iter()
            .map(|tick| {
                LinePrimitive::new(
                    left,
                    tick.position_px,
                    right,
                    tick.position_px,
                    GRID_STROKE_WIDTH,
                    style.grid_color,
                )
            })
            .collect(),
        ..LayerPrimitives::default()
    }
}

/// Both axis domains, tick marks and tick labels.
///
/// The y-axis group sits at `margin.left + y_axis_translate_x`, which is the
/// left bound of the x range, so its labels end exactly at the gutter edge.
pub(super) fn build_axis_layer(
    layout: &AxisLayout,
    viewport: Viewport,
    style: AxisStyle,
) -> LayerPrimitives {
    let mut layer = LayerPrimitives::default();
    let (left, right) = layout.x_scale.range();
    let (top, bottom) = (viewport.plot_top(), viewport.plot_bottom());
    let axis_x = viewport.plot_left() + layout.y_axis_translate_x;

    layer.lines.push(LinePrimitive::new(
        left,
        bottom,
        right,
        bottom,
        AXIS_STROKE_WIDTH,
        style.axis_color,
    ));
    let x_label_y = bottom + style.tick_size_px + style.tick_padding_px + style.font_size_px;
    for tick in &layout.x_ticks {
        layer.lines.push(LinePrimitive::new(
            tick.position_px,
            bottom,
            tick.position_px,
            bottom + style.tick_size_px,
            AXIS_STROKE_WIDTH,
            style.axis_color,
        ));
        if !tick.label.is_empty() {
            layer.texts.push(TextPrimitive::new(
                tick.label.clone(),
                tick.position_px,
                x_label_y,
                style.font_size_px,
                style.label_color,
                TextHAlign::Center,
            ));
        }
    }

    layer.lines.push(LinePrimitive::new(
        axis_x,
        top,
        axis_x,
        bottom,
        AXIS_STROKE_WIDTH,
        style.axis_color,
    ));
    let y_label_x = axis_x - style.tick_size_px - style.tick_padding_px;
    for tick in &layout.y_ticks {
        layer.lines.push(LinePrimitive::new(
            axis_x - style.tick_size_px,
            tick.position_px,
            axis_x,
            tick.position_px,
            AXIS_STROKE_WIDTH,
            style.axis_color,
        ));
        if !tick.label.is_empty() {
            layer.texts.push(TextPrimitive::new(
                tick.label.clone(),
                y_label_x,
                tick.position_px + style.font_size_px * LABEL_BASELINE_RATIO,
                style.font_size_px,
                style.label_color,
                TextHAlign::Right,
            ));
        }
    }

    layer
}
