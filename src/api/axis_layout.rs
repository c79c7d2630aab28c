use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::ticks::tick_step;
use crate::core::{
    DomainResolution, Scale, ScaleKind, ScaleResolver, TimeLabelFormat, format_linear_tick,
};
use crate::error::ChartResult;
use crate::render::TextMeasurer;

use super::AxisStyle;

/// One labelled tick on an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub position_px: f64,
    pub label: String,
}

/// Scales and ticks after the gutter feedback pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub x_scale: Scale,
    pub y_scale: Scale,
    /// Width of the y-axis label block: widest label plus tick and padding.
    pub measured_gutter_width: f64,
    /// Offset of the y-axis group from the left margin. Always equal to the
    /// gutter, so the axis sits flush against the plot's left edge.
    pub y_axis_translate_x: f64,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub time_label_format: Option<TimeLabelFormat>,
}

impl AxisLayout {
    /// Absolute x of the y-axis line.
    #[must_use]
    pub fn y_axis_x(&self) -> f64 {
        self.x_scale.range().0
    }
}

/// Resolves the y-axis gutter / x-range circular dependency.
///
/// Pass 1 lays out the y axis against the nominal left margin and measures its
/// labels. Pass 2 rebuilds the x scale with the measured gutter removed from
/// its range. There is deliberately no third pass: if the narrower x range
/// would change x-label formatting, the gutter is not re-measured.
pub struct AxisLayoutEngine<'m> {
    measurer: &'m dyn TextMeasurer,
    style: AxisStyle,
}

impl<'m> AxisLayoutEngine<'m> {
    #[must_use]
    pub fn new(measurer: &'m dyn TextMeasurer, style: AxisStyle) -> Self {
        Self { measurer, style }
    }

    /// `Ok(None)` when the resolver reports no renderable domain.
    pub fn layout(&self, resolver: &ScaleResolver<'_>) -> ChartResult<Option<AxisLayout>> {
        let DomainResolution::Resolved(domains) = resolver.resolve_domains() else {
            return Ok(None);
        };

        let y_scale = resolver.resolve_y(domains)?;
        let y_ticks = linear_axis_ticks(y_scale);
        let gutter = self.measure_gutter(&y_ticks);

        let x_scale = resolver.resolve_x(domains, gutter)?;
        let time_label_format = resolver.time_label_format(domains);
        let x_ticks = x_axis_ticks(x_scale, time_label_format);

        trace!(
            gutter,
            x_ticks = x_ticks.len(),
            y_ticks = y_ticks.len(),
            "axis layout resolved"
        );
        Ok(Some(AxisLayout {
            x_scale,
            y_scale,
            measured_gutter_width: gutter,
            y_axis_translate_x: gutter,
            x_ticks,
            y_ticks,
            time_label_format,
        }))
    }

    /// Label-block width of the y axis; zero when there are no labels.
    #[must_use]
    pub fn measure_gutter(&self, ticks: &[AxisTick]) -> f64 {
        let widest = ticks
            .iter()
            .map(|tick| {
                self.measurer
                    .text_width_px(&tick.label, self.style.font_size_px)
            })
            .filter(|width| width.is_finite())
            .fold(0.0_f64, f64::max);
        if widest <= 0.0 {
            return 0.0;
        }
        (widest + self.style.tick_size_px + self.style.tick_padding_px).ceil()
    }
}

fn linear_axis_ticks(scale: Scale) -> Vec<AxisTick> {
    let (start, end) = scale.domain();
    let step = tick_step(start, end, scale.tick_count());
    scale
        .ticks()
        .into_iter()
        .map(|value| AxisTick {
            value,
            position_px: scale.map(value),
            label: format_linear_tick(value, step),
        })
        .collect()
}

fn x_axis_ticks(scale: Scale, time_label_format: Option<TimeLabelFormat>) -> Vec<AxisTick> {
    match (scale.kind(), time_label_format) {
        (ScaleKind::Time, Some(format)) => scale
            .ticks()
            .into_iter()
            .map(|value| AxisTick {
                value,
                position_px: scale.map(value),
                label: format.format(value),
            })
            .collect(),
        _ => linear_axis_ticks(scale),
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisLayoutEngine, AxisTick};
    use crate::api::AxisStyle;
    use crate::render::EstimatedTextMeasurer;

    #[test]
    fn gutter_covers_widest_label_plus_tick_geometry() {
        let measurer = EstimatedTextMeasurer;
        let engine = AxisLayoutEngine::new(&measurer, AxisStyle::default());
        let ticks = vec![
            AxisTick {
                value: 0.0,
                position_px: 100.0,
                label: "0".to_owned(),
            },
            AxisTick {
                value: 1000.0,
                position_px: 0.0,
                label: "1,000".to_owned(),
            },
        ];
        // "1,000": four digits and a comma at 10px.
        let expected = (4.0 * 0.62 * 10.0 + 0.34 * 10.0 + 6.0 + 3.0_f64).ceil();
        assert_eq!(engine.measure_gutter(&ticks), expected);
        assert_eq!(engine.measure_gutter(&[]), 0.0);
    }
}
