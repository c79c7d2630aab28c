use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_X_TICK_COUNT, DEFAULT_Y_TICK_COUNT, LookupPolicy, Margin, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Horizontal reference line drawn across the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub label: Option<String>,
}

impl Threshold {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            color: None,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// X tick target: `"auto"` or an explicit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "XTicksRepr", into = "XTicksRepr")]
pub enum XTicks {
    #[default]
    Auto,
    Count(usize),
}

impl XTicks {
    #[must_use]
    pub fn resolve(self) -> usize {
        match self {
            Self::Auto => DEFAULT_X_TICK_COUNT,
            Self::Count(count) => count.max(1),
        }
    }
}

#[doc(hidden)]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum XTicksRepr {
    Keyword(String),
    Count(usize),
}

impl TryFrom<XTicksRepr> for XTicks {
    type Error = ChartError;

    fn try_from(value: XTicksRepr) -> Result<Self, Self::Error> {
        match value {
            XTicksRepr::Keyword(keyword) if keyword == "auto" => Ok(Self::Auto),
            XTicksRepr::Keyword(keyword) => Err(ChartError::InvalidConfig(format!(
                "x_ticks must be \"auto\" or a positive number, got `{keyword}`"
            ))),
            XTicksRepr::Count(0) => Err(ChartError::InvalidConfig(
                "x_ticks count must be > 0".to_owned(),
            )),
            XTicksRepr::Count(count) => Ok(Self::Count(count)),
        }
    }
}

impl From<XTicks> for XTicksRepr {
    fn from(value: XTicks) -> Self {
        match value {
            XTicks::Auto => Self::Keyword("auto".to_owned()),
            XTicks::Count(count) => Self::Count(count),
        }
    }
}

/// Axis text and tick geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub font_size_px: f64,
    pub tick_size_px: f64,
    pub tick_padding_px: f64,
    pub axis_color: Color,
    pub grid_color: Color,
    pub label_color: Color,
    pub series_stroke_width: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            font_size_px: 10.0,
            tick_size_px: 6.0,
            tick_padding_px: 3.0,
            axis_color: Color::rgb(0.0, 0.0, 0.0),
            grid_color: Color::rgba(0.0, 0.0, 0.0, 0.2),
            label_color: Color::rgb(0.2, 0.2, 0.2),
            series_stroke_width: 1.5,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Every field only affects layout computation; the type is serializable so
/// hosts can keep chart options in JSON next to the rest of their settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    /// Initial container size. Margins come from `margin`.
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default = "default_time_scale")]
    pub time_scale: bool,
    #[serde(default)]
    pub thresholds: Vec<Threshold>,
    #[serde(default)]
    pub x_ticks: XTicks,
    #[serde(default = "default_y_ticks")]
    pub y_ticks: usize,
    /// Nearest-point policy; `None` picks `left` for a single visible series
    /// and `center` otherwise.
    #[serde(default)]
    pub lookup_policy: Option<LookupPolicy>,
    #[serde(default = "default_hover_debounce_ms")]
    pub hover_debounce_ms: u64,
    #[serde(default)]
    pub axis_style: AxisStyle,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margin: Margin::default(),
            time_scale: default_time_scale(),
            thresholds: Vec::new(),
            x_ticks: XTicks::Auto,
            y_ticks: default_y_ticks(),
            lookup_policy: None,
            hover_debounce_ms: default_hover_debounce_ms(),
            axis_style: AxisStyle::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_time_scale(mut self, time_scale: bool) -> Self {
        self.time_scale = time_scale;
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Vec<Threshold>) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_x_ticks(mut self, x_ticks: XTicks) -> Self {
        self.x_ticks = x_ticks;
        self
    }

    #[must_use]
    pub fn with_y_ticks(mut self, y_ticks: usize) -> Self {
        self.y_ticks = y_ticks;
        self
    }

    #[must_use]
    pub fn with_lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.lookup_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_hover_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.hover_debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub fn with_axis_style(mut self, style: AxisStyle) -> Self {
        self.axis_style = style;
        self
    }

    /// Viewport for a container of `width x height` with this config's margins.
    #[must_use]
    pub fn viewport_for(&self, width: u32, height: u32) -> Viewport {
        Viewport::new(width, height).with_margin(self.margin)
    }

    #[must_use]
    pub fn initial_viewport(&self) -> Viewport {
        self.viewport_for(self.width, self.height)
    }

    #[must_use]
    pub fn hover_debounce(&self) -> Duration {
        Duration::from_millis(self.hover_debounce_ms)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !self.margin.is_valid() {
            return Err(ChartError::InvalidConfig(
                "margins must be finite and >= 0".to_owned(),
            ));
        }
        if self.y_ticks == 0 {
            return Err(ChartError::InvalidConfig(
                "y_ticks must be > 0".to_owned(),
            ));
        }
        if self.thresholds.iter().any(|threshold| !threshold.value.is_finite()) {
            return Err(ChartError::InvalidConfig(
                "threshold values must be finite".to_owned(),
            ));
        }
        let style = self.axis_style;
        for (name, value) in [
            ("font_size_px", style.font_size_px),
            ("series_stroke_width", style.series_stroke_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis_style.{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("tick_size_px", style.tick_size_px),
            ("tick_padding_px", style.tick_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis_style.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse chart config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize chart config json: {e}"))
        })
    }
}

fn default_time_scale() -> bool {
    true
}

fn default_y_ticks() -> usize {
    DEFAULT_Y_TICK_COUNT
}

fn default_hover_debounce_ms() -> u64 {
    300
}
