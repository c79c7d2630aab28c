use serde::{Deserialize, Serialize};

use crate::core::label_format::TimeLabelFormat;
use crate::core::series::{SortedSeries, extent};
use crate::core::ticks::{MILLIS_PER_SECOND, nice_linear, nice_time};
use crate::core::{Scale, ScaleKind, Viewport};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_X_TICK_COUNT: usize = 6;
pub const DEFAULT_Y_TICK_COUNT: usize = 5;

/// Half-width used to widen a single-instant time domain.
const DEGENERATE_TIME_HALF_SPAN: f64 = 30.0 * MILLIS_PER_SECOND;
/// Half-width used to widen a single-value linear domain.
const DEGENERATE_LINEAR_HALF_SPAN: f64 = 1.0;

/// Data-space extents after override, zero floor and nice rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainPair {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

/// Scales for one generation, plus the time-label bucket for the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedScales {
    pub x: Scale,
    pub y: Scale,
    pub time_label_format: Option<TimeLabelFormat>,
}

/// Outcome of domain resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainResolution {
    /// Nothing to plot: callers render the empty state and skip axes and series.
    NoRenderableDomain,
    Resolved(DomainPair),
}

/// Pure mapping from (series, viewport, options) to scales.
///
/// Calling any method twice with the same inputs yields identical output.
#[derive(Debug, Clone, Copy)]
pub struct ScaleResolver<'a> {
    series: &'a [&'a SortedSeries],
    viewport: Viewport,
    x_kind: ScaleKind,
    time_domain_override: Option<(f64, f64)>,
    x_tick_count: usize,
    y_tick_count: usize,
}

impl<'a> ScaleResolver<'a> {
    /// `series` must already be filtered down to visible series.
    #[must_use]
    pub fn new(series: &'a [&'a SortedSeries], viewport: Viewport, x_kind: ScaleKind) -> Self {
        Self {
            series,
            viewport,
            x_kind,
            time_domain_override: None,
            x_tick_count: DEFAULT_X_TICK_COUNT,
            y_tick_count: DEFAULT_Y_TICK_COUNT,
        }
    }

    /// Explicit x-domain, used verbatim instead of the data extent.
    #[must_use]
    pub fn with_time_domain_override(mut self, domain: Option<(f64, f64)>) -> Self {
        self.time_domain_override = domain;
        self
    }

    #[must_use]
    pub fn with_tick_counts(mut self, x_tick_count: usize, y_tick_count: usize) -> Self {
        self.x_tick_count = x_tick_count.max(1);
        self.y_tick_count = y_tick_count.max(1);
        self
    }

    #[must_use]
    pub fn resolve_domains(&self) -> DomainResolution {
        let Some(y_raw) = extent(self.series.iter().filter_map(|series| series.y_extent()).flat_map(
            |(min, max)| [min, max],
        )) else {
            return DomainResolution::NoRenderableDomain;
        };

        let x = match self.time_domain_override {
            Some((start, end)) if start.is_finite() && end.is_finite() && start != end => {
                (start.min(end), start.max(end))
            }
            _ => {
                let Some(x_raw) = extent(
                    self.series
                        .iter()
                        .filter_map(|series| series.x_extent())
                        .flat_map(|(min, max)| [min, max]),
                ) else {
                    return DomainResolution::NoRenderableDomain;
                };
                self.nice_x(x_raw)
            }
        };

        DomainResolution::Resolved(DomainPair {
            x,
            y: nice_linear_widened(apply_zero_floor(y_raw), self.y_tick_count),
        })
    }

    fn nice_x(&self, (min, max): (f64, f64)) -> (f64, f64) {
        match self.x_kind {
            ScaleKind::Time => {
                let (min, max) = widen_degenerate(min, max, DEGENERATE_TIME_HALF_SPAN);
                nice_time(min, max, self.x_tick_count)
            }
            ScaleKind::Linear => {
                let (min, max) = widen_degenerate(min, max, DEGENERATE_LINEAR_HALF_SPAN);
                nice_linear(min, max, self.x_tick_count)
            }
        }
    }

    /// Pass-1 scale: y mapped onto `[height - bottom, top]`.
    pub fn resolve_y(&self, domains: DomainPair) -> ChartResult<Scale> {
        let (top, bottom) = (self.viewport.plot_top(), self.viewport.plot_bottom());
        if bottom <= top {
            return Err(self.invalid_viewport());
        }
        Scale::new(
            ScaleKind::Linear,
            domains.y,
            (bottom, top),
            self.y_tick_count,
        )
    }

    /// Pass-2 scale: x mapped onto `[left + gutter, width - right]`.
    pub fn resolve_x(&self, domains: DomainPair, gutter: f64) -> ChartResult<Scale> {
        let gutter = if gutter.is_finite() { gutter.max(0.0) } else { 0.0 };
        let (left, right) = (self.viewport.plot_left() + gutter, self.viewport.plot_right());
        if right <= left {
            return Err(self.invalid_viewport());
        }
        Scale::new(self.x_kind, domains.x, (left, right), self.x_tick_count)
    }

    /// Both scales for a known gutter; `Ok(None)` means no renderable domain.
    pub fn resolve(&self, gutter: f64) -> ChartResult<Option<ResolvedScales>> {
        let DomainResolution::Resolved(domains) = self.resolve_domains() else {
            return Ok(None);
        };
        let x = self.resolve_x(domains, gutter)?;
        let y = self.resolve_y(domains)?;
        Ok(Some(ResolvedScales {
            x,
            y,
            time_label_format: self.time_label_format(domains),
        }))
    }

    #[must_use]
    pub fn time_label_format(&self, domains: DomainPair) -> Option<TimeLabelFormat> {
        match self.x_kind {
            ScaleKind::Time => Some(TimeLabelFormat::for_span_millis(
                domains.x.1 - domains.x.0,
            )),
            ScaleKind::Linear => None,
        }
    }

    #[must_use]
    pub fn x_kind(&self) -> ScaleKind {
        self.x_kind
    }

    fn invalid_viewport(&self) -> ChartError {
        ChartError::InvalidViewport {
            width: self.viewport.width,
            height: self.viewport.height,
        }
    }
}

/// Positive-only data never implies a baseline above zero.
#[must_use]
pub fn apply_zero_floor((min, max): (f64, f64)) -> (f64, f64) {
    if min > 0.0 { (0.0, max) } else { (min, max) }
}

fn nice_linear_widened((min, max): (f64, f64), count: usize) -> (f64, f64) {
    let (min, max) = if min == 0.0 && max == 0.0 {
        (0.0, 1.0)
    } else {
        widen_degenerate(min, max, DEGENERATE_LINEAR_HALF_SPAN)
    };
    nice_linear(min, max, count)
}

fn widen_degenerate(min: f64, max: f64, half_span: f64) -> (f64, f64) {
    if min == max {
        (min - half_span, max + half_span)
    } else {
        (min, max)
    }
}
