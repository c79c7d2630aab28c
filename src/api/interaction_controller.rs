use std::time::Instant;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ticks::tick_step;
use crate::core::{LookupPolicy, SeriesConfig, SortedSeries, format_linear_tick, nearest_index};
use crate::interaction::{
    DebounceTimer, HoverState, HoverTransition, ResolvedDatum, ResolvedDatumSet,
};
use crate::render::{Color, Renderer};

use super::{AxisLayout, ChartEngine};

/// One series' entry in the tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipValue {
    pub key: String,
    pub label: String,
    pub color: Color,
    /// `None` when the resolved datum has no y value.
    pub value: Option<f64>,
    pub x: f64,
    pub y_px: Option<f64>,
    pub datum_index: usize,
}

/// Pull-based tooltip snapshot, available only while the session is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    /// X of the resolved datum closest to the pointer.
    pub timestamp: f64,
    pub x_px: f64,
    /// `timestamp` formatted with the active axis format.
    pub label: String,
    pub values: Vec<TooltipValue>,
}

impl<R: Renderer, D> ChartEngine<R, D> {
    pub fn pointer_enter(&mut self, x: f64, y: f64) -> HoverTransition {
        self.core.hover.on_enter(x, y, self.core.viewport)
    }

    /// Resolves one datum per visible series under the current scales.
    ///
    /// Nothing resolves while a redraw is pending; the session stays armed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> HoverTransition {
        let core = &mut self.core;
        let policy = core.config.lookup_policy.unwrap_or_else(|| {
            if core.model.visible_count() == 1 {
                LookupPolicy::Left
            } else {
                LookupPolicy::Center
            }
        });
        // Until the pending generation is applied the layout describes data
        // or a viewport that no longer exists.
        let layout = if core.reactor.needs_redraw() {
            None
        } else {
            core.layout.as_ref()
        };
        let series = &core.model.series;
        let sorted = &core.model.sorted;

        core.hover.on_move(x, y, core.viewport, |pointer_x, _| {
            resolve_datums(layout, series, sorted, policy, pointer_x)
        })
    }

    pub fn pointer_leave(&mut self, now: Instant) -> HoverTransition {
        self.core.hover.on_leave(now)
    }

    /// Fires the dismissal timer if it is due.
    pub fn poll_hover(&mut self, now: Instant) -> HoverTransition {
        self.core.hover.poll(now)
    }

    /// For hosts that schedule real timers from [`Self::pending_hover_timer`].
    pub fn fire_hover_timer(&mut self, token: u64, now: Instant) -> HoverTransition {
        self.core.hover.fire_timer(token, now)
    }

    #[must_use]
    pub fn pending_hover_timer(&self) -> Option<DebounceTimer> {
        self.core.hover.pending_timer()
    }

    /// Resolved data of the live session, empty unless active.
    #[must_use]
    pub fn resolved_data(&self) -> &[ResolvedDatum] {
        match self.core.hover.session() {
            Some(session) if session.state() == HoverState::Active => session.resolved(),
            _ => &[],
        }
    }

    /// Backing record resolved for `key` in the active session.
    #[must_use]
    pub fn hovered_datum(&self, key: &str) -> Option<&D> {
        let resolved = self
            .resolved_data()
            .iter()
            .find(|datum| datum.series_key == key)?;
        self.core.model.records.get(resolved.datum_index)
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipState> {
        let session = self.core.hover.session()?;
        if session.state() != HoverState::Active {
            return None;
        }
        let layout = self.core.layout.as_ref()?;
        let (pointer_x, _) = session.pointer();

        let nearest = session
            .resolved()
            .iter()
            .min_by_key(|datum| OrderedFloat((layout.x_scale.map(datum.x) - pointer_x).abs()))?;
        let timestamp = nearest.x;

        let values = session
            .resolved()
            .iter()
            .filter_map(|datum| {
                let config = self.core.model.series.get(&datum.series_key)?;
                let color = self
                    .core
                    .model
                    .records
                    .get(datum.datum_index)
                    .and_then(|record| config.accessor().color(record))
                    .unwrap_or_else(|| config.color());
                Some(TooltipValue {
                    key: datum.series_key.clone(),
                    label: config.label().to_owned(),
                    color,
                    value: datum.y,
                    x: datum.x,
                    y_px: datum.y.map(|value| layout.y_scale.map(value)),
                    datum_index: datum.datum_index,
                })
            })
            .collect();

        Some(TooltipState {
            timestamp,
            x_px: layout.x_scale.map(timestamp),
            label: format_x_label(layout, timestamp),
            values,
        })
    }
}

fn resolve_datums<D>(
    layout: Option<&AxisLayout>,
    series: &IndexMap<String, SeriesConfig<D>>,
    sorted: &IndexMap<String, SortedSeries>,
    policy: LookupPolicy,
    pointer_x: f64,
) -> ResolvedDatumSet {
    let Some(layout) = layout else {
        return ResolvedDatumSet::new();
    };
    let query = layout.x_scale.invert(pointer_x);

    series
        .iter()
        .filter(|(_, config)| config.is_visible())
        .filter_map(|(key, _)| {
            let points = sorted.get(key)?.points();
            let point_index = nearest_index(points, query, policy, |point| point.x)?;
            let point = points[point_index];
            Some(ResolvedDatum {
                series_key: key.clone(),
                point_index,
                datum_index: point.datum_index,
                x: point.x,
                y: point.y,
            })
        })
        .collect()
}

fn format_x_label(layout: &AxisLayout, x: f64) -> String {
    match layout.time_label_format {
        Some(format) => format.format(x),
        None => {
            let (start, end) = layout.x_scale.domain();
            format_linear_tick(x, tick_step(start, end, layout.x_scale.tick_count()))
        }
    }
}
