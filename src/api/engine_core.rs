use indexmap::IndexMap;

use crate::core::{SeriesConfig, SortedSeries, Viewport, XEncoding, XValue};
use crate::interaction::HoverSessionController;
use crate::render::RenderFrame;

use super::{AxisLayout, ChartEngineConfig, FrameState, HandleArena, ViewportReactor};

/// Internal engine state used by the public facade (`ChartEngine`).
pub(super) struct EngineCore<D> {
    pub(super) config: ChartEngineConfig,
    pub(super) viewport: Viewport,
    pub(super) model: ChartModel<D>,
    /// Raw override bounds; normalized against the current encoding on use.
    pub(super) time_domain: Option<(XValue, XValue)>,
    pub(super) reactor: ViewportReactor,
    pub(super) arena: HandleArena,
    pub(super) layout: Option<AxisLayout>,
    pub(super) hover: HoverSessionController,
    pub(super) frame_state: FrameState,
    pub(super) last_frame: Option<RenderFrame>,
}

impl<D> EngineCore<D> {
    /// Override bounds in axis coordinates, ordered ascending.
    pub(super) fn resolved_time_domain(&self) -> Option<(f64, f64)> {
        let (start, end) = self.time_domain?;
        let encoding = self.model.encoding;
        let (start, end) = (encoding.normalize(start), encoding.normalize(end));
        Some((start.min(end), start.max(end)))
    }
}

/// Dataset plus its per-series sorted projections.
pub(super) struct ChartModel<D> {
    pub(super) records: Vec<D>,
    pub(super) series: IndexMap<String, SeriesConfig<D>>,
    pub(super) sorted: IndexMap<String, SortedSeries>,
    pub(super) encoding: XEncoding,
}

impl<D> ChartModel<D> {
    pub(super) fn new(series: IndexMap<String, SeriesConfig<D>>, time_scale: bool) -> Self {
        let mut model = Self {
            records: Vec::new(),
            series,
            sorted: IndexMap::new(),
            encoding: if time_scale {
                XEncoding::EpochMillis
            } else {
                XEncoding::Raw
            },
        };
        model.reindex(time_scale);
        model
    }

    /// Re-detects x encoding and re-sorts every series. Runs once per data
    /// change, never per query.
    pub(super) fn reindex(&mut self, time_scale: bool) {
        let configs: Vec<&SeriesConfig<D>> = self.series.values().collect();
        self.encoding = XEncoding::detect(&self.records, &configs, time_scale);
        self.sorted = self
            .series
            .iter()
            .map(|(key, config)| {
                (
                    key.clone(),
                    SortedSeries::resolve(&self.records, config, self.encoding),
                )
            })
            .collect();
    }

    /// Sorted series whose config is visible, in declaration order.
    pub(super) fn visible_sorted(&self) -> Vec<&SortedSeries> {
        self.series
            .iter()
            .filter(|(_, config)| config.is_visible())
            .filter_map(|(key, _)| self.sorted.get(key))
            .collect()
    }

    pub(super) fn visible_count(&self) -> usize {
        self.series.values().filter(|config| config.is_visible()).count()
    }
}
