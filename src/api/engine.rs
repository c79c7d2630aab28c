use serde::{Deserialize, Serialize};

use crate::core::{ScaleKind, SeriesConfig, Viewport, XEncoding};
use crate::interaction::HoverState;
use crate::render::{RenderFrame, Renderer};

use super::{AxisLayout, ChartEngineConfig, Threshold, engine_core::EngineCore};

/// What the most recently applied generation put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FrameState {
    /// No generation has been applied yet.
    #[default]
    Pending,
    /// No renderable domain: only the empty-state overlay is drawn.
    Empty,
    /// Axes, grid and series are drawn.
    Rendered,
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns one chart instance: its dataset, declared series,
/// viewport, redraw reactor, drawing handles and hover session. Nothing is
/// shared across instances.
pub struct ChartEngine<R: Renderer, D> {
    pub(super) renderer: R,
    pub(super) core: EngineCore<D>,
}

impl<R: Renderer, D> ChartEngine<R, D> {
    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.core.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport
    }

    #[must_use]
    pub fn records(&self) -> &[D] {
        &self.core.model.records
    }

    #[must_use]
    pub fn series(&self, key: &str) -> Option<&SeriesConfig<D>> {
        self.core.model.series.get(key)
    }

    /// Declared series keys in declaration order.
    pub fn series_keys(&self) -> impl Iterator<Item = &str> {
        self.core.model.series.keys().map(String::as_str)
    }

    #[must_use]
    pub fn thresholds(&self) -> &[Threshold] {
        &self.core.config.thresholds
    }

    /// Pinned x domain in axis coordinates, under the current dataset's
    /// encoding.
    #[must_use]
    pub fn time_domain(&self) -> Option<(f64, f64)> {
        self.core.resolved_time_domain()
    }

    #[must_use]
    pub fn x_kind(&self) -> ScaleKind {
        if self.core.config.time_scale {
            ScaleKind::Time
        } else {
            ScaleKind::Linear
        }
    }

    /// How numeric x values of the current dataset were interpreted.
    #[must_use]
    pub fn x_encoding(&self) -> XEncoding {
        self.core.model.encoding
    }

    /// Layout of the last applied generation; `None` in the empty state.
    #[must_use]
    pub fn axis_layout(&self) -> Option<&AxisLayout> {
        self.core.layout.as_ref()
    }

    #[must_use]
    pub fn frame_state(&self) -> FrameState {
        self.core.frame_state
    }

    /// Last frame successfully handed to the renderer.
    #[must_use]
    pub fn current_frame(&self) -> Option<&RenderFrame> {
        self.core.last_frame.as_ref()
    }

    /// Frame rebuilt from the live drawing handles. Matches
    /// [`Self::current_frame`] whenever the last render succeeded.
    #[must_use]
    pub fn live_frame(&self) -> RenderFrame {
        self.core.arena.compose_frame()
    }

    /// Latest reactor generation, applied or not.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.core.reactor.generation()
    }

    #[must_use]
    pub fn committed_generation(&self) -> Option<u64> {
        self.core.reactor.committed_generation()
    }

    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.core.reactor.needs_redraw()
    }

    #[must_use]
    pub fn live_handle_count(&self) -> usize {
        self.core.arena.live_count()
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.core.hover.state()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Tears down every drawing handle and the hover session, returning the
    /// renderer to the host.
    #[must_use]
    pub fn into_renderer(mut self) -> R {
        self.unmount();
        self.renderer
    }
}
