use tracing::{debug, warn};

use crate::core::{ScaleResolver, Viewport};
use crate::error::ChartResult;
use crate::interaction::TeardownReason;
use crate::render::{CanvasLayerKind, LayerPrimitives, RenderFrame, Renderer};

use super::axis_render_frame_builder::{build_axis_layer, build_grid_layer};
use super::overlay_render_frame_builder::{build_empty_state_layer, build_threshold_layer};
use super::series_render_frame_builder::{SeriesStroke, build_series_layer};
use super::{AxisLayout, AxisLayoutEngine, ChartEngine, FrameState, RedrawTicket};

/// Scene computed for one generation, not yet written to drawing handles.
///
/// Holding one has no side effects: dropping it, or applying it after a newer
/// generation started, changes nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRedraw {
    ticket: RedrawTicket,
    viewport: Viewport,
    layout: Option<AxisLayout>,
    layers: Vec<(CanvasLayerKind, LayerPrimitives)>,
}

impl PreparedRedraw {
    #[must_use]
    pub fn ticket(&self) -> RedrawTicket {
        self.ticket
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.ticket.generation()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn layout(&self) -> Option<&AxisLayout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn is_empty_state(&self) -> bool {
        self.layout.is_none()
    }

    /// Flattens the prepared layers into one frame, bottom layer first.
    #[must_use]
    pub fn compose_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for kind in CanvasLayerKind::DRAW_ORDER {
            for (_, primitives) in self.layers.iter().filter(|(layer, _)| *layer == kind) {
                frame.extend_from_layer(primitives);
            }
        }
        frame
    }
}

impl<R: Renderer, D> ChartEngine<R, D> {
    /// Computes the scene for the latest generation.
    ///
    /// Returns `None` when nothing changed since the last applied generation,
    /// or when layout failed; a failed generation is logged and consumed
    /// without effects so the previous frame stays visible.
    pub fn prepare_redraw(&mut self) -> Option<PreparedRedraw> {
        if !self.core.reactor.needs_redraw() {
            return None;
        }
        let ticket = self.core.reactor.begin_redraw();
        match self.build_scene(ticket) {
            Ok(prepared) => Some(prepared),
            Err(err) => {
                warn!(
                    error = %err,
                    generation = ticket.generation(),
                    "skipping redraw generation"
                );
                self.core.reactor.commit(ticket);
                None
            }
        }
    }

    /// Writes a prepared scene to the drawing handles if its generation is
    /// still current. Returns `false` for superseded scenes.
    ///
    /// Applying tears down every handle of the previous generation and forces
    /// the hover session back to idle.
    pub fn apply_redraw(&mut self, prepared: PreparedRedraw) -> bool {
        if !self.core.reactor.is_current(prepared.ticket) {
            debug!(
                generation = prepared.generation(),
                current = self.core.reactor.generation(),
                "dropping superseded scene"
            );
            return false;
        }

        let PreparedRedraw {
            ticket,
            viewport,
            layout,
            layers,
        } = prepared;
        self.core.arena.begin_generation(ticket.generation(), viewport);
        for (layer, primitives) in layers {
            self.core.arena.insert(layer, primitives);
        }
        self.core.frame_state = if layout.is_some() {
            FrameState::Rendered
        } else {
            FrameState::Empty
        };
        self.core.layout = layout;
        self.core.hover.force_idle(TeardownReason::Superseded);
        self.core.reactor.commit(ticket);
        debug!(
            generation = ticket.generation(),
            handles = self.core.arena.live_count(),
            frame_state = ?self.core.frame_state,
            "redraw applied"
        );
        true
    }

    /// Host animation-frame callback: prepares, renders and applies the
    /// latest generation. Returns whether a new frame reached the renderer.
    ///
    /// The renderer sees the frame before any engine state changes. When it
    /// fails, handles, layout and hover stay on the previous frame and the
    /// generation remains pending for the next callback.
    pub fn on_animation_frame(&mut self) -> bool {
        let Some(prepared) = self.prepare_redraw() else {
            return false;
        };

        let frame = prepared.compose_frame();
        if let Err(err) = self.renderer.render(&frame) {
            warn!(
                error = %err,
                generation = prepared.generation(),
                "renderer rejected frame; keeping previous frame"
            );
            self.core.reactor.abandon();
            return false;
        }
        if !self.apply_redraw(prepared) {
            return false;
        }
        self.core.last_frame = Some(frame);
        true
    }

    /// Releases every drawing handle and the hover session.
    pub fn unmount(&mut self) {
        self.core.reactor.abandon();
        let torn_down = self.core.arena.teardown();
        self.core.hover.force_idle(TeardownReason::Superseded);
        debug!(torn_down, "chart unmounted");
    }

    fn build_scene(&self, ticket: RedrawTicket) -> ChartResult<PreparedRedraw> {
        let viewport = self.core.viewport;
        let config = &self.core.config;
        let style = config.axis_style;

        let visible = self.core.model.visible_sorted();
        let resolver = ScaleResolver::new(&visible, viewport, self.x_kind())
            .with_time_domain_override(self.core.resolved_time_domain())
            .with_tick_counts(config.x_ticks.resolve(), config.y_ticks);
        let layout = AxisLayoutEngine::new(&self.renderer, style).layout(&resolver)?;

        let layers = match &layout {
            None => vec![(
                CanvasLayerKind::Overlay,
                build_empty_state_layer(viewport, style),
            )],
            Some(layout) => {
                let strokes: Vec<SeriesStroke<'_>> = self
                    .core
                    .model
                    .series
                    .iter()
                    .filter(|(_, series)| series.is_visible())
                    .filter_map(|(key, series)| {
                        self.core.model.sorted.get(key).map(|sorted| SeriesStroke {
                            color: series.color(),
                            points: sorted.points(),
                        })
                    })
                    .collect();
                vec![
                    (CanvasLayerKind::Grid, build_grid_layer(layout, style)),
                    (
                        CanvasLayerKind::Axis,
                        build_axis_layer(layout, viewport, style),
                    ),
                    (
                        CanvasLayerKind::Series,
                        build_series_layer(
                            &strokes,
                            layout.x_scale,
                            layout.y_scale,
                            style.series_stroke_width,
                        ),
                    ),
                    (
                        CanvasLayerKind::Overlay,
                        build_threshold_layer(layout, &config.thresholds, style),
                    ),
                ]
            }
        };

        Ok(PreparedRedraw {
            ticket,
            viewport,
            layout,
            layers: layers
                .into_iter()
                .filter(|(_, primitives)| !primitives.is_empty())
                .collect(),
        })
    }
}
