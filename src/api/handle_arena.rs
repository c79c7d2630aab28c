use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Viewport;
use crate::render::{CanvasLayerKind, LayerPrimitives, RenderFrame};

/// Generation-scoped reference to one drawing handle.
///
/// Ids from an earlier generation never resolve once a newer generation has
/// started, even if the slot index is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandleId {
    pub generation: u64,
    pub slot: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct HandleSlot {
    layer: CanvasLayerKind,
    primitives: LayerPrimitives,
}

/// Drawing handles exclusively owned by one engine instance.
#[derive(Debug, Clone, Default)]
pub struct HandleArena {
    generation: u64,
    viewport: Viewport,
    slots: Vec<HandleSlot>,
}

impl HandleArena {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots.len()
    }

    /// Viewport the live generation was laid out for.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Tears down every handle of the previous generation and starts
    /// accepting handles for `generation`. Returns the number torn down.
    pub fn begin_generation(&mut self, generation: u64, viewport: Viewport) -> usize {
        let torn_down = self.teardown();
        self.generation = generation;
        self.viewport = viewport;
        torn_down
    }

    pub fn insert(&mut self, layer: CanvasLayerKind, primitives: LayerPrimitives) -> HandleId {
        let slot = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(HandleSlot { layer, primitives });
        HandleId {
            generation: self.generation,
            slot,
        }
    }

    #[must_use]
    pub fn get(&self, id: HandleId) -> Option<(CanvasLayerKind, &LayerPrimitives)> {
        if id.generation != self.generation {
            return None;
        }
        let slot = self.slots.get(usize::try_from(id.slot).ok()?)?;
        Some((slot.layer, &slot.primitives))
    }

    /// Drops every live handle. Used on redraw and when the engine unmounts.
    pub fn teardown(&mut self) -> usize {
        let count = self.slots.len();
        if count > 0 {
            trace!(generation = self.generation, count, "tearing down handles");
        }
        self.slots.clear();
        count
    }

    /// Flattens live handles into one frame, bottom layer first.
    #[must_use]
    pub fn compose_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for layer in CanvasLayerKind::DRAW_ORDER {
            for slot in self.slots.iter().filter(|slot| slot.layer == layer) {
                frame.extend_from_layer(&slot.primitives);
            }
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::HandleArena;
    use crate::core::Viewport;
    use crate::render::{CanvasLayerKind, Color, LayerPrimitives, LinePrimitive};

    fn one_line(x: f64) -> LayerPrimitives {
        LayerPrimitives {
            lines: vec![LinePrimitive::new(x, 0.0, x, 10.0, 1.0, Color::rgb(0.0, 0.0, 0.0))],
            ..LayerPrimitives::default()
        }
    }

    #[test]
    fn stale_handles_stop_resolving_after_new_generation() {
        let mut arena = HandleArena::default();
        arena.begin_generation(1, Viewport::new(100, 100));
        let old = arena.insert(CanvasLayerKind::Series, one_line(1.0));
        assert!(arena.get(old).is_some());

        assert_eq!(arena.begin_generation(2, Viewport::new(100, 100)), 1);
        let fresh = arena.insert(CanvasLayerKind::Series, one_line(2.0));
        assert_eq!(fresh.slot, old.slot);
        assert!(arena.get(old).is_none());
        assert!(arena.get(fresh).is_some());
    }

    #[test]
    fn compose_follows_layer_order_not_insertion_order() {
        let mut arena = HandleArena::default();
        arena.begin_generation(1, Viewport::new(100, 100));
        arena.insert(CanvasLayerKind::Overlay, one_line(3.0));
        arena.insert(CanvasLayerKind::Grid, one_line(1.0));
        arena.insert(CanvasLayerKind::Series, one_line(2.0));

        let frame = arena.compose_frame();
        let xs: Vec<f64> = frame.lines.iter().map(|line| line.x1).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }
}
