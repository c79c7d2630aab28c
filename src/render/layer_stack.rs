use serde::{Deserialize, Serialize};

/// Drawing layers of a chart surface, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Grid,
    Axis,
    Series,
    /// Threshold lines and the empty-state message.
    Overlay,
}

impl CanvasLayerKind {
    /// Canonical bottom-to-top order used when composing a frame.
    pub const DRAW_ORDER: [Self; 4] = [Self::Grid, Self::Axis, Self::Series, Self::Overlay];
}
