mod hover_session;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use hover_session::{DebounceTimer, HoverSessionController};

/// Lifecycle stage of the chart's single hover session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HoverState {
    /// No pointer inside the plot.
    #[default]
    Idle,
    /// Pointer entered the target area but no datum has been resolved yet.
    Armed,
    /// One datum resolved per visible series for the current pointer position.
    Active,
    /// Pointer left; teardown is pending behind the debounce timer.
    Dismissing,
}

/// Why a session was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeardownReason {
    DebounceElapsed,
    /// Pointer left the vertical plot bounds; bypasses the debounce.
    OutOfBounds,
    /// A redraw replaced the data or layout the session referred to.
    Superseded,
}

/// Observable effect of feeding one event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverTransition {
    Unchanged,
    Armed,
    Activated,
    /// Still active, resolved data changed or was refreshed.
    Updated,
    Dismissing,
    /// Pending teardown cancelled by a re-enter.
    Rearmed,
    TornDown(TeardownReason),
}

/// Nearest datum of one series for the current pointer position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDatum {
    pub series_key: String,
    /// Index into the series' sorted points.
    pub point_index: usize,
    /// Index of the backing record in the engine's dataset.
    pub datum_index: usize,
    pub x: f64,
    pub y: Option<f64>,
}

pub type ResolvedDatumSet = SmallVec<[ResolvedDatum; 4]>;

/// Mutable state of the live session.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverSession {
    state: HoverState,
    pointer: (f64, f64),
    resolved: ResolvedDatumSet,
}

impl HoverSession {
    fn armed(pointer: (f64, f64)) -> Self {
        Self {
            state: HoverState::Armed,
            pointer,
            resolved: ResolvedDatumSet::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> HoverState {
        self.state
    }

    #[must_use]
    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    #[must_use]
    pub fn resolved(&self) -> &[ResolvedDatum] {
        &self.resolved
    }
}
