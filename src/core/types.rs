use serde::{Deserialize, Serialize};

/// Space reserved around the plot rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }
}

/// Drawing surface size plus the margins applied to it.
///
/// Values are immutable snapshots: every resize notification produces a new
/// `Viewport` instead of mutating the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default = "Margin::zero")]
    pub margin: Margin,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margin: Margin::zero(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn plot_left(self) -> f64 {
        self.margin.left
    }

    #[must_use]
    pub fn plot_right(self) -> f64 {
        f64::from(self.width) - self.margin.right
    }

    #[must_use]
    pub fn plot_top(self) -> f64 {
        self.margin.top
    }

    #[must_use]
    pub fn plot_bottom(self) -> f64 {
        f64::from(self.height) - self.margin.bottom
    }

    /// Whether `y` lies inside `[top, height - bottom]`.
    #[must_use]
    pub fn contains_plot_y(self, y: f64) -> bool {
        y >= self.plot_top() && y <= self.plot_bottom()
    }
}
