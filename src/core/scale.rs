use serde::{Deserialize, Serialize};

use crate::core::ticks::{TimeInterval, linear_ticks, time_ticks};
use crate::error::{ChartError, ChartResult};

/// Continuous affine mapping from a data domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel back into the domain. A zero-width range collapses onto
    /// the domain start.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Interpretation of a scale domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    /// Domain values are epoch milliseconds (UTC).
    #[default]
    Time,
    Linear,
}

/// Resolved domain/range pair for one axis.
///
/// Scales are derived values: they are rebuilt from data and viewport on every
/// generation and never patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    kind: ScaleKind,
    linear: LinearScale,
    tick_count: usize,
}

impl Scale {
    pub fn new(
        kind: ScaleKind,
        domain: (f64, f64),
        range: (f64, f64),
        tick_count: usize,
    ) -> ChartResult<Self> {
        Ok(Self {
            kind,
            linear: LinearScale::new(domain, range)?,
            tick_count,
        })
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn tick_count(self) -> usize {
        self.tick_count
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        self.linear.map(value)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    /// Same domain mapped onto a different pixel range.
    pub fn with_range(self, range: (f64, f64)) -> ChartResult<Self> {
        Self::new(self.kind, self.domain(), range, self.tick_count)
    }

    /// Tick values for the scale's target tick count, ascending.
    #[must_use]
    pub fn ticks(self) -> Vec<f64> {
        let (start, end) = self.domain();
        match self.kind {
            ScaleKind::Linear => linear_ticks(start, end, self.tick_count),
            ScaleKind::Time => match TimeInterval::for_span(start, end, self.tick_count) {
                Some(interval) => time_ticks(start, end, interval),
                None => linear_ticks(start, end, self.tick_count),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, Scale, ScaleKind};

    #[test]
    fn inverted_range_maps_high_values_to_top() {
        let scale = LinearScale::new((0.0, 100.0), (400.0, 20.0)).expect("valid scale");
        assert_eq!(scale.map(0.0), 400.0);
        assert_eq!(scale.map(100.0), 20.0);
        assert_eq!(scale.invert(210.0), 50.0);
    }

    #[test]
    fn zero_width_domain_is_rejected() {
        assert!(LinearScale::new((3.0, 3.0), (0.0, 10.0)).is_err());
        assert!(Scale::new(ScaleKind::Linear, (f64::NAN, 1.0), (0.0, 1.0), 5).is_err());
    }
}
