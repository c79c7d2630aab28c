use tracing::debug;

use crate::core::XValue;
use crate::error::{ChartError, ChartResult};
use crate::interaction::TeardownReason;
use crate::render::Renderer;

use super::{ChartEngine, ReactorSource, Threshold};

impl<R: Renderer, D> ChartEngine<R, D> {
    /// Replaces the dataset.
    ///
    /// X encoding is re-detected and every series is re-sorted here, once,
    /// so hover lookups never sort. A live hover session is torn down because
    /// its datum indices refer to the replaced records.
    pub fn set_data(&mut self, records: Vec<D>) {
        let model = &mut self.core.model;
        model.records = records;
        model.reindex(self.core.config.time_scale);
        debug!(
            records = model.records.len(),
            encoding = ?model.encoding,
            "set data"
        );
        self.supersede(ReactorSource::Data);
    }

    /// Delivers a container size notification. Margins come from the config.
    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidViewport { width, height });
        }
        let viewport = self.core.config.viewport_for(width, height);
        if viewport == self.core.viewport {
            return Ok(());
        }
        self.core.viewport = viewport;
        self.supersede(ReactorSource::Resize);
        Ok(())
    }

    /// Pins the x domain, bypassing data extent and nice rounding.
    ///
    /// Bounds are kept as given. Numeric bounds on a time axis follow the
    /// seconds or milliseconds encoding of whichever dataset is loaded when
    /// the next redraw runs, so an override may be set before its data.
    pub fn set_time_domain(
        &mut self,
        start: impl Into<XValue>,
        end: impl Into<XValue>,
    ) -> ChartResult<()> {
        let (start, end) = (start.into(), end.into());
        let encoding = self.core.model.encoding;
        let (lo, hi) = (encoding.normalize(start), encoding.normalize(end));
        if !lo.is_finite() || !hi.is_finite() {
            return Err(ChartError::InvalidData(
                "time domain bounds must be finite".to_owned(),
            ));
        }
        if lo == hi {
            return Err(ChartError::InvalidData(
                "time domain must not be empty".to_owned(),
            ));
        }

        if self.core.time_domain != Some((start, end)) {
            self.core.time_domain = Some((start, end));
            self.supersede(ReactorSource::TimeRange);
        }
        Ok(())
    }

    pub fn clear_time_domain(&mut self) {
        if self.core.time_domain.take().is_some() {
            self.supersede(ReactorSource::TimeRange);
        }
    }

    pub fn set_thresholds(&mut self, thresholds: Vec<Threshold>) -> ChartResult<()> {
        if thresholds.iter().any(|threshold| !threshold.value.is_finite()) {
            return Err(ChartError::InvalidData(
                "threshold values must be finite".to_owned(),
            ));
        }
        self.core.config.thresholds = thresholds;
        self.core.reactor.notify(ReactorSource::Style);
        Ok(())
    }

    pub fn set_series_visible(&mut self, key: &str, visible: bool) -> ChartResult<()> {
        let series = self
            .core
            .model
            .series
            .get_mut(key)
            .ok_or_else(|| ChartError::UnknownSeries(key.to_owned()))?;
        if series.is_visible() != visible {
            series.set_visible(visible);
            debug!(series = key, visible, "series visibility changed");
            self.supersede(ReactorSource::Style);
        }
        Ok(())
    }

    /// Structural change: the resolved hover data no longer matches the
    /// model, so the session ends now rather than at the next applied frame.
    fn supersede(&mut self, source: ReactorSource) {
        self.core.hover.force_idle(TeardownReason::Superseded);
        self.core.reactor.notify(source);
    }
}
