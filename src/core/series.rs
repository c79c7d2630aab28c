use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::ticks::MILLIS_PER_SECOND;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Raw x value produced by a series accessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XValue {
    Time(DateTime<Utc>),
    Number(f64),
}

impl From<DateTime<Utc>> for XValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl From<f64> for XValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Capability interface a series exposes over its datum type.
///
/// `None` from any accessor means "undefined" for that datum.
pub trait SeriesAccessor<D>: Send + Sync {
    fn x(&self, datum: &D) -> Option<XValue>;
    fn y(&self, datum: &D) -> Option<f64>;
    fn color(&self, _datum: &D) -> Option<Color> {
        None
    }
}

type XFn<D> = Box<dyn Fn(&D) -> Option<XValue> + Send + Sync>;
type YFn<D> = Box<dyn Fn(&D) -> Option<f64> + Send + Sync>;
type ColorFn<D> = Box<dyn Fn(&D) -> Option<Color> + Send + Sync>;

/// Closure-backed [`SeriesAccessor`] assembled by [`SeriesConfigBuilder`].
pub struct FnAccessor<D> {
    x: XFn<D>,
    y: YFn<D>,
    color: Option<ColorFn<D>>,
}

impl<D> SeriesAccessor<D> for FnAccessor<D> {
    fn x(&self, datum: &D) -> Option<XValue> {
        (self.x)(datum)
    }

    fn y(&self, datum: &D) -> Option<f64> {
        (self.y)(datum)
    }

    fn color(&self, datum: &D) -> Option<Color> {
        self.color.as_ref().and_then(|color| color(datum))
    }
}

/// One declared series: identity, presentation and accessors.
pub struct SeriesConfig<D> {
    key: String,
    color: Color,
    label: Option<String>,
    accessor: Arc<dyn SeriesAccessor<D>>,
    visible: bool,
}

impl<D> Clone for SeriesConfig<D> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            color: self.color,
            label: self.label.clone(),
            accessor: Arc::clone(&self.accessor),
            visible: self.visible,
        }
    }
}

impl<D> fmt::Debug for SeriesConfig<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesConfig")
            .field("key", &self.key)
            .field("color", &self.color)
            .field("label", &self.label)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl<D: 'static> SeriesConfig<D> {
    #[must_use]
    pub fn builder(key: impl Into<String>) -> SeriesConfigBuilder<D> {
        SeriesConfigBuilder::new(key)
    }
}

impl<D> SeriesConfig<D> {
    /// Wraps a hand-written accessor implementation.
    #[must_use]
    pub fn with_accessor(
        key: impl Into<String>,
        color: Color,
        accessor: Arc<dyn SeriesAccessor<D>>,
    ) -> Self {
        Self {
            key: key.into(),
            color,
            label: None,
            accessor,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Display label, falling back to the key.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn accessor(&self) -> &dyn SeriesAccessor<D> {
        self.accessor.as_ref()
    }
}

/// Builder for closure-backed series.
pub struct SeriesConfigBuilder<D> {
    key: String,
    color: Color,
    label: Option<String>,
    x: Option<XFn<D>>,
    y: Option<YFn<D>>,
    datum_color: Option<ColorFn<D>>,
    visible: bool,
}

impl<D: 'static> SeriesConfigBuilder<D> {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            color: Color::rgb(0.27, 0.51, 0.71),
            label: None,
            x: None,
            y: None,
            datum_color: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn x<F, X>(mut self, accessor: F) -> Self
    where
        F: Fn(&D) -> Option<X> + Send + Sync + 'static,
        X: Into<XValue>,
    {
        self.x = Some(Box::new(move |datum| accessor(datum).map(Into::into)));
        self
    }

    #[must_use]
    pub fn y<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&D) -> Option<f64> + Send + Sync + 'static,
    {
        self.y = Some(Box::new(accessor));
        self
    }

    #[must_use]
    pub fn datum_color<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&D) -> Option<Color> + Send + Sync + 'static,
    {
        self.datum_color = Some(Box::new(accessor));
        self
    }

    /// Finalizes the series. Missing `x` or `y` accessors are configuration
    /// errors.
    pub fn build(self) -> ChartResult<SeriesConfig<D>> {
        let x = self.x.ok_or_else(|| ChartError::MissingAccessor {
            series: self.key.clone(),
            accessor: "x",
        })?;
        let y = self.y.ok_or_else(|| ChartError::MissingAccessor {
            series: self.key.clone(),
            accessor: "y",
        })?;

        Ok(SeriesConfig {
            key: self.key,
            color: self.color,
            label: self.label,
            accessor: Arc::new(FnAccessor {
                x,
                y,
                color: self.datum_color,
            }),
            visible: self.visible,
        })
    }
}

/// How numeric x values are turned into axis coordinates for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XEncoding {
    /// Linear axis: numbers are used as-is.
    Raw,
    /// Time axis, numbers are epoch seconds.
    EpochSeconds,
    /// Time axis, numbers are epoch milliseconds.
    EpochMillis,
}

/// Numbers at or above this magnitude are treated as epoch milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

impl XEncoding {
    /// Classifies a dataset once, before indexing.
    ///
    /// Epoch seconds have at most 11 integer digits until the year 5138, so
    /// any magnitude at or above `1e11` means milliseconds. Mixed datasets
    /// resolve by their largest value.
    pub fn detect<D>(records: &[D], series: &[&SeriesConfig<D>], time_scale: bool) -> Self {
        if !time_scale {
            return Self::Raw;
        }

        let max_magnitude = series
            .iter()
            .flat_map(|config| {
                records
                    .iter()
                    .filter_map(|datum| match config.accessor().x(datum) {
                        Some(XValue::Number(value)) if value.is_finite() => Some(value.abs()),
                        _ => None,
                    })
            })
            .fold(None, |acc: Option<f64>, value| {
                Some(acc.map_or(value, |current| current.max(value)))
            });

        match max_magnitude {
            Some(magnitude) if magnitude < EPOCH_MILLIS_THRESHOLD => Self::EpochSeconds,
            _ => Self::EpochMillis,
        }
    }

    #[must_use]
    pub fn normalize(self, value: XValue) -> f64 {
        match (self, value) {
            (_, XValue::Time(time)) => time.timestamp_millis() as f64,
            (Self::EpochSeconds, XValue::Number(number)) => number * MILLIS_PER_SECOND,
            (Self::Raw | Self::EpochMillis, XValue::Number(number)) => number,
        }
    }
}

/// A datum projected into axis coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: Option<f64>,
    /// Position of the backing record in the engine's dataset.
    pub datum_index: usize,
}

/// One series' points sorted ascending by x, ready for index lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSeries {
    key: String,
    points: Vec<SeriesPoint>,
}

impl SortedSeries {
    /// Projects `records` through the series accessors and sorts the result.
    ///
    /// Records whose x is undefined or non-finite are dropped; undefined or
    /// non-finite y values are kept as gaps.
    pub fn resolve<D>(records: &[D], config: &SeriesConfig<D>, encoding: XEncoding) -> Self {
        let accessor = config.accessor();
        let mut points: Vec<SeriesPoint> = records
            .iter()
            .enumerate()
            .filter_map(|(datum_index, datum)| {
                let x = encoding.normalize(accessor.x(datum)?);
                if !x.is_finite() {
                    return None;
                }
                let y = accessor.y(datum).filter(|value| value.is_finite());
                Some(SeriesPoint { x, y, datum_index })
            })
            .collect();

        let dropped = records.len() - points.len();
        if dropped > 0 {
            debug!(series = config.key(), dropped, "dropped records without x");
        }
        points.sort_by(|left, right| left.x.total_cmp(&right.x));

        Self {
            key: config.key().to_owned(),
            points,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(min, max)` over x, `None` when empty.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.x, self.points.last()?.x))
    }

    /// `(min, max)` over defined y values.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().filter_map(|point| point.y))
    }
}

/// `(min, max)` of an iterator of finite values.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
