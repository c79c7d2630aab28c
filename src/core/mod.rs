pub mod label_format;
pub mod nearest;
pub mod scale;
pub mod scale_resolver;
pub mod series;
pub mod ticks;
pub mod types;

pub use label_format::{TimeLabelFormat, format_linear_tick, format_number};
pub use nearest::{LookupPolicy, NearestPointIndex, nearest_index};
pub use scale::{LinearScale, Scale, ScaleKind};
pub use scale_resolver::{
    DEFAULT_X_TICK_COUNT, DEFAULT_Y_TICK_COUNT, DomainPair, DomainResolution, ResolvedScales,
    ScaleResolver, apply_zero_floor,
};
pub use series::{
    SeriesAccessor, SeriesConfig, SeriesConfigBuilder, SeriesPoint, SortedSeries, XEncoding,
    XValue,
};
pub use types::{Margin, Viewport};
