use indexmap::IndexMap;
use tracing::debug;

use crate::core::SeriesConfig;
use crate::error::{ChartError, ChartResult};
use crate::interaction::HoverSessionController;
use crate::render::Renderer;

use super::engine_core::{ChartModel, EngineCore};
use super::{ChartEngine, ChartEngineConfig, FrameState, HandleArena, ReactorSource, ViewportReactor};

impl<R: Renderer, D> ChartEngine<R, D> {
    /// Creates an engine with an empty dataset and a redraw pending.
    ///
    /// Fails on invalid configuration or duplicate series keys. Missing
    /// accessors are rejected earlier, by `SeriesConfigBuilder::build`.
    pub fn new(
        renderer: R,
        config: ChartEngineConfig,
        series: Vec<SeriesConfig<D>>,
    ) -> ChartResult<Self> {
        config.validate()?;

        let mut declared = IndexMap::with_capacity(series.len());
        for entry in series {
            let key = entry.key().to_owned();
            if declared.contains_key(&key) {
                return Err(ChartError::DuplicateSeries(key));
            }
            declared.insert(key, entry);
        }

        let viewport = config.initial_viewport();
        let mut reactor = ViewportReactor::new();
        reactor.notify(ReactorSource::Data);
        debug!(
            series = declared.len(),
            width = viewport.width,
            height = viewport.height,
            "chart engine created"
        );

        Ok(Self {
            renderer,
            core: EngineCore {
                model: ChartModel::new(declared, config.time_scale),
                hover: HoverSessionController::new(config.hover_debounce()),
                viewport,
                time_domain: None,
                reactor,
                arena: HandleArena::default(),
                layout: None,
                frame_state: FrameState::Pending,
                last_frame: None,
                config,
            },
        })
    }

    /// Same as [`ChartEngine::new`] followed by [`ChartEngine::set_data`].
    pub fn with_data(
        renderer: R,
        config: ChartEngineConfig,
        series: Vec<SeriesConfig<D>>,
        records: Vec<D>,
    ) -> ChartResult<Self> {
        let mut engine = Self::new(renderer, config, series)?;
        engine.set_data(records);
        Ok(engine)
    }
}
