use chart_reactor::api::{ChartEngine, ChartEngineConfig, FrameState};
use chart_reactor::core::SeriesConfig;
use chart_reactor::interaction::{HoverState, HoverTransition};
use chart_reactor::render::NullRenderer;
use chart_reactor::ChartError;

#[derive(Debug, Clone, PartialEq)]
struct Reading {
    at: f64,
    value: Option<f64>,
}

fn reading_series() -> SeriesConfig<Reading> {
    SeriesConfig::builder("reading")
        .x(|reading: &Reading| Some(reading.at))
        .y(|reading: &Reading| reading.value)
        .build()
        .expect("series with both accessors")
}

fn empty_engine() -> ChartEngine<NullRenderer, Reading> {
    let config = ChartEngineConfig::new(480, 320).with_time_scale(false);
    ChartEngine::new(NullRenderer::default(), config, vec![reading_series()])
        .expect("engine init")
}

#[test]
fn empty_dataset_renders_only_the_empty_state() {
    let mut engine = empty_engine();
    assert_eq!(engine.frame_state(), FrameState::Pending);
    assert!(engine.needs_redraw());

    assert!(engine.on_animation_frame());
    assert_eq!(engine.frame_state(), FrameState::Empty);
    assert!(engine.axis_layout().is_none());

    let frame = engine.current_frame().expect("frame rendered");
    assert!(frame.lines.is_empty());
    assert!(frame.paths.is_empty());
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "No data");
}

#[test]
fn data_after_empty_state_resolves_on_next_generation() {
    let mut engine = empty_engine();
    assert!(engine.on_animation_frame());
    let empty_generation = engine.generation();

    engine.set_data(vec![
        Reading {
            at: 0.0,
            value: Some(4.0),
        },
        Reading {
            at: 10.0,
            value: Some(9.0),
        },
    ]);
    assert!(engine.on_animation_frame());

    assert_eq!(engine.generation(), empty_generation + 1);
    assert_eq!(engine.frame_state(), FrameState::Rendered);
    let layout = engine.axis_layout().expect("renderable");
    assert_eq!(layout.y_scale.domain(), (0.0, 10.0));
    assert_eq!(layout.x_scale.domain(), (0.0, 10.0));
    assert_eq!(engine.renderer().last_path_count, 1);
}

#[test]
fn all_undefined_values_are_an_empty_state_not_an_error() {
    let mut engine = empty_engine();
    engine.set_data(vec![
        Reading { at: 1.0, value: None },
        Reading { at: 2.0, value: None },
    ]);
    assert!(engine.on_animation_frame());
    assert_eq!(engine.frame_state(), FrameState::Empty);
}

#[test]
fn hover_stays_armed_without_a_layout() {
    let mut engine = empty_engine();
    assert!(engine.on_animation_frame());
    assert_eq!(engine.pointer_move(200.0, 100.0), HoverTransition::Unchanged);
    assert_eq!(engine.hover_state(), HoverState::Armed);
    assert!(engine.tooltip().is_none());
}

#[test]
fn duplicate_series_keys_are_rejected_at_construction() {
    let config = ChartEngineConfig::new(480, 320);
    let result = ChartEngine::<NullRenderer, Reading>::new(
        NullRenderer::default(),
        config,
        vec![reading_series(), reading_series()],
    );
    assert!(matches!(result, Err(ChartError::DuplicateSeries(key)) if key == "reading"));
}

#[test]
fn unmount_releases_every_handle() {
    let mut engine = empty_engine();
    engine.set_data(vec![Reading {
        at: 3.0,
        value: Some(1.0),
    }]);
    assert!(engine.on_animation_frame());
    assert!(engine.live_handle_count() > 0);

    engine.unmount();
    assert_eq!(engine.live_handle_count(), 0);
    assert_eq!(engine.hover_state(), HoverState::Idle);
}

#[test]
fn time_override_set_before_data_follows_the_loaded_encoding() {
    const START_SECONDS: f64 = 1_700_000_000.0;
    let config = ChartEngineConfig::new(480, 320);
    let mut engine = ChartEngine::new(NullRenderer::default(), config, vec![reading_series()])
        .expect("engine init");
    engine
        .set_time_domain(START_SECONDS, START_SECONDS + 36_000.0)
        .expect("finite, non-empty domain");

    engine.set_data(
        (0..=20)
            .map(|step| Reading {
                at: START_SECONDS + f64::from(step) * 1_800.0,
                value: Some(f64::from(step)),
            })
            .collect(),
    );
    let pinned = (START_SECONDS * 1_000.0, (START_SECONDS + 36_000.0) * 1_000.0);
    assert_eq!(engine.time_domain(), Some(pinned));

    assert!(engine.on_animation_frame());
    let layout = engine.axis_layout().expect("renderable");
    assert_eq!(layout.x_scale.domain(), pinned);

    let (left, right) = layout.x_scale.range();
    let frame = engine.current_frame().expect("frame rendered");
    assert_eq!(frame.paths.len(), 1);
    assert!(
        frame.paths[0]
            .points
            .iter()
            .all(|(x, _)| *x >= left - 1e-9 && *x <= right + 1e-9)
    );
}
