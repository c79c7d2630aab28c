use chart_reactor::api::{ChartEngine, ChartEngineConfig, ReactorSource, ViewportReactor};
use chart_reactor::core::SeriesConfig;
use chart_reactor::render::NullRenderer;

type Sample = (f64, f64);

fn engine_with_data() -> ChartEngine<NullRenderer, Sample> {
    let series = SeriesConfig::builder("value")
        .x(|record: &Sample| Some(record.0))
        .y(|record: &Sample| Some(record.1))
        .build()
        .expect("series with both accessors");
    let config = ChartEngineConfig::new(400, 300).with_time_scale(false);
    let records = (0..20).map(|i| (f64::from(i), f64::from(i * i))).collect();
    let mut engine = ChartEngine::with_data(NullRenderer::default(), config, vec![series], records)
        .expect("engine init");
    assert!(engine.on_animation_frame());
    engine
}

#[test]
fn only_the_latest_resize_reaches_drawing_handles() {
    let mut engine = engine_with_data();

    engine.resize(500, 300).expect("v1");
    let v1 = engine.prepare_redraw().expect("v1 scene");
    engine.resize(600, 300).expect("v2");
    let v2 = engine.prepare_redraw().expect("v2 scene");
    engine.resize(700, 300).expect("v3");
    let v3 = engine.prepare_redraw().expect("v3 scene");

    assert!(!engine.apply_redraw(v1));
    assert!(!engine.apply_redraw(v2));
    let v3_generation = v3.generation();
    assert!(engine.apply_redraw(v3));

    assert_eq!(engine.committed_generation(), Some(v3_generation));
    let layout = engine.axis_layout().expect("renderable");
    assert_eq!(layout.x_scale.range().1, 700.0 - 30.0);
}

#[test]
fn superseded_scene_applied_late_changes_nothing() {
    let mut engine = engine_with_data();

    engine.resize(500, 300).expect("v1");
    let stale = engine.prepare_redraw().expect("v1 scene");
    engine.resize(800, 300).expect("v2");
    assert!(engine.on_animation_frame());
    let handles = engine.live_handle_count();

    assert!(!engine.apply_redraw(stale));
    assert_eq!(engine.live_handle_count(), handles);
    let frame = engine.current_frame().expect("rendered");
    assert_eq!(frame.viewport.width, 800);
}

#[test]
fn burst_of_resizes_renders_once() {
    let mut engine = engine_with_data();
    let before = engine.renderer().render_count;

    for width in [410, 420, 430, 440] {
        engine.resize(width, 300).expect("resize");
    }
    assert!(engine.on_animation_frame());
    assert!(!engine.on_animation_frame());

    assert_eq!(engine.renderer().render_count, before + 1);
    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.viewport.width, 440);
}

#[test]
fn sources_merge_into_one_generation() {
    let mut engine = engine_with_data();

    engine.resize(520, 300).expect("resize");
    engine.set_data(vec![(0.0, 1.0), (1.0, 2_000.0)]);
    assert!(engine.on_animation_frame());

    let layout = engine.axis_layout().expect("renderable");
    assert_eq!(layout.x_scale.range().1, 520.0 - 30.0);
    assert_eq!(layout.y_scale.domain(), (0.0, 2_000.0));
}

#[test]
fn unchanged_resize_does_not_schedule_work() {
    let mut engine = engine_with_data();
    let generation = engine.generation();
    engine.resize(400, 300).expect("same size");
    assert_eq!(engine.generation(), generation);
    assert!(!engine.needs_redraw());
    assert!(engine.resize(0, 300).is_err());
}

#[test]
fn reactor_tracks_each_source_independently() {
    let mut reactor = ViewportReactor::new();
    reactor.notify(ReactorSource::Resize);
    reactor.notify(ReactorSource::Resize);
    reactor.notify(ReactorSource::TimeRange);

    assert_eq!(reactor.generation(), 3);
    assert_eq!(reactor.source_generation(ReactorSource::Resize), 2);
    assert_eq!(reactor.source_generation(ReactorSource::Data), 0);
    assert_eq!(reactor.source_generation(ReactorSource::TimeRange), 1);

    let ticket = reactor.begin_redraw();
    assert!(reactor.commit(ticket));
    assert!(!reactor.needs_redraw());
    assert!(reactor.pending_sources().is_empty());
    assert!(!reactor.commit(ticket));
}
