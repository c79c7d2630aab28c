use chart_reactor::ChartError;
use chart_reactor::api::{ChartEngine, ChartEngineConfig};
use chart_reactor::core::SeriesConfig;
use chart_reactor::error::ChartResult;
use chart_reactor::interaction::{HoverState, HoverTransition};
use chart_reactor::render::{RenderFrame, Renderer, TextMeasurer, estimate_label_text_width_px};

type Sample = (f64, f64);

/// Renderer that can be told to reject frames.
#[derive(Debug, Default)]
struct FlakyRenderer {
    failing: bool,
    rendered: Vec<RenderFrame>,
}

impl TextMeasurer for FlakyRenderer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        estimate_label_text_width_px(text, font_size_px)
    }
}

impl Renderer for FlakyRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        if self.failing {
            return Err(ChartError::InvalidData("surface lost".to_owned()));
        }
        self.rendered.push(frame.clone());
        Ok(())
    }
}

fn engine() -> ChartEngine<FlakyRenderer, Sample> {
    let series = SeriesConfig::builder("value")
        .x(|sample: &Sample| Some(sample.0))
        .y(|sample: &Sample| Some(sample.1))
        .build()
        .expect("series with both accessors");
    let records = (0..10).map(|i| (f64::from(i), f64::from(i * i))).collect();
    let config = ChartEngineConfig::new(400, 300).with_time_scale(false);
    let mut engine = ChartEngine::with_data(FlakyRenderer::default(), config, vec![series], records)
        .expect("engine init");
    assert!(engine.on_animation_frame());
    engine
}

#[test]
fn rejected_frame_leaves_engine_on_previous_frame() {
    let mut engine = engine();
    let layout_before = engine.axis_layout().cloned().expect("renderable");
    let committed_before = engine.committed_generation();
    let frame_before = engine.current_frame().cloned().expect("frame rendered");

    engine.renderer_mut().failing = true;
    engine.resize(800, 300).expect("valid size");
    assert!(!engine.on_animation_frame());

    assert_eq!(engine.axis_layout(), Some(&layout_before));
    assert_eq!(engine.committed_generation(), committed_before);
    assert!(engine.needs_redraw());
    assert_eq!(engine.current_frame(), Some(&frame_before));
    assert_eq!(engine.live_frame(), frame_before);
    assert_eq!(engine.live_frame().viewport.width, 400);
}

#[test]
fn rejected_generation_is_retried_on_next_frame() {
    let mut engine = engine();
    engine.renderer_mut().failing = true;
    engine.resize(800, 300).expect("valid size");
    assert!(!engine.on_animation_frame());
    assert!(!engine.on_animation_frame());
    assert_eq!(engine.renderer().rendered.len(), 1);

    engine.renderer_mut().failing = false;
    assert!(engine.on_animation_frame());
    assert!(!engine.needs_redraw());
    assert_eq!(engine.renderer().rendered.len(), 2);

    let layout = engine.axis_layout().expect("renderable");
    let frame = engine.current_frame().expect("frame rendered");
    assert_eq!(frame.viewport.width, 800);
    assert_eq!(engine.live_frame(), *frame);
    assert!(layout.x_scale.range().1 > 400.0);
}

#[test]
fn hover_survives_a_rejected_style_only_frame() {
    let mut engine = engine();
    let x = engine.axis_layout().expect("renderable").x_scale.map(4.0);
    engine.pointer_move(x, 150.0);
    assert_eq!(engine.hover_state(), HoverState::Active);

    engine.renderer_mut().failing = true;
    engine.set_thresholds(Vec::new()).expect("no thresholds");
    assert!(!engine.on_animation_frame());
    assert_eq!(engine.hover_state(), HoverState::Active);

    engine.renderer_mut().failing = false;
    assert!(engine.on_animation_frame());
    assert_eq!(engine.hover_state(), HoverState::Idle);
    assert_eq!(engine.pointer_move(x, 150.0), HoverTransition::Activated);
}
