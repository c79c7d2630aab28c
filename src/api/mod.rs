mod axis_layout;
mod axis_render_frame_builder;
mod data_controller;
mod engine;
mod engine_config;
mod engine_core;
mod engine_init;
mod handle_arena;
mod interaction_controller;
mod overlay_render_frame_builder;
mod redraw_scheduler;
mod series_render_frame_builder;
mod viewport_reactor;

pub use axis_layout::{AxisLayout, AxisLayoutEngine, AxisTick};
pub use engine::{ChartEngine, FrameState};
pub use engine_config::{AxisStyle, ChartEngineConfig, Threshold, XTicks, XTicksRepr};
pub use handle_arena::{HandleArena, HandleId};
pub use interaction_controller::{TooltipState, TooltipValue};
pub use redraw_scheduler::PreparedRedraw;
pub use viewport_reactor::{ReactorSource, RedrawTicket, ViewportReactor};
