//! chart-reactor: reactive scale, axis and hover engine for 2D charts.
//!
//! The crate turns a dataset plus a resizable drawing surface into a
//! continuously-correct layout (scales, axes, gutter) and a debounced
//! pointer-hover session. Drawing itself is delegated to a host-supplied
//! [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
