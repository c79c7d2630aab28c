//! Tracing bootstrap for hosts embedding `chart-reactor`.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host. These helpers exist for demos and quick diagnostics.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `info` when the variable is unset.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Same as [`init_default_tracing`] but with an explicit fallback directive,
/// e.g. `"chart_reactor=debug"`.
#[must_use]
pub fn init_tracing_with_filter(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
