//! Opt-in tracing setup for hosts embedding `landing-rs`.
//!
//! The controller only emits `tracing` events. Hosts that already own a
//! subscriber can ignore this module entirely.

/// Filter used when `RUST_LOG` is absent.
pub const DEFAULT_FILTER: &str = "landing_rs=info";

/// Installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`
/// (falling back to [`DEFAULT_FILTER`]).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback directive.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_directive));
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
