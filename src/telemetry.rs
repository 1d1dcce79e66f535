//! Telemetry helpers for applications embedding `chart-view`.
//!
//! Adapter failures that are contained rather than returned surface as
//! `warn` events, so hosts relying on the default error policy want a
//! subscriber installed. Consumers can either call `init_default_tracing`
//! or wire their own `tracing` subscriber and filters.

/// Filter used when `RUST_LOG` is unset: contained chart failures only.
pub const DEFAULT_TRACING_FILTER: &str = "chart_view=warn";

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, falling
/// back to [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or the host
/// already set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_TRACING_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_targets_this_crate() {
        assert!(DEFAULT_TRACING_FILTER.starts_with(env!("CARGO_CRATE_NAME")));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn default_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_TRACING_FILTER).is_ok());
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn init_is_a_noop_without_the_feature() {
        assert!(!init_default_tracing());
    }
}
