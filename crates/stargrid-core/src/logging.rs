#![forbid(unsafe_code)]

//! Logging bootstrap.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! host's call. With the `tracing-json` feature this module provides a
//! one-line JSON subscriber filtered by [`LOG_ENV`].

/// Environment variable holding the `EnvFilter` directive.
pub const LOG_ENV: &str = "STARGRID_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "warn,stargrid_widgets=info";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_already_installed() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
    }
}
