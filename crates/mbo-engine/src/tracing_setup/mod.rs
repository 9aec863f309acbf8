//! Tracing setup: subscriber initialization and span definitions.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mbo_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Environment variable consulted before the configured level.
pub const LOG_ENV: &str = "MBO_LOG";

/// Initialize the global subscriber.
///
/// `MBO_LOG` takes precedence over `log_level`, e.g.
/// `MBO_LOG=mbo_calibration=debug,info`. Idempotent.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let (json, plain) = if config.json {
            (
                Some(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_current_span(true),
                ),
                None,
            )
        } else {
            (
                None,
                Some(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                ),
            )
        };

        if tracing_subscriber::registry()
            .with(filter)
            .with(json)
            .with(plain)
            .try_init()
            .is_err()
        {
            tracing::debug!("global subscriber already installed");
        }
    });
}
