//! Tracing setup
//!
//! Logs go to stderr so report output on stdout stays clean for piping.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive string
pub const LOG_ENV_VAR: &str = "CASHFLOW_LOG";

static TRACING_INIT: Once = Once::new();

/// Map the number of `-v` flags to a default level directive
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "course_cashflow=warn",
        1 => "course_cashflow=info",
        _ => "course_cashflow=debug",
    }
}

/// Initializes the global tracing subscriber.
///
/// `CASHFLOW_LOG` wins over the verbosity flag when it is set and parses.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
