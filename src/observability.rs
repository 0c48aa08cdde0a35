//! Logging initialization.
//!
//! The engine logs through `tracing`; embedding applications (and tests
//! that want to see the engine's decisions) install a subscriber with
//! `init_logging`. `DATA_WAR_LOG` overrides the verbosity, using the usual
//! `EnvFilter` syntax (`DATA_WAR_LOG=data_war::game=debug`).

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity.
pub const LOG_ENV: &str = "DATA_WAR_LOG";

/// Maps a verbosity level to a tracing directive.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"`
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber, writing to stderr.
///
/// Uses `try_init()`, so calling this more than once is harmless.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}
