//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the filter directives, e.g. `ALEMBIC_LOG=debug`.
pub const LOG_ENV: &str = "ALEMBIC_LOG";

/// Install a fmt subscriber filtered by [`LOG_ENV`] (default `warn`).
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .try_init();
}
