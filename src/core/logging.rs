//! Logging Initialization
//!
//! Structured logging via `tracing`, configured once at startup. The filter
//! comes from `RUST_LOG` and falls back to `info` for this crate.

use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize the logging system.
///
/// Safe to call more than once; only the first call installs the
/// subscriber (tests may race to initialize).
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("artisan_crm=info,warn"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr);

        // Ignore the error if a subscriber is already set (e.g. by a test
        // harness).
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
}
