//! Logging initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize console logging on stderr. `RUST_LOG` wins when set; otherwise
/// the verbosity flag picks the default level.
pub fn init_telemetry(verbosity: u8) {
    INIT.call_once(|| {
        let default_level = match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_level))
            .expect("Failed to create env filter");

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    });
}
