//! Diagnostic logging setup for the `osk` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the host. The CLI installs a plain fmt subscriber on stderr.

use std::sync::OnceLock;

use crate::config::LogLevel;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install the stderr subscriber once per process. Later calls are ignored.
pub fn init_tracing(level: LogLevel) {
    let _ = TRACING_INIT.get_or_init(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level.as_tracing_level())
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
