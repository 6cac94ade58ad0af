//! Process-wide tracing setup for vitrine binaries.

use std::sync::OnceLock;

static INIT: OnceLock<()> = OnceLock::new();

/// Initialize tracing output from `VITRINE_LOG` (trace|debug|info|warn|error).
///
/// Safe to call more than once; only the first call installs the subscriber.
/// Intentionally best-effort: an unparseable level falls back to `info` and a
/// failed install is ignored rather than surfaced.
pub fn init() {
    INIT.get_or_init(|| {
        let level = std::env::var("VITRINE_LOG")
            .ok()
            .and_then(|value| value.parse::<tracing::Level>().ok())
            .unwrap_or(tracing::Level::INFO);
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init();
    });
}
