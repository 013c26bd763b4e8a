use std::{io, sync::Once};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "tasting_core=info";

/// Installs the global tracing subscriber. Logs go to stderr; `RUST_LOG`
/// overrides the default directive.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    });
}
