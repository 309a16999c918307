use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. `RUST_LOG` directives are
/// honoured on top of a default of `qada_core=info`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "qada_core=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
        let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    });
}
