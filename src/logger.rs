use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Installs the global subscriber, logging to stderr. `RUST_LOG` selects the
/// filter, `info` otherwise.
///
/// Calling it twice is harmless: the second registration is ignored.
pub fn init() {
    init_with_default("info");
}

/// Like [`init`], with `directives` used when `RUST_LOG` is unset or invalid.
pub fn init_with_default(directives: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let verbose = env_filter.max_level_hint().is_some_and(|level| level >= LevelFilter::DEBUG);

    // Span timings only when someone asked for debug output.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_timer(fmt::time::uptime())
        .with_span_events(if verbose { FmtSpan::CLOSE } else { FmtSpan::NONE });

    let _ = tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init();
}
