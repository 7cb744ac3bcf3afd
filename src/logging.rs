//! Logging setup built on `tracing`
//!
//! Log lines go to stderr so a report written to stdout stays clean.
//! `--verbose` enables debug output, `--quiet` keeps errors only, and
//! otherwise `RUST_LOG` (or `dsm=info`) decides.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for the given verbosity flags; `verbose` wins over `quiet`
pub fn filter_directive(verbose: bool, quiet: bool) -> Option<&'static str> {
    if verbose {
        Some("dsm=debug")
    } else if quiet {
        Some("dsm=error")
    } else {
        None
    }
}

/// Initialize the global tracing subscriber
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = match filter_directive(verbose, quiet) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dsm=info")),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}
