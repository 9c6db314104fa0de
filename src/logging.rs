//! Structured logging initialization for the `rp` CLI.
//!
//! Logs always go to stderr so that stdout stays clean for profile JSON.

use std::io::{self, IsTerminal};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Default filter directive for the given verbosity flags.
///
/// `quiet` wins over `verbose`: 0 = info, 1 = debug, 2+ = trace.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "rp=error";
    }
    match verbose {
        0 => "rp=info",
        1 => "rp=debug",
        _ => "rp=trace",
    }
}

/// Initialize the tracing subscriber based on CLI flags and environment.
///
/// `RUST_LOG` overrides the directive derived from `verbose`/`quiet`.
///
/// | Mode | TTY | Output |
/// |------|-----|--------|
/// | Robot | any | JSON lines to stderr |
/// | Human | yes | Colored output to stderr |
/// | Human | no | Compact plain output to stderr |
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let base = fmt::layer()
        .with_target(robot_mode)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr);

    // try_init: a second call (tests, embedding) must not panic.
    if robot_mode {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(base.json())
            .try_init();
    } else if io::stderr().is_terminal() {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(base)
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(base.with_ansi(false).compact())
            .try_init();
    }
}
