//! Tracing setup and stage timing.
//!
//! The library only emits `tracing` events. Binaries call [`init`] once at
//! startup; `RUST_LOG` overrides the level picked from the verbose flag.

use std::time::Instant;

use tracing::debug;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let default = if verbose { "fovea=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(fmt::time::Uptime::default())
        .with_writer(std::io::stderr)
        .finish()
        .try_init();
}

/// Run `f` and emit a debug event with its duration.
pub fn timed<T>(stage: &'static str, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let out = f();
    debug!(stage, elapsed_ms = started.elapsed().as_secs_f64() * 1e3, "stage done");
    out
}
