//! Tracing setup for the command-line tool
//!
//! Output goes to stderr so highlighted HTML can stream cleanly on stdout.
//! Filtering follows `RUST_LOG`; without it the level is `warn`, or `debug`
//! when the tool runs with `--debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
