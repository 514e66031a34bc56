mod app;
mod arguments;

use tracing_subscriber::EnvFilter;

/// Log filter variable; only errors are shown when it is unset.
const LOG_ENV: &str = "PARSE_DEMO_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    app::run();
}
