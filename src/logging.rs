/// Initialize tracing output to stderr.
///
/// Honors `RUST_LOG`; defaults to `info` so request traces stay quiet
/// unless asked for.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Convenience macro for tracing outgoing requests
#[macro_export]
macro_rules! trace_request {
    ($method:expr, $url:expr) => {
        tracing::debug!(target: "api", "{} {}", $method, $url);
    };
}
