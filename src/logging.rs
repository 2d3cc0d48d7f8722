use tracing_subscriber::{fmt, EnvFilter};

/// Install a fmt subscriber at `level`. `RUST_LOG` takes precedence when set.
/// Calling this more than once leaves the first subscriber in place.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .try_init();
}
