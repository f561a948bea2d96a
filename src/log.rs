use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `RUST_LOG` overrides `default_level`.
/// Calling it twice is harmless: the second install is ignored.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

// Numeric metrics in one format so they can be grepped out of the log later.
pub fn scalar(step: u64, name: &str, value: f64) {
    tracing::info!(target: "metrics", step, metric = name, value, "SCALAR");
}
