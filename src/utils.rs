use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Extra calls are no-ops so test
/// binaries can share it.
pub fn start_log() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
