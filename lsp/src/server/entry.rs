use tracing_subscriber::EnvFilter;

/// Log to stderr; stdout belongs to the protocol transport.
///
/// Honours `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
