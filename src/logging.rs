use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays clean for `inspect` output.
/// `RUST_LOG`, when set, wins over `level`.
pub fn init(level: &str) {
    let level = match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "skill_barograph={}",
            level.as_str().to_lowercase()
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
