use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "GOFISH_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Human-readable diagnostics on stderr so they never mix with the game
/// transcript on stdout. An explicit `--log-level` wins over `GOFISH_LOG`.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
