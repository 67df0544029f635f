//! Logging and tracing initialization.
//!
//! Logs go to stderr so `--json` reports on stdout stay machine-readable.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// `RUST_LOG` wins over the configured level.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init_logging(config: &LoggingConfig) {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish()).ok();
    } else {
        let subscriber = builder
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Initialize logging from `config`, forcing `debug` when `verbose` is set.
pub fn init_cli_logging(config: &LoggingConfig, verbose: bool) {
    if verbose {
        let mut config = config.clone();
        config.level = "debug".to_string();
        init_logging(&config);
    } else {
        init_logging(config);
    }
}
