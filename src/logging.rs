//! # Logging
//! src/logging.rs
//!
//! Inicialización del subscriber de `tracing`.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Inicializa el logging del proceso
///
/// `RUST_LOG` tiene prioridad sobre `--log-filter`. Llamarla más de una vez
/// no hace nada.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    // Logs a stderr para no mezclarse con la salida del comando
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
