//! Kitchen receipt print server
//!
//! Accepts receipt print requests from the POS frontend over HTTP, renders
//! them to ESC/POS and sends them to a thermal printer over USB, falling
//! back to a network printer.
//!
//! ```text
//! print-server/src/
//! ├── core/      # config, state, errors, HTTP server
//! ├── printing/  # receipt rendering and the print service
//! ├── api/       # HTTP routes and handlers
//! └── utils/     # logging
//! ```

pub mod api;
pub mod core;
pub mod printing;
pub mod utils;

pub use core::{Config, PrinterConfig, Server, ServerError, ServerState};
pub use printing::{PrintService, ReceiptRenderer, ReceiptRequest};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, then initialize logging from the environment
pub fn setup_environment() -> Config {
    let dotenv = dotenvy::dotenv();
    let config = Config::from_env();

    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    config
}
