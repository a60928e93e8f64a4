use std::time::Instant;

use crate::core::Config;
use crate::printing::PrintService;

/// Server state - shared handles for the HTTP handlers
///
/// Cheap to clone: the print service is reference counted.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | configuration (immutable) |
/// | print_service | printer link + receipt rendering |
/// | started_at | process start, for uptime |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub print_service: PrintService,
    pub started_at: Instant,
}

impl ServerState {
    /// Build state from configuration
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        let print_service = PrintService::from_config(config)?;
        let network = format!(
            "{}:{}",
            config.printer.network_host, config.printer.network_port
        );

        tracing::info!(
            usb_enabled = config.printer.usb_enabled,
            usb_vendor_id = config.printer.usb_vendor_id,
            usb_product_id = config.printer.usb_product_id,
            network = %network,
            "Print service initialized"
        );

        Ok(Self::with_print_service(config.clone(), print_service))
    }

    /// Build state around an existing print service (tests, embedding)
    pub fn with_print_service(config: Config, print_service: PrintService) -> Self {
        Self {
            config,
            print_service,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
