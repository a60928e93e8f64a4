use std::time::Duration;

use pos_printer::{DEFAULT_PORT, DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID};

/// Default site printed under the receipt header
pub const DEFAULT_LOCATION: &str = "Refex Nungambakkam";

/// Print server configuration
///
/// # Environment variables
///
/// All settings can be overridden through the environment (a `.env` file in
/// the working directory is loaded first):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_HOST | 0.0.0.0 | bind address |
/// | HTTP_PORT | 8002 | HTTP port |
/// | PRINTER_USB_ENABLED | true | probe the USB bus before the network |
/// | PRINTER_USB_VENDOR_ID | 0x0fe6 | USB vendor id (hex or decimal) |
/// | PRINTER_USB_PRODUCT_ID | 0x811e | USB product id (hex or decimal) |
/// | PRINTER_NETWORK_HOST | 192.168.1.100 | network printer host |
/// | PRINTER_NETWORK_PORT | 9100 | network printer port |
/// | PRINTER_CONNECT_TIMEOUT_MS | 5000 | network connect timeout |
/// | PRINTER_WRITE_TIMEOUT_MS | 10000 | per-send timeout |
/// | PRINTER_DISCONNECT_ON_SEND_FAILURE | false | drop the link after a failed send |
/// | RECEIPT_DEFAULT_LOCATION | Refex Nungambakkam | location when the request has none |
/// | LOG_LEVEL | info | log level |
/// | LOG_JSON | false | JSON log output |
/// | LOG_DIR | (unset) | daily rotated log files |
///
/// # Example
///
/// ```ignore
/// PRINTER_NETWORK_HOST=10.0.0.42 HTTP_PORT=9000 cargo run -p print-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: String,
    pub http_port: u16,
    pub printer: PrinterConfig,
    /// Location label used when a receipt request omits it
    pub default_location: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

/// Printer link settings
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub usb_enabled: bool,
    pub usb_vendor_id: u16,
    pub usb_product_id: u16,
    pub network_host: String,
    pub network_port: u16,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    pub disconnect_on_send_failure: bool,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Missing or unparseable values fall back to the defaults
    pub fn from_env() -> Self {
        Self {
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: env_parse("HTTP_PORT").unwrap_or(8002),
            printer: PrinterConfig::from_env(),
            default_location: std::env::var("RECEIPT_DEFAULT_LOCATION")
                .unwrap_or_else(|_| DEFAULT_LOCATION.into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Socket address string to bind the HTTP server on
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".into(),
            http_port: 8002,
            printer: PrinterConfig::default(),
            default_location: DEFAULT_LOCATION.into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}

impl PrinterConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            usb_enabled: env_parse("PRINTER_USB_ENABLED").unwrap_or(defaults.usb_enabled),
            usb_vendor_id: std::env::var("PRINTER_USB_VENDOR_ID")
                .ok()
                .and_then(|v| parse_usb_id(&v))
                .unwrap_or(defaults.usb_vendor_id),
            usb_product_id: std::env::var("PRINTER_USB_PRODUCT_ID")
                .ok()
                .and_then(|v| parse_usb_id(&v))
                .unwrap_or(defaults.usb_product_id),
            network_host: std::env::var("PRINTER_NETWORK_HOST")
                .unwrap_or(defaults.network_host),
            network_port: env_parse("PRINTER_NETWORK_PORT").unwrap_or(defaults.network_port),
            connect_timeout: env_parse("PRINTER_CONNECT_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.connect_timeout),
            write_timeout: env_parse("PRINTER_WRITE_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.write_timeout),
            disconnect_on_send_failure: env_parse("PRINTER_DISCONNECT_ON_SEND_FAILURE")
                .unwrap_or(defaults.disconnect_on_send_failure),
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            usb_enabled: true,
            usb_vendor_id: DEFAULT_VENDOR_ID,
            usb_product_id: DEFAULT_PRODUCT_ID,
            network_host: "192.168.1.100".into(),
            network_port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(10),
            disconnect_on_send_failure: false,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse a USB id given as `0x`-prefixed hex or decimal
pub fn parse_usb_id(value: &str) -> Option<u16> {
    let value = value.trim();
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
