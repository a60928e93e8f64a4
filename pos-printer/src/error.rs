//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// No matching device or endpoint was found
    #[error("Printer not found: {0}")]
    NotFound(String),

    /// Network connection error
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// USB bus error (libusb)
    #[error("USB error: {0}")]
    Usb(String),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Send attempted without an open connection
    #[error("Printer not connected")]
    NotConnected,

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Every transport candidate failed to connect
    #[error("No printer reachable ({})", .0.join("; "))]
    Unavailable(Vec<String>),
}

#[cfg(feature = "usb")]
impl From<rusb::Error> for PrintError {
    fn from(e: rusb::Error) -> Self {
        match e {
            rusb::Error::Timeout => PrintError::Timeout(format!("USB transfer: {}", e)),
            rusb::Error::NoDevice | rusb::Error::NotFound => PrintError::NotFound(e.to_string()),
            other => PrintError::Usb(other.to_string()),
        }
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_lists_causes() {
        let err = PrintError::Unavailable(vec![
            "USB: Printer not found: no device".to_string(),
            "Network: Timeout: 10.0.0.9:9100".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("No printer reachable"));
        assert!(msg.contains("USB: Printer not found"));
        assert!(msg.contains("; Network: Timeout"));
    }
}
