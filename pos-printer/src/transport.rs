//! Transport abstraction for sending ESC/POS data
//!
//! A transport owns one physical link to a printer. Implementations:
//! - [`UsbTransport`](crate::UsbTransport): printer on the local USB bus
//! - [`NetworkTransport`](crate::NetworkTransport): raw TCP (port 9100)

use crate::error::PrintResult;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Which kind of link a transport uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConnectionKind {
    #[serde(rename = "USB")]
    Usb,
    #[serde(rename = "Network")]
    Network,
}

impl ConnectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::Usb => "USB",
            ConnectionKind::Network => "Network",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for printer transports
///
/// Device-specific details (kernel driver detach, endpoint lookup, socket
/// options) stay behind this interface.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Link kind reported to callers
    fn kind(&self) -> ConnectionKind;

    /// Open the link
    async fn connect(&mut self) -> PrintResult<()>;

    /// Send raw ESC/POS data over the open link
    async fn send(&mut self, data: &[u8]) -> PrintResult<()>;

    /// Release the link. Safe to call when already disconnected.
    async fn disconnect(&mut self);

    /// Whether the link is currently open
    fn is_connected(&self) -> bool;
}
