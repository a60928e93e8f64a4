//! # pos-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Fixed-width column layout
//! - USB bus printing (feature `usb`, via libusb)
//! - Network printing (TCP port 9100)
//! - Connection lifecycle with USB-then-network fallback
//!
//! Business logic (WHAT to print) stays in application code:
//! - Kitchen receipt rendering → print-server
//!
//! ## Example
//!
//! ```ignore
//! use pos_printer::{ConnectionManager, EscPosBuilder, NetworkTransport, UsbTransport};
//!
//! let mut b = EscPosBuilder::new(32);
//! b.center().bold().line("KITCHEN PRINT").bold_off();
//! b.cut();
//!
//! let mut printer = ConnectionManager::new(vec![
//!     Box::new(UsbTransport::default()),
//!     Box::new(NetworkTransport::new("192.168.1.100", 9100)?),
//! ]);
//! printer.ensure_connected().await?;
//! printer.send(&b.build()).await?;
//! ```

mod error;
mod escpos;
mod layout;
mod manager;
mod network;
mod transport;
mod usb;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use escpos::{EscPosBuilder, cmd};
pub use layout::{char_width, justify_right, pad_chars, truncate_chars};
pub use manager::{ConnectionManager, ConnectionState};
pub use network::{DEFAULT_PORT, NetworkTransport};
pub use transport::{ConnectionKind, Transport};
pub use usb::{
    DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID, DeviceIdentity, PRINTER_CLASS, UsbTransport,
    select_device,
};
