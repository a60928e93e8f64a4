//! Kitchen Receipt Printing Module
//!
//! - Rendering: receipt request -> ESC/POS bytes
//! - Service: owns the printer link, prints receipts, reports status

pub mod renderer;
pub mod service;
pub mod types;

pub use renderer::{ReceiptRenderer, format_item};
pub use service::{PrintService, PrintServiceError, PrintServiceResult};
pub use types::*;
