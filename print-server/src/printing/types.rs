//! Receipt print types

use pos_printer::ConnectionKind;
use serde::{Deserialize, Serialize};

/// Receipt print request, as sent by the POS frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    pub bill_number: String,
    pub customer_name: String,
    pub customer_id: String,
    pub created_by: String,
    /// Already formatted by the caller (e.g. `15/10/2025`)
    pub date: String,
    /// Already formatted by the caller (e.g. `10:30 AM`)
    pub time: String,
    pub items: Vec<LineItem>,
    /// Site label; the configured default is printed when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// One printed line; order in the request is print order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

impl ReceiptRequest {
    /// Canned receipt used by the test print
    pub fn sample() -> Self {
        Self {
            bill_number: "TEST-001".to_string(),
            customer_name: "Test Customer".to_string(),
            customer_id: "TEST123".to_string(),
            created_by: "System Test".to_string(),
            date: "15/10/2025".to_string(),
            time: "10:30 AM".to_string(),
            items: vec![LineItem::new("Breakfast", 1), LineItem::new("Lunch", 1)],
            location: None,
        }
    }
}

/// Rendered ESC/POS bytes for one receipt
///
/// Never empty; always ends with the paper cut command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedReceipt(Vec<u8>);

impl EncodedReceipt {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        debug_assert!(bytes.ends_with(&pos_printer::cmd::CUT_PAPER));
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for EncodedReceipt {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Successful print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOutcome {
    pub bill_number: String,
    pub connection: ConnectionKind,
}

/// Printer status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterStatus {
    pub connected: bool,
    pub connection_type: Option<ConnectionKind>,
    /// `ready` or `disconnected`
    pub status: &'static str,
}
