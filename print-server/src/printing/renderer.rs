//! Kitchen receipt renderer
//!
//! Renders a [`ReceiptRequest`] into ESC/POS bytes for the 58mm kitchen
//! printer. Line widths, padding and command order match what the printer
//! lays out on paper, so changes here show up on every printed receipt.

use pos_printer::{EscPosBuilder, justify_right, pad_chars};

use super::types::{EncodedReceipt, LineItem, ReceiptRequest};
use crate::core::config::DEFAULT_LOCATION;

/// Characters per line on 58mm paper
pub const PAPER_WIDTH: usize = 32;
/// Item name column
pub const NAME_WIDTH: usize = 22;
/// Quantity column
pub const QTY_WIDTH: usize = 4;

const ITEMS_HEADER: &str = "Item Name              QTY";
const FOOTER: &str = "Powered by Refex POS System";

/// Kitchen receipt renderer
pub struct ReceiptRenderer {
    default_location: String,
}

impl ReceiptRenderer {
    /// Create a renderer that prints `default_location` when a request has none
    pub fn new(default_location: impl Into<String>) -> Self {
        Self {
            default_location: default_location.into(),
        }
    }

    /// Render a receipt to ESC/POS bytes
    pub fn render(&self, receipt: &ReceiptRequest) -> EncodedReceipt {
        let mut b = EscPosBuilder::new(PAPER_WIDTH);

        self.render_header(&mut b, receipt);
        b.sep_double();
        self.render_customer(&mut b, receipt);
        b.sep_double();
        self.render_items(&mut b, &receipt.items);
        b.sep_double();
        b.newline();
        self.render_footer(&mut b);
        b.cut();

        EncodedReceipt::new(b.build())
    }

    fn render_header(&self, b: &mut EscPosBuilder, receipt: &ReceiptRequest) {
        let location = receipt
            .location
            .as_deref()
            .unwrap_or(self.default_location.as_str());

        b.center().bold();
        b.line("KITCHEN PRINT");
        b.line(location);
        b.double_height();
        b.line(&format!("***Bill No. - {}***", receipt.bill_number));
        b.normal().bold_off();
    }

    fn render_customer(&self, b: &mut EscPosBuilder, receipt: &ReceiptRequest) {
        b.left();
        b.line(&format!("Customer: {}", receipt.customer_name));
        b.line(&format!("ID: {}", receipt.customer_id));
        b.line(&format!("Created by: {}", receipt.created_by));
        b.line(&format!("DATE: {}  TIME: {}", receipt.date, receipt.time));
    }

    fn render_items(&self, b: &mut EscPosBuilder, items: &[LineItem]) {
        b.bold();
        b.line(ITEMS_HEADER);
        b.sep_single();
        b.bold_off();

        for item in items {
            b.line(&format_item(item));
        }
    }

    fn render_footer(&self, b: &mut EscPosBuilder) {
        b.center().bold();
        b.line("Thank you!");
        b.bold_off();
        b.line(FOOTER);
        b.feed_lines(3);
    }
}

impl Default for ReceiptRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION)
    }
}

/// `NAME (22, upper, truncated) QTY (4, right aligned)`
pub fn format_item(item: &LineItem) -> String {
    let name = pad_chars(&item.name.to_uppercase(), NAME_WIDTH, false);
    let qty = justify_right(&item.quantity.to_string(), QTY_WIDTH);
    format!("{} {}", name, qty)
}
