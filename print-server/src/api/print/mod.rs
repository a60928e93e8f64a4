//! Print API module
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/print/receipt | POST | print one kitchen receipt |
//! | /api/print/status | GET | printer link status |
//! | /api/print/test | POST | print the canned test receipt |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub use handler::PrintResponse;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/print", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/receipt", post(handler::print_receipt))
        .route("/status", get(handler::status))
        .route("/test", post(handler::test_print))
}
