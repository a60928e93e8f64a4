//! HTTP API tests, driven in-process through `tower::ServiceExt::oneshot`

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use pos_printer::{ConnectionKind, ConnectionManager, PrintError, PrintResult, Transport};
use print_server::printing::ReceiptRenderer;
use print_server::{Config, PrintService, ReceiptRequest, ServerState, api};
use serde_json::{Value, json};
use tower::ServiceExt;

type Sent = Arc<Mutex<Vec<Vec<u8>>>>;

/// In-memory printer link
struct MockPrinter {
    kind: ConnectionKind,
    reachable: bool,
    send_ok: bool,
    connected: bool,
    sent: Sent,
}

#[async_trait]
impl Transport for MockPrinter {
    fn kind(&self) -> ConnectionKind {
        self.kind
    }

    async fn connect(&mut self) -> PrintResult<()> {
        if self.reachable {
            self.connected = true;
            Ok(())
        } else {
            Err(PrintError::NotFound(format!("no {} printer", self.kind)))
        }
    }

    async fn send(&mut self, data: &[u8]) -> PrintResult<()> {
        if !self.connected {
            return Err(PrintError::NotConnected);
        }
        if !self.send_ok {
            return Err(PrintError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "printer went away",
            )));
        }
        self.sent.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    async fn disconnect(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

fn mock(kind: ConnectionKind, reachable: bool, send_ok: bool) -> (Box<dyn Transport>, Sent) {
    let sent = Sent::default();
    let printer = MockPrinter {
        kind,
        reachable,
        send_ok,
        connected: false,
        sent: sent.clone(),
    };
    (Box::new(printer), sent)
}

fn app(candidates: Vec<Box<dyn Transport>>) -> Router {
    let service = PrintService::new(
        ConnectionManager::new(candidates),
        ReceiptRenderer::default(),
    );
    api::router(ServerState::with_print_service(Config::default(), service))
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn receipt_json() -> Value {
    json!({
        "billNumber": "1042",
        "customerName": "Priya",
        "customerId": "EMP0042",
        "createdBy": "Refex Admin cashier1",
        "date": "15/10/2025",
        "time": "01:05 PM",
        "items": [
            {"name": "Masala Dosa", "quantity": 2},
            {"name": "Filter Coffee", "quantity": 1}
        ]
    })
}

#[tokio::test]
async fn test_print_receipt_over_usb() {
    let (usb, usb_sent) = mock(ConnectionKind::Usb, true, true);
    let (net, net_sent) = mock(ConnectionKind::Network, true, true);
    let app = app(vec![usb, net]);

    let response = app
        .oneshot(post_json("/api/print/receipt", &receipt_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Receipt printed successfully");
    assert_eq!(body["billNumber"], "1042");
    assert_eq!(body["connectionType"], "USB");

    let request: ReceiptRequest = serde_json::from_value(receipt_json()).unwrap();
    let expected = ReceiptRenderer::default().render(&request).into_bytes();
    assert_eq!(*usb_sent.lock().unwrap(), vec![expected]);
    assert!(net_sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_print_receipt_falls_back_to_network() {
    let (usb, _) = mock(ConnectionKind::Usb, false, true);
    let (net, net_sent) = mock(ConnectionKind::Network, true, true);
    let app = app(vec![usb, net]);

    let response = app
        .oneshot(post_json("/api/print/receipt", &receipt_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["connectionType"], "Network");
    assert_eq!(net_sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_print_receipt_no_printer_is_503() {
    let (usb, _) = mock(ConnectionKind::Usb, false, true);
    let (net, net_sent) = mock(ConnectionKind::Network, false, true);
    let app = app(vec![usb, net]);

    let response = app
        .oneshot(post_json("/api/print/receipt", &receipt_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["error"], "printer_unavailable");
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Printer not connected"));
    assert!(detail.contains("no USB printer"));
    assert!(net_sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_print_receipt_send_failure_is_500() {
    let (net, _) = mock(ConnectionKind::Network, true, false);
    let app = app(vec![net]);

    let response = app
        .oneshot(post_json("/api/print/receipt", &receipt_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "send_failed");
    assert_eq!(body["message"], "Failed to send data to printer");
    assert!(body["detail"].as_str().unwrap().contains("printer went away"));
}

#[tokio::test]
async fn test_print_receipt_rejects_malformed_body() {
    let (net, net_sent) = mock(ConnectionKind::Network, true, true);
    let app = app(vec![net]);

    let response = app
        .oneshot(post_json("/api/print/receipt", &json!({"billNumber": "1"})))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(net_sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_status_connected() {
    let (usb, _) = mock(ConnectionKind::Usb, false, true);
    let (net, net_sent) = mock(ConnectionKind::Network, true, true);
    let app = app(vec![usb, net]);

    let response = app.oneshot(get("/api/print/status")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({"connected": true, "connectionType": "Network", "status": "ready"})
    );
    assert!(net_sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_status_disconnected() {
    let (usb, _) = mock(ConnectionKind::Usb, false, true);
    let app = app(vec![usb]);

    let response = app.oneshot(get("/api/print/status")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({"connected": false, "connectionType": null, "status": "disconnected"})
    );
}

#[tokio::test]
async fn test_test_print() {
    let (usb, usb_sent) = mock(ConnectionKind::Usb, true, true);
    let app = app(vec![usb]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/print/test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Test print successful");
    assert_eq!(body["billNumber"], "TEST-001");

    let sent = usb_sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let text = String::from_utf8_lossy(&sent[0]);
    assert!(text.contains("***Bill No. - TEST-001***"));
    assert!(text.contains("BREAKFAST"));
}

#[tokio::test]
async fn test_health() {
    let (usb, _) = mock(ConnectionKind::Usb, false, true);
    let app = app(vec![usb]);

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (usb, _) = mock(ConnectionKind::Usb, false, true);
    let app = app(vec![usb]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
