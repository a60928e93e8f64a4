//! Kitchen receipt print service - connect, render, send

use std::sync::Arc;

use pos_printer::{
    ConnectionManager, NetworkTransport, PrintError, Transport, UsbTransport,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use super::renderer::ReceiptRenderer;
use super::types::{PrintOutcome, PrinterStatus, ReceiptRequest};
use crate::core::config::{Config, PrinterConfig};
use crate::core::ServerError;

#[derive(Debug, Error)]
pub enum PrintServiceError {
    #[error("Printer not connected. Please check USB/Network connection.")]
    Unavailable(#[source] PrintError),

    #[error("Failed to send data to printer")]
    SendFailed(#[source] PrintError),
}

pub type PrintServiceResult<T> = Result<T, PrintServiceError>;

impl From<PrintServiceError> for ServerError {
    fn from(err: PrintServiceError) -> Self {
        match err {
            PrintServiceError::Unavailable(e) => ServerError::PrinterUnavailable(e.to_string()),
            PrintServiceError::SendFailed(e) => ServerError::SendFailed(e.to_string()),
        }
    }
}

/// Kitchen receipt print service
///
/// Responsibilities:
/// - Own the printer link (through [`ConnectionManager`])
/// - Render receipts and send them
/// - Report printer status
///
/// The manager sits behind one async mutex held for the whole
/// connect/send sequence, so concurrent requests never interleave bytes.
#[derive(Clone)]
pub struct PrintService {
    manager: Arc<Mutex<ConnectionManager>>,
    renderer: Arc<ReceiptRenderer>,
}

impl PrintService {
    pub fn new(manager: ConnectionManager, renderer: ReceiptRenderer) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
            renderer: Arc::new(renderer),
        }
    }

    /// Build the production service: USB first (if enabled), network second
    pub fn from_config(config: &Config) -> Result<Self, PrintError> {
        let manager = build_manager(&config.printer)?;
        Ok(Self::new(
            manager,
            ReceiptRenderer::new(config.default_location.clone()),
        ))
    }

    /// Print one receipt
    ///
    /// Fails with `Unavailable` before rendering when no printer is
    /// reachable, and with `SendFailed` when the bytes did not go out. A
    /// failed send leaves the link as it was unless the manager is set to
    /// disconnect on send failure.
    #[instrument(skip(self, receipt), fields(bill_number = %receipt.bill_number))]
    pub async fn print_receipt(&self, receipt: &ReceiptRequest) -> PrintServiceResult<PrintOutcome> {
        let mut manager = self.manager.lock().await;

        if let Err(e) = manager.ensure_connected().await {
            warn!(error = %e, "No printer reachable");
            return Err(PrintServiceError::Unavailable(e));
        }

        let data = self.renderer.render(receipt);

        match manager.send(data.as_bytes()).await {
            Ok(connection) => {
                info!(connection = %connection, bytes = data.len(), "Receipt printed");
                Ok(PrintOutcome {
                    bill_number: receipt.bill_number.clone(),
                    connection,
                })
            }
            Err(e) => {
                error!(error = %e, "Receipt send failed");
                Err(PrintServiceError::SendFailed(e))
            }
        }
    }

    /// Print the canned test receipt
    pub async fn test_print(&self) -> PrintServiceResult<PrintOutcome> {
        self.print_receipt(&ReceiptRequest::sample()).await
    }

    /// Report the link, connecting first if nothing is active
    pub async fn status(&self) -> PrinterStatus {
        let mut manager = self.manager.lock().await;

        match manager.ensure_connected().await {
            Ok(kind) => PrinterStatus {
                connected: true,
                connection_type: Some(kind),
                status: "ready",
            },
            Err(e) => {
                warn!(error = %e, "Printer status: disconnected");
                PrinterStatus {
                    connected: false,
                    connection_type: None,
                    status: "disconnected",
                }
            }
        }
    }

    /// Release the printer link (process shutdown)
    pub async fn shutdown(&self) {
        self.manager.lock().await.disconnect().await;
        info!("Print service shut down");
    }
}

fn build_manager(printer: &PrinterConfig) -> Result<ConnectionManager, PrintError> {
    let mut candidates: Vec<Box<dyn Transport>> = Vec::with_capacity(2);

    if printer.usb_enabled {
        candidates.push(Box::new(
            UsbTransport::new(printer.usb_vendor_id, printer.usb_product_id)
                .with_write_timeout(printer.write_timeout),
        ));
    }

    candidates.push(Box::new(
        NetworkTransport::new(&printer.network_host, printer.network_port)?
            .with_connect_timeout(printer.connect_timeout)
            .with_write_timeout(printer.write_timeout),
    ));

    Ok(ConnectionManager::new(candidates)
        .with_disconnect_on_send_failure(printer.disconnect_on_send_failure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pos_printer::{ConnectionKind, PrintResult};
    use std::sync::Mutex as StdMutex;

    /// Records every payload it is asked to send
    struct RecordingTransport {
        kind: ConnectionKind,
        reachable: bool,
        send_ok: bool,
        connected: bool,
        sent: Arc<StdMutex<Vec<Vec<u8>>>>,
    }

    impl RecordingTransport {
        fn boxed(
            kind: ConnectionKind,
            reachable: bool,
            send_ok: bool,
        ) -> (Box<dyn Transport>, Arc<StdMutex<Vec<Vec<u8>>>>) {
            let sent = Arc::new(StdMutex::new(Vec::new()));
            let t = RecordingTransport {
                kind,
                reachable,
                send_ok,
                connected: false,
                sent: sent.clone(),
            };
            (Box::new(t), sent)
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        fn kind(&self) -> ConnectionKind {
            self.kind
        }

        async fn connect(&mut self) -> PrintResult<()> {
            if self.reachable {
                self.connected = true;
                Ok(())
            } else {
                Err(PrintError::NotFound(format!("{} absent", self.kind)))
            }
        }

        async fn send(&mut self, data: &[u8]) -> PrintResult<()> {
            self.sent.lock().unwrap().push(data.to_vec());
            if self.send_ok {
                Ok(())
            } else {
                Err(PrintError::Timeout("write".to_string()))
            }
        }

        async fn disconnect(&mut self) {
            self.connected = false;
        }

        fn is_connected(&self) -> bool {
            self.connected
        }
    }

    fn service(candidates: Vec<Box<dyn Transport>>) -> PrintService {
        PrintService::new(ConnectionManager::new(candidates), ReceiptRenderer::default())
    }

    #[tokio::test]
    async fn test_print_over_usb() {
        let (usb, usb_sent) = RecordingTransport::boxed(ConnectionKind::Usb, true, true);
        let (net, net_sent) = RecordingTransport::boxed(ConnectionKind::Network, true, true);
        let svc = service(vec![usb, net]);

        let outcome = svc.print_receipt(&ReceiptRequest::sample()).await.unwrap();
        assert_eq!(outcome.bill_number, "TEST-001");
        assert_eq!(outcome.connection, ConnectionKind::Usb);

        let sent = usb_sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            ReceiptRenderer::default()
                .render(&ReceiptRequest::sample())
                .into_bytes()
        );
        assert!(net_sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_never_sends() {
        let (usb, usb_sent) = RecordingTransport::boxed(ConnectionKind::Usb, false, true);
        let (net, net_sent) = RecordingTransport::boxed(ConnectionKind::Network, false, true);
        let svc = service(vec![usb, net]);

        let err = svc.print_receipt(&ReceiptRequest::sample()).await.unwrap_err();
        assert!(matches!(err, PrintServiceError::Unavailable(PrintError::Unavailable(_))));
        assert!(usb_sent.lock().unwrap().is_empty());
        assert!(net_sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_keeps_connection() {
        let (net, net_sent) = RecordingTransport::boxed(ConnectionKind::Network, true, false);
        let svc = service(vec![net]);

        let err = svc.test_print().await.unwrap_err();
        assert!(matches!(err, PrintServiceError::SendFailed(_)));
        assert_eq!(net_sent.lock().unwrap().len(), 1);

        let status = svc.status().await;
        assert!(status.connected);
        assert_eq!(status.connection_type, Some(ConnectionKind::Network));
        assert_eq!(status.status, "ready");
    }

    #[tokio::test]
    async fn test_status_connects_lazily() {
        let (usb, _) = RecordingTransport::boxed(ConnectionKind::Usb, false, true);
        let (net, net_sent) = RecordingTransport::boxed(ConnectionKind::Network, true, true);
        let svc = service(vec![usb, net]);

        let status = svc.status().await;
        assert!(status.connected);
        assert_eq!(status.connection_type, Some(ConnectionKind::Network));
        assert!(net_sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_disconnected() {
        let (usb, _) = RecordingTransport::boxed(ConnectionKind::Usb, false, true);
        let svc = service(vec![usb]);

        let status = svc.status().await;
        assert!(!status.connected);
        assert_eq!(status.connection_type, None);
        assert_eq!(status.status, "disconnected");
    }

    #[tokio::test]
    async fn test_concurrent_prints_are_serialized() {
        let (net, net_sent) = RecordingTransport::boxed(ConnectionKind::Network, true, true);
        let svc = service(vec![net]);

        let mut handles = Vec::new();
        for i in 0..8 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                let mut receipt = ReceiptRequest::sample();
                receipt.bill_number = format!("B-{}", i);
                svc.print_receipt(&receipt).await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let sent = net_sent.lock().unwrap();
        assert_eq!(sent.len(), 8);
        assert!(sent.iter().all(|payload| payload.ends_with(&pos_printer::cmd::CUT_PAPER)));
    }

    #[test]
    fn test_build_manager_order() {
        let config = PrinterConfig::default();
        let manager = build_manager(&config).unwrap();
        let debug = format!("{:?}", manager);
        assert!(debug.contains("[Usb, Network]"));

        let config = PrinterConfig {
            usb_enabled: false,
            ..PrinterConfig::default()
        };
        let debug = format!("{:?}", build_manager(&config).unwrap());
        assert!(debug.contains("[Network]"));
    }

    #[test]
    fn test_build_manager_rejects_bad_host() {
        let config = PrinterConfig {
            network_host: String::new(),
            ..PrinterConfig::default()
        };
        assert!(build_manager(&config).is_err());
    }
}
