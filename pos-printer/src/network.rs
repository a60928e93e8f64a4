//! Network printer transport (raw TCP, port 9100)

use crate::error::{PrintError, PrintResult};
use crate::transport::{ConnectionKind, Transport};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Default raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Network printer (TCP port 9100)
///
/// Most thermal printers support raw TCP printing on port 9100.
/// The socket stays open between prints until [`Transport::disconnect`].
#[derive(Debug)]
pub struct NetworkTransport {
    host: String,
    port: u16,
    connect_timeout: Duration,
    write_timeout: Duration,
    stream: Option<TcpStream>,
}

impl NetworkTransport {
    /// Create a new network transport
    ///
    /// `host` may be an IP address or a resolvable hostname.
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(PrintError::InvalidConfig("Empty printer host".to_string()));
        }
        if port == 0 {
            return Err(PrintError::InvalidConfig(format!(
                "Invalid port for {}: 0",
                host
            )));
        }

        Ok(Self {
            host: host.to_string(),
            port,
            connect_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(10),
            stream: None,
        })
    }

    /// Create from an address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;
        let port = port
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;
        Self::new(host, port)
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set per-send write timeout
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Get the printer address as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

#[async_trait]
impl Transport for NetworkTransport {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::Network
    }

    #[instrument(skip(self), fields(addr = %self.addr()))]
    async fn connect(&mut self) -> PrintResult<()> {
        let addr = self.addr();
        info!("Connecting to network printer");

        let stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(addr.as_str()))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", addr, e)))?;

        if let Err(e) = stream.set_nodelay(true) {
            warn!(error = %e, "Could not set TCP_NODELAY");
        }

        self.stream = Some(stream);
        info!("Connected to network printer");
        Ok(())
    }

    #[instrument(skip(self, data), fields(addr = %self.addr(), data_len = data.len()))]
    async fn send(&mut self, data: &[u8]) -> PrintResult<()> {
        let write_timeout = self.write_timeout;
        let stream = self.stream.as_mut().ok_or(PrintError::NotConnected)?;

        let write = async {
            stream.write_all(data).await?;
            stream.flush().await
        };

        tokio::time::timeout(write_timeout, write)
            .await
            .map_err(|_| PrintError::Timeout(format!("Write timeout after {:?}", write_timeout)))?
            .map_err(|e| {
                PrintError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Write failed: {}", e),
                ))
            })?;

        info!("Print job sent");
        Ok(())
    }

    async fn disconnect(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                warn!(addr = %self.addr(), error = %e, "Socket shutdown failed");
            }
            info!(addr = %self.addr(), "Network printer disconnected");
        }
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}
