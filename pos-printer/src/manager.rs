//! Connection manager
//!
//! Owns the transport candidates and at most one active link. Connecting is
//! lazy: the first caller that needs the printer probes the candidates in
//! order (USB first, network second in production) and the first success
//! stays active until [`ConnectionManager::disconnect`].

use crate::error::{PrintError, PrintResult};
use crate::transport::{ConnectionKind, Transport};
use tracing::{info, instrument, warn};

/// Current link state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected(ConnectionKind),
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected(_))
    }

    pub fn kind(&self) -> Option<ConnectionKind> {
        match self {
            ConnectionState::Connected(kind) => Some(*kind),
            ConnectionState::Disconnected => None,
        }
    }
}

/// Single owner of the printer link
pub struct ConnectionManager {
    candidates: Vec<Box<dyn Transport>>,
    active: Option<usize>,
    disconnect_on_send_failure: bool,
}

impl ConnectionManager {
    /// Create a manager over `candidates`, tried in the given order
    pub fn new(candidates: Vec<Box<dyn Transport>>) -> Self {
        Self {
            candidates,
            active: None,
            disconnect_on_send_failure: false,
        }
    }

    /// Drop the active link after a failed send so the next call re-probes
    pub fn with_disconnect_on_send_failure(mut self, enabled: bool) -> Self {
        self.disconnect_on_send_failure = enabled;
        self
    }

    /// A transport that lost its link on its own counts as disconnected
    pub fn state(&self) -> ConnectionState {
        match self.active {
            Some(i) if self.candidates[i].is_connected() => {
                ConnectionState::Connected(self.candidates[i].kind())
            }
            _ => ConnectionState::Disconnected,
        }
    }

    /// Forget the active transport if its link went away underneath us
    fn forget_lost_link(&mut self) {
        if let Some(i) = self.active
            && !self.candidates[i].is_connected()
        {
            warn!(connection = %self.candidates[i].kind(), "Printer link lost");
            self.active = None;
        }
    }

    /// Make sure a link is open, connecting with fallback if needed
    ///
    /// Returns immediately when a link is already active, without probing.
    /// Otherwise each candidate is tried once, in order.
    #[instrument(skip(self))]
    pub async fn ensure_connected(&mut self) -> PrintResult<ConnectionKind> {
        self.forget_lost_link();
        if let Some(i) = self.active {
            return Ok(self.candidates[i].kind());
        }

        let mut causes = Vec::with_capacity(self.candidates.len());
        for (i, transport) in self.candidates.iter_mut().enumerate() {
            let kind = transport.kind();
            match transport.connect().await {
                Ok(()) => {
                    info!(connection = %kind, "Printer connected");
                    self.active = Some(i);
                    return Ok(kind);
                }
                Err(e) => {
                    warn!(connection = %kind, error = %e, "Printer connect failed, trying next");
                    causes.push(format!("{}: {}", kind, e));
                }
            }
        }

        Err(PrintError::Unavailable(causes))
    }

    /// Send data over the active link
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub async fn send(&mut self, data: &[u8]) -> PrintResult<ConnectionKind> {
        let i = self.active.ok_or(PrintError::NotConnected)?;
        let transport = &mut self.candidates[i];
        let kind = transport.kind();

        let result = transport.send(data).await;
        match result {
            Ok(()) => Ok(kind),
            Err(e) => {
                warn!(connection = %kind, error = %e, "Send failed");
                if self.disconnect_on_send_failure {
                    self.disconnect().await;
                } else {
                    self.forget_lost_link();
                }
                Err(e)
            }
        }
    }

    /// Close the active link, if any
    pub async fn disconnect(&mut self) {
        if let Some(i) = self.active.take() {
            let transport = &mut self.candidates[i];
            transport.disconnect().await;
            info!(connection = %transport.kind(), "Printer link released");
        }
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<ConnectionKind> = self.candidates.iter().map(|t| t.kind()).collect();
        f.debug_struct("ConnectionManager")
            .field("candidates", &kinds)
            .field("state", &self.state())
            .finish()
    }
}
