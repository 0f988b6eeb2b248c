use async_trait::async_trait;
use rootcast_types::{HashRef, PeerId};

use crate::error::TransportError;

/// Gossip-side boundary: announces a new chain head to remote subscribers.
///
/// Implementations own their retry and fan-out behavior; the orchestrator
/// treats an announcement as best-effort and never retries one itself. After
/// [`RootAnnouncer::close`], further announcements must fail with
/// [`TransportError::Closed`] rather than block.
#[async_trait]
pub trait RootAnnouncer: Send + Sync {
    /// Announce `root` as the new chain head.
    async fn announce(&self, root: HashRef) -> Result<(), TransportError>;

    /// Release the transport's resources.
    async fn close(&self) -> Result<(), TransportError>;
}

/// Network host boundary, used once at bootstrap.
///
/// The orchestrator needs just enough of the host to ensure the aggregator
/// peer is reachable and to pin that connection open.
#[async_trait]
pub trait PeerHost: Send + Sync {
    /// Whether a live connection to `peer` exists.
    async fn is_connected(&self, peer: &PeerId) -> bool;

    /// Dial `peer` at the given addresses.
    async fn connect(&self, peer: &PeerId, addrs: &[String]) -> Result<(), TransportError>;

    /// Mark the connection to `peer` as protected from pruning.
    async fn protect(&self, peer: &PeerId, tag: &str);
}
