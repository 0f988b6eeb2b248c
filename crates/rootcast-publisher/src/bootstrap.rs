use tracing::{debug, error};

use crate::config::AggregatorInfo;
use crate::error::TransportError;
use crate::transport::PeerHost;

/// Tag under which the aggregator connection is protected from pruning.
pub const PROTECT_TAG: &str = "rootcast";

/// Ensure a live, pinned connection to the aggregator peer.
///
/// Dials the configured addresses when not already connected, then protects
/// the connection so the host's connection manager never prunes it. A
/// failure here is fatal to publisher construction.
pub async fn ensure_aggregator_link(
    host: &dyn PeerHost,
    aggregator: &AggregatorInfo,
) -> Result<(), TransportError> {
    if !host.is_connected(&aggregator.peer).await {
        if let Err(e) = host.connect(&aggregator.peer, &aggregator.addrs).await {
            error!(peer = %aggregator.peer, error = %e, "failed to connect to aggregator");
            return Err(e);
        }
        debug!(peer = %aggregator.peer, "connected to aggregator");
    }
    host.protect(&aggregator.peer, PROTECT_TAG).await;
    Ok(())
}
