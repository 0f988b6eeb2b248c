use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use rootcast_chain::RecordDraft;
use rootcast_crypto::Identity;
use rootcast_head::HeadStore;
use rootcast_store::{ContentStore, NodeKind, Payload, StoreError};
use rootcast_types::HashRef;

use crate::bootstrap::ensure_aggregator_link;
use crate::config::{AggregatorInfo, PublisherConfig};
use crate::error::PublishError;
use crate::transport::{PeerHost, RootAnnouncer};

/// The publishing orchestrator.
///
/// Owns the update queue, the in-memory chain-head cache, and the single
/// background worker that sequences, signs, stores, announces, and persists
/// each chain extension. The worker is launched exactly once, inside
/// [`ChainPublisher::spawn`]; there is no separate start operation to
/// misuse.
///
/// The update queue is a single-slot handoff: the worker never holds more
/// than one accepted item, and a producer whose item would be the second in
/// line blocks until the slot drains. Backpressure, and the absence of
/// duplicate-head races, both fall out of that.
pub struct ChainPublisher {
    queue: mpsc::Sender<HashRef>,
    cancel: watch::Sender<bool>,
    head: Arc<RwLock<Option<HashRef>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    transport: Arc<dyn RootAnnouncer>,
}

impl ChainPublisher {
    /// Construct the publisher and launch its worker.
    ///
    /// Reads the persisted head (absent means the chain starts at genesis)
    /// and ensures a pinned connection to the aggregator before any work is
    /// accepted. Failures in either step are fatal: the error is returned
    /// and no worker is left running.
    pub async fn spawn(
        config: PublisherConfig,
        identity: Identity,
        aggregator: AggregatorInfo,
        host: Arc<dyn PeerHost>,
        content: Arc<dyn ContentStore>,
        heads: HeadStore,
        transport: Arc<dyn RootAnnouncer>,
    ) -> Result<Self, PublishError> {
        let initial = heads.load()?;

        ensure_aggregator_link(host.as_ref(), &aggregator)
            .await
            .map_err(PublishError::Bootstrap)?;

        let head = Arc::new(RwLock::new(initial));
        let (queue_tx, queue_rx) = mpsc::channel(1);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let worker = Worker {
            config,
            identity,
            content,
            heads,
            transport: transport.clone(),
            head: head.clone(),
            queue: queue_rx,
            cancel: cancel_rx,
        };
        let handle = tokio::spawn(worker.run());

        info!(head = ?initial, "chain publisher started");

        Ok(Self {
            queue: queue_tx,
            cancel: cancel_tx,
            head,
            worker: Mutex::new(Some(handle)),
            transport,
        })
    }

    /// Submit a payload reference for publishing.
    ///
    /// Blocks until the worker side accepts the item. Success is observed
    /// only through eventual chain advancement (or a logged failure); a
    /// dropped item is not retried. Fails immediately with
    /// [`PublishError::ShutDown`] once shutdown has been requested.
    pub async fn enqueue(&self, payload_ref: HashRef) -> Result<(), PublishError> {
        let mut cancel = self.cancel.subscribe();
        if *cancel.borrow() {
            return Err(PublishError::ShutDown);
        }
        tokio::select! {
            res = self.queue.send(payload_ref) => res.map_err(|_| PublishError::ShutDown),
            _ = cancel.changed() => Err(PublishError::ShutDown),
        }
    }

    /// Read-only snapshot of the in-memory chain head.
    pub fn current_head(&self) -> Option<HashRef> {
        *self.head.read().expect("lock poisoned")
    }

    /// Signal cancellation, wait for the worker to stop, and release the
    /// transport.
    ///
    /// Idempotent: calls after the first return without doing anything. An
    /// item the worker is mid-way through is allowed to finish or abort
    /// naturally; items still waiting in the queue are never processed.
    pub async fn shutdown(&self) -> Result<(), PublishError> {
        let handle = self.worker.lock().expect("lock poisoned").take();
        let Some(handle) = handle else {
            return Ok(());
        };

        // Ignore send failure: the worker may already have stopped.
        let _ = self.cancel.send(true);
        if let Err(e) = handle.await {
            warn!(error = %e, "publisher worker did not stop cleanly");
        }
        self.transport.close().await?;
        info!("chain publisher stopped");
        Ok(())
    }
}

impl std::fmt::Debug for ChainPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainPublisher")
            .field("head", &self.current_head())
            .finish()
    }
}

/// State owned by the background worker task.
struct Worker {
    config: PublisherConfig,
    identity: Identity,
    content: Arc<dyn ContentStore>,
    heads: HeadStore,
    transport: Arc<dyn RootAnnouncer>,
    head: Arc<RwLock<Option<HashRef>>>,
    queue: mpsc::Receiver<HashRef>,
    cancel: watch::Receiver<bool>,
}

impl Worker {
    /// Drain the queue one item at a time until cancelled.
    ///
    /// Cancellation takes precedence over queued work: once the signal is
    /// observed, no further item is accepted. A failure while processing an
    /// item drops that item and keeps the worker alive.
    async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.changed() => {
                    info!("publisher worker stopping");
                    return;
                }
                item = self.queue.recv() => match item {
                    Some(payload_ref) => {
                        if let Err(e) = self.publish(payload_ref).await {
                            warn!(payload = %payload_ref, error = %e, "dropping chain update");
                        }
                    }
                    None => {
                        warn!("update queue closed, publisher worker stopping");
                        return;
                    }
                },
            }
        }
    }

    /// Process one accepted payload reference end to end.
    ///
    /// The head advances only after the transport has accepted the
    /// announcement. Durable persistence comes after that and is allowed to
    /// lag: an announced head the local store has not recorded is a
    /// consistency warning, not a failure.
    async fn publish(&self, payload_ref: HashRef) -> Result<(), PublishError> {
        let node = match self.content.load(&payload_ref, NodeKind::Payload) {
            Ok(node) => node,
            Err(StoreError::ShapeMismatch {
                expected, actual, ..
            }) => {
                warn!(payload = %payload_ref, %expected, %actual,
                    "unexpected node shape, skipping update");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let payload = Payload::from_node(&node)?;

        let previous = *self.head.read().expect("lock poisoned");
        let record = RecordDraft::new(
            previous,
            self.identity.peer_id(),
            self.config.cacheable,
            self.config.collection.clone(),
            payload,
        )
        .sign(self.identity.signing_key());

        let candidate = self.content.store(&record.to_node()?)?;

        self.transport.announce(candidate).await?;

        // The remote side now holds `candidate` as the chain head; the local
        // durable record may lag until the next successful save.
        if let Err(e) = self.heads.save(&candidate) {
            warn!(announced = %candidate, error = %e,
                "announced head not durably persisted");
        }
        *self.head.write().expect("lock poisoned") = Some(candidate);

        info!(head = %candidate, previous = ?previous, "chain head advanced");
        Ok(())
    }
}
