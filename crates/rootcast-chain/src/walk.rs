use rootcast_crypto::VerifyingKey;
use rootcast_store::{ContentStore, NodeKind};
use rootcast_types::HashRef;

use crate::error::{ChainError, ChainResult};
use crate::record::SignedRecord;

/// Walk a chain from its head back to genesis, decoding every record.
///
/// Returns records newest-first. Each loaded node is re-hashed and checked
/// against the reference that named it, so a store serving tampered bytes is
/// detected here rather than at signature verification.
pub fn walk_chain(store: &dyn ContentStore, head: &HashRef) -> ChainResult<Vec<SignedRecord>> {
    let mut records = Vec::new();
    let mut cursor = Some(*head);

    while let Some(reference) = cursor {
        let node = store.load(&reference, NodeKind::Record)?;
        let computed = node.compute_ref();
        if computed != reference {
            return Err(ChainError::RefMismatch {
                expected: reference,
                computed,
            });
        }
        let record = SignedRecord::from_node(&node)?;
        cursor = record.previous().copied();
        records.push(record);
    }

    Ok(records)
}

/// Walk a chain and verify every record's signature under the provider's key.
///
/// This is the consumer-side contract: an aggregator that synced the chain
/// can re-derive the provider's full history and reject it wholesale if any
/// link fails. Returns records newest-first.
pub fn verify_chain(
    store: &dyn ContentStore,
    head: &HashRef,
    key: &VerifyingKey,
) -> ChainResult<Vec<SignedRecord>> {
    let records = walk_chain(store, head)?;
    for record in &records {
        record.verify(key)?;
    }
    Ok(records)
}
