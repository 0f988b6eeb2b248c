use serde::{Deserialize, Serialize};
use rootcast_crypto::{Signature, SigningKey, VerifyingKey};
use rootcast_store::{NodeKind, Payload, StoredNode};
use rootcast_types::{HashRef, PeerId};

use crate::error::{ChainError, ChainResult};

/// Domain tag for record signatures.
///
/// Any change to the signing byte layout is a compatibility break for remote
/// verifiers and must bump this version.
const SIGNING_DOMAIN: &[u8] = b"rootcast-record-sig-v1";

/// An unsigned chain record under construction.
///
/// A draft holds every field of a record except the signature. Call
/// [`RecordDraft::sign`] to produce the immutable [`SignedRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordDraft {
    /// Reference to the prior chain head; `None` for the genesis record.
    pub previous: Option<HashRef>,
    /// Identity of the publishing process.
    pub provider: PeerId,
    /// Hint to downstream consumers that the record may be cached.
    pub cacheable: bool,
    /// Semantic category of the chain, fixed per publisher.
    pub collection: String,
    /// The caller-supplied payload for this update.
    pub payload: Payload,
}

impl RecordDraft {
    /// Assemble a new unsigned record.
    pub fn new(
        previous: Option<HashRef>,
        provider: PeerId,
        cacheable: bool,
        collection: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self {
            previous,
            provider,
            cacheable,
            collection: collection.into(),
            payload,
        }
    }

    /// Canonical signing bytes: a versioned domain tag followed by every
    /// field, length-framed where variable-sized.
    ///
    /// This layout is the cross-process signature contract. It is
    /// deliberately independent of any serde encoding so that signatures
    /// stay valid as serializers evolve.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            SIGNING_DOMAIN.len() + 1 + 32 + 32 + 1 + 8 + self.collection.len() + 8
                + self.payload.data.len(),
        );
        bytes.extend_from_slice(SIGNING_DOMAIN);
        match &self.previous {
            None => bytes.push(0u8),
            Some(previous) => {
                bytes.push(1u8);
                bytes.extend_from_slice(previous.as_bytes());
            }
        }
        bytes.extend_from_slice(self.provider.as_bytes());
        bytes.push(self.cacheable as u8);
        bytes.extend_from_slice(&(self.collection.len() as u64).to_le_bytes());
        bytes.extend_from_slice(self.collection.as_bytes());
        bytes.extend_from_slice(&(self.payload.data.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&self.payload.data);
        bytes
    }

    /// Sign this draft, consuming it, and return the immutable record.
    pub fn sign(self, key: &SigningKey) -> SignedRecord {
        let signature = key.sign(&self.signing_bytes());
        SignedRecord {
            previous: self.previous,
            provider: self.provider,
            cacheable: self.cacheable,
            collection: self.collection,
            payload: self.payload,
            signature,
        }
    }
}

/// One signed link in the provider's advertisement chain.
///
/// Immutable: a `SignedRecord` can only be produced by [`RecordDraft::sign`]
/// or decoded from a stored node, and its fields are never mutated after.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignedRecord {
    previous: Option<HashRef>,
    provider: PeerId,
    cacheable: bool,
    collection: String,
    payload: Payload,
    signature: Signature,
}

impl SignedRecord {
    /// Reference to the prior chain head; `None` for the genesis record.
    pub fn previous(&self) -> Option<&HashRef> {
        self.previous.as_ref()
    }

    /// Identity of the publishing process.
    pub fn provider(&self) -> PeerId {
        self.provider
    }

    /// Whether downstream consumers may cache this record.
    pub fn cacheable(&self) -> bool {
        self.cacheable
    }

    /// Semantic category of the chain.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The caller-supplied payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The signature over all other fields.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Verify the signature under the provider's public key.
    pub fn verify(&self, key: &VerifyingKey) -> ChainResult<()> {
        let draft = RecordDraft {
            previous: self.previous,
            provider: self.provider,
            cacheable: self.cacheable,
            collection: self.collection.clone(),
            payload: self.payload.clone(),
        };
        key.verify(&draft.signing_bytes(), &self.signature)
            .map_err(|_| ChainError::BadSignature {
                reference: self
                    .to_node()
                    .map(|n| n.compute_ref())
                    .unwrap_or(HashRef::null()),
            })
    }

    /// Serialize into a stored node of kind [`NodeKind::Record`].
    pub fn to_node(&self) -> ChainResult<StoredNode> {
        let data =
            bincode::serialize(self).map_err(|e| ChainError::Serialization(e.to_string()))?;
        Ok(StoredNode::new(NodeKind::Record, data))
    }

    /// Decode from a stored node, checking the kind tag.
    pub fn from_node(node: &StoredNode) -> ChainResult<Self> {
        if node.kind != NodeKind::Record {
            return Err(ChainError::Store(rootcast_store::StoreError::ShapeMismatch {
                reference: node.compute_ref(),
                expected: NodeKind::Record,
                actual: node.kind,
            }));
        }
        bincode::deserialize(&node.data).map_err(|e| ChainError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootcast_crypto::Identity;

    fn draft(identity: &Identity, previous: Option<HashRef>, content: &[u8]) -> RecordDraft {
        RecordDraft::new(
            previous,
            identity.peer_id(),
            true,
            "miner-location",
            Payload::new(content.to_vec()),
        )
    }

    #[test]
    fn sign_then_verify() {
        let identity = Identity::generate();
        let record = draft(&identity, None, b"p1").sign(identity.signing_key());
        assert!(record.verify(&identity.verifying_key()).is_ok());
    }

    #[test]
    fn verify_fails_under_wrong_key() {
        let identity = Identity::generate();
        let other = Identity::generate();
        let record = draft(&identity, None, b"p1").sign(identity.signing_key());
        assert!(record.verify(&other.verifying_key()).is_err());
    }

    #[test]
    fn signing_bytes_cover_every_field() {
        let identity = Identity::generate();
        let base = draft(&identity, None, b"p1");

        let mut with_previous = base.clone();
        with_previous.previous = Some(HashRef::from_hash([1u8; 32]));
        let mut with_cacheable = base.clone();
        with_cacheable.cacheable = false;
        let mut with_collection = base.clone();
        with_collection.collection = "other".into();
        let mut with_payload = base.clone();
        with_payload.payload = Payload::new(b"p2".to_vec());
        let mut with_provider = base.clone();
        with_provider.provider = Identity::generate().peer_id();

        for changed in [
            with_previous,
            with_cacheable,
            with_collection,
            with_payload,
            with_provider,
        ] {
            assert_ne!(changed.signing_bytes(), base.signing_bytes());
        }
    }

    #[test]
    fn length_framing_prevents_field_bleed() {
        let identity = Identity::generate();
        let a = RecordDraft::new(
            None,
            identity.peer_id(),
            true,
            "ab",
            Payload::new(b"c".to_vec()),
        );
        let b = RecordDraft::new(
            None,
            identity.peer_id(),
            true,
            "a",
            Payload::new(b"bc".to_vec()),
        );
        assert_ne!(a.signing_bytes(), b.signing_bytes());
    }

    #[test]
    fn node_roundtrip() {
        let identity = Identity::generate();
        let record = draft(&identity, Some(HashRef::from_hash([4u8; 32])), b"p")
            .sign(identity.signing_key());
        let node = record.to_node().unwrap();
        assert_eq!(node.kind, NodeKind::Record);
        let decoded = SignedRecord::from_node(&node).unwrap();
        assert_eq!(decoded, record);
        assert!(decoded.verify(&identity.verifying_key()).is_ok());
    }

    #[test]
    fn from_node_rejects_payload_nodes() {
        let node = Payload::new(b"p".to_vec()).to_node().unwrap();
        assert!(SignedRecord::from_node(&node).is_err());
    }

    #[test]
    fn content_ref_is_a_function_of_fields() {
        let identity = Identity::generate();
        let r1 = draft(&identity, None, b"p1").sign(identity.signing_key());
        let r2 = draft(&identity, None, b"p2").sign(identity.signing_key());
        assert_ne!(
            r1.to_node().unwrap().compute_ref(),
            r2.to_node().unwrap().compute_ref()
        );
    }
}
