use serde::{Deserialize, Serialize};
use rootcast_types::PeerId;

use crate::signer::{SigningKey, VerifyingKey};

/// Provider identity: a signing keypair and the peer id derived from it.
///
/// The signing key produces record signatures; the peer id is the stable
/// `provider` value stamped into every published record.
pub struct Identity {
    signing_key: SigningKey,
    peer_id: PeerId,
}

impl Identity {
    /// Generate a fresh Ed25519 identity.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate();
        let peer_id = signing_key.verifying_key().to_peer_id();
        Self {
            signing_key,
            peer_id,
        }
    }

    /// Reconstruct an identity from a raw 32-byte secret key.
    pub fn from_secret_bytes(bytes: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(bytes);
        let peer_id = signing_key.verifying_key().to_peer_id();
        Self {
            signing_key,
            peer_id,
        }
    }

    /// The private signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// The public verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// The stable peer identifier.
    pub fn peer_id(&self) -> PeerId {
        self.peer_id
    }

    /// Serializable config form of this identity.
    ///
    /// The secret key is stored unencrypted.
    // TODO: encrypt the stored secret key
    pub fn to_config(&self) -> IdentityConfig {
        IdentityConfig {
            peer_id: self.peer_id.to_hex(),
            secret_key: hex::encode(self.signing_key.as_bytes()),
        }
    }

    /// Restore an identity from its config form.
    ///
    /// The peer id recorded in the config must match the one re-derived from
    /// the secret key; a mismatch means the config was edited or corrupted.
    pub fn from_config(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let bytes = hex::decode(&config.secret_key)
            .map_err(|e| IdentityError::BadSecretKey(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| IdentityError::BadSecretKey("expected 32 bytes".into()))?;
        let identity = Self::from_secret_bytes(arr);

        let recorded = PeerId::from_hex(&config.peer_id)
            .map_err(|e| IdentityError::BadPeerId(e.to_string()))?;
        if recorded != identity.peer_id {
            return Err(IdentityError::PeerIdMismatch {
                recorded: recorded.to_hex(),
                derived: identity.peer_id.to_hex(),
            });
        }
        Ok(identity)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("peer_id", &self.peer_id)
            .field("signing_key", &"<redacted>")
            .finish()
    }
}

/// On-disk identity configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Hex-encoded peer id.
    pub peer_id: String,
    /// Hex-encoded Ed25519 secret key.
    pub secret_key: String,
}

/// Errors from identity restoration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("bad secret key: {0}")]
    BadSecretKey(String),

    #[error("bad peer id: {0}")]
    BadPeerId(String),

    #[error("peer id mismatch: config records {recorded}, key derives {derived}")]
    PeerIdMismatch { recorded: String, derived: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_derives_peer_id_from_key() {
        let identity = Identity::generate();
        assert_eq!(identity.peer_id(), identity.verifying_key().to_peer_id());
    }

    #[test]
    fn config_roundtrip() {
        let identity = Identity::generate();
        let config = identity.to_config();
        let restored = Identity::from_config(&config).unwrap();
        assert_eq!(restored.peer_id(), identity.peer_id());
        assert_eq!(restored.verifying_key(), identity.verifying_key());
    }

    #[test]
    fn config_rejects_tampered_peer_id() {
        let identity = Identity::generate();
        let mut config = identity.to_config();
        config.peer_id = PeerId::from_raw([0xffu8; 32]).to_hex();
        let err = Identity::from_config(&config).unwrap_err();
        assert!(matches!(err, IdentityError::PeerIdMismatch { .. }));
    }

    #[test]
    fn config_rejects_short_secret() {
        let identity = Identity::generate();
        let mut config = identity.to_config();
        config.secret_key = "abcd".into();
        assert!(matches!(
            Identity::from_config(&config).unwrap_err(),
            IdentityError::BadSecretKey(_)
        ));
    }

    #[test]
    fn config_serializes_as_json() {
        let config = Identity::generate().to_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: IdentityConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn debug_redacts_secret() {
        let identity = Identity::generate();
        let debug = format!("{identity:?}");
        assert!(debug.contains("redacted"));
        assert!(!debug.contains(&hex::encode(identity.signing_key().as_bytes())));
    }
}
