use serde::{Deserialize, Serialize};
use rootcast_types::PeerId;

/// Connection details for the remote aggregator the chain is destined for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorInfo {
    /// The aggregator's peer identity.
    pub peer: PeerId,
    /// Addresses to dial when not already connected.
    pub addrs: Vec<String>,
    /// Gossip topic root announcements are published on.
    pub topic: String,
}

impl AggregatorInfo {
    pub fn new(peer: PeerId, addrs: Vec<String>, topic: impl Into<String>) -> Self {
        Self {
            peer,
            addrs,
            topic: topic.into(),
        }
    }
}

/// Settings for a publisher instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Semantic category stamped into every record of this chain.
    pub collection: String,
    /// Cacheability hint stamped into every record.
    pub cacheable: bool,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            collection: "location".into(),
            cacheable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PublisherConfig::default();
        assert_eq!(config.collection, "location");
        assert!(config.cacheable);
    }

    #[test]
    fn aggregator_info_serde_roundtrip() {
        let info = AggregatorInfo::new(
            PeerId::from_raw([1u8; 32]),
            vec!["/dns4/agg.example.org/tcp/443".into()],
            "rootcast/updates",
        );
        let json = serde_json::to_string(&info).unwrap();
        let parsed: AggregatorInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, info);
    }
}
