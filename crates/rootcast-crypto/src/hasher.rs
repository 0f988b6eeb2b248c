use rootcast_types::HashRef;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"rootcast-payload-v1"`) that is
/// prepended to every hash computation. This prevents cross-type hash
/// collisions: a payload node and a record node with identical bytes will
/// produce different references.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for payload nodes.
    pub const PAYLOAD: Self = Self {
        domain: "rootcast-payload-v1",
    };
    /// Hasher for signed record nodes.
    pub const RECORD: Self = Self {
        domain: "rootcast-record-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> HashRef {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        HashRef::from_hash(*hasher.finalize().as_bytes())
    }

    /// Verify that data produces the expected reference.
    pub fn verify(&self, data: &[u8], expected: &HashRef) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"provider location";
        assert_eq!(ContentHasher::PAYLOAD.hash(data), ContentHasher::PAYLOAD.hash(data));
    }

    #[test]
    fn different_domains_produce_different_hashes() {
        let data = b"same content";
        assert_ne!(ContentHasher::PAYLOAD.hash(data), ContentHasher::RECORD.hash(data));
    }

    #[test]
    fn verify_correct_data() {
        let data = b"test data";
        let r = ContentHasher::RECORD.hash(data);
        assert!(ContentHasher::RECORD.verify(data, &r));
        assert!(!ContentHasher::RECORD.verify(b"other data", &r));
    }

    #[test]
    fn hash_is_never_null() {
        assert!(!ContentHasher::PAYLOAD.hash(b"").is_null());
    }
}
