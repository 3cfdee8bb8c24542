use crate::identifier::Identifier;

/// Domain-separated BLAKE3 hasher that mints object identifiers.
///
/// Each hasher carries a domain tag that is prepended to every computation.
/// A minted identifier is the first 96 bits of
/// `BLAKE3(domain ":" isa ":" seed ":" attempt)`, hex-encoded upper case.
/// Minting is deterministic: the same inputs always produce the same token,
/// so replaying the same edits on the same document yields the same output.
/// Callers bump `attempt` when a token is already taken.
pub struct IdentifierHasher {
    domain: &'static str,
}

impl IdentifierHasher {
    /// Hasher for objects created in memory.
    pub const OBJECT: Self = Self {
        domain: "pbx-object-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Mint an identifier for an object of kind `isa`.
    pub fn mint(&self, isa: &str, seed: &str, attempt: u64) -> Identifier {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(isa.as_bytes());
        hasher.update(b":");
        hasher.update(seed.as_bytes());
        hasher.update(b":");
        hasher.update(&attempt.to_le_bytes());
        let digest = hasher.finalize();
        let mut raw = [0u8; 12];
        raw.copy_from_slice(&digest.as_bytes()[..12]);
        Identifier::from_raw_bytes(raw)
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
    fn mint_is_deterministic() {
        let a = IdentifierHasher::OBJECT.mint("PBXGroup", "Sources", 0);
        let b = IdentifierHasher::OBJECT.mint("PBXGroup", "Sources", 0);
        assert_eq!(a, b);
    }

    #[test]
    fn attempt_changes_token() {
        let a = IdentifierHasher::OBJECT.mint("PBXGroup", "Sources", 0);
        let b = IdentifierHasher::OBJECT.mint("PBXGroup", "Sources", 1);
        assert_ne!(a, b);
    }

    #[test]
    fn isa_changes_token() {
        let group = IdentifierHasher::OBJECT.mint("PBXGroup", "x", 0);
        let file = IdentifierHasher::OBJECT.mint("PBXFileReference", "x", 0);
        assert_ne!(group, file);
    }

    #[test]
    fn different_domains_produce_different_tokens() {
        let custom = IdentifierHasher::new("custom-v1");
        assert_eq!(custom.domain(), "custom-v1");
        assert_ne!(
            custom.mint("PBXGroup", "x", 0),
            IdentifierHasher::OBJECT.mint("PBXGroup", "x", 0)
        );
    }

    #[test]
    fn minted_token_shape() {
        let id = IdentifierHasher::OBJECT.mint("PBXGroup", "x", 0);
        assert_eq!(id.as_str().len(), 24);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }
}
