//! Content fingerprints for build plans.
//!
//! A plan's fingerprint is the SHA-256 of its compact JSON encoding. Struct
//! fields serialize in declaration order, so equal plans always hash equal.

use sha2::{Digest, Sha256};

/// A SHA-256 hex digest of an encoded plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanFingerprint(String);

impl PlanFingerprint {
    /// Compute the fingerprint of raw bytes.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        PlanFingerprint(hex_encode(&hasher.finalize()))
    }

    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First twelve hex digits, for compact display.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl std::fmt::Display for PlanFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
