//! Hashing helpers

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of a string, used for migration checksums
/// and embedded-asset ETags.
pub fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}
