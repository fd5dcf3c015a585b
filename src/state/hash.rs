use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `bytes`; the cache's deduplication key.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
