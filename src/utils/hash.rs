//! Content hashing for the import cache

use sha2::{Digest, Sha256};

/// Digest file contents down to a 128-bit cache key
///
/// Collision resistance far beyond what cache-invalidation needs; the wider
/// digest is simply truncated.
pub fn content_hash(bytes: &[u8]) -> u128 {
    let digest = Sha256::digest(bytes);
    let mut truncated = [0u8; 16];
    truncated.copy_from_slice(&digest[..16]);
    u128::from_le_bytes(truncated)
}
