//! Content digests for logging file state around a write.

use sha2::{Digest, Sha256};

/// Short SHA-256 hex digest of `content`.
pub fn content_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())[..16].to_string()
}
