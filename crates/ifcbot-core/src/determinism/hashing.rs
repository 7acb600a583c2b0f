//! Output digests.
//!
//! Conversions are byte-deterministic; a SHA-256 digest of the Turtle output
//! is the cheapest way to compare runs (CLI summary, determinism tests).

#[cfg(feature = "sha256")]
use sha2::{Digest, Sha256};

/// SHA-256 of `bytes` as lowercase hex.
#[cfg(feature = "sha256")]
pub fn digest_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}
