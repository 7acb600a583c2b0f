//! Deterministic input decoding and output hashing.

pub mod hashing;
pub mod normalize_text;
