//! Keccak-256 hashing and CREATE2 address derivation.

pub mod create2;

use tiny_keccak::{Hasher, Keccak};

/// Computes keccak256 of the input bytes.
#[inline]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// Computes keccak256 over a sequence of byte chunks without concatenating.
pub fn keccak256_chunked(chunks: &[&[u8]]) -> [u8; 32] {
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    for chunk in chunks {
        hasher.update(chunk);
    }
    hasher.finalize(&mut output);
    output
}
