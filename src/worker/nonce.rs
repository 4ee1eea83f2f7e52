//! Candidate salt nonce generation.

use rand::RngCore;

/// A lazy, effectively unbounded stream of 32-byte salt nonces.
///
/// Starts at a random point in the 256-bit space and increments as a
/// big-endian counter, so draws are distinct within a run without
/// per-iteration RNG cost. Independent streams start far apart with
/// overwhelming probability, letting parallel workers scan disjoint
/// regions.
pub struct NonceStream {
    next: [u8; 32],
}

impl NonceStream {
    /// Creates a stream seeded from the thread-local RNG.
    pub fn new() -> Self {
        let mut next = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut next);
        Self { next }
    }

    /// Creates a stream starting at a fixed nonce.
    pub fn starting_at(next: [u8; 32]) -> Self {
        Self { next }
    }

    /// Draws the next nonce.
    #[inline]
    pub fn draw(&mut self) -> [u8; 32] {
        let nonce = self.next;
        increment(&mut self.next);
        nonce
    }
}

impl Default for NonceStream {
    fn default() -> Self {
        Self::new()
    }
}

/// Increment a 32-byte big-endian integer by 1 (with wrapping).
#[inline]
fn increment(nonce: &mut [u8; 32]) {
    for byte in nonce.iter_mut().rev() {
        let (val, overflow) = byte.overflowing_add(1);
        *byte = val;
        if !overflow {
            return;
        }
    }
}
