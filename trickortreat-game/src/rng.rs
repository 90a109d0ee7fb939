//! Seeded linear-congruential generator driving every outcome draw.
//!
//! The generator is deliberately tiny: a 32-bit state advanced with the
//! Numerical Recipes constants, so a whole session replays from one seed.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::constants::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};

/// Errors raised by the selection helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RngError {
    #[error("cannot pick from an empty pool")]
    EmptyPool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Reset the internal state.
    pub const fn seed(&mut self, value: u32) {
        self.state = value;
    }

    /// Current internal state, mostly for replay tooling.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advance the state and return it scaled into `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state) / LCG_MODULUS
    }

    /// Index into a collection of `len` items using one draw.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::EmptyPool`] when `len` is zero.
    pub fn index(&mut self, len: usize) -> Result<usize, RngError> {
        if len == 0 {
            return Err(RngError::EmptyPool);
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let idx = (self.next_f64() * len as f64).floor() as usize;
        Ok(idx.min(len - 1))
    }

    /// Uniformly pick one element.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::EmptyPool`] when `items` is empty. No draw is
    /// consumed in that case.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RngError> {
        let idx = self.index(items.len())?;
        Ok(&items[idx])
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(1)
    }
}

impl rand::RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Session seed derived from a wall-clock reading in milliseconds.
///
/// Uses `millis mod 2^32` and falls back to `1` when that is zero.
#[must_use]
pub fn seed_from_millis(millis: u64) -> u32 {
    let folded = u32::try_from(millis % (1_u64 << 32)).unwrap_or(1);
    if folded == 0 { 1 } else { folded }
}

/// Derive an independent stream seed from the session seed and a domain tag.
#[must_use]
pub fn derive_stream_seed(session_seed: u32, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&session_seed.to_le_bytes()) else {
        // HMAC accepts keys of any length.
        return u64::from(session_seed);
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Side stream used for presentation-only randomness (ghost positions).
#[must_use]
pub fn side_stream(session_seed: u32, domain_tag: &[u8]) -> SmallRng {
    SmallRng::seed_from_u64(derive_stream_seed(session_seed, domain_tag))
}
