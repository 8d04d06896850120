//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG suitable for simulation purposes.
//!
//! # Determinism
//!
//! Same seed → same sequence. This is CRITICAL for:
//! - Replaying a simulation run exactly (same crises, same severities)
//! - Testing the probabilistic models against fixed expectations
//!
//! The psychology engine injects one `RngManager` through every probabilistic
//! function instead of calling an ambient RNG, so a replay of the same event
//! sequence with the same seed produces identical derived state.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use psychsim_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let roll = rng.next_f64();            // [0.0, 1.0)
/// let days = rng.range(1, 30);          // [1, 30)
/// assert!(roll >= 0.0 && roll < 1.0);
/// assert!((1..30).contains(&days));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with the given seed.
    ///
    /// A zero seed is mapped to 1 (xorshift requirement).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u64, advancing internal state.
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a random value in `[min, max)`.
    ///
    /// # Panics
    /// Panics if `min >= max`.
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Generate a random f64 in `[0.0, 1.0)`.
    ///
    /// Used for probability rolls and severity draws.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Generate a random f64 in `[min, max)`.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Roll a probability check: true with probability `p` (clamped to [0,1]).
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p.clamp(0.0, 1.0)
    }

    /// Pick a uniformly random element of a non-empty slice.
    ///
    /// # Panics
    /// Panics if the slice is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "cannot pick from an empty slice");
        let idx = (self.next() % items.len() as u64) as usize;
        &items[idx]
    }

    /// Get current RNG state (for replay diagnostics).
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
