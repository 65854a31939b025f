//! Random sources used by every generation strategy.
//!
//! Two implementations are provided:
//! - [`OsRandom`] draws from the thread-local CSPRNG, reseeded from the OS.
//! - [`SeededRandom`] wraps a seeded `StdRng` for reproducible test runs.
//!
//! Both are safe to share between threads.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of randomness for junk generation.
pub trait RandomSource: Send + Sync {
    /// Fill a buffer with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);

    /// Return the next random `u64`.
    fn next_u64(&self) -> u64;

    /// Uniform integer in `[min, max)`. Callers guarantee `min < max`.
    fn int_in_range(&self, min: i64, max: i64) -> i64;

    /// Uniform index in `[0, len)`. Callers guarantee `len > 0`.
    fn index(&self, len: usize) -> usize;

    /// Fair coin flip.
    fn coin(&self) -> bool;

    /// Stable identifier for tracing and diagnostics.
    fn source_id(&self) -> &'static str;
}

/// OS-seeded cryptographically secure random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rand::rng().fill_bytes(dest);
    }

    fn next_u64(&self) -> u64 {
        rand::rng().next_u64()
    }

    fn int_in_range(&self, min: i64, max: i64) -> i64 {
        rand::rng().random_range(min..max)
    }

    fn index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }

    fn coin(&self) -> bool {
        rand::rng().random_bool(0.5)
    }

    fn source_id(&self) -> &'static str {
        "os"
    }
}

/// Deterministic random source for reproducible fixtures.
///
/// The same seed yields the same sequence of values as long as calls happen
/// in the same order.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
    seed: u64,
}

impl SeededRandom {
    /// Create a random source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed,
        }
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.rng.lock().fill_bytes(dest);
    }

    fn next_u64(&self) -> u64 {
        self.rng.lock().next_u64()
    }

    fn int_in_range(&self, min: i64, max: i64) -> i64 {
        self.rng.lock().random_range(min..max)
    }

    fn index(&self, len: usize) -> usize {
        self.rng.lock().random_range(0..len)
    }

    fn coin(&self) -> bool {
        self.rng.lock().random_bool(0.5)
    }

    fn source_id(&self) -> &'static str {
        "seeded"
    }
}
