//! Deterministic randomness for prompt assembly.
//!
//! Every random choice in the engine flows through a [`RandomSource`] owned
//! by one generation call. The production source is PCG32 seeded from the
//! request seed, so the same seed and inputs always yield the same prompt.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Bernoulli trial: true with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }
}

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// PCG32-backed [`RandomSource`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u32,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: create_rng(seed),
        }
    }

    /// The seed this source was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// A scripted source that cycles through fixed values.
///
/// Useful for pinning a specific branch in tests.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    /// Creates a source cycling through `values`. Values are clamped into
    /// `[0, 1)`; an empty list always yields 0.
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self {
            values,
            position: 0,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            self.position += 1;
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

/// Shuffles `items` in place with Fisher–Yates.
///
/// Walks `i` from `len - 1` down to `1` and swaps with
/// `j = floor(rng() * (i + 1))`.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// Picks one element uniformly. Returns `None` for an empty slice.
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.index(items.len())])
    }
}

/// Draws up to `count` distinct elements by shuffling a copy and slicing.
pub fn sample<T: Clone>(rng: &mut dyn RandomSource, items: &[T], count: usize) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle(rng, &mut copy);
    copy.truncate(count);
    copy
}
