//! Seeded randomness for hypergraph generation and eigensolver start vectors.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// Reproducible random source.
///
/// One master seed drives a whole run. Consumers that need several
/// independent sequences, such as successive Lanczos restarts, open numbered
/// substreams instead of sharing a handle, so the values drawn for one
/// stream never depend on how much another stream consumed.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Seeds a handle directly.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Opens substream `stream` of `master_seed`.
    pub fn substream(master_seed: u64, stream: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, stream))
    }

    /// Draws a direction of Euclidean length 1 in `dim` dimensions.
    ///
    /// Components are sampled uniformly from `[-1, 1)` before normalising.
    /// An empty or all-zero draw is returned unscaled.
    pub fn unit_direction(&mut self, dim: usize) -> Vec<f64> {
        let mut direction: Vec<f64> = (0..dim).map(|_| self.gen_range(-1.0..1.0)).collect();
        let length = direction.iter().map(|x| x * x).sum::<f64>().sqrt();
        if length > 0.0 {
            direction.iter_mut().for_each(|x| *x /= length);
        }
        direction
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Seed of substream `stream`: SipHash-1-3 of `(master_seed, stream)` under zero keys.
pub fn derive_substream_seed(master_seed: u64, stream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(stream);
    hasher.finish()
}
