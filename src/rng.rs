//! Deterministic random stream derived from an optional seed string.
//!
//! Seeds are hashed with a 128-bit avalanche mix and the first lane becomes the
//! 32-bit state of a Mulberry32 generator. The same seed yields the same
//! sequence on every platform. Without a seed the stream comes from a
//! `SmallRng` seeded by the thread RNG.

use rand::RngCore;
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, SeedableRng};

/// 2^32, the divisor turning a `u32` draw into a float in `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// Mix a string into four 32-bit lanes.
pub fn seed_hash(seed: &str) -> [u32; 4] {
    let mut h1: u32 = 1_779_033_703;
    let mut h2: u32 = 3_144_134_277;
    let mut h3: u32 = 1_013_904_242;
    let mut h4: u32 = 2_773_480_762;
    for unit in seed.encode_utf16() {
        let k = u32::from(unit);
        h1 = h2 ^ (h1 ^ k).wrapping_mul(597_399_067);
        h2 = h3 ^ (h2 ^ k).wrapping_mul(2_869_860_233);
        h3 = h4 ^ (h3 ^ k).wrapping_mul(951_274_213);
        h4 = h1 ^ (h4 ^ k).wrapping_mul(2_716_044_179);
    }
    h1 = (h3 ^ (h1 >> 18)).wrapping_mul(597_399_067);
    h2 = (h4 ^ (h2 >> 22)).wrapping_mul(2_869_860_233);
    h3 = (h1 ^ (h3 >> 17)).wrapping_mul(951_274_213);
    h4 = (h2 ^ (h4 >> 19)).wrapping_mul(2_716_044_179);
    [h1 ^ h2 ^ h3 ^ h4, h2 ^ h1, h3 ^ h1, h4 ^ h1]
}

/// 32-bit state generator with a multiply/xor/shift output permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(state: u32) -> Self {
        Self { state }
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[derive(Debug, Clone)]
enum Stream {
    Seeded(Mulberry32),
    #[cfg(feature = "std")]
    Entropy(SmallRng),
}

/// Random stream used by board generation.
#[derive(Debug, Clone)]
pub struct RandomSource {
    stream: Stream,
}

impl RandomSource {
    /// Reproducible stream for `seed`.
    pub fn seeded(seed: &str) -> Self {
        let [state, ..] = seed_hash(seed);
        Self {
            stream: Stream::Seeded(Mulberry32::new(state)),
        }
    }

    /// Non-reproducible stream seeded from system entropy.
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        let mut seed_rng = rand::rng();
        Self {
            stream: Stream::Entropy(SmallRng::from_rng(&mut seed_rng)),
        }
    }

    /// Seeded stream when `seed` is given, entropy otherwise. Returns `None`
    /// for an unseeded request in builds without an entropy source.
    pub fn create(seed: Option<&str>) -> Option<Self> {
        match seed {
            Some(s) => Some(Self::seeded(s)),
            #[cfg(feature = "std")]
            None => Some(Self::from_entropy()),
            #[cfg(not(feature = "std"))]
            None => None,
        }
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / U32_RANGE
    }

    /// Uniform index in `[0, n)`; `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        let idx = libm::floor(self.next_f64() * n as f64) as usize;
        idx.min(n.saturating_sub(1))
    }

    /// In-place Durstenfeld shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        match &mut self.stream {
            Stream::Seeded(rng) => rng.next_u32(),
            #[cfg(feature = "std")]
            Stream::Entropy(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match &mut self.stream {
            Stream::Seeded(rng) => rng.next_u64(),
            #[cfg(feature = "std")]
            Stream::Entropy(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match &mut self.stream {
            Stream::Seeded(rng) => rng.fill_bytes(dest),
            #[cfg(feature = "std")]
            Stream::Entropy(rng) => rng.fill_bytes(dest),
        }
    }
}
