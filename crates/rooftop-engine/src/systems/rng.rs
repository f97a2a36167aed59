//! Deterministic scatter for particle bursts. A seeded world replays
//! identically, which the tests rely on.

/// xorshift64 state. Never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng(seed.max(1))
    }

    fn advance(&mut self) -> u64 {
        let mut s = self.0;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.0 = s;
        s
    }

    /// Uniform in [0, 1). Uses the top 24 bits, the width of an f32 mantissa.
    pub fn unit(&mut self) -> f32 {
        (self.advance() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in [lo, hi).
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform in [-half, half).
    pub fn spread(&mut self, half: f32) -> f32 {
        self.range(-half, half)
    }
}
