//! Session random source.
//!
//! Every randomized parameter of a session flows through one [`SessionRng`], so a fixed seed
//! reproduces the whole scene: tracking factors, entity populations, grain and the noise table.

pub(crate) mod noise;

use rand::{Rng as _, SeedableRng as _, rngs::StdRng, seq::SliceRandom as _};

pub use noise::NoiseField;

/// Half-open sampling interval `[lo, hi)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Inclusive lower bound.
    pub lo: f64,
    /// Exclusive upper bound.
    pub hi: f64,
}

impl Span {
    /// Construct a span; callers validate ordering through config validation.
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Span centered on `center` with half-width `jitter`.
    pub const fn around(center: f64, jitter: f64) -> Self {
        Self::new(center - jitter, center + jitter)
    }

    /// `true` when both bounds are finite and `lo <= hi`.
    pub fn is_valid(self) -> bool {
        self.lo.is_finite() && self.hi.is_finite() && self.lo <= self.hi
    }

    /// `true` when `v` lies inside `[lo, hi)`, or equals `lo` for a degenerate span.
    pub fn contains(self, v: f64) -> bool {
        if self.lo == self.hi {
            return v == self.lo;
        }
        self.lo <= v && v < self.hi
    }
}

/// Seeded random source shared by the scene generator and entity respawns.
#[derive(Clone, Debug)]
pub struct SessionRng {
    seed: u64,
    rng: StdRng,
}

impl SessionRng {
    /// Deterministic source for `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from OS entropy; the drawn seed is kept so a session can be replayed.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random::<u64>())
    }

    /// Seed this source was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Uniform in `[span.lo, span.hi)`; degenerate spans return `lo`.
    pub fn uniform(&mut self, span: Span) -> f64 {
        if span.hi <= span.lo {
            return span.lo;
        }
        self.rng.gen_range(span.lo..span.hi)
    }

    /// Uniform angle in `[0, TAU)`.
    pub fn angle(&mut self) -> f64 {
        self.unit() * std::f64::consts::TAU
    }

    /// Uniform integer in `[lo, hi]`; an inverted range returns `lo`.
    pub fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform pick from `items`, `None` when empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

#[cfg(test)]
#[path = "../tests/unit/random/rng.rs"]
mod tests;
