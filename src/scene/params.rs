use crate::config::TrackingBands;
use crate::entity::WordKind;
use crate::random::SessionRng;

/// Letter-spacing factors (fraction of font size) drawn once per session.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackingFactors {
    pub hush: f64,
    pub soft: f64,
    pub breathe: f64,
    pub symbol: f64,
}

impl TrackingFactors {
    /// Draw each factor from its band, in the order hush, soft, breathe, symbol.
    pub fn draw(bands: &TrackingBands, rng: &mut SessionRng) -> Self {
        Self {
            hush: rng.uniform(bands.hush),
            soft: rng.uniform(bands.soft),
            breathe: rng.uniform(bands.breathe),
            symbol: rng.uniform(bands.symbol),
        }
    }

    /// Factor for a foreground word of `kind`.
    pub fn for_word(&self, kind: WordKind) -> f64 {
        match kind {
            WordKind::Soft => self.soft,
            WordKind::Breathe => self.breathe,
        }
    }
}

/// Parameters randomized once per session and shared by all entities.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeneratedParameters {
    /// Seed the session random source was built from.
    pub seed: u64,
    pub tracking: TrackingFactors,
}

impl GeneratedParameters {
    pub fn draw(bands: &TrackingBands, rng: &mut SessionRng) -> Self {
        Self {
            seed: rng.seed(),
            tracking: TrackingFactors::draw(bands, rng),
        }
    }
}
