//! Builds entity populations from the configuration and the session random source.

use crate::config::{FloaterTuning, HushTuning, PlacementBudget, SymbolTuning};
use crate::entity::floater::PlacedPoint;
use crate::entity::{FallingSymbol, FloaterWord, HushLabel, Placement, WordKind};
use crate::foundation::core::{Point, Viewport};
use crate::foundation::math::distance;
use crate::random::SessionRng;
use crate::scene::params::TrackingFactors;

/// One label per anchor, at `(u W, v H)` with size `factor × min(W, H)`.
pub fn generate_hushes(
    viewport: Viewport,
    tuning: &HushTuning,
    tracking: &TrackingFactors,
    rng: &mut SessionRng,
) -> Vec<HushLabel> {
    tuning
        .anchors
        .iter()
        .map(|a| {
            HushLabel::new(
                viewport.project(Point::new(a.u, a.v)),
                a.size_factor * viewport.min_side(),
                tuning,
                tracking.hush,
                rng,
            )
        })
        .collect()
}

/// Rejection-sample a start position clear of every hush anchor.
///
/// A candidate is rejected when it lies closer than `padding × size` to any anchor. After
/// `budget.attempts` rejections the position is drawn from the whole viewport unchecked.
pub fn sample_placement(
    viewport: Viewport,
    hushes: &[HushLabel],
    budget: &PlacementBudget,
    rng: &mut SessionRng,
) -> PlacedPoint {
    for attempt in 1..=budget.attempts {
        let uv = Point::new(rng.uniform(budget.u), rng.uniform(budget.v));
        let pos = viewport.project(uv);
        let clear = hushes
            .iter()
            .all(|h| distance(pos, h.anchor()) >= h.size() * budget.padding);
        if clear {
            return PlacedPoint {
                uv,
                pos,
                placement: Placement::Sampled { attempts: attempt },
            };
        }
    }

    let uv = Point::new(rng.unit(), rng.unit());
    tracing::debug!(
        attempts = budget.attempts,
        u = uv.x,
        v = uv.y,
        "placement budget exhausted, using unchecked position"
    );
    PlacedPoint {
        uv,
        pos: viewport.project(uv),
        placement: Placement::Fallback {
            attempts: budget.attempts,
        },
    }
}

/// The "breathe" words (count drawn from the configured range), then the "soft" words.
pub fn generate_floaters(
    viewport: Viewport,
    hushes: &[HushLabel],
    tuning: &FloaterTuning,
    tracking: &TrackingFactors,
    rng: &mut SessionRng,
) -> Vec<FloaterWord> {
    let breathe = rng.int_inclusive(tuning.breathe_count[0], tuning.breathe_count[1]);
    let kinds = std::iter::repeat_n(WordKind::Breathe, breathe as usize)
        .chain(std::iter::repeat_n(WordKind::Soft, tuning.soft_count as usize));

    let mut out = Vec::with_capacity(breathe as usize + tuning.soft_count as usize);
    for kind in kinds {
        let at = sample_placement(viewport, hushes, &tuning.placement, rng);
        out.push(FloaterWord::spawn(
            kind,
            at,
            tuning,
            tracking.for_word(kind),
            rng,
        ));
    }
    let fallbacks = out.iter().filter(|w| w.placement().is_fallback()).count();
    tracing::debug!(breathe, soft = tuning.soft_count, fallbacks, "floaters generated");
    out
}

/// A fresh population spread over the whole viewport.
pub fn generate_symbols(
    viewport: Viewport,
    tuning: &SymbolTuning,
    rng: &mut SessionRng,
) -> Vec<FallingSymbol> {
    (0..tuning.count)
        .map(|_| FallingSymbol::spawn(viewport, tuning, rng, true))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/generator.rs"]
mod tests;
