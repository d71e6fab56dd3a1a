use crate::config::FloaterTuning;
use crate::entity::{FrameContext, HushLabel, WordKind};
use crate::foundation::core::{FrameIndex, Point, Rgba8, Viewport};
use crate::foundation::error::HushResult;
use crate::foundation::math::{distance, wrap};
use crate::random::{NoiseField, SessionRng};
use crate::render::surface::{RenderSurface, with_blur, with_saved};
use crate::text::{draw_tracked_centered, tracked_bounds};

/// Offset between the horizontal and vertical noise seeds of a floater.
pub const SEED_Y_OFFSET: f64 = 99.0;

/// How a floater's start position was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Placement {
    /// Candidate accepted after `attempts` tries, clear of every hush anchor.
    Sampled { attempts: u32 },
    /// Budget of `attempts` exhausted; position drawn without the keep-out check.
    Fallback { attempts: u32 },
}

impl Placement {
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// A sampled start position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedPoint {
    /// Normalized position.
    pub uv: Point,
    /// Pixel position.
    pub pos: Point,
    /// Sampling outcome.
    pub placement: Placement,
}

/// Runtime keep-out from hush anchors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Avoidance {
    /// Keep-out radius as a fraction of hush size.
    pub factor: f64,
    /// Fraction of the overlap pushed out per frame.
    pub gain: f64,
}

impl Avoidance {
    pub fn from_tuning(tuning: &FloaterTuning) -> Self {
        Self {
            factor: tuning.avoid_factor,
            gain: tuning.repel_gain,
        }
    }
}

/// Drifting foreground word with fixed size, noise-driven motion and breathing alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct FloaterWord {
    kind: WordKind,
    uv: Point,
    pos: Point,
    size: f64,
    base_alpha: f64,
    blur_px: f64,
    speed: f64,
    drift: f64,
    seed_x: f64,
    seed_y: f64,
    fade_offset: f64,
    tracking: f64,
    placement: Placement,
}

impl FloaterWord {
    /// Roll a word of `kind` at `at`, drawing size, alpha, blur, motion and seeds from `rng`.
    pub fn spawn(
        kind: WordKind,
        at: PlacedPoint,
        tuning: &FloaterTuning,
        tracking: f64,
        rng: &mut SessionRng,
    ) -> Self {
        let style = match kind {
            WordKind::Breathe => &tuning.breathe,
            WordKind::Soft => &tuning.soft,
        };
        let size = rng.uniform(tuning.size);
        let base_alpha = rng.uniform(style.base_alpha);
        let blur_px = rng.choose(&style.blur_choices).copied().unwrap_or(0.0);
        let speed = rng.uniform(tuning.speed);
        let drift = rng.uniform(tuning.drift);
        let seed_x = rng.unit() * 1000.0;
        let fade_offset = rng.unit() * 1000.0;
        Self {
            kind,
            uv: at.uv,
            pos: at.pos,
            size,
            base_alpha,
            blur_px,
            speed,
            drift,
            seed_x,
            seed_y: seed_x + SEED_Y_OFFSET,
            fade_offset,
            tracking,
            placement: at.placement,
        }
    }

    pub fn kind(&self) -> WordKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    /// Normalized position as of creation or the last resize.
    pub fn uv(&self) -> Point {
        self.uv
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn tracking(&self) -> f64 {
        self.tracking
    }

    pub fn base_alpha(&self) -> f64 {
        self.base_alpha
    }

    pub fn blur_px(&self) -> f64 {
        self.blur_px
    }

    pub fn seeds(&self) -> (f64, f64) {
        (self.seed_x, self.seed_y)
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Breathing alpha at `frame`, between 65% and 100% of the base alpha.
    pub fn alpha_at(&self, frame: FrameIndex) -> f64 {
        let breath = 0.5 + 0.5 * ((frame.as_f64() + self.fade_offset) * 0.01).sin();
        self.base_alpha * (0.65 + 0.35 * breath)
    }

    /// Drift with the noise field, wrap around the viewport, then push out of hush zones.
    pub fn update(
        &mut self,
        ctx: &FrameContext,
        noise: &NoiseField,
        hushes: &[HushLabel],
        avoid: Avoidance,
    ) {
        let (w, h) = (ctx.viewport.w(), ctx.viewport.h());
        let t = ctx.frame.as_f64() * self.speed * 0.01;
        let vx = (noise.sample(self.seed_x, t) - 0.5) * self.drift;
        let vy = (noise.sample(self.seed_y, t) - 0.5) * self.drift;
        let mut x = wrap(self.pos.x + vx, w);
        let mut y = wrap(self.pos.y + vy, h);

        for hush in hushes {
            let avoid_r = hush.size() * avoid.factor;
            let anchor = hush.anchor();
            let d = distance(Point::new(x, y), anchor);
            if d > 1e-4 && d < avoid_r {
                let push = (avoid_r - d) * avoid.gain;
                x += (x - anchor.x) / d * push;
                y += (y - anchor.y) / d * push;
            }
        }

        self.pos = Point::new(wrap(x, w), wrap(y, h));
    }

    /// Record the normalized position in `viewport` ahead of a resize.
    pub fn capture_uv(&mut self, viewport: Viewport) {
        self.uv = viewport.normalize(self.pos);
    }

    /// Place the word at its normalized position in `viewport`.
    pub fn reproject(&mut self, viewport: Viewport) {
        self.pos = viewport.project(self.uv);
    }

    pub fn render<S>(&self, surface: &mut S, frame: FrameIndex, ink: Rgba8) -> HushResult<()>
    where
        S: RenderSurface + ?Sized,
    {
        let text = self.kind.text();
        let track = self.size * self.tracking;
        let size = self.size;
        with_saved(surface, |s| {
            s.translate(self.pos.to_vec2());
            s.set_fill(ink.with_alpha(self.alpha_at(frame)));
            let bounds = tracked_bounds(s, text, size, track, Point::ORIGIN);
            with_blur(s, self.blur_px, bounds, |s| {
                draw_tracked_centered(s, text, size, track, Point::ORIGIN)
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entity/floater.rs"]
mod tests;
