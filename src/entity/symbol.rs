use crate::config::SymbolTuning;
use crate::entity::FrameContext;
use crate::foundation::core::{Point, Rgba8, Viewport};
use crate::foundation::error::HushResult;
use crate::random::{SessionRng, Span};
use crate::render::surface::{RenderSurface, with_blur, with_saved};
use crate::text::{draw_tracked_centered, tracked_bounds};

/// Slowly falling, rotating background glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingSymbol {
    pos: Point,
    angle: f64,
    spin: f64,
    glyph: char,
    size: f64,
    fall_speed: f64,
    alpha: f64,
    wobble: f64,
    blur_px: f64,
}

impl FallingSymbol {
    /// Roll a new symbol. The first population spreads over the whole viewport; respawns enter
    /// above the top edge.
    pub fn spawn(
        viewport: Viewport,
        tuning: &SymbolTuning,
        rng: &mut SessionRng,
        initial: bool,
    ) -> Self {
        let x = rng.unit() * viewport.w();
        let y = if initial {
            rng.unit() * viewport.h()
        } else {
            tuning.spawn_y
        };
        let angle = rng.angle();
        let spin = rng.uniform(Span::new(-tuning.max_spin, tuning.max_spin));
        let glyph = rng.choose(&tuning.glyphs).copied().unwrap_or('·');
        let size = rng.uniform(tuning.size);
        let fall_speed = rng.uniform(tuning.fall_speed);
        let alpha = rng.uniform(tuning.alpha);
        let wobble = rng.unit() * 1000.0;
        Self {
            pos: Point::new(x, y),
            angle,
            spin,
            glyph,
            size,
            fall_speed,
            alpha,
            wobble,
            blur_px: tuning.blur_px,
        }
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fall, wobble and spin; past the bottom margin the symbol respawns above the top edge.
    pub fn update(&mut self, ctx: &FrameContext, tuning: &SymbolTuning, rng: &mut SessionRng) {
        let f = ctx.frame.as_f64();
        self.pos.y += self.fall_speed * 14.0;
        self.pos.x += (f * 0.008 + self.wobble).sin() * 0.35;
        self.angle += self.spin;
        if self.pos.y > ctx.viewport.h() + tuning.respawn_margin {
            *self = Self::spawn(ctx.viewport, tuning, rng, false);
        }
    }

    pub fn render<S>(&self, surface: &mut S, ink: Rgba8, tracking: f64) -> HushResult<()>
    where
        S: RenderSurface + ?Sized,
    {
        let mut buf = [0u8; 4];
        let text: &str = self.glyph.encode_utf8(&mut buf);
        let track = self.size * tracking;
        let size = self.size;
        with_saved(surface, |s| {
            s.translate(self.pos.to_vec2());
            s.rotate(self.angle);
            s.set_fill(ink.with_alpha(self.alpha));
            let bounds = tracked_bounds(s, text, size, track, Point::ORIGIN);
            with_blur(s, self.blur_px, bounds, |s| {
                draw_tracked_centered(s, text, size, track, Point::ORIGIN)
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entity/symbol.rs"]
mod tests;
