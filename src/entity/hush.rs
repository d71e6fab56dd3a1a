use crate::config::HushTuning;
use crate::entity::{FrameContext, HUSH_TEXT};
use crate::foundation::core::{FrameIndex, Point, Rgba8, Vec2};
use crate::foundation::error::HushResult;
use crate::foundation::math::distance;
use crate::random::SessionRng;
use crate::render::surface::{RenderSurface, with_blur, with_saved};
use crate::text::{draw_tracked_centered, tracked_bounds};

/// Hover-reactive "hush" label anchored at a fixed position.
///
/// Alpha eases toward zero while the pointer is over the label and back to `alpha_max`
/// otherwise. Labels are rebuilt from scratch on resize.
#[derive(Clone, Debug, PartialEq)]
pub struct HushLabel {
    anchor: Point,
    size: f64,
    blur_px: f64,
    alpha_max: f64,
    alpha: f64,
    target_alpha: f64,
    ease: f64,
    phase: f64,
    tracking: f64,
    hover_factor: f64,
}

impl HushLabel {
    /// Visible label at `anchor`; draws its drift phase from `rng`.
    pub fn new(
        anchor: Point,
        size: f64,
        tuning: &HushTuning,
        tracking: f64,
        rng: &mut SessionRng,
    ) -> Self {
        Self {
            anchor,
            size,
            blur_px: tuning.blur_px,
            alpha_max: tuning.alpha_max,
            alpha: tuning.alpha_max,
            target_alpha: tuning.alpha_max,
            ease: tuning.ease,
            phase: rng.angle(),
            tracking,
            hover_factor: tuning.hover_factor,
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_max(&self) -> f64 {
        self.alpha_max
    }

    pub fn target_alpha(&self) -> f64 {
        self.target_alpha
    }

    pub fn tracking(&self) -> f64 {
        self.tracking
    }

    /// Hover radius in pixels.
    pub fn hover_radius(&self) -> f64 {
        self.size * self.hover_factor
    }

    /// `true` when `pointer` lies within the hover radius of the anchor.
    pub fn is_hovered(&self, pointer: Option<Point>) -> bool {
        pointer.is_some_and(|p| distance(p, self.anchor) <= self.hover_radius())
    }

    /// Small idle drift applied when drawing.
    pub fn drift(&self, frame: FrameIndex) -> Vec2 {
        let t = frame.as_f64() + self.phase;
        Vec2::new(2.0 * (t * 0.02).sin(), 1.4 * (t * 0.018).cos())
    }

    pub fn update(&mut self, ctx: &FrameContext) {
        self.target_alpha = if self.is_hovered(ctx.pointer) {
            0.0
        } else {
            self.alpha_max
        };
        self.alpha += (self.target_alpha - self.alpha) * self.ease;
    }

    pub fn render<S>(&self, surface: &mut S, frame: FrameIndex, ink: Rgba8) -> HushResult<()>
    where
        S: RenderSurface + ?Sized,
    {
        let track = self.size * self.tracking;
        let size = self.size;
        with_saved(surface, |s| {
            s.translate(self.anchor.to_vec2() + self.drift(frame));
            s.set_fill(ink.with_alpha(self.alpha));
            let bounds = tracked_bounds(s, HUSH_TEXT, size, track, Point::ORIGIN);
            with_blur(s, self.blur_px, bounds, |s| {
                draw_tracked_centered(s, HUSH_TEXT, size, track, Point::ORIGIN)
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entity/hush.rs"]
mod tests;
