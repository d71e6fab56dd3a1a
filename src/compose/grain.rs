use crate::config::BackdropTuning;
use crate::foundation::core::{Point, Rgba8, Viewport};
use crate::foundation::error::HushResult;
use crate::random::SessionRng;
use crate::render::cpu::CpuSurface;
use crate::render::surface::{RasterLayer, RenderSurface};

/// Number of grain dots for `viewport` at `density` dots per pixel.
pub fn grain_dot_count(viewport: Viewport, density: f64) -> u64 {
    if !(density.is_finite() && density > 0.0) {
        return 0;
    }
    (viewport.area() as f64 * density).ceil() as u64
}

/// Fill the grain dots for `viewport` onto `surface` as faint white circles. Returns the dot
/// count.
pub fn draw_grain<S>(
    surface: &mut S,
    viewport: Viewport,
    tuning: &BackdropTuning,
    rng: &mut SessionRng,
) -> HushResult<u64>
where
    S: RenderSurface + ?Sized,
{
    let count = grain_dot_count(viewport, tuning.grain_density);
    for _ in 0..count {
        let x = rng.unit() * viewport.w();
        let y = rng.unit() * viewport.h();
        let alpha = rng.uniform(tuning.grain_alpha);
        let diameter = rng.uniform(tuning.grain_diameter);
        surface.set_fill(Rgba8::gray(255).with_alpha(alpha));
        surface.fill_circle(Point::new(x, y), diameter / 2.0)?;
    }
    Ok(count)
}

/// Rasterize the white grain overlay once for `viewport`.
#[tracing::instrument(skip(tuning, rng), fields(w = viewport.width, h = viewport.height))]
pub fn generate_grain(
    viewport: Viewport,
    tuning: &BackdropTuning,
    rng: &mut SessionRng,
) -> HushResult<RasterLayer> {
    let mut canvas = CpuSurface::canvas(viewport)?;
    let count = draw_grain(&mut canvas, viewport, tuning, rng)?;
    tracing::debug!(count, "grain regenerated");
    canvas.into_layer()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/grain.rs"]
mod tests;
