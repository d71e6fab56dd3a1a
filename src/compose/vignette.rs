use kurbo::Shape;

use crate::config::BackdropTuning;
use crate::foundation::core::{Affine, Viewport};
use crate::foundation::error::{HushError, HushResult};
use crate::render::blur::{blur_rgba8_premul, kernel_for};
use crate::render::cpu::{
    affine_to_cpu, bezpath_to_cpu, image_premul_bytes_to_pixmap, pixmap_paint, surface_size,
};
use crate::render::surface::RasterLayer;

/// Stroke width of the white band hugging the outside of the frame.
const BAND_WIDTH: f64 = 120.0;
/// Corner radius of the band's center line.
const BAND_RADIUS: f64 = 60.0;
/// The band is stroked and blurred at this fraction of full resolution, then upsampled.
const WORK_SCALE: f64 = 0.25;

/// Soft white glow creeping in from the viewport edges.
///
/// A rounded white band of `BAND_WIDTH` sits just outside the frame and is blurred with a
/// Gaussian of `vignette_blur_px`, so only its blurred inner edge reaches the viewport. The
/// glow is rendered at reduced resolution and scaled back up with bilinear sampling.
#[tracing::instrument(skip(tuning), fields(w = viewport.width, h = viewport.height))]
pub fn generate_vignette(viewport: Viewport, tuning: &BackdropTuning) -> HushResult<RasterLayer> {
    let sigma = tuning.vignette_blur_px;
    if !(sigma > 0.0 && tuning.vignette_alpha > 0.0) {
        return Ok(RasterLayer::transparent(viewport));
    }
    let (w, h) = surface_size(viewport)?;

    // Canvas margin: everything within three sigmas of the viewport contributes to it.
    let (kernel_radius, _) = kernel_for(sigma);
    let margin = f64::from(kernel_radius) + 2.0;
    let work_w = ((viewport.w() + 2.0 * margin) * WORK_SCALE).ceil();
    let work_h = ((viewport.h() + 2.0 * margin) * WORK_SCALE).ceil();
    let (work_w, work_h): (u16, u16) = (
        (work_w as u32)
            .try_into()
            .map_err(|_| HushError::render("vignette canvas exceeds u16"))?,
        (work_h as u32)
            .try_into()
            .map_err(|_| HushError::render("vignette canvas exceeds u16"))?,
    );

    let half = BAND_WIDTH / 2.0;
    let band = kurbo::RoundedRect::new(
        -half,
        -half,
        viewport.w() + half,
        viewport.h() + half,
        BAND_RADIUS,
    );
    let alpha = tuning.vignette_alpha.round().clamp(0.0, 255.0) as u8;

    let mut ctx = vello_cpu::RenderContext::new(work_w, work_h);
    ctx.set_transform(affine_to_cpu(
        Affine::scale(WORK_SCALE) * Affine::translate((margin, margin)),
    ));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, alpha));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(BAND_WIDTH));
    ctx.stroke_path(&bezpath_to_cpu(&band.to_path(0.1)));
    let mut work = vello_cpu::Pixmap::new(work_w, work_h);
    ctx.flush();
    ctx.render_to_pixmap(&mut work);

    let (radius, work_sigma) = kernel_for(sigma * WORK_SCALE);
    let (ww, wh) = (u32::from(work_w), u32::from(work_h));
    let blurred = blur_rgba8_premul(work.data_as_u8_slice(), ww, wh, radius, work_sigma)?;
    let glow = pixmap_paint(image_premul_bytes_to_pixmap(&blurred, ww, wh)?);

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(affine_to_cpu(
        Affine::translate((-margin, -margin)) * Affine::scale(1.0 / WORK_SCALE),
    ));
    ctx.set_paint(glow);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(ww), f64::from(wh)));
    let mut full = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut full);

    RasterLayer::from_premul(
        viewport.width,
        viewport.height,
        full.data_as_u8_slice().to_vec(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/compose/vignette.rs"]
mod tests;
