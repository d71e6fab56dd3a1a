//! Tracked, centered text drawn glyph by glyph.

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::HushResult;
use crate::render::surface::RenderSurface;

/// Baseline offset below the requested center, as a fraction of the font size.
pub const BASELINE_SHIFT: f64 = 0.35;

/// Sum of glyph advances plus `track_px` between consecutive glyphs.
pub fn measure_tracked_width<S>(surface: &mut S, text: &str, font_size: f64, track_px: f64) -> f64
where
    S: RenderSurface + ?Sized,
{
    let mut width = 0.0;
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            width += track_px;
        }
        width += surface.glyph_advance(ch, font_size);
    }
    width
}

/// Draw `text` centered horizontally on `origin.x`, baseline at `origin.y + 0.35 × font_size`.
///
/// Uses the surface's current fill and transform.
pub fn draw_tracked_centered<S>(
    surface: &mut S,
    text: &str,
    font_size: f64,
    track_px: f64,
    origin: Point,
) -> HushResult<()>
where
    S: RenderSurface + ?Sized,
{
    if text.is_empty() {
        return Ok(());
    }
    let width = measure_tracked_width(surface, text, font_size, track_px);
    let baseline = origin.y + font_size * BASELINE_SHIFT;
    let mut x = origin.x - width / 2.0;
    for ch in text.chars() {
        surface.fill_glyph(ch, font_size, Point::new(x, baseline))?;
        x += surface.glyph_advance(ch, font_size) + track_px;
    }
    Ok(())
}

/// Local-space box that contains the ink of [`draw_tracked_centered`] with the same arguments.
///
/// Vertical extent assumes ascenders within one em above the baseline and descenders within
/// `0.4` em below it; a quarter em of slack is added on both sides for overhanging glyphs.
pub fn tracked_bounds<S>(
    surface: &mut S,
    text: &str,
    font_size: f64,
    track_px: f64,
    origin: Point,
) -> Rect
where
    S: RenderSurface + ?Sized,
{
    let width = measure_tracked_width(surface, text, font_size, track_px);
    let baseline = origin.y + font_size * BASELINE_SHIFT;
    let slack = font_size * 0.25;
    Rect::new(
        origin.x - width / 2.0 - slack,
        baseline - font_size,
        origin.x + width / 2.0 + slack,
        baseline + font_size * 0.4,
    )
}

#[cfg(test)]
#[path = "../tests/unit/text.rs"]
mod tests;
