use crate::foundation::error::{HushError, HushResult};

const MAX_DIM: u32 = 16_384;

/// Raster size for drawing an SVG into a `dest_w` × `dest_h` pixel rectangle.
pub(crate) fn svg_raster_size(dest_w: f64, dest_h: f64) -> HushResult<(u32, u32)> {
    fn to_px(v: f64) -> HushResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(HushError::render("svg target has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let (w, h) = (to_px(dest_w)?, to_px(dest_h)?);
    if w > MAX_DIM || h > MAX_DIM {
        return Err(HushError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> HushResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| HushError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
