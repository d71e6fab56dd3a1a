use crate::assets::texture::Texture;
use crate::config::Palette;
use crate::foundation::core::{FrameIndex, Rect, Rgba8, Viewport};
use crate::foundation::error::HushResult;
use crate::render::surface::RenderSurface;

/// Top and bottom gradient colors at `frame`.
pub fn gradient_colors(frame: FrameIndex, palette: &Palette) -> (Rgba8, Rgba8) {
    let t = frame.as_f64() * 0.0022;
    let a = 0.18 * (t * 0.8).sin();
    let b = 0.15 * (t * 0.9 + 1.1).sin();
    let shift = |c: Rgba8, k: [f64; 3], m: f64| {
        Rgba8::from_f64(
            f64::from(c.r) + k[0] * m,
            f64::from(c.g) + k[1] * m,
            f64::from(c.b) + k[2] * m,
        )
    };
    (
        shift(palette.base_a, [10.0, 8.0, 14.0], a),
        shift(palette.base_b, [12.0, 12.0, 10.0], b),
    )
}

/// Opaque vertical gradient, one row at a time, covering 90% of the way to the bottom color.
pub fn draw_gradient<S>(
    surface: &mut S,
    viewport: Viewport,
    frame: FrameIndex,
    palette: &Palette,
) -> HushResult<()>
where
    S: RenderSurface + ?Sized,
{
    let (top, bottom) = gradient_colors(frame, palette);
    let w = viewport.w();
    for y in 0..viewport.height {
        let y = f64::from(y);
        surface.set_fill(top.lerp(bottom, y / viewport.h() * 0.9));
        surface.fill_rect(Rect::new(0.0, y, w, y + 1.0))?;
    }
    Ok(())
}

/// Left-to-right fading tint, `max_alpha` at the left edge down to zero at the right.
pub fn draw_side_tint<S>(
    surface: &mut S,
    viewport: Viewport,
    tint: Rgba8,
    max_alpha: f64,
) -> HushResult<()>
where
    S: RenderSurface + ?Sized,
{
    let h = viewport.h();
    for x in 0..viewport.width {
        let x = f64::from(x);
        surface.set_fill(tint.with_alpha(max_alpha * (1.0 - x / viewport.w())));
        surface.fill_rect(Rect::new(x, 0.0, x + 1.0, h))?;
    }
    Ok(())
}

/// Texture scaled to cover the viewport, centered.
pub fn draw_cover_texture<S>(
    surface: &mut S,
    viewport: Viewport,
    texture: &Texture,
    alpha: u8,
) -> HushResult<()>
where
    S: RenderSurface + ?Sized,
{
    surface.draw_texture(texture, texture.cover_rect(viewport), alpha)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/backdrop.rs"]
mod tests;
