use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::assets::font::{FontFace, GlyphShaper};
use crate::assets::svg_raster::{rasterize_svg_to_premul_rgba8, svg_raster_size};
use crate::assets::texture::{Texture, TextureKind};
use crate::foundation::core::{Affine, Point, Rect, Rgba8, Vec2, Viewport};
use crate::foundation::error::{HushError, HushResult};
use crate::render::FrameRGBA;
use crate::render::blur::{blur_rgba8_premul, kernel_for};
use crate::render::composite::{Placement, over_at, over_in_place};
use crate::render::surface::{RasterLayer, RenderSurface};

/// Font size estimate used for glyph advances when no font is loaded.
const FALLBACK_ADVANCE_EM: f64 = 0.5;

/// CPU raster surface backed by `vello_cpu`.
///
/// Vector draws accumulate in a `vello_cpu` context and are flushed into a premultiplied frame
/// buffer whenever ordering requires it (blur groups, raster layers, readback). Blur groups render
/// into a context cropped to the group bounds, are blurred on the CPU, then composited back.
pub struct CpuSurface {
    viewport: Viewport,
    size: (u16, u16),
    frame: Vec<u8>,
    base: Option<vello_cpu::RenderContext>,
    blur: Option<BlurGroup>,
    transform: Affine,
    fill: Rgba8,
    stack: Vec<(Affine, Rgba8)>,
    shaper: Option<GlyphShaper>,
    image_cache: HashMap<u64, vello_cpu::Image>,
    svg_cache: HashMap<(u64, u32, u32), vello_cpu::Image>,
}

struct BlurGroup {
    ctx: Option<vello_cpu::RenderContext>,
    x: i32,
    y: i32,
    width: u16,
    height: u16,
    radius_px: f64,
}

impl CpuSurface {
    /// Create a surface for `viewport`, shaping glyphs with `font` when one is given.
    pub fn new(viewport: Viewport, font: Option<&FontFace>) -> HushResult<Self> {
        let shaper = match font {
            Some(face) => {
                let shaper = GlyphShaper::new(face)?;
                tracing::debug!(family = shaper.family(), "font registered");
                Some(shaper)
            }
            None => {
                tracing::warn!("no font loaded, glyphs will not be drawn");
                None
            }
        };
        Self::with_shaper(viewport, shaper)
    }

    /// Glyph-less offscreen surface used to rasterize precomputed layers.
    pub(crate) fn canvas(viewport: Viewport) -> HushResult<Self> {
        Self::with_shaper(viewport, None)
    }

    fn with_shaper(viewport: Viewport, shaper: Option<GlyphShaper>) -> HushResult<Self> {
        let size = surface_size(viewport)?;
        Ok(Self {
            viewport,
            size,
            frame: vec![0; viewport.area() as usize * 4],
            base: None,
            blur: None,
            transform: Affine::IDENTITY,
            fill: Rgba8::gray(0),
            stack: Vec::new(),
            shaper,
            image_cache: HashMap::new(),
            svg_cache: HashMap::new(),
        })
    }

    /// Whether glyphs are shaped from a real font.
    pub fn has_font(&self) -> bool {
        self.shaper.is_some()
    }

    /// Flush pending draws and copy out the premultiplied frame.
    pub fn readback(&mut self) -> HushResult<FrameRGBA> {
        if self.blur.is_some() {
            return Err(HushError::render("readback inside an open blur group"));
        }
        self.flush_base()?;
        Ok(FrameRGBA {
            width: self.viewport.width,
            height: self.viewport.height,
            data: self.frame.clone(),
            premultiplied: true,
        })
    }

    /// Flush pending draws and hand the frame over as a raster layer.
    pub(crate) fn into_layer(mut self) -> HushResult<RasterLayer> {
        let frame = self.readback()?;
        RasterLayer::from_premul(frame.width, frame.height, frame.data)
    }

    fn flush_base(&mut self) -> HushResult<()> {
        let Some(mut ctx) = self.base.take() else {
            return Ok(());
        };
        let (w, h) = self.size;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        over_in_place(&mut self.frame, pixmap.data_as_u8_slice(), 1.0)
    }

    /// Context and device transform for the next draw, or `None` when the draw is clipped away.
    fn target(&mut self) -> Option<(&mut vello_cpu::RenderContext, Affine)> {
        match &mut self.blur {
            Some(group) => {
                let offset = Affine::translate((-f64::from(group.x), -f64::from(group.y)));
                let t = offset * self.transform;
                group.ctx.as_mut().map(|ctx| (ctx, t))
            }
            None => {
                let (w, h) = self.size;
                let ctx = self
                    .base
                    .get_or_insert_with(|| vello_cpu::RenderContext::new(w, h));
                Some((ctx, self.transform))
            }
        }
    }

    fn fill_local_path(&mut self, path: &kurbo::BezPath) {
        let fill = self.fill;
        if fill.a == 0 {
            return;
        }
        let Some((ctx, t)) = self.target() else {
            return;
        };
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(t));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            fill.r, fill.g, fill.b, fill.a,
        ));
        ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn texture_paint(
        &mut self,
        texture: &Texture,
        dest: Rect,
    ) -> HushResult<(vello_cpu::Image, f64, f64)> {
        match texture.kind() {
            TextureKind::Raster(img) => {
                if let Some(paint) = self.image_cache.get(&texture.id()) {
                    return Ok((paint.clone(), f64::from(img.width), f64::from(img.height)));
                }
                let pixmap = image_premul_bytes_to_pixmap(
                    img.rgba8_premul.as_slice(),
                    img.width,
                    img.height,
                )?;
                let paint = pixmap_paint(pixmap);
                self.image_cache.insert(texture.id(), paint.clone());
                Ok((paint, f64::from(img.width), f64::from(img.height)))
            }
            TextureKind::Svg(tree) => {
                let (w, h) = svg_raster_size(dest.width().abs(), dest.height().abs())?;
                let key = (texture.id(), w, h);
                if let Some(paint) = self.svg_cache.get(&key) {
                    return Ok((paint.clone(), f64::from(w), f64::from(h)));
                }
                tracing::debug!(w, h, "rasterizing svg texture");
                let rgba8_premul = rasterize_svg_to_premul_rgba8(tree, w, h)?;
                let pixmap = image_premul_bytes_to_pixmap(&rgba8_premul, w, h)?;
                let paint = pixmap_paint(pixmap);
                self.svg_cache.insert(key, paint.clone());
                Ok((paint, f64::from(w), f64::from(h)))
            }
        }
    }
}

impl RenderSurface for CpuSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) -> HushResult<()> {
        if self.blur.is_some() {
            return Err(HushError::render("resize inside an open blur group"));
        }
        self.size = surface_size(viewport)?;
        self.viewport = viewport;
        self.frame = vec![0; viewport.area() as usize * 4];
        self.base = None;
        self.svg_cache.clear();
        tracing::debug!(w = viewport.width, h = viewport.height, "cpu surface resized");
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.frame.fill(0);
        self.base = None;
        self.blur = None;
        self.transform = Affine::IDENTITY;
        self.fill = Rgba8::gray(0);
        self.stack.clear();
    }

    fn save(&mut self) {
        self.stack.push((self.transform, self.fill));
    }

    fn restore(&mut self) {
        if let Some((t, f)) = self.stack.pop() {
            self.transform = t;
            self.fill = f;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform *= Affine::translate(offset);
    }

    fn rotate(&mut self, radians: f64) {
        self.transform *= Affine::rotate(radians);
    }

    fn set_fill(&mut self, color: Rgba8) {
        self.fill = color;
    }

    fn fill_rect(&mut self, rect: Rect) -> HushResult<()> {
        self.fill_local_path(&rect.to_path(0.1));
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64) -> HushResult<()> {
        if !(radius.is_finite() && radius > 0.0) {
            return Ok(());
        }
        self.fill_local_path(&kurbo::Circle::new(center, radius).to_path(0.1));
        Ok(())
    }

    fn glyph_advance(&mut self, ch: char, font_size: f64) -> f64 {
        match &mut self.shaper {
            Some(shaper) => shaper.shape(ch, font_size).advance,
            None => font_size * FALLBACK_ADVANCE_EM,
        }
    }

    fn fill_glyph(&mut self, ch: char, font_size: f64, origin: Point) -> HushResult<()> {
        let fill = self.fill;
        if fill.a == 0 {
            return Ok(());
        }
        let Some(shaper) = self.shaper.as_mut() else {
            return Ok(());
        };
        let glyphs = shaper.shape(ch, font_size).glyphs.clone();
        if glyphs.is_empty() {
            return Ok(());
        }
        let font = shaper.font().clone();

        let Some((ctx, t)) = self.target() else {
            return Ok(());
        };
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(t * Affine::translate(origin.to_vec2())));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            fill.r, fill.g, fill.b, fill.a,
        ));
        ctx.glyph_run(&font)
            .font_size(font_size as f32)
            .fill_glyphs(glyphs.into_iter().map(|(id, x, y)| vello_cpu::Glyph { id, x, y }));
        Ok(())
    }

    fn begin_blur(&mut self, radius_px: f64, bounds: Rect) -> HushResult<()> {
        if self.blur.is_some() {
            return Err(HushError::render("blur groups do not nest"));
        }
        self.flush_base()?;

        let (kernel_radius, _) = kernel_for(radius_px);
        let pad = f64::from(kernel_radius) + 1.0;
        let device = self
            .transform
            .transform_rect_bbox(bounds)
            .inflate(pad, pad)
            .intersect(self.viewport.rect());

        let (x0, y0) = (device.x0.floor(), device.y0.floor());
        let (x1, y1) = (device.x1.ceil(), device.y1.ceil());
        let (w, h) = ((x1 - x0).max(0.0) as u16, (y1 - y0).max(0.0) as u16);
        let ctx = (w > 0 && h > 0).then(|| vello_cpu::RenderContext::new(w, h));

        self.blur = Some(BlurGroup {
            ctx,
            x: x0 as i32,
            y: y0 as i32,
            width: w,
            height: h,
            radius_px,
        });
        Ok(())
    }

    fn end_blur(&mut self) -> HushResult<()> {
        let group = self
            .blur
            .take()
            .ok_or_else(|| HushError::render("end_blur without begin_blur"))?;
        let Some(mut ctx) = group.ctx else {
            return Ok(());
        };

        let mut pixmap = vello_cpu::Pixmap::new(group.width, group.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let (w, h) = (u32::from(group.width), u32::from(group.height));
        let (radius, sigma) = kernel_for(group.radius_px);
        let blurred = blur_rgba8_premul(pixmap.data_as_u8_slice(), w, h, radius, sigma)?;
        over_at(
            &mut self.frame,
            &blurred,
            Placement {
                dst_width: self.viewport.width,
                dst_height: self.viewport.height,
                src_width: w,
                src_height: h,
                x: group.x,
                y: group.y,
            },
        )
    }

    fn draw_texture(&mut self, texture: &Texture, dest: Rect, alpha: u8) -> HushResult<()> {
        if alpha == 0 || dest.area() == 0.0 {
            return Ok(());
        }
        let (paint, w, h) = self.texture_paint(texture, dest)?;
        let Some((ctx, t)) = self.target() else {
            return Ok(());
        };
        let place = Affine::translate(dest.origin().to_vec2())
            * Affine::scale_non_uniform(dest.width() / w, dest.height() / h);

        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(t * place));
        ctx.set_paint(paint);
        let opacity = f32::from(alpha) / 255.0;
        if alpha < 255 {
            ctx.push_opacity_layer(opacity);
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        if alpha < 255 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn draw_layer(&mut self, layer: &RasterLayer) -> HushResult<()> {
        if self.blur.is_some() {
            return Err(HushError::render("draw_layer inside an open blur group"));
        }
        if layer.width() != self.viewport.width || layer.height() != self.viewport.height {
            return Err(HushError::render(format!(
                "layer is {}x{}, surface is {}x{}",
                layer.width(),
                layer.height(),
                self.viewport.width,
                self.viewport.height
            )));
        }
        self.flush_base()?;
        over_in_place(&mut self.frame, layer.data(), 1.0)
    }
}

pub(crate) fn surface_size(viewport: Viewport) -> HushResult<(u16, u16)> {
    let w: u16 = viewport
        .width
        .try_into()
        .map_err(|_| HushError::render("surface width exceeds u16"))?;
    let h: u16 = viewport
        .height
        .try_into()
        .map_err(|_| HushError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn pixmap_paint(pixmap: vello_cpu::Pixmap) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> HushResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| HushError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| HushError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(HushError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
