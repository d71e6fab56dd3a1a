use crate::assets::texture::Texture;
use crate::foundation::core::{Affine, Point, Rect, Rgba8, Vec2, Viewport};
use crate::foundation::error::{HushError, HushResult};
use crate::render::surface::{RasterLayer, RenderSurface};

/// One call captured by [`RecordingSurface`], with the state it was issued under.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// `fill_rect` with the active fill and transform.
    Rect {
        /// Local-space rectangle.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
        /// Transform at call time.
        transform: Affine,
    },
    /// `fill_circle`.
    Circle {
        /// Local-space center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// `fill_glyph`.
    Glyph {
        /// Character drawn.
        ch: char,
        /// Font size in pixels.
        font_size: f64,
        /// Local-space baseline origin.
        origin: Point,
        /// Fill color.
        color: Rgba8,
        /// Transform at call time.
        transform: Affine,
    },
    /// `begin_blur`.
    BeginBlur {
        /// Blur radius.
        radius_px: f64,
        /// Local-space bounds.
        bounds: Rect,
    },
    /// `end_blur`.
    EndBlur,
    /// `draw_texture`.
    Texture {
        /// Destination rectangle.
        dest: Rect,
        /// Alpha tint.
        alpha: u8,
    },
    /// `draw_layer`.
    Layer {
        /// Layer width.
        width: u32,
        /// Layer height.
        height: u32,
    },
}

/// Surface that records draw calls instead of rasterizing.
///
/// Glyph advances are a fixed fraction of the font size, so text metrics are exact and
/// predictable without a font file.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    viewport: Viewport,
    advance_em: f64,
    transform: Affine,
    fill: Rgba8,
    stack: Vec<(Affine, Rgba8)>,
    in_blur: bool,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Recorder with half-em advances.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_advance(viewport, 0.5)
    }

    /// Recorder whose glyph advance is `advance_em × font_size`.
    pub fn with_advance(viewport: Viewport, advance_em: f64) -> Self {
        Self {
            viewport,
            advance_em,
            transform: Affine::IDENTITY,
            fill: Rgba8::gray(0),
            stack: Vec::new(),
            in_blur: false,
            calls: Vec::new(),
        }
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Characters drawn, in order.
    pub fn glyph_text(&self) -> String {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Glyph { ch, .. } => Some(*ch),
                _ => None,
            })
            .collect()
    }

    /// Depth of the save stack; zero when every `save` was matched.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl RenderSurface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) -> HushResult<()> {
        self.viewport = viewport;
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.calls.clear();
        self.transform = Affine::IDENTITY;
        self.fill = Rgba8::gray(0);
        self.stack.clear();
        self.in_blur = false;
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
        self.calls.push(DrawCall::Rect {
            rect,
            color: self.fill,
            transform: self.transform,
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64) -> HushResult<()> {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color: self.fill,
        });
        Ok(())
    }

    fn glyph_advance(&mut self, _ch: char, font_size: f64) -> f64 {
        font_size * self.advance_em
    }

    fn fill_glyph(&mut self, ch: char, font_size: f64, origin: Point) -> HushResult<()> {
        self.calls.push(DrawCall::Glyph {
            ch,
            font_size,
            origin,
            color: self.fill,
            transform: self.transform,
        });
        Ok(())
    }

    fn begin_blur(&mut self, radius_px: f64, bounds: Rect) -> HushResult<()> {
        if self.in_blur {
            return Err(HushError::render("blur groups do not nest"));
        }
        self.in_blur = true;
        self.calls.push(DrawCall::BeginBlur { radius_px, bounds });
        Ok(())
    }

    fn end_blur(&mut self) -> HushResult<()> {
        if !self.in_blur {
            return Err(HushError::render("end_blur without begin_blur"));
        }
        self.in_blur = false;
        self.calls.push(DrawCall::EndBlur);
        Ok(())
    }

    fn draw_texture(&mut self, _texture: &Texture, dest: Rect, alpha: u8) -> HushResult<()> {
        self.calls.push(DrawCall::Texture { dest, alpha });
        Ok(())
    }

    fn draw_layer(&mut self, layer: &RasterLayer) -> HushResult<()> {
        self.calls.push(DrawCall::Layer {
            width: layer.width(),
            height: layer.height(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/record.rs"]
mod tests;
