use crate::assets::texture::Texture;
use crate::foundation::core::{Point, Rect, Rgba8, Vec2, Viewport};
use crate::foundation::error::{HushError, HushResult};

/// Drawing capabilities the scene needs from its host.
///
/// Transform and fill state follow a canvas model: `save`/`restore` push and pop both, and every
/// fill uses the current fill color, straight alpha included. Geometry is given in the current
/// local space.
pub trait RenderSurface {
    /// Current target size.
    fn viewport(&self) -> Viewport;

    /// Reallocate the target for a new viewport.
    fn resize(&mut self, viewport: Viewport) -> HushResult<()>;

    /// Start a new frame: clear the target and reset transform and fill state.
    fn begin_frame(&mut self) {}

    /// Push transform and fill state.
    fn save(&mut self);

    /// Pop transform and fill state. Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Post-multiply a translation onto the current transform.
    fn translate(&mut self, offset: Vec2);

    /// Post-multiply a rotation (radians, clockwise in screen space).
    fn rotate(&mut self, radians: f64);

    /// Set the fill color for subsequent draws.
    fn set_fill(&mut self, color: Rgba8);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect) -> HushResult<()>;

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64) -> HushResult<()>;

    /// Natural advance width of `ch` at `font_size` pixels.
    fn glyph_advance(&mut self, ch: char, font_size: f64) -> f64;

    /// Fill one glyph with its baseline origin at `origin`.
    fn fill_glyph(&mut self, ch: char, font_size: f64, origin: Point) -> HushResult<()>;

    /// Start a group whose draws are Gaussian-blurred by `radius_px` when the group ends.
    ///
    /// `bounds` (local space) must contain everything drawn in the group. Groups do not nest.
    fn begin_blur(&mut self, radius_px: f64, bounds: Rect) -> HushResult<()>;

    /// Close the current blur group and composite it.
    fn end_blur(&mut self) -> HushResult<()>;

    /// Draw `texture` stretched into `dest` with an alpha tint (0..=255).
    fn draw_texture(&mut self, texture: &Texture, dest: Rect, alpha: u8) -> HushResult<()>;

    /// Composite a precomputed full-viewport layer on top of everything drawn so far.
    fn draw_layer(&mut self, layer: &RasterLayer) -> HushResult<()>;
}

/// Run `draw` between `save` and `restore`.
pub fn with_saved<S, F>(surface: &mut S, draw: F) -> HushResult<()>
where
    S: RenderSurface + ?Sized,
    F: FnOnce(&mut S) -> HushResult<()>,
{
    surface.save();
    let out = draw(surface);
    surface.restore();
    out
}

/// Run `draw` inside a blur group, closing the group even when `draw` fails.
pub fn with_blur<S, F>(surface: &mut S, radius_px: f64, bounds: Rect, draw: F) -> HushResult<()>
where
    S: RenderSurface + ?Sized,
    F: FnOnce(&mut S) -> HushResult<()>,
{
    surface.begin_blur(radius_px, bounds)?;
    let out = draw(surface);
    let end = surface.end_blur();
    out.and(end)
}

/// Premultiplied RGBA8 buffer covering a whole viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterLayer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterLayer {
    /// Fully transparent layer for `viewport`.
    pub fn transparent(viewport: Viewport) -> Self {
        let len = viewport.area() as usize * 4;
        Self {
            width: viewport.width,
            height: viewport.height,
            data: vec![0; len],
        }
    }

    /// Wrap premultiplied bytes, checking the length.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> HushResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| HushError::render("layer buffer size overflow"))?;
        if data.len() != expected {
            return Err(HushError::render(format!(
                "layer expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// `true` when every pixel is transparent.
    pub fn is_empty(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }
}
