use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image, parse_svg};
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{HushError, HushResult};
use crate::foundation::math::Fnv1a64;

/// Background texture: a decoded raster image or a parsed SVG tree.
///
/// SVG textures are rasterized lazily by the surface at the size they are drawn at.
#[derive(Clone, Debug)]
pub struct Texture {
    id: u64,
    width: f64,
    height: f64,
    kind: TextureKind,
}

#[derive(Clone, Debug)]
pub(crate) enum TextureKind {
    Raster(PreparedImage),
    Svg(Arc<usvg::Tree>),
}

impl Texture {
    /// Load a texture from disk. Files ending in `.svg` are parsed as SVG.
    pub fn load(path: &Path) -> HushResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            HushError::asset(format!("failed to read texture '{}': {e}", path.display()))
        })?;
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        Self::from_bytes(&path.to_string_lossy(), &bytes, is_svg)
    }

    /// Build a texture from in-memory bytes; `name` only feeds the cache identity.
    pub fn from_bytes(name: &str, bytes: &[u8], is_svg: bool) -> HushResult<Self> {
        let mut h = Fnv1a64::new_default();
        h.write_u8(if is_svg { b'S' } else { b'I' });
        h.write_bytes(name.as_bytes());
        let id = h.finish();

        if is_svg {
            let tree = parse_svg(bytes)
                .map_err(|e| HushError::asset(format!("texture '{name}': {e}")))?;
            let size = tree.size();
            let (width, height) = (f64::from(size.width()), f64::from(size.height()));
            if !(width > 0.0 && height > 0.0) {
                return Err(HushError::asset(format!("texture '{name}' has no size")));
            }
            return Ok(Self {
                id,
                width,
                height,
                kind: TextureKind::Svg(tree),
            });
        }

        let img =
            decode_image(bytes).map_err(|e| HushError::asset(format!("texture '{name}': {e}")))?;
        if img.width == 0 || img.height == 0 {
            return Err(HushError::asset(format!("texture '{name}' has no size")));
        }
        Ok(Self {
            id,
            width: f64::from(img.width),
            height: f64::from(img.height),
            kind: TextureKind::Raster(img),
        })
    }

    /// Intrinsic width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Intrinsic height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Rectangle that covers `viewport` while keeping the aspect ratio, centered.
    pub fn cover_rect(&self, viewport: Viewport) -> Rect {
        let ar = self.width / self.height;
        let (vw, vh) = (viewport.w(), viewport.h());
        let (mut w, mut h) = (vw, vw / ar);
        if h < vh {
            h = vh;
            w = vh * ar;
        }
        let x0 = (vw - w) / 2.0;
        let y0 = (vh - h) / 2.0;
        Rect::new(x0, y0, x0 + w, y0 + h)
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn kind(&self) -> &TextureKind {
        &self.kind
    }
}

/// Load the optional texture; failures are logged and the sketch runs without it.
pub fn load_optional(path: Option<&Path>) -> Option<Texture> {
    let path = path?;
    match Texture::load(path) {
        Ok(tex) => {
            tracing::debug!(path = %path.display(), w = tex.width, h = tex.height, "texture loaded");
            Some(tex)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "texture unavailable, skipping overlay");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
