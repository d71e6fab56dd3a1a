use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{HushError, HushResult};

/// Families tried first when resolving a font from the system.
const PREFERRED_FAMILIES: [&str; 2] = ["EB Garamond", "Garamond"];

/// Sub-pixel steps per pixel when keying shaped glyphs by font size.
const SIZE_STEPS_PER_PX: f64 = 8.0;

/// Raw font file bytes, with the face index inside a collection and an optional family name.
#[derive(Clone, Debug)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    index: u32,
    family: Option<String>,
}

impl FontFace {
    /// Read a TTF/OTF file.
    pub fn load(path: &Path) -> HushResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            HushError::asset(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Wrap in-memory font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index: 0,
            family: None,
        }
    }

    /// Pick an installed face: EB Garamond when present, else the system serif, else any sans
    /// or installed face. `None` when the system has no fonts at all.
    pub fn system_serif() -> Option<Self> {
        use usvg::fontdb::{Database, Family, Query};

        let mut db = Database::new();
        db.load_system_fonts();

        let mut families: Vec<Family<'_>> =
            PREFERRED_FAMILIES.iter().map(|name| Family::Name(name)).collect();
        families.push(Family::Serif);
        families.push(Family::SansSerif);
        let id = db
            .query(&Query {
                families: &families,
                ..Query::default()
            })
            .or_else(|| db.faces().next().map(|f| f.id))?;

        let family = db
            .face(id)
            .and_then(|f| f.families.first())
            .map(|(name, _)| name.clone());
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        tracing::debug!(family = family.as_deref().unwrap_or("unknown"), "system font resolved");
        Some(Self {
            bytes: Arc::new(bytes),
            index,
            family,
        })
    }

    /// Load `path` when given, otherwise fall back to [`FontFace::system_serif`].
    pub fn resolve(path: Option<&Path>) -> HushResult<Option<Self>> {
        match path {
            Some(p) => Self::load(p).map(Some),
            None => {
                let face = Self::system_serif();
                if face.is_none() {
                    tracing::warn!("no system font found");
                }
                Ok(face)
            }
        }
    }

    /// Font file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Face index inside a font collection.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Family name reported by the system font database, if known.
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }
}

/// One shaped character: its advance and glyphs relative to the baseline origin.
#[derive(Clone, Debug)]
pub(crate) struct ShapedChar {
    pub(crate) advance: f64,
    pub(crate) glyphs: Vec<(u32, f32, f32)>,
}

/// Per-character shaper over a single registered font.
///
/// Results are cached by character and font size rounded to an eighth of a pixel, which bounds the
/// cache for sizes drawn from a continuous range.
pub(crate) struct GlyphShaper {
    family: String,
    font: vello_cpu::peniko::FontData,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    cache: HashMap<(char, u32), ShapedChar>,
}

impl GlyphShaper {
    pub(crate) fn new(face: &FontFace) -> HushResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes().to_vec()), None);
        let names: Vec<String> = families
            .iter()
            .filter_map(|(id, _)| font_ctx.collection.family_name(*id).map(str::to_owned))
            .collect();
        let family = match face.family() {
            Some(hint) if names.iter().any(|n| n == hint) => hint.to_owned(),
            _ => names
                .into_iter()
                .next()
                .ok_or_else(|| HushError::asset("no font families registered from font bytes"))?,
        };

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes().to_vec()),
            face.index(),
        );

        Ok(Self {
            family,
            font,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            cache: HashMap::new(),
        })
    }

    pub(crate) fn family(&self) -> &str {
        &self.family
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `ch` at `font_size`, rounded to an eighth of a pixel.
    pub(crate) fn shape(&mut self, ch: char, font_size: f64) -> &ShapedChar {
        let key = cache_key(ch, font_size);
        if !self.cache.contains_key(&key) {
            let size_px = (f64::from(key.1) / SIZE_STEPS_PER_PX) as f32;
            let shaped = self.shape_uncached(ch, size_px);
            self.cache.insert(key, shaped);
        }
        &self.cache[&key]
    }

    #[cfg(test)]
    pub(crate) fn cached(&self) -> usize {
        self.cache.len()
    }

    fn shape_uncached(&mut self, ch: char, size_px: f32) -> ShapedChar {
        let mut buf = [0u8; 4];
        let text: &str = ch.encode_utf8(&mut buf);

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let baseline = run.baseline();
                glyphs.extend(run.positioned_glyphs().map(|g| (g.id, g.x, g.y - baseline)));
            }
        }

        ShapedChar {
            advance: f64::from(layout.width()),
            glyphs,
        }
    }
}

fn cache_key(ch: char, font_size: f64) -> (char, u32) {
    let steps = (font_size.max(0.0) * SIZE_STEPS_PER_PX).round();
    (ch, steps.min(f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
