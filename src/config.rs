//! Session configuration.
//!
//! Every tunable of the sketch lives here with its default. A JSON file may override any subset of
//! fields; missing fields fall back to the defaults below.

use std::path::Path;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{HushError, HushResult};
use crate::random::Span;

/// Top-level configuration of one sketch session.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Session seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Colors of the background and the inks.
    pub palette: Palette,
    /// Hover-reactive labels.
    pub hush: HushTuning,
    /// Drifting foreground words.
    pub floaters: FloaterTuning,
    /// Falling background glyphs.
    pub symbols: SymbolTuning,
    /// Session-random tracking bands.
    pub tracking: TrackingBands,
    /// Background gradient, texture and overlays.
    pub backdrop: BackdropTuning,
}

/// Colors used by the compositor and the entities.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Gradient top base color (cool aqua-blue).
    pub base_a: Rgba8,
    /// Gradient bottom base color (faint warm white-green).
    pub base_b: Rgba8,
    /// Left-edge overlay tint.
    pub side_tint: Rgba8,
    /// Fill of the hush labels.
    pub hush_ink: Rgba8,
    /// Fill of floaters and symbols.
    pub ink: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base_a: Rgba8::rgb(210, 240, 245),
            base_b: Rgba8::rgb(235, 245, 240),
            side_tint: Rgba8::rgb(205, 235, 240),
            hush_ink: Rgba8::rgb(64, 121, 114),
            ink: Rgba8::gray(30),
        }
    }
}

/// Fractional placement of one hush label.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HushAnchor {
    /// Horizontal position as a fraction of the viewport width.
    pub u: f64,
    /// Vertical position as a fraction of the viewport height.
    pub v: f64,
    /// Size as a fraction of the shorter viewport side.
    pub size_factor: f64,
}

/// Hover-reactive label parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HushTuning {
    /// Anchor table, biggest first.
    pub anchors: Vec<HushAnchor>,
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Alpha while not hovered (0..=255 scale).
    pub alpha_max: f64,
    /// Per-frame easing rate of alpha toward its target.
    pub ease: f64,
    /// Hover radius as a fraction of label size.
    pub hover_factor: f64,
}

impl Default for HushTuning {
    fn default() -> Self {
        Self {
            anchors: vec![
                HushAnchor {
                    u: 0.53,
                    v: 0.60,
                    size_factor: 0.16,
                },
                HushAnchor {
                    u: 0.76,
                    v: 0.44,
                    size_factor: 0.085,
                },
                HushAnchor {
                    u: 0.28,
                    v: 0.24,
                    size_factor: 0.08,
                },
            ],
            blur_px: 3.5,
            alpha_max: 170.0,
            ease: 0.04,
            hover_factor: 0.58,
        }
    }
}

/// Per-kind creation ranges of floater words.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WordStyle {
    /// Base alpha range.
    pub base_alpha: Span,
    /// Blur radii to pick from.
    pub blur_choices: Vec<f64>,
}

/// Bounded rejection sampling of floater start positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlacementBudget {
    /// Candidates tried before falling back to an unchecked position.
    pub attempts: u32,
    /// Keep-out radius as a fraction of hush size.
    pub padding: f64,
    /// Range of normalized `u` candidates.
    pub u: Span,
    /// Range of normalized `v` candidates.
    pub v: Span,
}

impl Default for PlacementBudget {
    fn default() -> Self {
        Self {
            attempts: 90,
            padding: 0.85,
            u: Span::new(0.05, 0.95),
            v: Span::new(0.06, 0.94),
        }
    }
}

/// Drifting foreground word parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FloaterTuning {
    /// Inclusive bounds of the random "breathe" count.
    pub breathe_count: [u32; 2],
    /// Fixed "soft" count.
    pub soft_count: u32,
    /// Font size range in pixels, fixed per word.
    pub size: Span,
    /// "breathe" style.
    pub breathe: WordStyle,
    /// "soft" style.
    pub soft: WordStyle,
    /// Noise time scale range.
    pub speed: Span,
    /// Velocity magnitude range.
    pub drift: Span,
    /// Runtime keep-out radius as a fraction of hush size.
    pub avoid_factor: f64,
    /// Strength of the keep-out push.
    pub repel_gain: f64,
    /// Start position sampling.
    pub placement: PlacementBudget,
}

impl Default for FloaterTuning {
    fn default() -> Self {
        Self {
            breathe_count: [5, 6],
            soft_count: 7,
            size: Span::new(12.0, 20.0),
            breathe: WordStyle {
                base_alpha: Span::new(35.0, 70.0),
                blur_choices: vec![0.8, 1.2, 1.6],
            },
            soft: WordStyle {
                base_alpha: Span::new(60.0, 95.0),
                blur_choices: vec![0.8, 1.0, 1.4],
            },
            speed: Span::new(0.08, 0.16),
            drift: Span::new(0.30, 0.50),
            avoid_factor: 0.80,
            repel_gain: 0.08,
            placement: PlacementBudget::default(),
        }
    }
}

/// Falling background glyph parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SymbolTuning {
    /// Population size.
    pub count: u32,
    /// Glyph alphabet.
    pub glyphs: Vec<char>,
    /// Font size range.
    pub size: Span,
    /// Fall speed range (multiplied by 14 per frame).
    pub fall_speed: Span,
    /// Alpha range.
    pub alpha: Span,
    /// Maximum absolute angular velocity in radians per frame.
    pub max_spin: f64,
    /// Constant blur radius.
    pub blur_px: f64,
    /// Distance below the bottom edge that triggers a respawn.
    pub respawn_margin: f64,
    /// `y` at which respawned symbols re-enter.
    pub spawn_y: f64,
}

impl Default for SymbolTuning {
    fn default() -> Self {
        Self {
            count: 28,
            glyphs: vec!['—', '·', '□', '◇', '/', '×'],
            size: Span::new(12.0, 20.0),
            fall_speed: Span::new(0.012, 0.030),
            alpha: Span::new(60.0, 95.0),
            max_spin: 0.002,
            blur_px: 1.2,
            respawn_margin: 30.0,
            spawn_y: -20.0,
        }
    }
}

/// Bands the session tracking factors are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrackingBands {
    /// Hush label tracking.
    pub hush: Span,
    /// "soft" tracking.
    pub soft: Span,
    /// "breathe" tracking.
    pub breathe: Span,
    /// Symbol tracking.
    pub symbol: Span,
}

impl Default for TrackingBands {
    fn default() -> Self {
        Self {
            hush: Span::around(0.10, 0.015),
            soft: Span::around(0.12, 0.02),
            breathe: Span::around(0.14, 0.02),
            symbol: Span::new(0.0, 0.0),
        }
    }
}

/// Background painter parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BackdropTuning {
    /// Alpha of the side tint at the left edge.
    pub side_tint_alpha: f64,
    /// Alpha of the cover-scaled texture.
    pub texture_alpha: u8,
    /// Vignette glow alpha.
    pub vignette_alpha: f64,
    /// Vignette blur (Gaussian sigma in pixels).
    pub vignette_blur_px: f64,
    /// Grain dots per pixel.
    pub grain_density: f64,
    /// Grain dot alpha range.
    pub grain_alpha: Span,
    /// Grain dot diameter range.
    pub grain_diameter: Span,
}

impl Default for BackdropTuning {
    fn default() -> Self {
        Self {
            side_tint_alpha: 80.0,
            texture_alpha: 80,
            vignette_alpha: 70.0,
            vignette_blur_px: 26.0,
            grain_density: 0.0022,
            grain_alpha: Span::new(12.0, 30.0),
            grain_diameter: Span::new(0.7, 1.5),
        }
    }
}

impl SketchConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> HushResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            HushError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            HushError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges, counts and choice lists.
    pub fn validate(&self) -> HushResult<()> {
        fn span(name: &str, s: Span) -> HushResult<()> {
            if !s.is_valid() {
                return Err(HushError::validation(format!(
                    "{name} must be finite with lo <= hi, got [{}, {})",
                    s.lo, s.hi
                )));
            }
            Ok(())
        }
        fn non_negative(name: &str, v: f64) -> HushResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(HushError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
            Ok(())
        }

        let h = &self.hush;
        for (i, a) in h.anchors.iter().enumerate() {
            non_negative(&format!("hush.anchors[{i}].u"), a.u)?;
            non_negative(&format!("hush.anchors[{i}].v"), a.v)?;
            non_negative(&format!("hush.anchors[{i}].size_factor"), a.size_factor)?;
        }
        non_negative("hush.blur_px", h.blur_px)?;
        non_negative("hush.alpha_max", h.alpha_max)?;
        non_negative("hush.hover_factor", h.hover_factor)?;
        if !(h.ease > 0.0 && h.ease <= 1.0) {
            return Err(HushError::validation("hush.ease must be in (0, 1]"));
        }

        let f = &self.floaters;
        if f.breathe_count[0] > f.breathe_count[1] {
            return Err(HushError::validation(
                "floaters.breathe_count must be [min, max] with min <= max",
            ));
        }
        span("floaters.size", f.size)?;
        if f.size.lo <= 0.0 {
            return Err(HushError::validation("floaters.size must be > 0"));
        }
        span("floaters.speed", f.speed)?;
        span("floaters.drift", f.drift)?;
        for (name, style) in [("breathe", &f.breathe), ("soft", &f.soft)] {
            span(&format!("floaters.{name}.base_alpha"), style.base_alpha)?;
            if style.blur_choices.is_empty() {
                return Err(HushError::validation(format!(
                    "floaters.{name}.blur_choices must not be empty"
                )));
            }
            for &b in &style.blur_choices {
                non_negative(&format!("floaters.{name}.blur_choices"), b)?;
            }
        }
        non_negative("floaters.avoid_factor", f.avoid_factor)?;
        non_negative("floaters.repel_gain", f.repel_gain)?;
        non_negative("floaters.placement.padding", f.placement.padding)?;
        span("floaters.placement.u", f.placement.u)?;
        span("floaters.placement.v", f.placement.v)?;

        let s = &self.symbols;
        if s.glyphs.is_empty() {
            return Err(HushError::validation("symbols.glyphs must not be empty"));
        }
        span("symbols.size", s.size)?;
        span("symbols.fall_speed", s.fall_speed)?;
        span("symbols.alpha", s.alpha)?;
        non_negative("symbols.max_spin", s.max_spin)?;
        non_negative("symbols.blur_px", s.blur_px)?;
        non_negative("symbols.respawn_margin", s.respawn_margin)?;
        if !s.spawn_y.is_finite() || s.spawn_y >= 0.0 {
            return Err(HushError::validation("symbols.spawn_y must be negative"));
        }

        let t = &self.tracking;
        span("tracking.hush", t.hush)?;
        span("tracking.soft", t.soft)?;
        span("tracking.breathe", t.breathe)?;
        span("tracking.symbol", t.symbol)?;

        let b = &self.backdrop;
        non_negative("backdrop.side_tint_alpha", b.side_tint_alpha)?;
        non_negative("backdrop.vignette_alpha", b.vignette_alpha)?;
        non_negative("backdrop.vignette_blur_px", b.vignette_blur_px)?;
        non_negative("backdrop.grain_density", b.grain_density)?;
        span("backdrop.grain_alpha", b.grain_alpha)?;
        span("backdrop.grain_diameter", b.grain_diameter)?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
