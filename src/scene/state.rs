use crate::compose::grain::generate_grain;
use crate::compose::vignette::generate_vignette;
use crate::config::SketchConfig;
use crate::entity::{Avoidance, FallingSymbol, FloaterWord, FrameContext, HushLabel};
use crate::foundation::core::{FrameIndex, Point, Viewport};
use crate::foundation::error::HushResult;
use crate::random::{NoiseField, SessionRng};
use crate::render::surface::RasterLayer;
use crate::scene::generator::{generate_floaters, generate_hushes, generate_symbols};
use crate::scene::params::GeneratedParameters;

/// Everything a session owns: viewport, frame counter, randomized parameters, entity
/// populations and the precomputed overlay layers.
///
/// Updating happens only in [`SceneState::step`]; rendering reads the state.
#[derive(Clone, Debug)]
pub struct SceneState {
    config: SketchConfig,
    viewport: Viewport,
    frame: FrameIndex,
    rng: SessionRng,
    noise: NoiseField,
    params: GeneratedParameters,
    hushes: Vec<HushLabel>,
    floaters: Vec<FloaterWord>,
    symbols: Vec<FallingSymbol>,
    grain: RasterLayer,
    vignette: RasterLayer,
}

impl SceneState {
    /// Validate `config` and generate a session for `viewport`.
    #[tracing::instrument(skip(config), fields(w = viewport.width, h = viewport.height))]
    pub fn new(config: SketchConfig, viewport: Viewport) -> HushResult<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => SessionRng::seeded(seed),
            None => SessionRng::from_entropy(),
        };
        tracing::info!(seed = rng.seed(), "session seeded");

        let params = GeneratedParameters::draw(&config.tracking, &mut rng);
        let noise = NoiseField::new(&mut rng);
        let grain = generate_grain(viewport, &config.backdrop, &mut rng)?;
        let symbols = generate_symbols(viewport, &config.symbols, &mut rng);
        let hushes = generate_hushes(viewport, &config.hush, &params.tracking, &mut rng);
        let floaters = generate_floaters(
            viewport,
            &hushes,
            &config.floaters,
            &params.tracking,
            &mut rng,
        );
        let vignette = generate_vignette(viewport, &config.backdrop)?;

        Ok(Self {
            config,
            viewport,
            frame: FrameIndex::default(),
            rng,
            noise,
            params,
            hushes,
            floaters,
            symbols,
            grain,
            vignette,
        })
    }

    /// Adopt a new viewport.
    ///
    /// Hush labels, symbols, grain and vignette are regenerated. Floaters keep their identity and
    /// are moved to the same relative position in the new viewport. On error the state is left
    /// untouched.
    #[tracing::instrument(
        skip(self),
        fields(from_w = self.viewport.width, from_h = self.viewport.height)
    )]
    pub fn resize(&mut self, viewport: Viewport) -> HushResult<()> {
        let grain = generate_grain(viewport, &self.config.backdrop, &mut self.rng)?;
        let vignette = generate_vignette(viewport, &self.config.backdrop)?;

        for w in &mut self.floaters {
            w.capture_uv(self.viewport);
        }
        self.viewport = viewport;
        self.grain = grain;
        self.symbols = generate_symbols(viewport, &self.config.symbols, &mut self.rng);
        self.hushes = generate_hushes(
            viewport,
            &self.config.hush,
            &self.params.tracking,
            &mut self.rng,
        );
        self.vignette = vignette;

        for w in &mut self.floaters {
            w.reproject(viewport);
        }
        Ok(())
    }

    /// Advance one frame: symbols, then hush labels, then floaters (which read the labels).
    pub fn step(&mut self, pointer: Option<Point>) {
        self.frame = self.frame.next();
        let ctx = FrameContext {
            frame: self.frame,
            viewport: self.viewport,
            pointer,
        };

        for s in &mut self.symbols {
            s.update(&ctx, &self.config.symbols, &mut self.rng);
        }
        for h in &mut self.hushes {
            h.update(&ctx);
        }
        let avoid = Avoidance::from_tuning(&self.config.floaters);
        for w in &mut self.floaters {
            w.update(&ctx, &self.noise, &self.hushes, avoid);
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames stepped so far; 0 before the first step.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn params(&self) -> &GeneratedParameters {
        &self.params
    }

    pub fn hushes(&self) -> &[HushLabel] {
        &self.hushes
    }

    pub fn floaters(&self) -> &[FloaterWord] {
        &self.floaters
    }

    pub fn symbols(&self) -> &[FallingSymbol] {
        &self.symbols
    }

    pub fn grain(&self) -> &RasterLayer {
        &self.grain
    }

    pub fn vignette(&self) -> &RasterLayer {
        &self.vignette
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
