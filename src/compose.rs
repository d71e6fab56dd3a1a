//! Frame compositor: draws a [`SceneState`] onto a surface in a fixed z-order.

pub mod backdrop;
pub mod grain;
pub mod vignette;

use crate::assets::texture::Texture;
use crate::foundation::error::HushResult;
use crate::render::surface::{RenderSurface, with_saved};
use crate::scene::SceneState;

/// One layer of the frame, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Stage {
    Gradient,
    SideTint,
    Vignette,
    Texture,
    Symbols,
    Hush,
    Floaters,
    Grain,
}

impl Stage {
    /// Every stage in draw order.
    pub const ALL: [Stage; 8] = [
        Stage::Gradient,
        Stage::SideTint,
        Stage::Vignette,
        Stage::Texture,
        Stage::Symbols,
        Stage::Hush,
        Stage::Floaters,
        Stage::Grain,
    ];
}

/// Stages drawn for a frame; the texture stage is omitted when no texture is loaded.
pub fn stages(has_texture: bool) -> Vec<Stage> {
    Stage::ALL
        .into_iter()
        .filter(|s| has_texture || *s != Stage::Texture)
        .collect()
}

/// Draw `state` onto `surface` and return the stages drawn, in order.
#[tracing::instrument(skip_all, fields(frame = state.frame().0))]
pub fn render_frame<S>(
    state: &SceneState,
    texture: Option<&Texture>,
    surface: &mut S,
) -> HushResult<Vec<Stage>>
where
    S: RenderSurface + ?Sized,
{
    let order = stages(texture.is_some());
    for &stage in &order {
        with_saved(surface, |s| draw_stage(stage, state, texture, s))?;
    }
    Ok(order)
}

fn draw_stage<S>(
    stage: Stage,
    state: &SceneState,
    texture: Option<&Texture>,
    surface: &mut S,
) -> HushResult<()>
where
    S: RenderSurface + ?Sized,
{
    let cfg = state.config();
    let viewport = state.viewport();
    let frame = state.frame();
    match stage {
        Stage::Gradient => backdrop::draw_gradient(surface, viewport, frame, &cfg.palette),
        Stage::SideTint => backdrop::draw_side_tint(
            surface,
            viewport,
            cfg.palette.side_tint,
            cfg.backdrop.side_tint_alpha,
        ),
        Stage::Vignette => surface.draw_layer(state.vignette()),
        Stage::Texture => match texture {
            Some(tex) => {
                backdrop::draw_cover_texture(surface, viewport, tex, cfg.backdrop.texture_alpha)
            }
            None => Ok(()),
        },
        Stage::Symbols => {
            let tracking = state.params().tracking.symbol;
            for sym in state.symbols() {
                sym.render(surface, cfg.palette.ink, tracking)?;
            }
            Ok(())
        }
        Stage::Hush => {
            for h in state.hushes() {
                h.render(surface, frame, cfg.palette.hush_ink)?;
            }
            Ok(())
        }
        Stage::Floaters => {
            for w in state.floaters() {
                w.render(surface, frame, cfg.palette.ink)?;
            }
            Ok(())
        }
        Stage::Grain => surface.draw_layer(state.grain()),
    }
}

#[cfg(test)]
#[path = "../tests/unit/compose/order.rs"]
mod tests;
