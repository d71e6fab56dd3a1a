//! `hush` is a generative type-motion sketch rendered headlessly on the CPU.
//!
//! A session is built from a [`SketchConfig`] and a [`Viewport`]:
//!
//! - [`SceneState`] owns the randomized entities and steps them once per frame
//! - [`render_frame`] draws the state onto any [`RenderSurface`] in a fixed layer order
//! - [`Sketch`] wraps both behind a host event queue (resize, pointer, save key)
//!
//! [`CpuSurface`] rasterizes with `vello_cpu`; [`RecordingSurface`] captures draw calls instead.
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod compose;
pub mod config;
pub mod entity;
pub mod host;
pub mod random;
pub mod render;
pub mod scene;
pub mod text;

pub use crate::assets::font::FontFace;
pub use crate::assets::texture::Texture;
pub use crate::compose::{Stage, render_frame, stages};
pub use crate::config::SketchConfig;
pub use crate::entity::{FallingSymbol, FloaterWord, HushLabel, Placement, WordKind};
pub use crate::foundation::core::{
    Affine, FrameIndex, Point, Rect, Rgba8, Rgba8Premul, Vec2, Viewport,
};
pub use crate::foundation::error::{HushError, HushResult};
pub use crate::host::{ExportSink, FrameReport, HostEvent, InMemoryExport, PngExport, Sketch};
pub use crate::random::{NoiseField, SessionRng, Span};
pub use crate::render::FrameRGBA;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::record::{DrawCall, RecordingSurface};
pub use crate::render::surface::{RasterLayer, RenderSurface};
pub use crate::scene::{GeneratedParameters, SceneState, TrackingFactors};
