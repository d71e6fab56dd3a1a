//! Host lifecycle: queued window events, the frame loop and frame export.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::texture::Texture;
use crate::compose::{Stage, render_frame};
use crate::config::SketchConfig;
use crate::foundation::core::{FrameIndex, Point, Viewport};
use crate::foundation::error::{HushError, HushResult};
use crate::render::FrameRGBA;
use crate::render::surface::RenderSurface;
use crate::scene::SceneState;

/// File stem of exported frames.
pub const EXPORT_STEM: &str = "hush-responsive";

/// Input delivered by the host between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The window changed size.
    Resize(Viewport),
    /// The pointer moved inside the window.
    PointerMoved(Point),
    /// The pointer left the window.
    PointerLeft,
    /// A key was pressed; `s`/`S` requests an export of the next frame.
    KeyPressed(char),
}

/// What happened during one [`Sketch::frame`].
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Frame just drawn.
    pub frame: FrameIndex,
    /// Stages drawn, bottom to top.
    pub stages: Vec<Stage>,
    /// A save key was pressed since the previous frame.
    pub export_requested: bool,
}

/// A running sketch session driven by a host.
///
/// Events are queued with [`Sketch::handle`] and applied at the start of the next frame: resizes
/// first (the last one wins), then pointer moves in arrival order, then key presses.
#[derive(Debug)]
pub struct Sketch {
    state: SceneState,
    texture: Option<Texture>,
    pending: Vec<HostEvent>,
    pointer: Option<Point>,
}

impl Sketch {
    pub fn new(
        config: SketchConfig,
        viewport: Viewport,
        texture: Option<Texture>,
    ) -> HushResult<Self> {
        Ok(Self {
            state: SceneState::new(config, viewport)?,
            texture,
            pending: Vec::new(),
            pointer: None,
        })
    }

    /// Queue an event for the next frame.
    pub fn handle(&mut self, event: HostEvent) {
        self.pending.push(event);
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Pointer position as of the last applied event.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Apply queued events and step the scene without drawing. Returns `true` when an export
    /// was requested.
    pub fn advance(&mut self) -> HushResult<bool> {
        let events = std::mem::take(&mut self.pending);

        let resize = events.iter().rev().find_map(|e| match e {
            HostEvent::Resize(vp) => Some(*vp),
            _ => None,
        });
        if let Some(vp) = resize
            && vp != self.state.viewport()
        {
            self.state.resize(vp)?;
        }

        for e in &events {
            match e {
                HostEvent::PointerMoved(p) => self.pointer = Some(*p),
                HostEvent::PointerLeft => self.pointer = None,
                HostEvent::Resize(_) | HostEvent::KeyPressed(_) => {}
            }
        }

        let export_requested = events
            .iter()
            .any(|e| matches!(e, HostEvent::KeyPressed('s' | 'S')));

        self.state.step(self.pointer);
        Ok(export_requested)
    }

    /// Apply queued events, step the scene and draw it onto `surface`.
    #[tracing::instrument(skip_all, fields(frame = self.state.frame().0 + 1))]
    pub fn frame<S>(&mut self, surface: &mut S) -> HushResult<FrameReport>
    where
        S: RenderSurface + ?Sized,
    {
        let export_requested = self.advance()?;
        if surface.viewport() != self.state.viewport() {
            surface.resize(self.state.viewport())?;
        }
        surface.begin_frame();
        let stages = render_frame(&self.state, self.texture.as_ref(), surface)?;
        if export_requested {
            tracing::info!(frame = self.state.frame().0, "export requested");
        }
        Ok(FrameReport {
            frame: self.state.frame(),
            stages,
            export_requested,
        })
    }
}

/// Destination of exported frames.
pub trait ExportSink {
    fn export(&mut self, frame: FrameIndex, image: &FrameRGBA) -> HushResult<()>;
}

/// Writes exports as PNG files named `hush-responsive.png`, `hush-responsive-1.png`, ... in a
/// directory, never overwriting an existing file.
#[derive(Debug)]
pub struct PngExport {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngExport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// First free export path in the directory.
    pub fn next_path(&self) -> PathBuf {
        next_free_path(&self.dir, EXPORT_STEM)
    }
}

impl ExportSink for PngExport {
    fn export(&mut self, frame: FrameIndex, image: &FrameRGBA) -> HushResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create export dir '{}'", self.dir.display()))?;
        let path = self.next_path();
        write_png(&path, image)?;
        tracing::info!(frame = frame.0, path = %path.display(), "frame exported");
        self.written.push(path);
        Ok(())
    }
}

/// Keeps exported frames in memory.
#[derive(Debug, Default)]
pub struct InMemoryExport {
    /// Exported frames in order.
    pub frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemoryExport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExportSink for InMemoryExport {
    fn export(&mut self, frame: FrameIndex, image: &FrameRGBA) -> HushResult<()> {
        self.frames.push((frame, image.clone()));
        Ok(())
    }
}

/// Write a frame as a straight-alpha PNG.
pub fn write_png(path: &Path, image: &FrameRGBA) -> HushResult<()> {
    let expected = image.width as usize * image.height as usize * 4;
    if image.data.len() != expected {
        return Err(HushError::render(format!(
            "frame is {}x{} but holds {} bytes",
            image.width,
            image.height,
            image.data.len()
        )));
    }
    let straight = image.clone().into_straight();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn next_free_path(dir: &Path, stem: &str) -> PathBuf {
    let first = dir.join(format!("{stem}.png"));
    if !first.exists() {
        return first;
    }
    (1u64..)
        .map(|n| dir.join(format!("{stem}-{n}.png")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

#[cfg(test)]
#[path = "../tests/unit/host.rs"]
mod tests;
