//! Scene entities: per-instance state, a pure `update` step and a separate `render` step.

pub mod floater;
pub mod hush;
pub mod symbol;

use crate::foundation::core::{FrameIndex, Point, Viewport};

pub use floater::{Avoidance, FloaterWord, Placement};
pub use hush::HushLabel;
pub use symbol::FallingSymbol;

/// Text drawn by every hush label.
pub const HUSH_TEXT: &str = "hush";

/// Text of a drifting foreground word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordKind {
    /// "soft": stronger alpha.
    Soft,
    /// "breathe": lighter alpha, widest tracking.
    Breathe,
}

impl WordKind {
    /// The word drawn for this kind.
    pub fn text(self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Breathe => "breathe",
        }
    }
}

/// Read-only inputs shared by every entity update in one frame step.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    /// Current frame number (1 on the first step).
    pub frame: FrameIndex,
    /// Current viewport.
    pub viewport: Viewport,
    /// Pointer position, `None` while outside the window or never seen.
    pub pointer: Option<Point>,
}
