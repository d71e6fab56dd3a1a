//! Session state: generation, resize and the per-frame step.

pub mod generator;
pub mod params;
pub mod state;

pub use params::{GeneratedParameters, TrackingFactors};
pub use state::SceneState;
