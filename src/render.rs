pub(crate) mod blur;
pub(crate) mod composite;
pub mod cpu;
pub mod record;
pub mod surface;

/// A rendered frame as RGBA8 pixels.
///
/// Frames come out of the surface **premultiplied**; the `premultiplied` flag makes this explicit
/// at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha in place, as expected by PNG writers.
    pub fn into_straight(mut self) -> Self {
        if !self.premultiplied {
            return self;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = px[3];
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                let v = (u32::from(*c) * 255 + u32::from(a) / 2) / u32::from(a);
                *c = v.min(255) as u8;
            }
        }
        self.premultiplied = false;
        self
    }
}

#[cfg(test)]
#[path = "../tests/unit/render/frame.rs"]
mod tests;
