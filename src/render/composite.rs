use crate::foundation::error::{HushError, HushResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity multiplier.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> HushResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HushError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Region of a smaller premultiplied buffer placed at an integer offset inside a larger one.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Placement {
    pub(crate) dst_width: u32,
    pub(crate) dst_height: u32,
    pub(crate) src_width: u32,
    pub(crate) src_height: u32,
    pub(crate) x: i32,
    pub(crate) y: i32,
}

/// Source-over `src` into `dst` at the placement offset; pixels outside `dst` are dropped.
pub(crate) fn over_at(dst: &mut [u8], src: &[u8], at: Placement) -> HushResult<()> {
    let dst_len = at.dst_width as usize * at.dst_height as usize * 4;
    let src_len = at.src_width as usize * at.src_height as usize * 4;
    if dst.len() != dst_len || src.len() != src_len {
        return Err(HushError::render(
            "over_at buffer lengths do not match their dimensions",
        ));
    }

    let (dw, dh) = (at.dst_width as i64, at.dst_height as i64);
    for sy in 0..at.src_height as i64 {
        let dy = sy + i64::from(at.y);
        if dy < 0 || dy >= dh {
            continue;
        }
        for sx in 0..at.src_width as i64 {
            let dx = sx + i64::from(at.x);
            if dx < 0 || dx >= dw {
                continue;
            }
            let si = ((sy * at.src_width as i64 + sx) * 4) as usize;
            if src[si + 3] == 0 {
                continue;
            }
            let di = ((dy * dw + dx) * 4) as usize;
            let out = over(
                [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]],
                [src[si], src[si + 1], src[si + 2], src[si + 3]],
                1.0,
            );
            dst[di..di + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
