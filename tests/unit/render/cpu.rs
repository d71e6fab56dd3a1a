use std::io::Cursor;

use super::*;

fn vp(w: u32, h: u32) -> Viewport {
    Viewport::new(w, h).unwrap()
}

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn opaque_rect_fills_the_frame() {
    let mut s = CpuSurface::new(vp(16, 8), None).unwrap();
    s.set_fill(Rgba8::rgb(255, 0, 0));
    s.fill_rect(Rect::new(0.0, 0.0, 16.0, 8.0)).unwrap();
    let frame = s.readback().unwrap();
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    assert_eq!(px(&frame, 0, 0), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 15, 7), [255, 0, 0, 255]);
}

#[test]
fn translate_moves_later_draws() {
    let mut s = CpuSurface::new(vp(20, 20), None).unwrap();
    s.set_fill(Rgba8::gray(255));
    s.save();
    s.translate(Vec2::new(10.0, 10.0));
    s.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0)).unwrap();
    s.restore();
    let frame = s.readback().unwrap();
    assert_eq!(px(&frame, 2, 2)[3], 0);
    assert_eq!(px(&frame, 12, 12)[3], 255);
}

#[test]
fn blur_group_spreads_coverage() {
    let mut s = CpuSurface::new(vp(64, 64), None).unwrap();
    s.set_fill(Rgba8::gray(255));
    s.begin_blur(3.0, Rect::new(27.0, 27.0, 37.0, 37.0)).unwrap();
    s.fill_rect(Rect::new(27.0, 27.0, 37.0, 37.0)).unwrap();
    s.end_blur().unwrap();
    let frame = s.readback().unwrap();

    assert!(px(&frame, 24, 32)[3] > 0, "blur reaches outside the square");
    assert!(px(&frame, 32, 32)[3] > 0);
    assert!(px(&frame, 32, 32)[3] < 255);
    assert_eq!(px(&frame, 2, 2)[3], 0);
}

#[test]
fn blur_groups_do_not_nest() {
    let mut s = CpuSurface::new(vp(8, 8), None).unwrap();
    s.begin_blur(1.0, Rect::new(0.0, 0.0, 4.0, 4.0)).unwrap();
    assert!(s.begin_blur(1.0, Rect::new(0.0, 0.0, 4.0, 4.0)).is_err());
    assert!(s.readback().is_err());
    s.end_blur().unwrap();
    assert!(s.end_blur().is_err());
}

#[test]
fn offscreen_blur_group_is_discarded() {
    let mut s = CpuSurface::new(vp(8, 8), None).unwrap();
    s.set_fill(Rgba8::gray(255));
    s.begin_blur(1.0, Rect::new(500.0, 500.0, 510.0, 510.0)).unwrap();
    s.fill_rect(Rect::new(500.0, 500.0, 510.0, 510.0)).unwrap();
    s.end_blur().unwrap();
    let frame = s.readback().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn layer_composites_over_vector_draws() {
    let viewport = vp(4, 4);
    let mut s = CpuSurface::new(viewport, None).unwrap();
    s.set_fill(Rgba8::rgb(0, 0, 255));
    s.fill_rect(viewport.rect()).unwrap();

    let mut layer = RasterLayer::transparent(viewport);
    layer.data_mut()[..4].copy_from_slice(&[255, 255, 255, 255]);
    s.draw_layer(&layer).unwrap();

    let frame = s.readback().unwrap();
    assert_eq!(px(&frame, 0, 0), [255, 255, 255, 255]);
    assert_eq!(px(&frame, 1, 0), [0, 0, 255, 255]);
}

#[test]
fn premultiplied_layer_bytes_pass_through() {
    let viewport = vp(2, 1);
    let mut s = CpuSurface::new(viewport, None).unwrap();
    let half_red = Rgba8::rgb(255, 0, 0).with_alpha(128.0).premultiplied();
    let mut bytes = half_red.to_array().to_vec();
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    let layer = RasterLayer::from_premul(2, 1, bytes).unwrap();
    s.draw_layer(&layer).unwrap();

    let frame = s.readback().unwrap();
    assert_eq!(px(&frame, 0, 0), [128, 0, 0, 128]);
    assert_eq!(px(&frame, 1, 0), [0, 0, 0, 0]);
    assert!(RasterLayer::from_premul(2, 2, vec![0; 4]).is_err());
}

#[test]
fn layer_size_must_match() {
    let mut s = CpuSurface::new(vp(4, 4), None).unwrap();
    let layer = RasterLayer::transparent(vp(2, 2));
    assert!(s.draw_layer(&layer).is_err());
}

#[test]
fn glyphs_without_font_use_estimated_advance() {
    let mut s = CpuSurface::new(vp(8, 8), None).unwrap();
    assert!(!s.has_font());
    assert_eq!(s.glyph_advance('h', 20.0), 10.0);
    s.set_fill(Rgba8::gray(255));
    s.fill_glyph('h', 20.0, Point::new(2.0, 6.0)).unwrap();
    let frame = s.readback().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn raster_texture_is_stretched_into_dest() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 200, 0, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let tex = Texture::from_bytes("green.png", &buf, false).unwrap();

    let viewport = vp(10, 10);
    let mut s = CpuSurface::new(viewport, None).unwrap();
    s.draw_texture(&tex, viewport.rect(), 255).unwrap();
    let frame = s.readback().unwrap();
    assert_eq!(px(&frame, 5, 5), [0, 200, 0, 255]);

    s.begin_frame();
    s.draw_texture(&tex, viewport.rect(), 0).unwrap();
    assert!(s.readback().unwrap().data.iter().all(|&b| b == 0));
}

#[test]
fn resize_reallocates_frame() {
    let mut s = CpuSurface::new(vp(4, 4), None).unwrap();
    s.resize(vp(6, 3)).unwrap();
    let frame = s.readback().unwrap();
    assert_eq!((frame.width, frame.height), (6, 3));
    assert_eq!(frame.data.len(), 6 * 3 * 4);
    assert!(CpuSurface::new(vp(70_000, 1), None).is_err());
}
