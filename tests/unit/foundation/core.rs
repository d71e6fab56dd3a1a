use super::*;

#[test]
fn viewport_rejects_empty_sides() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
    assert!(Viewport::new(1, 1).is_ok());
}

#[test]
fn viewport_projection_round_trips_center() {
    let vp = Viewport::new(1920, 1080).unwrap();
    let uv = vp.normalize(Point::new(960.0, 540.0));
    assert_eq!(uv, Point::new(0.5, 0.5));
    assert_eq!(vp.project(uv), Point::new(960.0, 540.0));
    assert_eq!(vp.min_side(), 1080.0);
}

#[test]
fn rgba_lerp_hits_endpoints() {
    let a = Rgba8::rgb(0, 100, 200);
    let b = Rgba8::rgb(200, 100, 0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Rgba8::rgb(100, 100, 100));
}

#[test]
fn with_alpha_clamps_and_rounds() {
    let c = Rgba8::gray(30);
    assert_eq!(c.with_alpha(300.0).a, 255);
    assert_eq!(c.with_alpha(-4.0).a, 0);
    assert_eq!(c.with_alpha(69.6).a, 70);
    assert_eq!(c.with_alpha(f64::NAN).a, 0);
}

#[test]
fn premul_scales_color_channels() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.a, 128);
    assert_eq!(p.r, 128);
    assert_eq!(p.g, 64);
    assert_eq!(p.b, 0);
}

#[test]
fn frame_index_counts_up() {
    assert_eq!(FrameIndex::default().next(), FrameIndex(1));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}
