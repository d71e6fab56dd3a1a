use super::*;
use crate::foundation::core::FrameIndex;
use crate::render::record::{DrawCall, RecordingSurface};

fn vp() -> Viewport {
    Viewport::new(300, 200).unwrap()
}

fn ctx(frame: u64) -> FrameContext {
    FrameContext {
        frame: FrameIndex(frame),
        viewport: vp(),
        pointer: None,
    }
}

#[test]
fn initial_population_spreads_over_viewport() {
    let tuning = SymbolTuning::default();
    let mut rng = SessionRng::seeded(4);
    for _ in 0..100 {
        let s = FallingSymbol::spawn(vp(), &tuning, &mut rng, true);
        assert!((0.0..300.0).contains(&s.position().x));
        assert!((0.0..200.0).contains(&s.position().y));
        assert!(tuning.glyphs.contains(&s.glyph()));
        assert!(tuning.size.contains(s.size()));
        assert!(tuning.alpha.contains(s.alpha()));
        assert!(s.spin.abs() <= tuning.max_spin);
        assert_eq!(s.blur_px, 1.2);
    }
}

#[test]
fn respawn_enters_above_top_edge() {
    let tuning = SymbolTuning::default();
    let mut rng = SessionRng::seeded(8);
    let s = FallingSymbol::spawn(vp(), &tuning, &mut rng, false);
    assert_eq!(s.position().y, -20.0);
}

#[test]
fn falls_and_resets_past_bottom_margin() {
    let tuning = SymbolTuning::default();
    let mut rng = SessionRng::seeded(6);
    let mut s = FallingSymbol::spawn(vp(), &tuning, &mut rng, true);
    let y0 = s.position().y;
    let a0 = s.angle();
    s.update(&ctx(1), &tuning, &mut rng);
    assert!((s.position().y - (y0 + s.fall_speed * 14.0)).abs() < 1e-9);
    assert!((s.angle() - (a0 + s.spin)).abs() < 1e-12);

    s.pos.y = 230.0;
    s.update(&ctx(2), &tuning, &mut rng);
    assert_eq!(s.position().y, -20.0);
}

#[test]
fn renders_rotated_blurred_glyph() {
    let tuning = SymbolTuning::default();
    let mut rng = SessionRng::seeded(12);
    let s = FallingSymbol::spawn(vp(), &tuning, &mut rng, true);
    let mut rec = RecordingSurface::new(vp());
    s.render(&mut rec, Rgba8::gray(30), 0.0).unwrap();
    assert_eq!(rec.glyph_text(), s.glyph().to_string());
    assert!(matches!(rec.calls()[0], DrawCall::BeginBlur { radius_px, .. } if radius_px == 1.2));
    match &rec.calls()[1] {
        DrawCall::Glyph {
            transform, color, ..
        } => {
            let expected = crate::foundation::core::Affine::translate(s.position().to_vec2())
                * crate::foundation::core::Affine::rotate(s.angle());
            assert_eq!(*transform, expected);
            assert_eq!(color.a, Rgba8::gray(30).with_alpha(s.alpha()).a);
        }
        other => panic!("unexpected call {other:?}"),
    }
}
