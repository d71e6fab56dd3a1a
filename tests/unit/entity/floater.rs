use super::*;
use crate::config::HushTuning;
use crate::render::record::{DrawCall, RecordingSurface};

fn vp() -> Viewport {
    Viewport::new(400, 300).unwrap()
}

fn placed(x: f64, y: f64) -> PlacedPoint {
    PlacedPoint {
        uv: vp().normalize(Point::new(x, y)),
        pos: Point::new(x, y),
        placement: Placement::Sampled { attempts: 1 },
    }
}

fn word(kind: WordKind, x: f64, y: f64, rng: &mut SessionRng) -> FloaterWord {
    FloaterWord::spawn(kind, placed(x, y), &FloaterTuning::default(), 0.12, rng)
}

fn ctx(frame: u64) -> FrameContext {
    FrameContext {
        frame: FrameIndex(frame),
        viewport: vp(),
        pointer: None,
    }
}

#[test]
fn spawn_rolls_within_kind_ranges() {
    let mut rng = SessionRng::seeded(3);
    let tuning = FloaterTuning::default();
    for _ in 0..50 {
        let b = word(WordKind::Breathe, 10.0, 10.0, &mut rng);
        assert!(tuning.breathe.base_alpha.contains(b.base_alpha()));
        assert!(tuning.breathe.blur_choices.contains(&b.blur_px()));
        assert!(tuning.size.contains(b.size()));

        let s = word(WordKind::Soft, 10.0, 10.0, &mut rng);
        assert!(tuning.soft.base_alpha.contains(s.base_alpha()));
        assert!(tuning.soft.blur_choices.contains(&s.blur_px()));

        let (sx, sy) = s.seeds();
        assert_eq!(sy, sx + SEED_Y_OFFSET);
        assert!((0.0..1000.0).contains(&sx));
    }
}

#[test]
fn update_keeps_size_tracking_and_bounds() {
    let mut rng = SessionRng::seeded(11);
    let noise = NoiseField::new(&mut rng);
    let hush = HushLabel::new(
        Point::new(200.0, 150.0),
        60.0,
        &HushTuning::default(),
        0.1,
        &mut rng,
    );
    let avoid = Avoidance::from_tuning(&FloaterTuning::default());
    let mut words: Vec<FloaterWord> = [(0.1, 0.2), (399.9, 299.9), (200.5, 150.0), (0.0, 0.0)]
        .into_iter()
        .map(|(x, y)| word(WordKind::Soft, x, y, &mut rng))
        .collect();
    let before: Vec<(f64, f64)> = words.iter().map(|w| (w.size(), w.tracking())).collect();

    for f in 1..3000 {
        for w in &mut words {
            w.update(&ctx(f), &noise, std::slice::from_ref(&hush), avoid);
            let p = w.position();
            assert!((0.0..400.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((0.0..300.0).contains(&p.y), "y out of range: {}", p.y);
        }
    }
    let after: Vec<(f64, f64)> = words.iter().map(|w| (w.size(), w.tracking())).collect();
    assert_eq!(before, after);
}

#[test]
fn words_near_a_hush_are_pushed_out() {
    let mut rng = SessionRng::seeded(5);
    let noise = NoiseField::new(&mut rng);
    let hush = HushLabel::new(
        Point::new(200.0, 150.0),
        100.0,
        &HushTuning::default(),
        0.1,
        &mut rng,
    );
    let avoid = Avoidance::from_tuning(&FloaterTuning::default());
    let mut w = word(WordKind::Breathe, 210.0, 150.0, &mut rng);

    let d0 = distance(w.position(), hush.anchor());
    w.update(&ctx(1), &noise, std::slice::from_ref(&hush), avoid);
    let d1 = distance(w.position(), hush.anchor());
    assert!(d1 > d0 + 4.0, "expected push, {d0} -> {d1}");
}

#[test]
fn breathing_alpha_stays_in_band() {
    let mut rng = SessionRng::seeded(2);
    let w = word(WordKind::Soft, 1.0, 1.0, &mut rng);
    for f in 0..5000 {
        let a = w.alpha_at(FrameIndex(f));
        assert!(a >= w.base_alpha() * 0.65 - 1e-9);
        assert!(a <= w.base_alpha() + 1e-9);
    }
}

#[test]
fn resize_keeps_relative_position() {
    let mut rng = SessionRng::seeded(1);
    let mut w = word(WordKind::Soft, 200.0, 150.0, &mut rng);
    let size = w.size();
    w.capture_uv(vp());
    assert_eq!(w.uv(), Point::new(0.5, 0.5));
    w.reproject(Viewport::new(1280, 720).unwrap());
    assert_eq!(w.position(), Point::new(640.0, 360.0));
    assert_eq!(w.size(), size);
}

#[test]
fn renders_word_text_with_instance_blur() {
    let mut rng = SessionRng::seeded(9);
    let w = word(WordKind::Breathe, 50.0, 60.0, &mut rng);
    let mut s = RecordingSurface::new(vp());
    w.render(&mut s, FrameIndex(3), Rgba8::gray(30)).unwrap();
    assert_eq!(s.glyph_text(), "breathe");
    assert!(
        matches!(s.calls()[0], DrawCall::BeginBlur { radius_px, .. } if radius_px == w.blur_px())
    );
    assert!(Placement::Fallback { attempts: 90 }.is_fallback());
    assert!(!w.placement().is_fallback());
}
