use super::*;
use crate::foundation::core::Viewport;
use crate::render::record::{DrawCall, RecordingSurface};

fn recorder() -> RecordingSurface {
    RecordingSurface::new(Viewport::new(200, 100).unwrap())
}

#[test]
fn tracking_goes_between_glyphs_only() {
    let mut s = recorder();
    let wa = s.glyph_advance('a', 20.0);
    let wb = s.glyph_advance('b', 20.0);
    assert_eq!(measure_tracked_width(&mut s, "ab", 20.0, 3.0), wa + wb + 3.0);
    assert_eq!(measure_tracked_width(&mut s, "a", 20.0, 3.0), wa);
    assert_eq!(measure_tracked_width(&mut s, "", 20.0, 3.0), 0.0);
}

#[test]
fn glyphs_are_centered_on_origin() {
    let mut s = recorder();
    draw_tracked_centered(&mut s, "hush", 20.0, 2.0, Point::new(100.0, 50.0)).unwrap();

    // 4 glyphs of 10 px plus 3 gaps of 2 px.
    let xs: Vec<f64> = s
        .calls()
        .iter()
        .filter_map(|c| match c {
            DrawCall::Glyph { origin, .. } => Some(origin.x),
            _ => None,
        })
        .collect();
    assert_eq!(xs, vec![77.0, 89.0, 101.0, 113.0]);
    assert_eq!(s.glyph_text(), "hush");

    match &s.calls()[0] {
        DrawCall::Glyph { origin, .. } => assert_eq!(origin.y, 57.0),
        other => panic!("unexpected call {other:?}"),
    }
}

#[test]
fn empty_text_draws_nothing() {
    let mut s = recorder();
    draw_tracked_centered(&mut s, "", 20.0, 2.0, Point::ORIGIN).unwrap();
    assert!(s.calls().is_empty());
}

#[test]
fn bounds_contain_every_glyph_origin() {
    let mut s = recorder();
    let origin = Point::new(40.0, 30.0);
    let bounds = tracked_bounds(&mut s, "soft", 16.0, 1.5, origin);
    draw_tracked_centered(&mut s, "soft", 16.0, 1.5, origin).unwrap();
    for call in s.calls() {
        if let DrawCall::Glyph { origin, .. } = call {
            assert!(bounds.contains(*origin));
        }
    }
    assert!((bounds.center().x - origin.x).abs() < 1e-9);
}
