use super::*;

#[test]
fn cache_key_rounds_to_eighth_pixels() {
    assert_eq!(cache_key('h', 12.0), ('h', 96));
    assert_eq!(cache_key('h', 12.04), ('h', 96));
    assert_eq!(cache_key('h', 12.07), ('h', 97));
    assert_ne!(cache_key('h', 12.0), cache_key('u', 12.0));
    assert_eq!(cache_key('h', -3.0), ('h', 0));
}

#[test]
fn random_sizes_share_a_bounded_cache() {
    let Some(face) = FontFace::system_serif() else {
        return;
    };
    let mut shaper = GlyphShaper::new(&face).unwrap();
    let mut rng = crate::random::SessionRng::seeded(9);
    for _ in 0..2000 {
        let size = rng.uniform(crate::random::Span::new(12.0, 20.0));
        shaper.shape('x', size);
    }
    // 12..20 px in eighth-pixel steps.
    assert!(shaper.cached() <= 65, "{}", shaper.cached());
}

#[test]
fn resolve_prefers_an_explicit_path() {
    let missing = Path::new("target/no_such_font.ttf");
    assert!(FontFace::resolve(Some(missing)).is_err());
}

#[test]
fn bytes_wrap_as_the_first_face() {
    let face = FontFace::from_bytes(vec![1, 2, 3]);
    assert_eq!(face.bytes(), &[1, 2, 3]);
    assert_eq!(face.index(), 0);
    assert_eq!(face.family(), None);
}
