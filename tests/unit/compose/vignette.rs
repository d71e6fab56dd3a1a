use super::*;

fn alpha_at(layer: &RasterLayer, x: u32, y: u32) -> u8 {
    layer.data()[((y * layer.width() + x) * 4 + 3) as usize]
}

#[test]
fn glow_is_strongest_at_corners_and_fades_inward() {
    let vp = Viewport::new(400, 300).unwrap();
    let layer = generate_vignette(vp, &BackdropTuning::default()).unwrap();
    assert_eq!((layer.width(), layer.height()), (400, 300));

    let corner = alpha_at(&layer, 0, 0);
    let edge = alpha_at(&layer, 0, 150);
    let inset = alpha_at(&layer, 30, 150);
    let center = alpha_at(&layer, 200, 150);
    assert!(corner > edge, "{corner} vs {edge}");
    assert!((25..=45).contains(&edge), "edge {edge}");
    assert!(inset < edge, "{inset} vs {edge}");
    assert_eq!(center, 0);
    assert!(corner <= 70);

    let px = &layer.data()[..4];
    assert!(px.iter().all(|&c| c == corner));
}

#[test]
fn glow_is_symmetric() {
    let vp = Viewport::new(240, 160).unwrap();
    let layer = generate_vignette(vp, &BackdropTuning::default()).unwrap();
    let left = i32::from(alpha_at(&layer, 0, 80));
    let right = i32::from(alpha_at(&layer, 239, 80));
    let top = i32::from(alpha_at(&layer, 120, 0));
    let bottom = i32::from(alpha_at(&layer, 120, 159));
    assert!((left - right).abs() <= 3, "{left} vs {right}");
    assert!((top - bottom).abs() <= 3, "{top} vs {bottom}");
}

#[test]
fn zero_blur_or_alpha_yields_empty_layer() {
    let vp = Viewport::new(20, 10).unwrap();
    let mut tuning = BackdropTuning::default();
    tuning.vignette_blur_px = 0.0;
    assert!(generate_vignette(vp, &tuning).unwrap().is_empty());
    tuning = BackdropTuning::default();
    tuning.vignette_alpha = 0.0;
    assert!(generate_vignette(vp, &tuning).unwrap().is_empty());
}
