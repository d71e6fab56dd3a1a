use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_keeps_interior_of_constant_image() {
    let (w, h) = (9u32, 9u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 2, 1.0).unwrap();
    let center = ((4 * w + 4) * 4) as usize;
    assert_eq!(&out[center..center + 4], &px);
}

#[test]
fn blur_fades_toward_transparent_edges() {
    let (w, h) = (9u32, 9u32);
    let src = [0u8, 0, 0, 255].repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 1.5).unwrap();
    let corner_a = out[3];
    let center_a = out[((4 * w + 4) * 4 + 3) as usize];
    assert!(corner_a < center_a);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 10);
}

#[test]
fn kernel_spans_three_sigmas() {
    assert_eq!(kernel_for(1.2), (4, 1.2));
    assert_eq!(kernel_for(3.5), (11, 3.5));
    assert_eq!(kernel_for(0.0).0, 0);
    assert_eq!(kernel_for(f64::NAN).0, 0);
}

#[test]
fn blur_rejects_bad_lengths() {
    assert!(blur_rgba8_premul(&[0u8; 3], 1, 1, 1, 1.0).is_err());
}
