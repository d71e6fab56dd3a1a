use super::*;

#[test]
fn wrap_stays_half_open() {
    assert_eq!(wrap(5.0, 10.0), 5.0);
    assert_eq!(wrap(10.0, 10.0), 0.0);
    assert_eq!(wrap(-1.0, 10.0), 9.0);
    assert_eq!(wrap(23.5, 10.0), 3.5);

    let tiny = wrap(-1e-17, 10.0);
    assert!((0.0..10.0).contains(&tiny));
}

#[test]
fn wrap_handles_degenerate_input() {
    assert_eq!(wrap(f64::NAN, 10.0), 0.0);
    assert_eq!(wrap(3.0, 0.0), 0.0);
}

#[test]
fn distance_is_euclidean() {
    assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
}

#[test]
fn fnv_is_stable_and_order_sensitive() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"ab");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"ba");
    assert_ne!(a.finish(), b.finish());

    let mut empty = Fnv1a64::new_default();
    empty.write_bytes(&[]);
    assert_eq!(empty.finish(), Fnv1a64::OFFSET_BASIS);

    let mut tagged = Fnv1a64::new_default();
    tagged.write_u8(b'T');
    assert_ne!(tagged.finish(), Fnv1a64::OFFSET_BASIS);
}
