use super::*;

fn field(seed: u64) -> NoiseField {
    NoiseField::new(&mut SessionRng::seeded(seed))
}

#[test]
fn samples_stay_in_unit_interval() {
    let n = field(11);
    for i in 0..500 {
        let x = f64::from(i) * 1.37;
        let y = f64::from(i) * 0.011;
        let v = n.sample(x, y);
        assert!((0.0..1.0).contains(&v), "sample {v} out of range");
    }
}

#[test]
fn same_seed_same_field() {
    let a = field(5);
    let b = field(5);
    assert_eq!(a.sample(123.4, 0.56), b.sample(123.4, 0.56));
}

#[test]
fn field_is_continuous_in_time() {
    let n = field(2);
    let seed = 417.0;
    let mut prev = n.sample(seed, 0.0);
    for step in 1..400 {
        let t = f64::from(step) * 0.0012;
        let v = n.sample(seed, t);
        assert!((v - prev).abs() < 0.05, "jump of {} at step {step}", v - prev);
        prev = v;
    }
}

#[test]
fn negative_coordinates_mirror() {
    let n = field(9);
    assert_eq!(n.sample(-3.25, -0.5), n.sample(3.25, 0.5));
    assert_eq!(n.sample(f64::INFINITY, 0.0), 0.0);
}

#[test]
fn lattice_points_with_one_octave_return_table_values() {
    let mut rng = SessionRng::seeded(4);
    let n = NoiseField::with_detail(&mut rng, 1, 0.5);
    assert_eq!(n.sample(3.0, 0.0), n.table[3] * 0.5);
}
