use crate::random::SessionRng;

const Y_WRAP_BITS: u32 = 4;
const Y_WRAP: usize = 1 << Y_WRAP_BITS;
const TABLE_MASK: usize = 4095;

/// Smooth 2D value-noise field with octave falloff.
///
/// A 4096-entry lattice of uniform values is drawn once from the session source. Samples blend
/// lattice values with a cosine ease and sum `octaves` layers, each at double frequency and
/// `falloff` times the amplitude of the previous one. Output lies in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct NoiseField {
    table: Vec<f64>,
    octaves: u32,
    falloff: f64,
}

impl NoiseField {
    /// Default detail: 4 octaves, 0.5 falloff.
    pub fn new(rng: &mut SessionRng) -> Self {
        Self::with_detail(rng, 4, 0.5)
    }

    /// Field with explicit octave count and per-octave falloff.
    pub fn with_detail(rng: &mut SessionRng, octaves: u32, falloff: f64) -> Self {
        let table = (0..=TABLE_MASK).map(|_| rng.unit()).collect();
        Self {
            table,
            octaves: octaves.max(1),
            falloff,
        }
    }

    /// Sample the field at `(x, y)`. Negative coordinates mirror into the positive quadrant.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (x, y) = (x.abs(), y.abs());
        if !x.is_finite() || !y.is_finite() {
            return 0.0;
        }

        let mut xi = x.floor() as usize;
        let mut yi = y.floor() as usize;
        let mut xf = x - x.floor();
        let mut yf = y - y.floor();

        let mut out = 0.0;
        let mut amp = 0.5;
        for _ in 0..self.octaves {
            let of = xi.wrapping_add(yi << Y_WRAP_BITS);
            let rxf = scaled_cosine(xf);
            let ryf = scaled_cosine(yf);

            let mut n1 = self.at(of);
            n1 += rxf * (self.at(of.wrapping_add(1)) - n1);
            let mut n2 = self.at(of.wrapping_add(Y_WRAP));
            n2 += rxf * (self.at(of.wrapping_add(Y_WRAP + 1)) - n2);
            n1 += ryf * (n2 - n1);

            out += n1 * amp;
            amp *= self.falloff;

            xi <<= 1;
            xf *= 2.0;
            yi <<= 1;
            yf *= 2.0;
            if xf >= 1.0 {
                xi = xi.wrapping_add(1);
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi = yi.wrapping_add(1);
                yf -= 1.0;
            }
        }
        out
    }

    fn at(&self, idx: usize) -> f64 {
        self.table[idx & TABLE_MASK]
    }
}

fn scaled_cosine(i: f64) -> f64 {
    0.5 * (1.0 - (i * std::f64::consts::PI).cos())
}

#[cfg(test)]
#[path = "../../tests/unit/random/noise.rs"]
mod tests;
