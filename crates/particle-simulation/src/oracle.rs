//! Decay oracles
//!
//! The decay scheduler only asks "does this particle decay now, given
//! probability p?". Any backend that answers `true` with frequency close to
//! `p` over many calls can stand behind [`DecayOracle`].

use num_complex::Complex32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probabilistic boolean decision backing the decay scheduler
pub trait DecayOracle {
    /// Returns `true` with frequency approximately `probability`.
    fn decide(&mut self, probability: f32) -> bool;
}

impl<F> DecayOracle for F
where
    F: FnMut(f32) -> bool,
{
    fn decide(&mut self, probability: f32) -> bool {
        self(probability)
    }
}

fn sanitize(probability: f32) -> f32 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Plain uniform draw: `u < p`
#[derive(Debug, Clone)]
pub struct UniformOracle {
    rng: StdRng,
}

impl UniformOracle {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seeded_rng(seed),
        }
    }
}

impl DecayOracle for UniformOracle {
    fn decide(&mut self, probability: f32) -> bool {
        self.rng.random_bool(sanitize(probability) as f64)
    }
}

/// Single-qubit state vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qubit {
    amplitudes: [Complex32; 2],
}

impl Qubit {
    /// |0>
    pub fn ground() -> Self {
        Self {
            amplitudes: [Complex32::new(1.0, 0.0), Complex32::new(0.0, 0.0)],
        }
    }

    /// Rotation about the Y axis by `theta`
    pub fn apply_ry(&mut self, theta: f32) {
        let (s, c) = (theta * 0.5).sin_cos();
        let [a0, a1] = self.amplitudes;
        self.amplitudes = [a0 * c - a1 * s, a0 * s + a1 * c];
    }

    /// Born-rule probability of measuring |1>
    pub fn probability_one(&self) -> f32 {
        let p0 = self.amplitudes[0].norm_sqr();
        let p1 = self.amplitudes[1].norm_sqr();
        let total = p0 + p1;
        if total > 0.0 {
            p1 / total
        } else {
            0.0
        }
    }

    /// Measure in the computational basis, collapsing the state.
    pub fn measure<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let one = rng.random_bool(self.probability_one().clamp(0.0, 1.0) as f64);
        self.amplitudes = if one {
            [Complex32::new(0.0, 0.0), Complex32::new(1.0, 0.0)]
        } else {
            [Complex32::new(1.0, 0.0), Complex32::new(0.0, 0.0)]
        };
        one
    }
}

/// Amplitude-based draw: prepares `Ry(theta)|0>` with `sin^2(theta/2) = p`
/// and measures it once.
#[derive(Debug, Clone)]
pub struct AmplitudeOracle {
    rng: StdRng,
}

impl AmplitudeOracle {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seeded_rng(seed),
        }
    }

    /// Rotation angle whose |1> population equals `probability`
    pub fn angle_for(probability: f32) -> f32 {
        2.0 * sanitize(probability).sqrt().asin()
    }
}

impl DecayOracle for AmplitudeOracle {
    fn decide(&mut self, probability: f32) -> bool {
        let mut qubit = Qubit::ground();
        qubit.apply_ry(Self::angle_for(probability));
        qubit.measure(&mut self.rng)
    }
}
