use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::{FieldParams, NoiseKind};

/// Seeded 2D gradient noise summed over octaves.
///
/// Octaves are accumulated, not normalized: each one adds
/// `noise(x * freq, y * freq) * amp` before `freq *= lacunarity` and
/// `amp *= persistence`, so the output range grows with the octave count
/// (roughly `[-2, 2]` at the default persistence of 0.5).
pub struct OctaveNoise {
    base: FastNoiseLite,
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
}

impl OctaveNoise {
    pub fn new(seed: i32, kind: NoiseKind, octaves: u32, persistence: f32, lacunarity: f32) -> Self {
        let mut base = FastNoiseLite::with_seed(seed);
        base.set_noise_type(Some(match kind {
            NoiseKind::Perlin => NoiseType::Perlin,
            NoiseKind::OpenSimplex2 => NoiseType::OpenSimplex2,
            NoiseKind::Value => NoiseType::Value,
        }));
        // Inputs arrive already scaled by the caller.
        base.set_frequency(Some(1.0));
        Self {
            base,
            octaves,
            persistence,
            lacunarity,
        }
    }

    pub fn from_params(params: &FieldParams) -> Self {
        Self::new(
            params.seed,
            params.noise_kind,
            params.octaves,
            params.persistence,
            params.lacunarity,
        )
    }

    #[inline]
    pub fn sample_2d(&self, x: f32, y: f32) -> f32 {
        let mut sum = 0.0_f32;
        let mut amp = 1.0_f32;
        let mut freq = 1.0_f32;
        for _ in 0..self.octaves {
            sum += self.base.get_noise_2d(x * freq, y * freq) * amp;
            freq *= self.lacunarity;
            amp *= self.persistence;
        }
        sum
    }

    /// Sum of octave amplitudes; `sample_2d` never leaves `[-bound, bound]`
    /// for a base noise bounded by one.
    pub fn amplitude_bound(&self) -> f32 {
        let mut amp = 1.0_f32;
        let mut total = 0.0_f32;
        for _ in 0..self.octaves {
            total += amp;
            amp *= self.persistence;
        }
        total
    }
}
