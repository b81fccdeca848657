use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::worldgen::WorldGenParams;

/// Seeded layered 2D noise.
///
/// `sample` sums `octaves` evaluations of OpenSimplex2 noise, each at
/// `lacunarity` times the previous frequency and `persistence` times the
/// previous amplitude, and normalises the sum back into `[-1, 1]`.
pub struct NoiseField {
    noise: FastNoiseLite,
    seed: i32,
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
}

impl NoiseField {
    pub fn new(seed: i32, octaves: u32, persistence: f32, lacunarity: f32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        // Callers pre-scale coordinates; octave frequencies are applied in `sample`.
        noise.set_frequency(Some(1.0));
        Self {
            noise,
            seed,
            octaves: octaves.max(1),
            persistence,
            lacunarity,
        }
    }

    pub fn from_params(params: &WorldGenParams) -> Self {
        Self::new(
            params.seed,
            params.octaves,
            params.persistence,
            params.lacunarity,
        )
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let mut amp = 1.0_f32;
        let mut freq = 1.0_f32;
        let mut sum = 0.0_f32;
        let mut max_amp = 0.0_f32;
        for _ in 0..self.octaves {
            sum += self.noise.get_noise_2d(x * freq, z * freq) * amp;
            max_amp += amp;
            amp *= self.persistence;
            freq *= self.lacunarity;
        }
        let v = if max_amp > 0.0 { sum / max_amp } else { sum };
        v.clamp(-1.0, 1.0)
    }
}
