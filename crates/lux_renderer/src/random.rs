//! Random sources and the hemisphere sampling built on them.
//!
//! Every unit of parallel work owns its generator. Generators are seeded from
//! `(seed, pass, row)` so a render is reproducible no matter how rayon
//! schedules the work.

use lux_math::{orthonormal_basis, Vec3};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::f32::consts::PI;

/// A source of uniform random numbers in `[0, 1)`.
pub trait RandomSource {
    fn uniform(&mut self) -> f32;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    #[inline]
    fn uniform(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

/// Mix a render seed with a pass and row index (SplitMix64 finalizer).
pub fn stream_seed(seed: u64, pass: u32, row: u32) -> u64 {
    let mut v = seed ^ ((pass as u64) << 32) ^ row as u64;
    v = v.wrapping_add(0x9e37_79b9_7f4a_7c15);
    v = (v ^ (v >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    v = (v ^ (v >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    v ^ (v >> 31)
}

/// Independent generator for one row of one supersample pass.
pub fn row_rng(seed: u64, pass: u32, row: u32) -> StdRng {
    StdRng::seed_from_u64(stream_seed(seed, pass, row))
}

/// A direction drawn from a hemisphere together with its density.
#[derive(Debug, Clone, Copy)]
pub struct HemisphereSample {
    pub direction: Vec3,
    pub pdf: f32,
}

/// Cosine-weighted direction on the hemisphere around unit `normal`.
///
/// Density is `cos(theta) / pi` where theta is measured from the normal.
pub fn cosine_hemisphere(normal: Vec3, rng: &mut dyn RandomSource) -> HemisphereSample {
    let u = rng.uniform();
    let v = rng.uniform();

    let theta = 0.5 * (1.0 - 2.0 * u).clamp(-1.0, 1.0).acos();
    let phi = 2.0 * PI * v;
    let (sin_theta, cos_theta) = theta.sin_cos();

    let x = phi.cos() * sin_theta;
    let y = cos_theta;
    let z = phi.sin() * sin_theta;

    let (tangent, bitangent) = orthonormal_basis(normal);
    HemisphereSample {
        direction: x * tangent + y * normal + z * bitangent,
        pdf: cos_theta / PI,
    }
}
