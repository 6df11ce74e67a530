//! Spiral galaxy generation and per-frame rotation.
//!
//! A galaxy is two parallel `f32` sequences: interleaved `x, y, z` positions
//! and interleaved `r, g, b` colors, three components per particle. Particles
//! are spread over `branches` spiral arms with a half-normal radial falloff,
//! then scattered around their arm so the spiral reads as a cloud rather than
//! a line.
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use stardust::galaxy::generate;
//! use stardust::params::GalaxyParams;
//!
//! let mut rng = SmallRng::seed_from_u64(1);
//! let mut galaxy = generate(&GalaxyParams::new(1000, 3, 1.0), &mut rng).unwrap();
//! assert_eq!(galaxy.positions().len(), 3000);
//!
//! galaxy.spin(1.0 / 60.0);
//! assert!(galaxy.is_dirty());
//! ```

use crate::error::GalaxyError;
use crate::params::GalaxyParams;
use crate::sampling::gaussian;
use rand::Rng;
use std::f32::consts::TAU;

/// Standard deviation of the normalized radial distribution.
pub const RADIUS_STDDEV: f32 = 0.8;
/// Scale applied to the half-normal radius.
pub const RADIUS_SCALE: f32 = 10.0;
/// Probability that a particle gets [`WARM_COLOR`].
pub const WARM_PROBABILITY: f64 = 0.2;
/// Pale blue, the majority color.
pub const COOL_COLOR: [f32; 3] = [136.0 / 256.0, 201.0 / 256.0, 232.0 / 256.0];
/// Dusty orange.
pub const WARM_COLOR: [f32; 3] = [187.0 / 256.0, 133.0 / 256.0, 105.0 / 256.0];
/// Radians of rotation per second of frame time.
pub const ROTATION_SPEED: f32 = 0.02;

/// Positions and colors of every particle in a galaxy.
#[derive(Debug, Clone, Default)]
pub struct ParticleBuffer {
    positions: Vec<f32>,
    colors: Vec<f32>,
    dirty: bool,
}

impl ParticleBuffer {
    /// A buffer holding no particles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Interleaved `x, y, z` positions.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Interleaved `r, g, b` colors, each in `[0, 1]`.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Position of particle `index`, if it exists.
    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        let p = self.positions.get(index * 3..index * 3 + 3)?;
        Some([p[0], p[1], p[2]])
    }

    /// Color of particle `index`, if it exists.
    pub fn color(&self, index: usize) -> Option<[f32; 3]> {
        let c = self.colors.get(index * 3..index * 3 + 3)?;
        Some([c[0], c[1], c[2]])
    }

    /// Whether positions changed since the last upload.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the renderer after uploading positions.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Rotate every particle about the Y axis by `theta` radians.
    ///
    /// `y` and colors are untouched. Rotations compound, so two calls with
    /// `a` and `b` match one call with `a + b`.
    pub fn rotate(&mut self, theta: f32) {
        let (sin, cos) = theta.sin_cos();
        for p in self.positions.chunks_exact_mut(3) {
            let (x, z) = (p[0], p[2]);
            p[0] = x * cos - z * sin;
            p[2] = x * sin + z * cos;
        }
        self.dirty = true;
    }

    /// Advance the galaxy's slow rotation by one frame of `delta` seconds.
    pub fn spin(&mut self, delta: f32) {
        self.rotate(delta * ROTATION_SPEED);
    }
}

/// Angle of the arm that particle `index` belongs to.
///
/// `branches` must be non-zero.
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    TAU / branches as f32 * (index % branches) as f32
}

/// Generate a galaxy.
///
/// Validates `params` first; the random source is only consumed for valid
/// parameters. `count == 0` yields an empty buffer.
pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyParams,
    rng: &mut R,
) -> Result<ParticleBuffer, GalaxyError> {
    params.validate()?;

    let count = params.count as usize;
    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);

    for i in 0..params.count {
        let radius = gaussian(rng, 0.0, RADIUS_STDDEV).abs() * RADIUS_SCALE;
        let arm = branch_angle(i, params.branches) + radius * params.spin;

        let scatter_angle = rng.gen_range(0.0..TAU);
        let scatter_radius = gaussian(rng, 0.0, 1.0).abs();
        let (scatter_sin, scatter_cos) = scatter_angle.sin_cos();

        positions.push(arm.cos() * radius + scatter_cos * scatter_radius);
        positions.push(gaussian(rng, 0.0, 1.0));
        positions.push(arm.sin() * radius + scatter_sin * scatter_radius);

        let color = if rng.gen_bool(WARM_PROBABILITY) {
            WARM_COLOR
        } else {
            COOL_COLOR
        };
        colors.extend_from_slice(&color);
    }

    Ok(ParticleBuffer {
        positions,
        colors,
        dirty: true,
    })
}
