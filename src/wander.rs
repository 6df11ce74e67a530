//! Randomized-walk steering for the ant demo.
//!
//! Each frame nudges a unit direction by a small random vector in the XY
//! plane, renormalizes it, and moves the marker a fixed step along it. The
//! step is per frame, not per second, so the marker speed follows the
//! display refresh rate.

use crate::error::WanderError;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Tuning for [`Wander`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderConfig {
    /// Length of the random perturbation added to the direction.
    pub strength: f32,
    /// Distance moved per frame.
    pub step: f32,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            strength: 0.1,
            step: 0.001,
        }
    }
}

/// Direction and position of a wandering marker.
#[derive(Debug, Clone)]
pub struct Wander {
    direction: Vec3,
    position: Vec3,
    config: WanderConfig,
}

impl Wander {
    /// Start at the origin heading along `+X`.
    pub fn new(config: WanderConfig) -> Self {
        Self {
            direction: Vec3::X,
            position: Vec3::ZERO,
            config,
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn config(&self) -> WanderConfig {
        self.config
    }

    /// Perturbation vector for a random `angle`.
    pub fn perturbation(&self, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(cos, sin, 0.0) * self.config.strength
    }

    /// Add `perturbation` to the direction, renormalize, and step.
    ///
    /// On a degenerate sum the direction and position are left as they were.
    pub fn steer(&mut self, perturbation: Vec3) -> Result<Vec3, WanderError> {
        let direction = (self.direction + perturbation)
            .try_normalize()
            .ok_or(WanderError::Normalization)?;
        self.direction = direction;
        self.position += (direction * self.config.step).with_z(0.0);
        Ok(direction)
    }

    /// One frame of wandering with a random perturbation angle.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec3, WanderError> {
        let angle = rng.gen_range(0.0..TAU);
        self.steer(self.perturbation(angle))
    }
}

impl Default for Wander {
    fn default() -> Self {
        Self::new(WanderConfig::default())
    }
}
