//! Per-demo state, owned by the app and advanced once per frame.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::clock::FrameTime;
use crate::error::GalaxyError;
use crate::galaxy::{generate, ParticleBuffer};
use crate::params::{GalaxyParams, ParamStore};
use crate::wander::{Wander, WanderConfig};

/// Parameters and particles of the galaxy demo.
pub struct GalaxyScene {
    store: ParamStore,
    particles: ParticleBuffer,
    rng: SmallRng,
}

impl GalaxyScene {
    /// Generate the initial galaxy with an entropy-seeded RNG.
    pub fn new(params: GalaxyParams) -> Result<Self, GalaxyError> {
        Self::with_rng(params, SmallRng::from_entropy())
    }

    pub fn with_rng(params: GalaxyParams, mut rng: SmallRng) -> Result<Self, GalaxyError> {
        let particles = timed_generate(&params, &mut rng)?;
        Ok(Self {
            store: ParamStore::new(params),
            particles,
            rng,
        })
    }

    pub fn params(&self) -> GalaxyParams {
        self.store.committed()
    }

    pub fn store_mut(&mut self) -> &mut ParamStore {
        &mut self.store
    }

    pub fn particles(&self) -> &ParticleBuffer {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleBuffer {
        &mut self.particles
    }

    /// Build a complete galaxy for `params` without touching the current one.
    pub fn regenerate(&mut self, params: &GalaxyParams) -> Result<ParticleBuffer, GalaxyError> {
        timed_generate(params, &mut self.rng)
    }

    /// Commit the parameter draft.
    ///
    /// Returns `Ok(true)` when the galaxy was regenerated, `Ok(false)` when
    /// nothing changed. On error the previous galaxy stays in place.
    pub fn commit(&mut self) -> Result<bool, GalaxyError> {
        let Some(params) = self.store.commit()? else {
            return Ok(false);
        };
        log::debug!(
            "Committed count={} branches={} spin={}",
            params.count,
            params.branches,
            params.spin
        );
        self.particles = self.regenerate(&params)?;
        Ok(true)
    }

    /// Advance the rotation by one frame.
    pub fn tick(&mut self, frame: FrameTime) {
        self.particles.spin(frame.delta);
    }
}

fn timed_generate(params: &GalaxyParams, rng: &mut SmallRng) -> Result<ParticleBuffer, GalaxyError> {
    let start = Instant::now();
    let particles = generate(params, rng)?;
    log::info!(
        "Generated galaxy with {} particles in {:.1} ms",
        particles.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(particles)
}

/// The wandering marker of the ant demo.
pub struct AntScene {
    wander: Wander,
    rng: SmallRng,
    skipped: u64,
}

impl AntScene {
    pub fn new(config: WanderConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    pub fn with_rng(config: WanderConfig, rng: SmallRng) -> Self {
        Self {
            wander: Wander::new(config),
            rng,
            skipped: 0,
        }
    }

    pub fn wander(&self) -> &Wander {
        &self.wander
    }

    /// Frames whose movement was skipped on a degenerate direction.
    pub fn skipped_frames(&self) -> u64 {
        self.skipped
    }

    /// Advance the marker by one frame.
    pub fn tick(&mut self) {
        if let Err(e) = self.wander.tick(&mut self.rng) {
            self.skipped += 1;
            log::warn!("Skipping wander step: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(params: GalaxyParams) -> GalaxyScene {
        GalaxyScene::with_rng(params, SmallRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn test_initial_generation() {
        let s = scene(GalaxyParams::new(1000, 4, 0.5));
        assert_eq!(s.particles().len(), 1000);
        assert_eq!(s.params().branches, 4);
    }

    #[test]
    fn test_invalid_initial_params() {
        let result = GalaxyScene::with_rng(GalaxyParams::new(10, 0, 0.5), SmallRng::seed_from_u64(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_commit_regenerates() {
        let mut s = scene(GalaxyParams::new(100, 3, 0.5));
        s.store_mut().draft_mut().count = 250;
        assert!(s.commit().unwrap());
        assert_eq!(s.particles().len(), 250);
        assert_eq!(s.params().count, 250);
    }

    #[test]
    fn test_commit_without_change() {
        let mut s = scene(GalaxyParams::new(100, 3, 0.5));
        let before = s.particles().positions().to_vec();
        assert!(!s.commit().unwrap());
        assert_eq!(s.particles().positions(), &before[..]);
    }

    #[test]
    fn test_rejected_commit_keeps_galaxy() {
        let mut s = scene(GalaxyParams::new(100, 3, 0.5));
        s.store_mut().draft_mut().spin = f32::NAN;
        assert!(s.commit().is_err());
        assert_eq!(s.particles().len(), 100);
        assert_eq!(s.params().spin, 0.5);
    }

    #[test]
    fn test_regenerate_leaves_current_galaxy() {
        let mut s = scene(GalaxyParams::new(100, 3, 0.5));
        let fresh = s.regenerate(&GalaxyParams::new(10, 2, 1.0)).unwrap();
        assert_eq!(fresh.len(), 10);
        assert_eq!(s.particles().len(), 100);
    }

    #[test]
    fn test_tick_rotates() {
        let mut s = scene(GalaxyParams::new(100, 3, 0.5));
        s.particles_mut().mark_clean();
        let before = s.particles().positions().to_vec();
        s.tick(FrameTime {
            elapsed: 1.0,
            delta: 1.0,
            frame: 1,
        });
        assert!(s.particles().is_dirty());
        assert_ne!(s.particles().positions(), &before[..]);
    }

    #[test]
    fn test_ant_scene_moves() {
        let mut ant = AntScene::with_rng(WanderConfig::default(), SmallRng::seed_from_u64(1));
        for _ in 0..100 {
            ant.tick();
        }
        assert_eq!(ant.skipped_frames(), 0);
        assert!(ant.wander().position().length() > 0.0);
        assert!(ant.wander().position().length() <= 0.1 + 1e-6);
    }
}
