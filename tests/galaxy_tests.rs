//! Integration tests for the headless galaxy and wander logic.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

use stardust::prelude::*;

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0x5eed)
}

fn radial(galaxy: &ParticleBuffer) -> Vec<f32> {
    galaxy
        .positions()
        .chunks_exact(3)
        .map(|p| (p[0] * p[0] + p[2] * p[2]).sqrt())
        .collect()
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_buffers_are_three_per_particle() {
    let mut rng = rng();
    for count in [0u32, 1, 2, 99, 5_000] {
        let galaxy = generate(&GalaxyParams::new(count, 3, 0.7), &mut rng).unwrap();
        assert_eq!(galaxy.positions().len(), 3 * count as usize);
        assert_eq!(galaxy.colors().len(), 3 * count as usize);
        assert!(galaxy.colors().iter().all(|c| (0.0..=1.0).contains(c)));
        assert!(galaxy.positions().iter().all(|p| p.is_finite()));
    }
}

#[test]
fn test_zero_count_is_empty() {
    let galaxy = generate(&GalaxyParams::new(0, 5, 0.5), &mut rng()).unwrap();
    assert!(galaxy.is_empty());
    assert!(galaxy.positions().is_empty());
    assert!(galaxy.colors().is_empty());
}

#[test]
fn test_warm_fraction() {
    let galaxy = generate(&GalaxyParams::new(100_000, 5, 0.5), &mut rng()).unwrap();
    let warm = (0..galaxy.len())
        .filter(|&i| galaxy.color(i) == Some(stardust::galaxy::WARM_COLOR))
        .count();
    let fraction = warm as f64 / galaxy.len() as f64;
    assert!((fraction - 0.2).abs() < 0.01, "warm fraction was {}", fraction);
}

#[test]
fn test_branch_angle_is_periodic() {
    for branches in 1..=12u32 {
        for i in 0..50u32 {
            assert_eq!(branch_angle(i, branches), branch_angle(i + branches, branches));
            let angle = branch_angle(i, branches);
            assert!((0.0..TAU).contains(&angle));
        }
    }
}

#[test]
fn test_five_branch_angles() {
    let expected = [0.0, TAU / 5.0, 2.0 * TAU / 5.0];
    for (i, want) in expected.iter().enumerate() {
        assert!((branch_angle(i as u32, 5) - want).abs() < 1e-6);
    }
}

#[test]
fn test_particles_follow_their_arm() {
    // Without spin each arm is a straight ray, and the half-normal radius
    // keeps particles on the outward side of it.
    let galaxy = generate(&GalaxyParams::new(40_000, 4, 0.0), &mut rng()).unwrap();
    for arm in 0..4usize {
        let (mut sx, mut sz, mut n) = (0.0f64, 0.0f64, 0.0f64);
        for i in (arm..galaxy.len()).step_by(4) {
            let p = galaxy.position(i).unwrap();
            sx += p[0] as f64;
            sz += p[2] as f64;
            n += 1.0;
        }
        let (mx, mz) = ((sx / n) as f32, (sz / n) as f32);
        let angle = branch_angle(arm as u32, 4);
        let along = mx * angle.cos() + mz * angle.sin();
        let across = -mx * angle.sin() + mz * angle.cos();
        // E|N(0, 0.8)| * 10 ≈ 6.38
        assert!((along - 6.38).abs() < 0.3, "arm {} mean distance {}", arm, along);
        assert!(across.abs() < 0.3, "arm {} drifted sideways by {}", arm, across);
    }
}

#[test]
fn test_vertical_spread_is_standard_normal() {
    let galaxy = generate(&GalaxyParams::new(50_000, 5, 0.5), &mut rng()).unwrap();
    let ys: Vec<f64> = galaxy.positions().chunks_exact(3).map(|p| p[1] as f64).collect();
    let mean = ys.iter().sum::<f64>() / ys.len() as f64;
    let var = ys.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / ys.len() as f64;
    assert!(mean.abs() < 0.03);
    assert!((var.sqrt() - 1.0).abs() < 0.03);
}

#[test]
fn test_invalid_parameters_rejected() {
    let mut rng = rng();
    for params in [
        GalaxyParams::new(10, 0, 0.5),
        GalaxyParams::new(10, 5, f32::NAN),
        GalaxyParams::new(10, 5, f32::INFINITY),
        GalaxyParams::new(MAX_PARTICLES + 1, 5, 0.5),
    ] {
        let err = generate(&params, &mut rng).unwrap_err();
        assert!(matches!(err, GalaxyError::InvalidParameter { .. }));
    }
}

// ============================================================================
// Frame update
// ============================================================================

#[test]
fn test_rotations_compose() {
    let base = generate(&GalaxyParams::new(2_000, 5, 0.5), &mut rng()).unwrap();

    let mut twice = base.clone();
    twice.rotate(0.3);
    twice.rotate(1.1);

    let mut once = base;
    once.rotate(1.4);

    for (a, b) in twice.positions().iter().zip(once.positions()) {
        assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
    }
}

#[test]
fn test_spin_preserves_radial_distance() {
    let mut galaxy = generate(&GalaxyParams::new(2_000, 3, 1.0), &mut rng()).unwrap();
    let before = radial(&galaxy);
    for _ in 0..1_000 {
        galaxy.spin(1.0 / 60.0);
    }
    for (a, b) in before.iter().zip(radial(&galaxy)) {
        assert!((a - b).abs() <= 1e-3 * a.max(1.0), "{} vs {}", a, b);
    }
}

#[test]
fn test_spin_uses_rotation_speed() {
    let mut spun = generate(&GalaxyParams::new(500, 3, 1.0), &mut rng()).unwrap();
    let mut rotated = spun.clone();
    spun.spin(2.0);
    rotated.rotate(2.0 * 0.02);
    assert_eq!(spun.positions(), rotated.positions());
}

#[test]
fn test_zero_delta_is_identity() {
    let mut galaxy = generate(&GalaxyParams::new(500, 3, 1.0), &mut rng()).unwrap();
    let before = galaxy.positions().to_vec();
    galaxy.spin(0.0);
    assert_eq!(galaxy.positions(), &before[..]);
}

#[test]
fn test_scene_tick_with_clock() {
    let mut scene = GalaxyScene::with_rng(GalaxyParams::new(300, 3, 0.5), rng()).unwrap();
    let before = radial(scene.particles());

    let mut clock = FrameClock::new();
    clock.set_fixed_delta(Some(0.5));
    for _ in 0..10 {
        scene.tick(clock.tick());
    }

    for (a, b) in before.iter().zip(radial(scene.particles())) {
        assert!((a - b).abs() <= 1e-3 * a.max(1.0));
    }
}

// ============================================================================
// Parameter store
// ============================================================================

#[test]
fn test_commit_cycle() {
    let mut scene = GalaxyScene::with_rng(GalaxyParams::new(100, 5, 0.5), rng()).unwrap();

    // Nothing edited.
    assert!(!scene.commit().unwrap());

    scene.store_mut().draft_mut().branches = 3;
    scene.store_mut().draft_mut().count = 42;
    assert!(scene.commit().unwrap());
    assert_eq!(scene.particles().len(), 42);

    // Edited back to the committed value.
    scene.store_mut().draft_mut().spin = 2.0;
    scene.store_mut().draft_mut().spin = 0.5;
    assert!(!scene.commit().unwrap());
}

// ============================================================================
// Wander
// ============================================================================

#[test]
fn test_wander_direction_is_unit() {
    let mut rng = rng();
    let mut wander = Wander::default();
    for _ in 0..5_000 {
        let d = wander.tick(&mut rng).unwrap();
        assert!((d.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_wander_moves_in_plane() {
    let mut rng = rng();
    let mut wander = Wander::default();
    let mut last = wander.position();
    for _ in 0..1_000 {
        wander.tick(&mut rng).unwrap();
        let p = wander.position();
        assert_eq!(p.z, 0.0);
        assert!(((p - last).length() - 0.001).abs() < 1e-6);
        last = p;
    }
}

#[test]
fn test_wander_degenerate_step_is_skipped() {
    let mut wander = Wander::default();
    let err = wander.steer(-Vec3::X).unwrap_err();
    assert_eq!(err, WanderError::Normalization);
    assert_eq!(wander.direction(), Vec3::X);
    assert_eq!(wander.position(), Vec3::ZERO);

    // The next frame carries on from the last valid heading.
    wander.steer(Vec3::Y * 0.1).unwrap();
    assert!(wander.position().x > 0.0);
}

#[test]
fn test_wander_strength_config() {
    let mut rng = rng();
    let mut calm = Wander::new(WanderConfig { strength: 0.0, step: 0.01 });
    for _ in 0..100 {
        assert_eq!(calm.tick(&mut rng).unwrap(), Vec3::X);
    }
    assert!((calm.position().x - 1.0).abs() < 1e-4);
}
