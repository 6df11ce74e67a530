//! Cameras for the two demos.

use glam::{Mat4, Vec3};

/// Radians of orbit per pixel of mouse drag.
pub const ORBIT_SENSITIVITY: f32 = 0.005;
/// Fraction of the pending orbit applied each frame.
pub const DAMPING_FACTOR: f32 = 0.05;
/// World units per wheel line.
pub const ZOOM_SPEED: f32 = 1.0;

const PITCH_LIMIT: f32 = 1.55;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 90.0;

/// Perspective orbit camera with damped rotation.
///
/// Mouse input accumulates into a pending rotation. Each call to
/// [`update`](Self::update) applies a fraction of it and decays the rest, so
/// the view keeps gliding briefly after the drag ends.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl OrbitCamera {
    /// Looking down at the origin from 30 units up.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: PITCH_LIMIT,
            distance: 30.0,
            target: Vec3::ZERO,
            fov_y: 75f32.to_radians(),
            near: 0.1,
            far: 100.0,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Queue an orbit from a mouse drag of `(dx, dy)` pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * ORBIT_SENSITIVITY;
        self.pending_pitch += dy * ORBIT_SENSITIVITY;
    }

    /// Zoom by `lines` wheel lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance - lines * ZOOM_SPEED).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Apply damping. Call once per frame.
    pub fn update(&mut self) {
        self.yaw += self.pending_yaw * DAMPING_FACTOR;
        self.pitch = (self.pitch + self.pending_pitch * DAMPING_FACTOR).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.pending_yaw *= 1.0 - DAMPING_FACTOR;
        self.pending_pitch *= 1.0 - DAMPING_FACTOR;
    }

    /// Whether a queued orbit is still being applied.
    pub fn is_moving(&self) -> bool {
        self.pending_yaw.abs() > 1e-5 || self.pending_pitch.abs() > 1e-5
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed orthographic camera looking down `-Z`.
#[derive(Debug, Clone, Copy)]
pub struct OrthoCamera {
    pub half_extent: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl OrthoCamera {
    /// A 10×10 frustum with the eye at `z = 2`.
    pub fn new() -> Self {
        Self {
            half_extent: 5.0,
            near: 1.0,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 2.0),
        }
    }

    /// The frustum is not stretched to the window aspect.
    pub fn view_proj(&self) -> Mat4 {
        let h = self.half_extent;
        let proj = Mat4::orthographic_rh(-h, h, -h, h, self.near, self.far);
        let view = Mat4::look_at_rh(self.position, self.position.with_z(0.0), Vec3::Y);
        proj * view
    }
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_starts_above_origin() {
        let cam = OrbitCamera::new();
        let p = cam.position();
        assert!((p.length() - 30.0).abs() < 1e-3);
        assert!(p.y > 29.0);
    }

    #[test]
    fn test_damping_converges() {
        let mut cam = OrbitCamera::new();
        cam.pitch = 0.0;
        cam.drag(-100.0, 0.0);
        let mut last = cam.yaw;
        for _ in 0..500 {
            cam.update();
            assert!(cam.yaw >= last);
            last = cam.yaw;
        }
        assert!(!cam.is_moving());
        // The full queued orbit is eventually applied.
        assert!((cam.yaw - 100.0 * ORBIT_SENSITIVITY).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_preserves_distance() {
        let mut cam = OrbitCamera::new();
        cam.drag(300.0, -200.0);
        for _ in 0..100 {
            cam.update();
            assert!((cam.position().length() - cam.distance).abs() < 1e-3);
        }
    }

    #[test]
    fn test_pitch_clamped() {
        let mut cam = OrbitCamera::new();
        cam.drag(0.0, 1e6);
        for _ in 0..50 {
            cam.update();
        }
        assert!(cam.pitch <= PITCH_LIMIT);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut cam = OrbitCamera::new();
        cam.zoom(1000.0);
        assert_eq!(cam.distance, MIN_DISTANCE);
        cam.zoom(-1000.0);
        assert_eq!(cam.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_ortho_maps_frustum_corners() {
        let cam = OrthoCamera::new();
        let m = cam.view_proj();
        let corner = m.project_point3(Vec3::new(5.0, 5.0, 0.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
        assert!((0.0..=1.0).contains(&corner.z));
        let center = m.project_point3(Vec3::ZERO);
        assert!(center.x.abs() < 1e-6 && center.y.abs() < 1e-6);
    }
}
