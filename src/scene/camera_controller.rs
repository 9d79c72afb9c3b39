//! Orbit camera controller
//!
//! Z-up orbit around a target point. Zoom changes the radius in whole units;
//! dragging with the left mouse button changes azimuth and elevation.

use glam::{Mat3, Quat, Vec2, Vec3};

use super::Camera;

/// Orbit camera controller
#[derive(Debug, Clone)]
pub struct OrbitController {
    /// Distance from target
    pub radius: f32,
    /// Angle above the XY plane, radians
    pub elevation: f32,
    /// Angle around +Z from +X, radians
    pub azimuth: f32,
    pub target: Vec3,
    /// Smallest radius zoom can reach
    pub min_radius: f32,
    /// Elevation is clamped to +/- this to keep the basis well defined
    pub max_elevation: f32,
    /// Radians per unit of normalized cursor motion
    pub drag_sensitivity: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            radius: 8.0,
            elevation: 0.0,
            azimuth: 0.0,
            target: Vec3::ZERO,
            min_radius: 1.0,
            max_elevation: std::f32::consts::FRAC_PI_2 - 0.01,
            drag_sensitivity: -2.0,
        }
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the radius by `delta`, never going below `min_radius`.
    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius + delta).max(self.min_radius);
    }

    /// Orbit by a cursor delta in normalized device coordinates.
    pub fn drag(&mut self, delta: Vec2) {
        self.elevation = (self.elevation + self.drag_sensitivity * delta.y)
            .clamp(-self.max_elevation, self.max_elevation);
        self.azimuth = (self.azimuth + self.drag_sensitivity * delta.x)
            .rem_euclid(std::f32::consts::TAU);
    }

    /// Camera position for the current orbit parameters.
    pub fn position(&self) -> Vec3 {
        let (se, ce) = self.elevation.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.radius * Vec3::new(ce * ca, ce * sa, se) + self.target
    }

    /// Camera orientation looking at the target with +Z as up.
    pub fn rotation(&self) -> Quat {
        let out = (self.position() - self.target).normalize();
        let up = (Vec3::Z - Vec3::Z.dot(out) * out).normalize();
        let right = up.cross(out);
        Quat::from_mat3(&Mat3::from_cols(right, up, out)).normalize()
    }

    /// Place the camera.
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position();
        camera.rotation = self.rotation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sits_on_x_axis() {
        let orbit = OrbitController::default();
        assert!((orbit.position() - Vec3::new(8.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn camera_looks_at_target() {
        let mut orbit = OrbitController {
            elevation: 0.4,
            azimuth: 1.1,
            target: Vec3::new(1.0, 2.0, 0.5),
            ..Default::default()
        };
        orbit.zoom(2.0);

        let mut camera = Camera::default();
        orbit.apply(&mut camera);

        let in_view = camera.view_matrix().transform_point3(orbit.target);
        // straight ahead down -Z at the orbit radius
        assert!(in_view.x.abs() < 1e-4);
        assert!(in_view.y.abs() < 1e-4);
        assert!((in_view.z + 10.0).abs() < 1e-4);

        // world +Z projects upward on screen
        let up = camera.view_matrix().transform_vector3(Vec3::Z);
        assert!(up.y > 0.0);
    }

    #[test]
    fn zoom_and_elevation_are_clamped() {
        let mut orbit = OrbitController::default();
        for _ in 0..20 {
            orbit.zoom(-1.0);
        }
        assert_eq!(orbit.radius, 1.0);

        orbit.drag(Vec2::new(0.0, -10.0));
        assert!(orbit.elevation < std::f32::consts::FRAC_PI_2);
        assert!(orbit.position().is_finite());
        assert!(orbit.rotation().is_finite());
    }

    #[test]
    fn drag_direction() {
        let mut orbit = OrbitController::default();
        orbit.drag(Vec2::new(-0.1, -0.1));
        assert!((orbit.elevation - 0.2).abs() < 1e-6);
        assert!((orbit.azimuth - 0.2).abs() < 1e-6);
    }
}
