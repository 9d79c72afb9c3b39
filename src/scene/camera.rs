//! Camera

use glam::{Mat4, Quat, Vec3};

/// Perspective projection with an infinite far plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 60f32.to_radians(),
            aspect: 1280.0 / 960.0,
            near: 0.01,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_infinite_rh(self.fov_y, self.aspect, self.near)
    }
}

/// Camera placed by position and orientation. It looks down its local -Z
/// with +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            projection: Projection::default(),
        }
    }
}

impl Camera {
    /// World to camera space
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio from a framebuffer size. Zero sizes (minimized
    /// windows) are ignored.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.projection.aspect = width as f32 / height as f32;
        }
    }
}
