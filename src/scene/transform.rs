//! Transform component

use glam::{Mat4, Quat, Vec3};

use super::ObjectId;

/// Parent-relative placement of an object.
///
/// The parent link is only changed through [`super::Scene::set_parent`], which
/// keeps the hierarchy acyclic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub(crate) parent: Option<ObjectId>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Build from loaded components. The rotation is normalized; a zero or
    /// non-finite quaternion becomes the identity.
    pub fn from_components(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        let rotation = if rotation.length_squared() > f32::EPSILON && rotation.is_finite() {
            rotation.normalize()
        } else {
            Quat::IDENTITY
        };
        Self {
            position,
            rotation,
            scale,
            parent: None,
        }
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// `T * R * S`
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Set the rotation to `angle` radians about `axis`.
    pub fn set_axis_angle(&mut self, axis: Vec3, angle: f32) {
        self.rotation = Quat::from_axis_angle(axis.normalize(), angle);
    }
}
