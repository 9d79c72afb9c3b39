//! Scene management
//!
//! Objects live in one arena and refer to their parents by [`ObjectId`].
//! World matrices are never cached; each query walks the parent chain, so a
//! mutation anywhere in the chain is visible to the next query.

mod camera;
mod camera_controller;
mod transform;

pub use camera::*;
pub use camera_controller::*;
pub use transform::*;

use glam::{Mat3, Mat4, Vec3};
use thiserror::Error;

use crate::assets::MeshHandle;
use crate::render::DrawItem;

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown object handle {0:?}")]
    UnknownObject(ObjectId),
    #[error("no object named '{0}'")]
    MissingObject(String),
    #[error("parent chain of {0:?} loops back on itself")]
    HierarchyCycle(ObjectId),
    #[error("object {0:?} cannot be its own parent")]
    SelfParent(ObjectId),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Handle to an object in a [`Scene`]. Objects are never removed, so a
/// handle stays valid for the scene's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A drawable object in the scene
#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    pub transform: Transform,
    pub mesh: MeshHandle,
    pub invisible: bool,
}

/// The scene containing all objects and the camera
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Object>,
    pub camera: Camera,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene
    pub fn add_object(&mut self, name: impl Into<String>, transform: Transform, mesh: MeshHandle) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(Object {
            name: name.into(),
            transform,
            mesh,
            invisible: false,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> SceneResult<&Object> {
        self.objects.get(id.0).ok_or(SceneError::UnknownObject(id))
    }

    pub fn object_mut(&mut self, id: ObjectId) -> SceneResult<&mut Object> {
        self.objects.get_mut(id.0).ok_or(SceneError::UnknownObject(id))
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    /// First object with this name.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name).map(ObjectId)
    }

    /// Like [`Scene::find`], but a missing object is an error.
    pub fn require(&self, name: &str) -> SceneResult<ObjectId> {
        self.find(name)
            .ok_or_else(|| SceneError::MissingObject(name.to_string()))
    }

    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> SceneResult<()> {
        self.object_mut(id)?.invisible = !visible;
        Ok(())
    }

    /// Set the parent relation only; the child's local transform is left as
    /// is. Refuses links that would make the hierarchy cyclic.
    pub fn set_parent(&mut self, child: ObjectId, parent: Option<ObjectId>) -> SceneResult<()> {
        self.object(child)?;
        if let Some(parent) = parent {
            if parent == child {
                return Err(SceneError::SelfParent(child));
            }
            self.object(parent)?;
            for ancestor in self.ancestors(parent)? {
                if ancestor == child {
                    return Err(SceneError::HierarchyCycle(child));
                }
            }
        }
        self.object_mut(child)?.transform.parent = parent;
        Ok(())
    }

    /// Re-parent `child` and rewrite its local transform so its world
    /// transform is unchanged.
    pub fn set_parent_keep_world(&mut self, child: ObjectId, parent: Option<ObjectId>) -> SceneResult<()> {
        let child_world = self.world_matrix(child)?;
        let parent_world = match parent {
            Some(parent) => self.world_matrix(parent)?,
            None => Mat4::IDENTITY,
        };
        self.set_parent(child, parent)?;

        let local = parent_world.inverse() * child_world;
        let (scale, rotation, position) = local.to_scale_rotation_translation();
        let transform = &mut self.object_mut(child)?.transform;
        transform.position = position;
        transform.rotation = rotation.normalize();
        transform.scale = scale;
        Ok(())
    }

    /// Link the named objects into a chain, `names[0]` being the root, and
    /// make each child's position relative to its parent's.
    ///
    /// Pairs are processed from the leaf up so every parent is still in
    /// authoring space when it is subtracted. Rotations and scales are left
    /// alone. Returns the ids root first.
    pub fn wire_chain(&mut self, names: &[&str]) -> SceneResult<Vec<ObjectId>> {
        let ids = names
            .iter()
            .map(|name| self.require(name))
            .collect::<SceneResult<Vec<_>>>()?;

        for pair in ids.windows(2).rev() {
            let (parent, child) = (pair[0], pair[1]);
            self.set_parent(child, Some(parent))?;
            let parent_position = self.object(parent)?.transform.position;
            self.object_mut(child)?.transform.position -= parent_position;
        }
        Ok(ids)
    }

    /// `id` followed by each of its ancestors up to the root.
    fn ancestors(&self, id: ObjectId) -> SceneResult<Vec<ObjectId>> {
        let mut chain = vec![id];
        let mut current = self.object(id)?.transform.parent;
        while let Some(parent) = current {
            // a chain longer than the arena must revisit a node
            if chain.len() > self.objects.len() {
                return Err(SceneError::HierarchyCycle(id));
            }
            chain.push(parent);
            current = self.object(parent)?.transform.parent;
        }
        Ok(chain)
    }

    /// Compose `parent_world * T * R * S` from the root down.
    pub fn world_matrix(&self, id: ObjectId) -> SceneResult<Mat4> {
        let mut world = Mat4::IDENTITY;
        for ancestor in self.ancestors(id)?.into_iter().rev() {
            world *= self.object(ancestor)?.transform.local_matrix();
        }
        Ok(world)
    }

    pub fn world_position(&self, id: ObjectId) -> SceneResult<Vec3> {
        Ok(self.world_matrix(id)?.w_axis.truncate())
    }

    /// Draw list for all visible objects, in scene order.
    pub fn collect_draws(&self, view: Mat4) -> SceneResult<Vec<DrawItem>> {
        let mut draws = Vec::with_capacity(self.objects.len());
        for (id, object) in self.objects() {
            if object.invisible {
                continue;
            }
            let world = self.world_matrix(id)?;
            draws.push(DrawItem {
                world,
                normal_matrix: normal_matrix(view * world),
                mesh: object.mesh,
            });
        }
        Ok(draws)
    }
}

/// Inverse-transpose of the upper 3x3. Degenerate matrices are passed
/// through unchanged.
fn normal_matrix(model_view: Mat4) -> Mat3 {
    let m = Mat3::from_mat4(model_view);
    if m.determinant().abs() > f32::EPSILON {
        m.inverse().transpose()
    } else {
        m
    }
}
