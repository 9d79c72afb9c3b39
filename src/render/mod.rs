//! Rendering boundary
//!
//! The game produces a [`Frame`] each tick; a [`Renderer`] turns it into
//! pixels. The wgpu implementation is [`WgpuRenderer`].

mod wgpu_renderer;

pub use wgpu_renderer::WgpuRenderer;

use glam::{Mat3, Mat4, Vec3, Vec4};
use thiserror::Error;

use crate::assets::MeshHandle;

/// Renderer error type
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    SurfaceCreationFailed(String),
    #[error("No suitable GPU adapter found")]
    NoAdapter,
    #[error("Failed to create device: {0}")]
    DeviceCreationFailed(String),
    #[error("Failed to create pipeline: {0}")]
    PipelineCreationFailed(String),
    #[error("Mesh library is empty")]
    NoVertices,
    #[error("Out of memory")]
    OutOfMemory,
}

pub type RenderResult<T> = Result<T, RenderError>;

/// One object to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// Object to world
    pub world: Mat4,
    /// Inverse-transpose of the upper 3x3 of `view * world`
    pub normal_matrix: Mat3,
    pub mesh: MeshHandle,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub view_projection: Mat4,
    /// Unit direction towards the light, in camera space
    pub to_light: Vec3,
    pub clear_color: Vec4,
    pub draws: Vec<DrawItem>,
}

impl Frame {
    pub fn light_direction() -> Vec3 {
        Vec3::new(0.0, 1.0, 10.0).normalize()
    }

    pub fn clear_grey() -> Vec4 {
        Vec4::new(0.5, 0.5, 0.5, 1.0)
    }
}

/// Something that can draw frames.
pub trait Renderer {
    /// Framebuffer size changed.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw and present one frame. Transient surface problems are handled
    /// internally by skipping the frame.
    fn render(&mut self, frame: &Frame) -> RenderResult<()>;
}
