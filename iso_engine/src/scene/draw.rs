/// Draw list handed to the renderer.

use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::resource::{MeshHandle, TextureHandle};

/// One draw call: a cached mesh, its index count, its texture and the model matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshHandle,
    pub index_count: u32,
    pub texture: Option<TextureHandle>,
    /// Object transform × instance local transform
    pub model_matrix: Mat4,
}

/// Consumer of a scene's draw list
///
/// Implemented by the graphics backend. Handles are resolved through the
/// `ResourceManager` the scene uploads into.
pub trait SceneRenderer {
    /// Clear color and depth; `color` is normalized RGB
    fn clear(&mut self, color: Vec3) -> Result<()>;

    fn draw(&mut self, item: &DrawItem) -> Result<()>;
}
