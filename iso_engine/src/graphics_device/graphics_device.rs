/// GraphicsDevice trait - GPU resource factory

use std::sync::Arc;
use crate::error::Result;
use super::{Buffer, BufferDesc, Texture, TextureDesc};

/// GPU resource factory used by the resource cache
///
/// Implemented by the editor's graphics backend. Uploads are blocking and happen on
/// the thread driving the editor loop.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer of `desc.size` bytes
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a texture and upload `desc.data`
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;
}
