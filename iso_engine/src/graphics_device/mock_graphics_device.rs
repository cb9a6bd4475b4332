/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every buffer and texture it creates so tests can assert on the number of
/// uploads the resource cache performs.

use std::sync::{Arc, Mutex};
use crate::error::{Error, Result};
use super::{
    Buffer, BufferDesc, BufferUsage, GraphicsDevice,
    Texture, TextureDesc, TextureInfo,
};

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub contents: Mutex<Vec<u8>>,
}

impl MockBuffer {
    pub fn new(desc: &BufferDesc) -> Self {
        Self {
            size: desc.size,
            usage: desc.usage,
            contents: Mutex::new(vec![0u8; desc.size as usize]),
        }
    }
}

impl Buffer for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let end = offset as usize + data.len();
        if end as u64 > self.size {
            return Err(Error::InvalidResource(format!(
                "write of {} bytes at {} overflows buffer of {} bytes",
                data.len(), offset, self.size
            )));
        }
        let mut contents = self.contents.lock().unwrap();
        contents[offset as usize..end].copy_from_slice(data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Default)]
pub struct MockGraphicsDevice {
    pub buffers_created: usize,
    pub textures_created: usize,
    /// Every buffer ever created, in creation order
    pub buffers: Vec<Arc<MockBuffer>>,
    /// Weak views on created textures, to observe when the cache drops them
    pub textures: Vec<std::sync::Weak<MockTexture>>,
    /// When set, the next buffer creation fails
    pub fail_next_buffer: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock device already wrapped the way the resource cache expects it,
    /// plus a concrete handle for assertions
    pub fn shared() -> (Arc<Mutex<MockGraphicsDevice>>, Arc<Mutex<dyn GraphicsDevice>>) {
        let device = Arc::new(Mutex::new(MockGraphicsDevice::new()));
        let as_dyn: Arc<Mutex<dyn GraphicsDevice>> = device.clone();
        (device, as_dyn)
    }

    /// Number of created textures still referenced somewhere
    pub fn live_texture_count(&self) -> usize {
        self.textures.iter().filter(|t| t.strong_count() > 0).count()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if self.fail_next_buffer {
            self.fail_next_buffer = false;
            return Err(Error::OutOfMemory);
        }
        let buffer = Arc::new(MockBuffer::new(&desc));
        self.buffers_created += 1;
        self.buffers.push(buffer.clone());
        Ok(buffer)
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        let expected = (desc.width * desc.height * desc.format.bytes_per_texel()) as usize;
        if desc.data.len() != expected {
            return Err(Error::InvalidResource(format!(
                "texture data is {} bytes, expected {}", desc.data.len(), expected
            )));
        }
        let mip_levels = if desc.generate_mipmaps {
            32 - desc.width.max(desc.height).max(1).leading_zeros()
        } else {
            1
        };
        let texture = Arc::new(MockTexture {
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
                mip_levels,
            },
        });
        self.textures_created += 1;
        self.textures.push(Arc::downgrade(&texture));
        Ok(texture)
    }
}
