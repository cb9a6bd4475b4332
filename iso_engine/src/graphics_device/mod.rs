/// Graphics device module - the GPU upload contract consumed by the resource cache

pub mod graphics_device;
pub mod buffer;
pub mod texture;

pub use graphics_device::*;
pub use buffer::*;
pub use texture::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
