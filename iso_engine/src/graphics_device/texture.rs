/// Texture trait and texture descriptor

/// Texel format of an uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    /// Single channel (grayscale / mask)
    R8_UNORM,
    /// RGB, 3 bytes per texel
    R8G8B8_UNORM,
    /// RGBA, 4 bytes per texel
    R8G8B8A8_UNORM,
}

impl TextureFormat {
    /// Pick the format matching an image's channel count
    ///
    /// 1 channel maps to `R8`, 4 channels to `R8G8B8A8`, anything else is treated as RGB.
    pub fn from_components(components: u32) -> Self {
        match components {
            1 => TextureFormat::R8_UNORM,
            4 => TextureFormat::R8G8B8A8_UNORM,
            _ => TextureFormat::R8G8B8_UNORM,
        }
    }

    /// Bytes per texel
    pub fn bytes_per_texel(&self) -> u32 {
        match self {
            TextureFormat::R8_UNORM => 1,
            TextureFormat::R8G8B8_UNORM => 3,
            TextureFormat::R8G8B8A8_UNORM => 4,
        }
    }
}

/// Texture addressing outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    Repeat,
    ClampToEdge,
}

/// Descriptor for creating a 2D texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub wrap: WrapMode,
    /// Generate the full mip chain after upload
    pub generate_mipmaps: bool,
    /// Tightly packed texel data
    pub data: Vec<u8>,
}

/// Texture information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub mip_levels: u32,
}

/// Texture resource trait
///
/// The GPU texture is destroyed when the last reference is dropped.
pub trait Texture: Send + Sync {
    fn info(&self) -> &TextureInfo;
}
