//! Resource management module
//!
//! De-duplicating cache of GPU meshes and textures, keyed by strings derived from
//! the source asset path and the sub-asset index.

mod resource_manager;

pub use resource_manager::{
    ResourceManager, MeshHandle, TextureHandle,
    CachedMesh, CachedTexture, MeshInstance, Vertex,
    mesh_cache_key, texture_cache_key,
};
