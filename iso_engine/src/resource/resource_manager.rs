/// Central resource cache for the editor.
///
/// Maps an asset cache key to a GPU mesh or texture. Entries are stored in slot maps
/// and referenced from scene objects through stable, non-owning handles; the manager
/// is their only owner. There is no reference counting and no eviction: an entry
/// lives until `clear()`, even after the last object referencing it is removed.

use std::sync::{Arc, Mutex};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::asset::{ImportedAsset, ImportedImage, ImportedPrimitive};
use crate::error::{Error, Result};
use crate::graphics_device::{
    self, Buffer, BufferDesc, BufferUsage, GraphicsDevice, Texture, TextureFormat, WrapMode,
};

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Stable key of a cached mesh primitive
    pub struct MeshHandle;

    /// Stable key of a cached texture
    pub struct TextureHandle;
}

/// Cache key of one mesh primitive: `"{path}_mesh_{node}_{primitive}"`
pub fn mesh_cache_key(path: &str, node_index: usize, primitive_index: usize) -> String {
    format!("{}_mesh_{}_{}", path, node_index, primitive_index)
}

/// Cache key of one texture: `"{path}_texture_{texture}"`
pub fn texture_cache_key(path: &str, texture_index: usize) -> String {
    format!("{}_texture_{}", path, texture_index)
}

fn element_count(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::InvalidResource(format!(
        "{} count {} does not fit a u32 draw range", what, len
    )))
}

// ===== VERTEX =====

/// Interleaved vertex as uploaded to the GPU (32 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

// ===== CACHE ENTRIES =====

/// A cached mesh primitive
///
/// Starts as an empty placeholder; the GPU buffers are filled by the first import
/// that sees its key.
#[derive(Default)]
pub struct CachedMesh {
    pub vertex_buffer: Option<Arc<dyn Buffer>>,
    /// `None` for non-indexed primitives
    pub index_buffer: Option<Arc<dyn Buffer>>,
    pub vertex_count: u32,
    pub index_count: u32,
    pub texture: Option<TextureHandle>,
}

impl CachedMesh {
    /// True once the vertex data is on the GPU
    pub fn is_uploaded(&self) -> bool {
        self.vertex_buffer.is_some()
    }
}

/// A cached texture
pub struct CachedTexture {
    texture: Arc<dyn Texture>,
}

impl CachedTexture {
    pub fn texture(&self) -> &Arc<dyn Texture> {
        &self.texture
    }
}

/// One drawable piece of a scene object: the primitive's node-local transform
/// and a reference into the cache
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInstance {
    pub local_transform: Mat4,
    pub mesh: MeshHandle,
}

// ===== RESOURCE MANAGER =====

pub struct ResourceManager {
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    meshes: SlotMap<MeshHandle, CachedMesh>,
    mesh_keys: FxHashMap<String, MeshHandle>,
    textures: SlotMap<TextureHandle, CachedTexture>,
    texture_keys: FxHashMap<String, TextureHandle>,
}

impl ResourceManager {
    /// Create an empty cache uploading through `graphics_device`
    pub fn new(graphics_device: Arc<Mutex<dyn GraphicsDevice>>) -> Self {
        Self {
            graphics_device,
            meshes: SlotMap::with_key(),
            mesh_keys: FxHashMap::default(),
            textures: SlotMap::with_key(),
            texture_keys: FxHashMap::default(),
        }
    }

    // ===== MESHES =====

    /// Handle of the mesh cached under `key`, inserting an empty placeholder on first sight
    pub fn get_or_create_mesh(&mut self, key: &str) -> MeshHandle {
        if let Some(&handle) = self.mesh_keys.get(key) {
            return handle;
        }
        let handle = self.meshes.insert(CachedMesh::default());
        self.mesh_keys.insert(key.to_string(), handle);
        handle
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&CachedMesh> {
        self.meshes.get(handle)
    }

    pub fn mesh_mut(&mut self, handle: MeshHandle) -> Option<&mut CachedMesh> {
        self.meshes.get_mut(handle)
    }

    /// Handle of the mesh cached under `key`, if any
    pub fn mesh_handle(&self, key: &str) -> Option<MeshHandle> {
        self.mesh_keys.get(key).copied()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    // ===== TEXTURES =====

    /// Register `texture` under `key`
    ///
    /// If the key is already cached, `texture` is dropped (releasing the GPU copy)
    /// and the handle of the texture stored first is returned.
    pub fn get_or_create_texture(&mut self, key: &str, texture: Arc<dyn Texture>) -> TextureHandle {
        if let Some(&handle) = self.texture_keys.get(key) {
            crate::engine_debug!("iso::ResourceManager", "Texture '{}' already cached, discarding duplicate upload", key);
            return handle;
        }
        let handle = self.textures.insert(CachedTexture { texture });
        self.texture_keys.insert(key.to_string(), handle);
        handle
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&CachedTexture> {
        self.textures.get(handle)
    }

    /// Handle of the texture cached under `key`, if any
    pub fn texture_handle(&self, key: &str) -> Option<TextureHandle> {
        self.texture_keys.get(key).copied()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    // ===== ASSET UPLOAD =====

    /// Turn an imported asset into mesh instances, uploading each primitive once
    ///
    /// Every node with a mesh contributes one instance per primitive. Primitives whose
    /// cache entry is already populated are reused without touching the GPU. A
    /// primitive without positions is skipped and its placeholder stays un-uploaded.
    ///
    /// # Arguments
    ///
    /// * `path` - Absolute source path, the prefix of every cache key
    /// * `asset` - Imported node/mesh/primitive tree
    ///
    /// # Errors
    ///
    /// Returns an error if the asset references a mesh or texture it does not contain,
    /// or if a GPU upload fails.
    pub fn upload_asset(&mut self, path: &str, asset: &ImportedAsset) -> Result<Vec<MeshInstance>> {
        let mut instances = Vec::new();

        for (node_index, node) in asset.nodes.iter().enumerate() {
            let Some(mesh_index) = node.mesh else {
                continue;
            };
            let mesh = asset.meshes.get(mesh_index).ok_or_else(|| Error::AssetImport(format!(
                "node {} of '{}' references missing mesh {}", node_index, path, mesh_index
            )))?;
            let local_transform = node.transform.to_matrix();

            for (primitive_index, primitive) in mesh.primitives.iter().enumerate() {
                let key = mesh_cache_key(path, node_index, primitive_index);
                let handle = self.get_or_create_mesh(&key);

                let uploaded = self.meshes.get(handle).is_some_and(CachedMesh::is_uploaded);
                if !uploaded && !self.upload_primitive(path, asset, primitive, handle)? {
                    crate::engine_warn!("iso::ResourceManager", "Primitive '{}' has no positions, skipped", key);
                    continue;
                }

                instances.push(MeshInstance { local_transform, mesh: handle });
            }
        }

        Ok(instances)
    }

    /// Upload one primitive into the placeholder `handle`
    ///
    /// Returns `Ok(false)` when the primitive has no positions.
    fn upload_primitive(
        &mut self,
        path: &str,
        asset: &ImportedAsset,
        primitive: &ImportedPrimitive,
        handle: MeshHandle,
    ) -> Result<bool> {
        let Some(positions) = primitive.positions.as_ref() else {
            return Ok(false);
        };

        let vertices: Vec<Vertex> = positions.iter().enumerate()
            .map(|(i, &position)| Vertex {
                position,
                normal: primitive.normals.as_ref()
                    .and_then(|normals| normals.get(i).copied())
                    .unwrap_or([0.0, 1.0, 0.0]),
                uv: primitive.uvs.as_ref()
                    .and_then(|uvs| uvs.get(i).copied())
                    .unwrap_or([0.0, 0.0]),
            })
            .collect();
        let indices = primitive.indices.as_ref().map(|i| i.to_u32()).unwrap_or_default();
        let vertex_count = element_count(vertices.len(), "vertex")?;
        let index_count = element_count(indices.len(), "index")?;

        let vertex_buffer = self.create_buffer(BufferUsage::Vertex, bytemuck::cast_slice(&vertices))?;
        let index_buffer = if indices.is_empty() {
            None
        } else {
            Some(self.create_buffer(BufferUsage::Index, bytemuck::cast_slice(&indices))?)
        };

        let texture = match primitive.base_color_texture {
            Some(texture_index) => {
                let image = asset.textures.get(texture_index).ok_or_else(|| Error::AssetImport(format!(
                    "'{}' references missing texture {}", path, texture_index
                )))?;
                let uploaded = self.create_texture(image)?;
                Some(self.get_or_create_texture(&texture_cache_key(path, texture_index), uploaded))
            }
            None => None,
        };

        let mesh = self.meshes.get_mut(handle)
            .ok_or_else(|| Error::InvalidResource(format!("mesh handle {:?} not in cache", handle)))?;
        mesh.vertex_buffer = Some(vertex_buffer);
        mesh.index_buffer = index_buffer;
        mesh.vertex_count = vertex_count;
        mesh.index_count = index_count;
        mesh.texture = texture;

        Ok(true)
    }

    fn create_buffer(&self, usage: BufferUsage, data: &[u8]) -> Result<Arc<dyn Buffer>> {
        let buffer = {
            let mut device = self.graphics_device.lock()
                .map_err(|_| Error::BackendError("GraphicsDevice lock poisoned".to_string()))?;
            device.create_buffer(BufferDesc { size: data.len() as u64, usage })?
        };
        buffer.update(0, data)?;
        Ok(buffer)
    }

    fn create_texture(&self, image: &ImportedImage) -> Result<Arc<dyn Texture>> {
        let mut device = self.graphics_device.lock()
            .map_err(|_| Error::BackendError("GraphicsDevice lock poisoned".to_string()))?;
        device.create_texture(graphics_device::TextureDesc {
            width: image.width,
            height: image.height,
            format: TextureFormat::from_components(image.components),
            wrap: WrapMode::Repeat,
            generate_mipmaps: true,
            data: image.pixels.clone(),
        })
    }

    // ===== TEARDOWN =====

    /// Free every cached mesh and texture
    ///
    /// Handles held by scene objects become dangling (lookups return `None`), so this
    /// is meant for full teardown only.
    pub fn clear(&mut self) {
        let mesh_count = self.meshes.len();
        let texture_count = self.textures.len();

        self.meshes.clear();
        self.mesh_keys.clear();
        self.textures.clear();
        self.texture_keys.clear();

        crate::engine_info!("iso::ResourceManager",
            "Cache cleared ({} meshes, {} textures freed)", mesh_count, texture_count);
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
