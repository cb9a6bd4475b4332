/// Imported asset tree and the importer trait.
///
/// Mirrors the subset of a GLTF document the editor consumes: nodes carrying a mesh
/// reference and a local transform, meshes made of primitives, and the images
/// referenced by base-color textures.

use std::path::Path;
use glam::{Mat4, Quat, Vec3};
use crate::error::Result;

/// Loads a model file into an `ImportedAsset`
pub trait AssetImporter: Send + Sync {
    /// Import the model at an absolute path
    ///
    /// # Errors
    ///
    /// Returns `Error::AssetImport` (or `Error::Io`) when the file cannot be read or parsed.
    fn import(&self, path: &Path) -> Result<ImportedAsset>;
}

/// A parsed model file
#[derive(Debug, Clone, Default)]
pub struct ImportedAsset {
    /// Nodes in document order; the index of a node is part of its mesh cache keys
    pub nodes: Vec<ImportedNode>,
    pub meshes: Vec<ImportedMesh>,
    /// Images indexed by texture index
    pub textures: Vec<ImportedImage>,
}

/// One node of the document hierarchy
#[derive(Debug, Clone)]
pub struct ImportedNode {
    /// Index into `ImportedAsset::meshes`, `None` for transform-only nodes
    pub mesh: Option<usize>,
    pub transform: NodeTransform,
}

/// Local transform of a node, as stored in the file
#[derive(Debug, Clone, PartialEq)]
pub enum NodeTransform {
    /// Explicit column-major 4x4 matrix
    Matrix([f32; 16]),
    /// Translation / rotation (x, y, z, w) / scale, each optional
    Trs {
        translation: Option<[f32; 3]>,
        rotation: Option<[f32; 4]>,
        scale: Option<[f32; 3]>,
    },
}

impl NodeTransform {
    /// Identity TRS (all components absent)
    pub fn identity() -> Self {
        NodeTransform::Trs { translation: None, rotation: None, scale: None }
    }

    /// Node-local matrix: the explicit matrix, or translate * rotate * scale with
    /// identity defaults for absent components
    pub fn to_matrix(&self) -> Mat4 {
        match self {
            NodeTransform::Matrix(columns) => Mat4::from_cols_array(columns),
            NodeTransform::Trs { translation, rotation, scale } => {
                let translation = translation.map(Vec3::from_array).unwrap_or(Vec3::ZERO);
                let rotation = rotation.map(Quat::from_array).unwrap_or(Quat::IDENTITY);
                let scale = scale.map(Vec3::from_array).unwrap_or(Vec3::ONE);
                Mat4::from_translation(translation)
                    * Mat4::from_quat(rotation)
                    * Mat4::from_scale(scale)
            }
        }
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A mesh: a list of independently drawable primitives
#[derive(Debug, Clone, Default)]
pub struct ImportedMesh {
    pub primitives: Vec<ImportedPrimitive>,
}

/// Index buffer in its stored component type
#[derive(Debug, Clone, PartialEq)]
pub enum IndexData {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexData {
    pub fn len(&self) -> usize {
        match self {
            IndexData::U16(indices) => indices.len(),
            IndexData::U32(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen to 32-bit indices
    pub fn to_u32(&self) -> Vec<u32> {
        match self {
            IndexData::U16(indices) => indices.iter().map(|&i| i as u32).collect(),
            IndexData::U32(indices) => indices.clone(),
        }
    }
}

/// Raw attribute buffers of one primitive
#[derive(Debug, Clone, Default)]
pub struct ImportedPrimitive {
    /// POSITION; a primitive without positions cannot be uploaded
    pub positions: Option<Vec<[f32; 3]>>,
    /// NORMAL
    pub normals: Option<Vec<[f32; 3]>>,
    /// TEXCOORD_0
    pub uvs: Option<Vec<[f32; 2]>>,
    pub indices: Option<IndexData>,
    /// Texture index of the material's base-color texture
    pub base_color_texture: Option<usize>,
}

/// Decoded image data
#[derive(Debug, Clone)]
pub struct ImportedImage {
    pub width: u32,
    pub height: u32,
    /// Channels per texel (1, 3 or 4)
    pub components: u32,
    pub pixels: Vec<u8>,
}
