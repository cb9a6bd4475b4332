/// Mock AssetImporter for unit tests
///
/// Serves registered in-memory assets by absolute path and counts import calls.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use super::{
    AssetImporter, ImportedAsset, ImportedImage, ImportedMesh, ImportedNode,
    ImportedPrimitive, IndexData, NodeTransform,
};

#[derive(Default)]
pub struct MockAssetImporter {
    assets: FxHashMap<PathBuf, ImportedAsset>,
    imported: Mutex<Vec<PathBuf>>,
}

impl MockAssetImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset under `path`
    pub fn with_asset(mut self, path: impl Into<PathBuf>, asset: ImportedAsset) -> Self {
        self.assets.insert(path.into(), asset);
        self
    }

    /// Paths passed to `import`, in call order
    pub fn imported_paths(&self) -> Vec<PathBuf> {
        self.imported.lock().unwrap().clone()
    }
}

impl AssetImporter for MockAssetImporter {
    fn import(&self, path: &Path) -> Result<ImportedAsset> {
        self.imported.lock().unwrap().push(path.to_path_buf());
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| Error::AssetImport(format!("no such asset: {}", path.display())))
    }
}

// ============================================================================
// Asset builders
// ============================================================================

/// Triangle primitive with positions and 16-bit indices only
pub fn triangle_primitive() -> ImportedPrimitive {
    ImportedPrimitive {
        positions: Some(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
        normals: None,
        uvs: None,
        indices: Some(IndexData::U16(vec![0, 1, 2])),
        base_color_texture: None,
    }
}

/// One node, one mesh, one triangle primitive
pub fn single_triangle_asset() -> ImportedAsset {
    ImportedAsset {
        nodes: vec![ImportedNode { mesh: Some(0), transform: NodeTransform::identity() }],
        meshes: vec![ImportedMesh { primitives: vec![triangle_primitive()] }],
        textures: vec![],
    }
}

/// 2x2 RGBA image
pub fn checker_image() -> ImportedImage {
    ImportedImage {
        width: 2,
        height: 2,
        components: 4,
        pixels: vec![255u8; 16],
    }
}
