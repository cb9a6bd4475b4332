//! Asset import contract
//!
//! The importer (a GLTF reader in the editor) is an external collaborator: given an
//! absolute path it hands back a node/mesh/primitive tree with raw attribute, index
//! and image buffers. The resource cache turns that tree into GPU resources.

mod imported_asset;

pub use imported_asset::{
    AssetImporter, ImportedAsset, ImportedNode, ImportedMesh, ImportedPrimitive,
    ImportedImage, NodeTransform, IndexData,
};

// Mock importer for tests (serves assets from memory)
#[cfg(test)]
pub mod mock_asset_importer;
