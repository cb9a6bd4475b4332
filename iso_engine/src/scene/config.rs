/// Scene configuration

use std::path::{Path, PathBuf};
use glam::Vec3;

/// On-disk scene format revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneFormat {
    /// `SCENE001`: placement only
    #[default]
    V1,
    /// `SCENE002`: placement plus per-object physics properties
    V2,
}

impl SceneFormat {
    /// The 8-byte signature opening a file of this format
    pub fn signature(&self) -> &'static [u8; 8] {
        match self {
            SceneFormat::V1 => b"SCENE001",
            SceneFormat::V2 => b"SCENE002",
        }
    }

    pub fn from_signature(signature: &[u8; 8]) -> Option<Self> {
        match signature {
            b"SCENE001" => Some(SceneFormat::V1),
            b"SCENE002" => Some(SceneFormat::V2),
            _ => None,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Directory relative model paths are anchored to
    pub base_directory: PathBuf,
    /// Aliases registered at construction, in lookup order
    pub builtin_aliases: Vec<(String, String)>,
    /// Initial background color (normalized RGB)
    pub background_color: Vec3,
    /// Format used by `Scene::save_to_file`
    pub save_format: SceneFormat,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            base_directory: default_base_directory(),
            builtin_aliases: vec![("assets".to_string(), "../../assets".to_string())],
            background_color: Vec3::splat(30.0 / 255.0),
            save_format: SceneFormat::V1,
        }
    }
}

/// Directory of the running executable, or the current directory if it is unknown
pub fn default_base_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
}
