//! Scene module
//!
//! The editor's scene graph: placed objects, the model-path alias table, the
//! background color, the draw list handed to the renderer and the binary scene file.

mod config;
mod scene_object;
mod path_alias;
mod draw;
mod scene_file;
mod scene;

pub use config::{SceneConfig, SceneFormat, default_base_directory};
pub use scene_object::{SceneObject, PhysicsProperties};
pub use path_alias::{resolve_alias, to_absolute, normalize_path};
pub use draw::{DrawItem, SceneRenderer};
pub use scene_file::{
    SceneFile, ObjectRecord,
    MAX_ALIAS_COUNT, MAX_ALIAS_KEY_LEN, MAX_ALIAS_VALUE_LEN,
    MAX_OBJECT_COUNT, MAX_OBJECT_ID_LEN, MAX_MODEL_PATH_LEN,
};
pub use scene::Scene;
