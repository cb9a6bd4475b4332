/// Scene - the editor's placed objects, alias table and background color.
///
/// Objects are owned by value in a map keyed by their id. Importing a model goes
/// through the `AssetImporter` and the shared `ResourceManager`, so two objects
/// placed from the same file share the same cached GPU entries.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::asset::AssetImporter;
use crate::error::{Error, Result};
use crate::resource::{MeshInstance, ResourceManager};
use super::config::{SceneConfig, SceneFormat};
use super::draw::{DrawItem, SceneRenderer};
use super::path_alias::{resolve_alias, to_absolute};
use super::scene_file::{ObjectRecord, SceneFile};
use super::scene_object::SceneObject;

pub struct Scene {
    config: SceneConfig,
    resources: Arc<Mutex<ResourceManager>>,
    importer: Arc<dyn AssetImporter>,
    objects: FxHashMap<String, SceneObject>,
    path_aliases: Vec<(String, String)>,
    bg_color: Vec3,
}

impl Scene {
    /// Create an empty scene with the default configuration
    pub fn new(resources: Arc<Mutex<ResourceManager>>, importer: Arc<dyn AssetImporter>) -> Self {
        Self::with_config(resources, importer, SceneConfig::default())
    }

    /// Create an empty scene; the built-in aliases are registered in order
    pub fn with_config(
        resources: Arc<Mutex<ResourceManager>>,
        importer: Arc<dyn AssetImporter>,
        config: SceneConfig,
    ) -> Self {
        Self {
            path_aliases: config.builtin_aliases.clone(),
            bg_color: config.background_color,
            config,
            resources,
            importer,
            objects: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Resource cache shared with other scenes
    pub fn resources(&self) -> &Arc<Mutex<ResourceManager>> {
        &self.resources
    }

    // ===== OBJECTS =====

    /// Import `model_path` and place it as a new object with the identity pose
    ///
    /// # Errors
    ///
    /// - `DuplicateObject` if `id` is taken (the existing object is not touched)
    /// - `MalformedPath` / `UnresolvedAlias` if the path cannot be resolved
    /// - `AssetImport` or a GPU error if the model cannot be loaded
    pub fn add_object(&mut self, id: &str, model_path: &str) -> Result<()> {
        if self.objects.contains_key(id) {
            crate::engine_warn!("iso::Scene", "Object '{}' already exists", id);
            return Err(Error::DuplicateObject(id.to_string()));
        }

        let resolved = self.resolve_model_path(model_path).inspect_err(|error| {
            crate::engine_warn!("iso::Scene", "Cannot place '{}': {}", id, error);
        })?;
        let instances = self.import_model(&resolved)?;

        let mut object = SceneObject::new(id, model_path);
        object.instances = instances;
        self.objects.insert(id.to_string(), object);

        crate::engine_debug!("iso::Scene", "Object '{}' added from '{}'", id, resolved.display());
        Ok(())
    }

    /// Remove an object
    ///
    /// Cached meshes stay in the `ResourceManager` and a physics body created for the
    /// object is left alone; `EditorSession::remove_object` removes both.
    pub fn remove_object(&mut self, id: &str) -> bool {
        self.objects.remove(id).is_some()
    }

    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn object_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// All objects, in no particular order
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn contains_object(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    // ===== TRANSFORM SETTERS (no-op on unknown id) =====

    pub fn set_object_position(&mut self, id: &str, position: Vec3) {
        if let Some(object) = self.objects.get_mut(id) {
            object.position = position;
        }
    }

    pub fn set_object_rotation(&mut self, id: &str, rotation: Vec3) {
        if let Some(object) = self.objects.get_mut(id) {
            object.rotation = rotation;
        }
    }

    pub fn set_object_scale(&mut self, id: &str, scale: Vec3) {
        if let Some(object) = self.objects.get_mut(id) {
            object.scale = scale;
        }
    }

    pub fn move_object(&mut self, id: &str, offset: Vec3) {
        if let Some(object) = self.objects.get_mut(id) {
            object.position += offset;
        }
    }

    pub fn rotate_object(&mut self, id: &str, delta: Vec3) {
        if let Some(object) = self.objects.get_mut(id) {
            object.rotation += delta;
        }
    }

    /// Component-wise multiply the scale
    pub fn scale_object(&mut self, id: &str, factor: Vec3) {
        if let Some(object) = self.objects.get_mut(id) {
            object.scale *= factor;
        }
    }

    // ===== PHYSICS PROPERTIES =====

    pub fn set_object_physics_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(object) = self.objects.get_mut(id) {
            object.physics.is_affected_by_physics = enabled;
        }
    }

    pub fn set_object_collision_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(object) = self.objects.get_mut(id) {
            object.physics.has_collision = enabled;
        }
    }

    pub fn set_object_static(&mut self, id: &str, is_static: bool) {
        if let Some(object) = self.objects.get_mut(id) {
            object.physics.is_static = is_static;
        }
    }

    pub fn set_object_mass(&mut self, id: &str, mass: f32) {
        if let Some(object) = self.objects.get_mut(id) {
            object.physics.mass = mass;
        }
    }

    pub fn set_object_collision_shape(&mut self, id: &str, shape_size: Vec3) {
        if let Some(object) = self.objects.get_mut(id) {
            object.physics.collision_shape_size = shape_size;
        }
    }

    pub fn object_physics_enabled(&self, id: &str) -> bool {
        self.objects.get(id).is_some_and(|o| o.physics.is_affected_by_physics)
    }

    pub fn object_collision_enabled(&self, id: &str) -> bool {
        self.objects.get(id).is_some_and(|o| o.physics.has_collision)
    }

    pub fn object_static(&self, id: &str) -> bool {
        self.objects.get(id).is_some_and(|o| o.physics.is_static)
    }

    /// Mass, 1.0 for an unknown id
    pub fn object_mass(&self, id: &str) -> f32 {
        self.objects.get(id).map_or(1.0, |o| o.physics.mass)
    }

    /// Collision half extents, (1, 1, 1) for an unknown id
    pub fn object_collision_shape(&self, id: &str) -> Vec3 {
        self.objects.get(id).map_or(Vec3::ONE, |o| o.physics.collision_shape_size)
    }

    // ===== BACKGROUND =====

    /// Set the background from 0..=255 components
    pub fn set_bg_color(&mut self, r: u8, g: u8, b: u8) {
        self.bg_color = Vec3::new(r as f32, g as f32, b as f32) / 255.0;
    }

    /// Normalized RGB background color
    pub fn bg_color(&self) -> Vec3 {
        self.bg_color
    }

    // ===== PATH ALIASES =====

    /// Append an alias; an existing key keeps precedence
    pub fn add_path_alias(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.path_aliases.push((key.into(), value.into()));
    }

    pub fn path_aliases(&self) -> &[(String, String)] {
        &self.path_aliases
    }

    /// Absolute import path of a model path (alias substituted, relative paths
    /// anchored at the configured base directory)
    pub fn resolve_model_path(&self, model_path: &str) -> Result<PathBuf> {
        let local = resolve_alias(model_path, &self.path_aliases)?;
        to_absolute(&local, &self.config.base_directory)
    }

    fn import_model(&self, path: &Path) -> Result<Vec<MeshInstance>> {
        let asset = self.importer.import(path).inspect_err(|error| {
            crate::engine_warn!("iso::AssetImport", "Failed to import '{}': {}", path.display(), error);
        })?;
        self.lock_resources()?.upload_asset(&path.to_string_lossy(), &asset)
    }

    fn lock_resources(&self) -> Result<MutexGuard<'_, ResourceManager>> {
        self.resources.lock()
            .map_err(|_| Error::BackendError("ResourceManager lock poisoned".to_string()))
    }

    // ===== RENDERING =====

    /// Draw calls for the current frame
    ///
    /// Instances whose cached mesh is gone, not uploaded, or has no indices are skipped.
    pub fn draw_items(&self) -> Result<Vec<DrawItem>> {
        let resources = self.lock_resources()?;
        let mut items = Vec::new();

        for object in self.objects.values() {
            let transform = object.transform();
            for instance in &object.instances {
                let Some(mesh) = resources.mesh(instance.mesh) else {
                    continue;
                };
                if !mesh.is_uploaded() || mesh.index_count == 0 {
                    continue;
                }
                items.push(DrawItem {
                    mesh: instance.mesh,
                    index_count: mesh.index_count,
                    texture: mesh.texture,
                    model_matrix: transform * instance.local_transform,
                });
            }
        }

        Ok(items)
    }

    /// Clear to the background color, then submit every draw item
    pub fn render(&self, renderer: &mut dyn SceneRenderer) -> Result<()> {
        renderer.clear(self.bg_color)?;
        for item in self.draw_items()? {
            renderer.draw(&item)?;
        }
        Ok(())
    }

    // ===== PERSISTENCE =====

    /// Save with the configured format
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_to_file_as(path, self.config.save_format)
    }

    /// Save the aliases, background and object placements
    ///
    /// Parent directories are created. Objects are written sorted by id. The file
    /// is only opened once the whole scene has been encoded.
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if an alias or object exceeds the format bounds; an
    ///   existing file at `path` is left as it was
    /// - `Io` if the directories or the file cannot be created or written
    pub fn save_to_file_as(&self, path: impl AsRef<Path>, format: SceneFormat) -> Result<()> {
        let path = absolute_path(path.as_ref())?;

        let mut objects: Vec<&SceneObject> = self.objects.values().collect();
        objects.sort_by(|a, b| a.id().cmp(b.id()));
        let file = SceneFile {
            format,
            bg_color: self.bg_color,
            aliases: self.path_aliases.clone(),
            objects: objects.into_iter()
                .map(|object| ObjectRecord {
                    id: object.id().to_string(),
                    model_path: object.model_path.clone(),
                    position: object.position,
                    rotation: object.rotation,
                    scale: object.scale,
                    physics: object.physics,
                })
                .collect(),
        };

        let write = || -> Result<()> {
            let mut bytes = Vec::new();
            file.write_to(&mut bytes)?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut writer = BufWriter::new(File::create(&path)?);
            writer.write_all(&bytes)?;
            writer.flush()?;
            Ok(())
        };
        write().inspect_err(|error| {
            crate::engine_error!("iso::SceneFile", "Failed to save scene to '{}': {}", path.display(), error);
        })?;

        crate::engine_info!("iso::SceneFile", "Scene saved to: {}", path.display());
        Ok(())
    }

    /// Replace the scene with the contents of a scene file
    ///
    /// The file is decoded completely before the scene is modified. On success the
    /// aliases and background come from the file and every object is re-imported;
    /// objects whose model cannot be loaded are skipped with a warning.
    ///
    /// # Errors
    ///
    /// - `Io` if the file is missing or cannot be opened or read; the scene is untouched
    /// - `CorruptSceneFile` if the file is rejected; objects and aliases are cleared,
    ///   the background color is kept
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = absolute_path(path.as_ref())?;

        let file = File::open(&path).map_err(|error| {
            crate::engine_error!("iso::SceneFile", "Failed to open '{}': {}", path.display(), error);
            Error::Io(format!("{}: {}", path.display(), error))
        })?;

        let decoded = match SceneFile::read_from(&mut BufReader::new(file)) {
            Ok(decoded) => decoded,
            Err(error @ Error::CorruptSceneFile(_)) => {
                self.objects.clear();
                self.path_aliases.clear();
                crate::engine_error!("iso::SceneFile", "Rejected scene file '{}': {}", path.display(), error);
                return Err(error);
            }
            Err(error) => {
                crate::engine_error!("iso::SceneFile", "Failed to read '{}': {}", path.display(), error);
                return Err(error);
            }
        };

        self.apply(decoded);
        crate::engine_info!("iso::SceneFile", "Scene loaded from: {} ({} objects)", path.display(), self.objects.len());
        Ok(())
    }

    fn apply(&mut self, file: SceneFile) {
        self.objects.clear();
        self.path_aliases = file.aliases;
        self.bg_color = file.bg_color;

        for record in file.objects {
            // A stale alias falls back to the literal path
            let local = resolve_alias(&record.model_path, &self.path_aliases)
                .unwrap_or_else(|_| record.model_path.clone());
            let instances = to_absolute(&local, &self.config.base_directory)
                .and_then(|resolved| self.import_model(&resolved));

            match instances {
                Ok(instances) => {
                    let mut object = SceneObject::new(record.id, record.model_path);
                    object.position = record.position;
                    object.rotation = record.rotation;
                    object.scale = record.scale;
                    object.physics = record.physics;
                    object.instances = instances;
                    self.objects.insert(object.id().to_string(), object);
                }
                Err(error) => {
                    crate::engine_warn!("iso::SceneFile",
                        "Failed to load model for object '{}' at '{}': {}", record.id, local, error);
                }
            }
        }
    }
}

/// `path` made absolute against the current directory
fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
