/// Scene object: one placed model instance in the editor scene.

use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::resource::MeshInstance;

/// Physics flags of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsProperties {
    pub has_collision: bool,
    pub is_affected_by_physics: bool,
    pub is_static: bool,
    /// Must be > 0
    pub mass: f32,
    /// Box collider half extents
    pub collision_shape_size: Vec3,
}

impl Default for PhysicsProperties {
    fn default() -> Self {
        Self {
            has_collision: false,
            is_affected_by_physics: false,
            is_static: false,
            mass: 1.0,
            collision_shape_size: Vec3::ONE,
        }
    }
}

/// A placed model
///
/// `instances` reference entries of the `ResourceManager`; the object never owns GPU data.
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: String,
    /// Literal path or `@alias/rest`, stored as given
    pub model_path: String,
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    pub scale: Vec3,
    pub instances: Vec<MeshInstance>,
    pub physics: PhysicsProperties,
}

impl SceneObject {
    /// New object with the identity pose and default physics
    pub fn new(id: impl Into<String>, model_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model_path: model_path.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            instances: Vec::new(),
            physics: PhysicsProperties::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Orientation as a quaternion (intrinsic X, Y, Z)
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// World transform: translate · rotateX · rotateY · rotateZ · scale
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }
}

#[cfg(test)]
#[path = "scene_object_tests.rs"]
mod tests;
