/// PhysicsWorld trait - the rigid-body engine consumed by `PhysicsSystem`
///
/// Implemented by backend crates (rapier, ...). Bodies and colliders are addressed
/// through slot-map keys handed out by the backend.

use glam::{EulerRot, Quat, Vec3};
use slotmap::new_key_type;
use crate::error::Result;

new_key_type! {
    /// Stable key of a rigid body inside a `PhysicsWorld`
    pub struct BodyHandle;

    /// Stable key of a collider inside a `PhysicsWorld`
    pub struct ColliderHandle;
}

/// World-space pose of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl BodyPose {
    /// Pose from Euler angles applied X then Y then Z (the `SceneObject` convention)
    pub fn from_euler(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z),
        }
    }

    /// Orientation as X, Y, Z Euler angles, from the normalized quaternion
    pub fn euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.normalize().to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }
}

/// Dynamics type of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Infinite mass, moved only by explicit pose updates
    Static,
    /// Integrated by the solver
    Dynamic,
}

/// Rigid-body engine
pub trait PhysicsWorld: Send {
    fn set_gravity(&mut self, gravity: Vec3);

    /// Create a body at `pose`; `mass` is used once a collider is attached
    fn create_body(&mut self, pose: BodyPose, body_type: BodyType, mass: f32) -> Result<BodyHandle>;

    /// Destroy a body and its colliders; false if the handle is unknown
    fn destroy_body(&mut self, body: BodyHandle) -> bool;

    /// Attach a box collider with the given half extents
    fn attach_box_collider(&mut self, body: BodyHandle, half_extents: Vec3) -> Result<ColliderHandle>;

    fn set_body_type(&mut self, body: BodyHandle, body_type: BodyType) -> Result<()>;

    fn body_type(&self, body: BodyHandle) -> Option<BodyType>;

    fn set_mass(&mut self, body: BodyHandle, mass: f32) -> Result<()>;

    /// Teleport a body
    fn set_pose(&mut self, body: BodyHandle, pose: BodyPose) -> Result<()>;

    fn pose(&self, body: BodyHandle) -> Option<BodyPose>;

    /// Advance the simulation by exactly `dt` seconds
    fn step(&mut self, dt: f32);

    /// Number of live bodies
    fn body_count(&self) -> usize;
}
