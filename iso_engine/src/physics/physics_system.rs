/// PhysicsSystem - rigid bodies for collidable scene objects
///
/// Owns the physics world and one `PhysicsBody` per object id. Bodies are created
/// only when the simulation is armed, and stepping is explicit: the caller advances
/// the world by a delta, then pulls the simulated poses back into the scene.
///
/// Synchronization is split by authority: dynamic bodies own their pose
/// (physics → scene), static bodies follow the scene (scene → physics).

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::scene::Scene;
use super::physics_world::{BodyHandle, BodyPose, BodyType, ColliderHandle, PhysicsWorld};

/// Physics configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    pub gravity: Vec3,
    /// Smallest delta a frame may step by, in seconds
    pub min_delta_time: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            min_delta_time: 0.001,
        }
    }
}

/// The body and collider created for one scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub body: BodyHandle,
    pub collider: ColliderHandle,
    /// Collider half extents used at creation
    pub shape_size: Vec3,
}

pub struct PhysicsSystem {
    config: PhysicsConfig,
    world: Option<Box<dyn PhysicsWorld>>,
    bodies: FxHashMap<String, PhysicsBody>,
}

impl PhysicsSystem {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            world: None,
            bodies: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    // ===== LIFECYCLE =====

    /// Take ownership of `world` and apply the configured gravity
    ///
    /// Idempotent: if a world is already installed, `world` is dropped and the
    /// current one kept.
    pub fn initialize(&mut self, mut world: Box<dyn PhysicsWorld>) {
        if self.world.is_some() {
            crate::engine_debug!("iso::PhysicsSystem", "Already initialized, ignoring new world");
            return;
        }
        world.set_gravity(self.config.gravity);
        self.world = Some(world);
        crate::engine_info!("iso::PhysicsSystem", "Physics world initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    /// Destroy every body, then the world
    ///
    /// Safe to call several times; also runs on drop.
    pub fn shutdown(&mut self) {
        let Some(mut world) = self.world.take() else {
            return;
        };
        let count = self.bodies.len();
        for (_, body) in self.bodies.drain() {
            world.destroy_body(body.body);
        }
        drop(world);
        crate::engine_info!("iso::PhysicsSystem", "Physics world shut down ({} bodies released)", count);
    }

    /// Read access to the installed world
    pub fn world(&self) -> Option<&dyn PhysicsWorld> {
        self.world.as_deref()
    }

    fn world_mut(&mut self) -> Result<&mut Box<dyn PhysicsWorld>> {
        self.world.as_mut().ok_or_else(|| Error::InitializationFailed(
            "Physics world not initialized. Call PhysicsSystem::initialize() first.".to_string()
        ))
    }

    // ===== SIMULATION =====

    /// Advance the world by exactly `delta_time` seconds (no sub-stepping)
    pub fn update(&mut self, delta_time: f32) {
        if let Some(world) = self.world.as_mut() {
            world.step(delta_time);
        }
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
        if let Some(world) = self.world.as_mut() {
            world.set_gravity(gravity);
        }
    }

    // ===== BODIES =====

    /// Create the body of `id`, replacing any body it already has
    ///
    /// `rotation` is in Euler angles (X, Y, Z). A static body ignores `mass`.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` if there is no world, or the backend error if the body
    /// or its collider cannot be created. A body whose collider fails is destroyed.
    pub fn create_rigid_body(
        &mut self,
        id: &str,
        position: Vec3,
        rotation: Vec3,
        shape_size: Vec3,
        mass: f32,
        is_static: bool,
    ) -> Result<()> {
        let world = self.world.as_mut().ok_or_else(|| Error::InitializationFailed(
            "Physics world not initialized. Call PhysicsSystem::initialize() first.".to_string()
        ))?;

        if let Some(previous) = self.bodies.remove(id) {
            world.destroy_body(previous.body);
        }

        let body_type = if is_static { BodyType::Static } else { BodyType::Dynamic };
        let body = world.create_body(BodyPose::from_euler(position, rotation), body_type, mass)?;
        let collider = match world.attach_box_collider(body, shape_size) {
            Ok(collider) => collider,
            Err(error) => {
                world.destroy_body(body);
                crate::engine_warn!("iso::PhysicsSystem", "Collider for '{}' failed: {}", id, error);
                return Err(error);
            }
        };

        self.bodies.insert(id.to_string(), PhysicsBody { body, collider, shape_size });
        Ok(())
    }

    /// Destroy the body of `id`; false if it has none
    pub fn remove_rigid_body(&mut self, id: &str) -> bool {
        let Some(removed) = self.bodies.remove(id) else {
            return false;
        };
        if let Some(world) = self.world.as_mut() {
            world.destroy_body(removed.body);
        }
        true
    }

    /// Rebuild the body set from the scene
    ///
    /// Every existing body is destroyed, then one body is created per object with
    /// `has_collision`. Returns the number of bodies created; objects whose body
    /// fails are skipped with a warning.
    pub fn arm(&mut self, scene: &Scene) -> usize {
        self.clear_bodies();

        let mut created = 0;
        for object in scene.objects().filter(|o| o.physics.has_collision) {
            let physics = &object.physics;
            match self.create_rigid_body(
                object.id(),
                object.position,
                object.rotation,
                physics.collision_shape_size,
                physics.mass,
                physics.is_static,
            ) {
                Ok(()) => created += 1,
                Err(error) => {
                    crate::engine_warn!("iso::PhysicsSystem", "No body for '{}': {}", object.id(), error);
                }
            }
        }

        crate::engine_info!("iso::PhysicsSystem", "Simulation armed with {} bodies", created);
        created
    }

    /// Destroy every body, keeping the world
    pub fn clear_bodies(&mut self) {
        let world = self.world.as_mut();
        let bodies = self.bodies.drain();
        if let Some(world) = world {
            for (_, body) in bodies {
                world.destroy_body(body.body);
            }
        }
    }

    pub fn physics_body(&self, id: &str) -> Option<&PhysicsBody> {
        self.bodies.get(id)
    }

    /// Current pose of the body of `id`
    pub fn body_pose(&self, id: &str) -> Option<BodyPose> {
        let body = self.bodies.get(id)?;
        self.world.as_ref()?.pose(body.body)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Switch the body of `id` between static and dynamic; no-op without a body
    pub fn set_object_static(&mut self, id: &str, is_static: bool) {
        let Some(body) = self.bodies.get(id).map(|b| b.body) else {
            return;
        };
        let body_type = if is_static { BodyType::Static } else { BodyType::Dynamic };
        if let Err(error) = self.world_mut().and_then(|world| world.set_body_type(body, body_type)) {
            crate::engine_warn!("iso::PhysicsSystem", "Cannot change body type of '{}': {}", id, error);
        }
    }

    /// Change the mass of the body of `id`; no-op without a body
    pub fn set_object_mass(&mut self, id: &str, mass: f32) {
        let Some(body) = self.bodies.get(id).map(|b| b.body) else {
            return;
        };
        if let Err(error) = self.world_mut().and_then(|world| world.set_mass(body, mass)) {
            crate::engine_warn!("iso::PhysicsSystem", "Cannot change mass of '{}': {}", id, error);
        }
    }

    // ===== SYNCHRONIZATION =====

    /// Write every body's pose onto its scene object (physics is authoritative)
    ///
    /// Bodies whose object no longer exists are skipped.
    pub fn sync_physics_to_scene(&self, scene: &mut Scene) {
        let Some(world) = self.world.as_ref() else {
            return;
        };
        for (id, body) in &self.bodies {
            let (Some(pose), Some(object)) = (world.pose(body.body), scene.object_mut(id)) else {
                continue;
            };
            object.position = pose.position;
            object.rotation = pose.euler();
        }
    }

    /// Push scene poses onto static bodies; dynamic bodies are left alone
    pub fn sync_scene_to_physics(&mut self, scene: &Scene) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        for (id, body) in &self.bodies {
            if world.body_type(body.body) != Some(BodyType::Static) {
                continue;
            }
            let Some(object) = scene.object(id) else {
                continue;
            };
            let pose = BodyPose::from_euler(object.position, object.rotation);
            if let Err(error) = world.set_pose(body.body, pose) {
                crate::engine_warn!("iso::PhysicsSystem", "Cannot move static body '{}': {}", id, error);
            }
        }
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl Drop for PhysicsSystem {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "physics_system_tests.rs"]
mod tests;
