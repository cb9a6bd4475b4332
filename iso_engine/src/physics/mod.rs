//! Physics module
//!
//! Rigid bodies for collidable scene objects and the transform synchronization
//! between them and the scene. The solver itself is a `PhysicsWorld` backend.

mod physics_world;
mod physics_system;

pub use physics_world::{PhysicsWorld, BodyHandle, ColliderHandle, BodyPose, BodyType};
pub use physics_system::{PhysicsSystem, PhysicsBody, PhysicsConfig};

// Mock physics world for tests (explicit Euler integration, no collisions)
#[cfg(test)]
pub mod mock_physics_world;
