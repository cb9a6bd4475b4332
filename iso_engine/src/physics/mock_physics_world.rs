/// Mock PhysicsWorld for unit tests
///
/// Dynamic bodies fall under gravity with semi-implicit Euler integration
/// (v += g·dt, p += v·dt); there are no collisions.

use glam::Vec3;
use slotmap::SlotMap;
use crate::error::{Error, Result};
use super::{BodyHandle, BodyPose, BodyType, ColliderHandle, PhysicsWorld};

#[derive(Debug, Clone)]
pub struct MockBody {
    pub pose: BodyPose,
    pub body_type: BodyType,
    pub mass: f32,
    pub velocity: Vec3,
    pub collider: Option<ColliderHandle>,
}

#[derive(Default)]
pub struct MockPhysicsWorld {
    pub gravity: Vec3,
    pub bodies: SlotMap<BodyHandle, MockBody>,
    pub colliders: SlotMap<ColliderHandle, (BodyHandle, Vec3)>,
    /// When set, the next collider attachment fails
    pub fail_next_collider: bool,
}

impl MockPhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn body_mut(&mut self, body: BodyHandle) -> Result<&mut MockBody> {
        self.bodies.get_mut(body)
            .ok_or_else(|| Error::InvalidResource(format!("unknown body {:?}", body)))
    }
}

impl PhysicsWorld for MockPhysicsWorld {
    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    fn create_body(&mut self, pose: BodyPose, body_type: BodyType, mass: f32) -> Result<BodyHandle> {
        Ok(self.bodies.insert(MockBody {
            pose,
            body_type,
            mass,
            velocity: Vec3::ZERO,
            collider: None,
        }))
    }

    fn destroy_body(&mut self, body: BodyHandle) -> bool {
        match self.bodies.remove(body) {
            Some(removed) => {
                if let Some(collider) = removed.collider {
                    self.colliders.remove(collider);
                }
                true
            }
            None => false,
        }
    }

    fn attach_box_collider(&mut self, body: BodyHandle, half_extents: Vec3) -> Result<ColliderHandle> {
        if self.fail_next_collider {
            self.fail_next_collider = false;
            return Err(Error::BackendError("collider creation failed".to_string()));
        }
        self.body_mut(body)?;
        let collider = self.colliders.insert((body, half_extents));
        self.body_mut(body)?.collider = Some(collider);
        Ok(collider)
    }

    fn set_body_type(&mut self, body: BodyHandle, body_type: BodyType) -> Result<()> {
        let body = self.body_mut(body)?;
        body.body_type = body_type;
        body.velocity = Vec3::ZERO;
        Ok(())
    }

    fn body_type(&self, body: BodyHandle) -> Option<BodyType> {
        self.bodies.get(body).map(|b| b.body_type)
    }

    fn set_mass(&mut self, body: BodyHandle, mass: f32) -> Result<()> {
        self.body_mut(body)?.mass = mass;
        Ok(())
    }

    fn set_pose(&mut self, body: BodyHandle, pose: BodyPose) -> Result<()> {
        self.body_mut(body)?.pose = pose;
        Ok(())
    }

    fn pose(&self, body: BodyHandle) -> Option<BodyPose> {
        self.bodies.get(body).map(|b| b.pose)
    }

    fn step(&mut self, dt: f32) {
        let gravity = self.gravity;
        for body in self.bodies.values_mut() {
            if body.body_type == BodyType::Dynamic {
                body.velocity += gravity * dt;
                body.pose.position += body.velocity * dt;
            }
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
