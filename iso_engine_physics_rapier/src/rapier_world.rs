/// RapierWorld - rapier3d implementation of the PhysicsWorld trait
///
/// Owns the complete rapier pipeline state. Engine handles are slot-map keys that
/// map onto rapier's own handles; a body carries at most one collider, and a mass
/// set before the collider exists is applied when it is attached.

use iso_engine::glam::Vec3;
use iso_engine::iso::physics::{
    BodyHandle, BodyPose, BodyType, ColliderHandle, PhysicsWorld,
};
use iso_engine::iso::{Error, Result};
use iso_engine::{engine_debug, engine_warn};
use rapier3d::prelude as rapier;
use slotmap::SlotMap;

use crate::conversion::{from_isometry, to_isometry, to_vector};

/// Engine-side record of a rapier body
struct RapierBody {
    handle: rapier::RigidBodyHandle,
    collider: Option<rapier::ColliderHandle>,
    mass: f32,
}

pub struct RapierWorld {
    gravity: rapier::Vector<f32>,
    integration_parameters: rapier::IntegrationParameters,
    pipeline: rapier::PhysicsPipeline,
    islands: rapier::IslandManager,
    broad_phase: rapier::DefaultBroadPhase,
    narrow_phase: rapier::NarrowPhase,
    rigid_bodies: rapier::RigidBodySet,
    colliders: rapier::ColliderSet,
    impulse_joints: rapier::ImpulseJointSet,
    multibody_joints: rapier::MultibodyJointSet,
    ccd_solver: rapier::CCDSolver,
    query_pipeline: rapier::QueryPipeline,

    bodies: SlotMap<BodyHandle, RapierBody>,
    collider_keys: SlotMap<ColliderHandle, rapier::ColliderHandle>,
}

impl RapierWorld {
    pub fn new() -> Self {
        Self {
            gravity: rapier::Vector::zeros(),
            integration_parameters: rapier::IntegrationParameters::default(),
            pipeline: rapier::PhysicsPipeline::new(),
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            rigid_bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            bodies: SlotMap::with_key(),
            collider_keys: SlotMap::with_key(),
        }
    }

    fn body(&self, body: BodyHandle) -> Result<&RapierBody> {
        self.bodies.get(body)
            .ok_or_else(|| Error::InvalidResource(format!("Unknown body {:?}", body)))
    }

    fn rigid_body_mut(&mut self, body: BodyHandle) -> Result<&mut rapier::RigidBody> {
        let handle = self.body(body)?.handle;
        self.rigid_bodies.get_mut(handle)
            .ok_or_else(|| Error::BackendError(format!("Rapier body missing for {:?}", body)))
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn rigid_body_type(body_type: BodyType) -> rapier::RigidBodyType {
    match body_type {
        BodyType::Static => rapier::RigidBodyType::Fixed,
        BodyType::Dynamic => rapier::RigidBodyType::Dynamic,
    }
}

impl PhysicsWorld for RapierWorld {
    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = to_vector(gravity);
    }

    fn create_body(&mut self, pose: BodyPose, body_type: BodyType, mass: f32) -> Result<BodyHandle> {
        let rigid_body = rapier::RigidBodyBuilder::new(rigid_body_type(body_type))
            .position(to_isometry(&pose))
            .build();
        let handle = self.rigid_bodies.insert(rigid_body);

        Ok(self.bodies.insert(RapierBody { handle, collider: None, mass }))
    }

    fn destroy_body(&mut self, body: BodyHandle) -> bool {
        let Some(removed) = self.bodies.remove(body) else {
            return false;
        };
        self.collider_keys.retain(|_, collider| Some(*collider) != removed.collider);
        self.rigid_bodies.remove(
            removed.handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        true
    }

    fn attach_box_collider(&mut self, body: BodyHandle, half_extents: Vec3) -> Result<ColliderHandle> {
        let (handle, mass, previous) = {
            let entry = self.body(body)?;
            (entry.handle, entry.mass, entry.collider)
        };
        if previous.is_some() {
            return Err(Error::InvalidResource(format!("Body {:?} already has a collider", body)));
        }
        if half_extents.cmple(Vec3::ZERO).any() {
            return Err(Error::InvalidResource(format!(
                "Collider half extents must be positive, got {:?}", half_extents
            )));
        }

        let collider = rapier::ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .mass(mass)
            .build();
        let collider = self.colliders.insert_with_parent(collider, handle, &mut self.rigid_bodies);

        if let Some(entry) = self.bodies.get_mut(body) {
            entry.collider = Some(collider);
        }
        engine_debug!("iso::rapier", "Box collider {:?} attached to {:?}", half_extents, body);
        Ok(self.collider_keys.insert(collider))
    }

    fn set_body_type(&mut self, body: BodyHandle, body_type: BodyType) -> Result<()> {
        let rigid_body = self.rigid_body_mut(body)?;
        rigid_body.set_body_type(rigid_body_type(body_type), true);
        if body_type == BodyType::Static {
            rigid_body.set_linvel(rapier::Vector::zeros(), false);
            rigid_body.set_angvel(rapier::Vector::zeros(), false);
        }
        Ok(())
    }

    fn body_type(&self, body: BodyHandle) -> Option<BodyType> {
        let entry = self.bodies.get(body)?;
        let rigid_body = self.rigid_bodies.get(entry.handle)?;
        Some(if rigid_body.is_fixed() { BodyType::Static } else { BodyType::Dynamic })
    }

    fn set_mass(&mut self, body: BodyHandle, mass: f32) -> Result<()> {
        let entry = self.bodies.get_mut(body)
            .ok_or_else(|| Error::InvalidResource(format!("Unknown body {:?}", body)))?;
        entry.mass = mass;

        if let Some(handle) = entry.collider {
            match self.colliders.get_mut(handle) {
                Some(collider) => collider.set_mass(mass),
                None => engine_warn!("iso::rapier", "Collider of {:?} vanished, mass kept for later", body),
            }
        }
        Ok(())
    }

    fn set_pose(&mut self, body: BodyHandle, pose: BodyPose) -> Result<()> {
        self.rigid_body_mut(body)?.set_position(to_isometry(&pose), true);
        Ok(())
    }

    fn pose(&self, body: BodyHandle) -> Option<BodyPose> {
        let entry = self.bodies.get(body)?;
        self.rigid_bodies.get(entry.handle).map(|rb| from_isometry(rb.position()))
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
#[path = "rapier_world_tests.rs"]
mod tests;
