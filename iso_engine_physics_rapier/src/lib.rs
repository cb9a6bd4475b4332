/*!
# ISO Engine - Rapier Physics Backend

Rapier implementation of the ISO engine `PhysicsWorld` trait.

This crate provides a rigid-body backend for `PhysicsSystem` using the rapier3d
engine. Engine poses (glam) are converted to rapier isometries (nalgebra) at the
trait boundary.

# Example

```no_run
use iso_engine::iso::physics::{PhysicsConfig, PhysicsSystem};
use iso_engine_physics_rapier::RapierWorld;

let mut physics = PhysicsSystem::new(PhysicsConfig::default());
physics.initialize(Box::new(RapierWorld::new()));
```
*/

mod conversion;
mod rapier_world;

pub use rapier_world::RapierWorld;
