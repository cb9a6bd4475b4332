/// Conversions between engine math types (glam) and rapier math types (nalgebra)

use iso_engine::glam::{Quat, Vec3};
use iso_engine::iso::physics::BodyPose;
use rapier3d::na::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};

pub(crate) fn to_vector(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

pub(crate) fn from_vector(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub(crate) fn to_rotation(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

pub(crate) fn from_rotation(q: &UnitQuaternion<f32>) -> Quat {
    let coords = q.quaternion().coords;
    Quat::from_xyzw(coords.x, coords.y, coords.z, coords.w)
}

pub(crate) fn to_isometry(pose: &BodyPose) -> Isometry3<f32> {
    Isometry3::from_parts(
        Translation3::from(to_vector(pose.position)),
        to_rotation(pose.rotation),
    )
}

pub(crate) fn from_isometry(isometry: &Isometry3<f32>) -> BodyPose {
    BodyPose {
        position: from_vector(&isometry.translation.vector),
        rotation: from_rotation(&isometry.rotation),
    }
}

#[cfg(test)]
#[path = "conversion_tests.rs"]
mod tests;
