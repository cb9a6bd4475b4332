//! Unit tests for glam/nalgebra conversions
//!
//! Quaternion component order differs between the two libraries (glam stores
//! x, y, z, w; nalgebra's constructor takes w first).

use super::*;
use iso_engine::glam::EulerRot;

#[test]
fn test_vector_conversion() {
    let v = Vec3::new(1.0, -2.0, 3.5);

    assert_eq!(to_vector(v), Vector3::new(1.0, -2.0, 3.5));
    assert_eq!(from_vector(&to_vector(v)), v);
}

#[test]
fn test_rotation_component_order() {
    let q = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

    let converted = to_rotation(q);

    let coords = converted.quaternion().coords;
    assert!((coords.y - q.y).abs() < 1e-6);
    assert!((coords.w - q.w).abs() < 1e-6);
    assert!(coords.x.abs() < 1e-6);
    assert!(coords.z.abs() < 1e-6);
}

#[test]
fn test_rotation_rotates_same_way() {
    let q = Quat::from_euler(EulerRot::XYZ, 0.3, -0.7, 1.1);
    let point = Vec3::new(1.0, 2.0, 3.0);

    let expected = q * point;
    let actual = from_vector(&(to_rotation(q) * to_vector(point)));

    assert!(actual.abs_diff_eq(expected, 1e-5));
}

#[test]
fn test_isometry_preserves_pose() {
    let pose = BodyPose::from_euler(Vec3::new(4.0, 5.0, -6.0), Vec3::new(0.1, 0.2, 0.3));

    let back = from_isometry(&to_isometry(&pose));

    assert!(back.position.abs_diff_eq(pose.position, 1e-6));
    assert!(back.rotation.abs_diff_eq(pose.rotation, 1e-6));
}
