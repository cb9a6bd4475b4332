/// Tests for EditorSession
///
/// A session over a mock-backed scene and a MockPhysicsWorld, driven both through
/// its methods and through terminal lines.

use super::*;
use crate::asset::mock_asset_importer::{single_triangle_asset, MockAssetImporter};
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::physics::mock_physics_world::MockPhysicsWorld;
use crate::resource::ResourceManager;
use crate::scene::SceneConfig;
use glam::Vec3;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Functions
// ============================================================================

fn create_scene() -> Scene {
    let importer = MockAssetImporter::new()
        .with_asset("/abs/tri.glb", single_triangle_asset())
        .with_asset("/abs/models/crate.glb", single_triangle_asset());
    let (_mock, device) = MockGraphicsDevice::shared();
    let config = SceneConfig {
        base_directory: PathBuf::from("/abs"),
        builtin_aliases: Vec::new(),
        ..SceneConfig::default()
    };
    Scene::with_config(Arc::new(Mutex::new(ResourceManager::new(device))), Arc::new(importer), config)
}

fn create_session() -> EditorSession {
    let mut physics = PhysicsSystem::default();
    physics.initialize(Box::new(MockPhysicsWorld::new()));
    EditorSession::new(create_scene(), physics)
}

/// Session with a falling "ball" at y=10 and a static "floor"
fn populated_session() -> EditorSession {
    let mut session = create_session();
    let scene = session.scene_mut();
    scene.add_object("ball", "tri.glb").unwrap();
    scene.add_object("floor", "tri.glb").unwrap();
    scene.set_object_position("ball", Vec3::new(0.0, 10.0, 0.0));
    scene.set_object_collision_enabled("ball", true);
    scene.set_object_collision_enabled("floor", true);
    scene.set_object_static("floor", true);
    session
}

// ============================================================================
// Simulation
// ============================================================================

#[test]
fn test_frame_does_nothing_until_armed() {
    let mut session = populated_session();

    session.frame(0.1);

    assert!(!session.is_simulating());
    assert_eq!(session.scene().object("ball").unwrap().position.y, 10.0);
}

#[test]
fn test_arm_and_frame_moves_dynamic_object() {
    let mut session = populated_session();

    assert_eq!(session.arm_simulation().unwrap(), 2);
    session.frame(0.1);

    assert!(session.is_simulating());
    assert!(session.scene().object("ball").unwrap().position.y < 10.0);
    assert_eq!(session.scene().object("floor").unwrap().position, Vec3::ZERO);
}

#[test]
fn test_frame_clamps_non_positive_delta() {
    let mut session = populated_session();
    session.arm_simulation().unwrap();

    session.frame(0.0);

    let min = session.physics().config().min_delta_time;
    let y = session.scene().object("ball").unwrap().position.y;
    assert!((10.0 - y - 9.81 * min * min).abs() < 2e-6);
}

#[test]
fn test_frame_pushes_static_edits_to_physics() {
    let mut session = populated_session();
    session.arm_simulation().unwrap();

    session.scene_mut().set_object_position("floor", Vec3::new(2.0, -1.0, 0.0));
    session.frame(0.016);

    assert_eq!(session.physics().body_pose("floor").unwrap().position, Vec3::new(2.0, -1.0, 0.0));
    assert_eq!(session.scene().object("floor").unwrap().position, Vec3::new(2.0, -1.0, 0.0));
}

#[test]
fn test_arm_without_world_fails() {
    let mut session = EditorSession::new(create_scene(), PhysicsSystem::default());

    let result = session.arm_simulation();

    assert!(matches!(result, Err(Error::InitializationFailed(_))));
    assert!(!session.is_simulating());
}

#[test]
fn test_stop_releases_bodies_and_freezes_scene() {
    let mut session = populated_session();
    session.arm_simulation().unwrap();
    session.frame(0.1);

    session.stop_simulation();
    let y = session.scene().object("ball").unwrap().position.y;
    session.frame(0.1);

    assert!(!session.is_simulating());
    assert_eq!(session.physics().body_count(), 0);
    assert_eq!(session.scene().object("ball").unwrap().position.y, y);
}

#[test]
fn test_remove_object_removes_body() {
    let mut session = populated_session();
    session.arm_simulation().unwrap();

    assert!(session.remove_object("ball"));
    assert!(!session.remove_object("ball"));

    assert!(session.physics().physics_body("ball").is_none());
    assert_eq!(session.physics().world().unwrap().body_count(), 1);
    session.frame(0.1);
    assert!(!session.scene().contains_object("ball"));
}

// ============================================================================
// Terminal
// ============================================================================

#[test]
fn test_execute_addobject_and_rmobject() {
    let mut session = create_session();

    assert_eq!(session.execute("addobject crate models/crate.glb"), "Object added successfully!");
    assert!(session.scene().contains_object("crate"));
    assert!(session.execute("addobject crate models/crate.glb").starts_with("Failed to add object!"));
    assert_eq!(session.execute("rmobject crate"), "Object removed successfully!");
    assert_eq!(session.execute("rmobject crate"), "Failed to remove object!");
}

#[test]
fn test_execute_alias_then_addobject() {
    let mut session = create_session();

    assert_eq!(session.execute("alias models /abs/models"), "Alias added successfully!");
    assert_eq!(session.execute("addobject crate @models/crate.glb"), "Object added successfully!");
    assert_eq!(session.scene().object("crate").unwrap().model_path, "@models/crate.glb");
}

#[test]
fn test_execute_bgcolor() {
    let mut session = create_session();

    session.execute("bgcolor 255 0 51");
    let message = session.execute("bgcolor 256 0 0");

    assert_eq!(session.scene().bg_color(), Vec3::new(1.0, 0.0, 0.2));
    assert_eq!(message, "Syntax Error! \nMaximal value is 255!");
}

#[test]
fn test_execute_usage_and_unknown() {
    let mut session = create_session();

    assert_eq!(session.execute("addobject"), "Syntax Error! \nUsage: addobject <id/name> <path_to_glb>");
    assert_eq!(session.execute("fly"), "Unknown command: 'fly'");
    assert_eq!(session.execute("   "), "");
}

#[test]
fn test_execute_echo_and_clear() {
    let mut session = create_session();

    assert_eq!(session.execute("echo hello world"), "hello world");
    session.execute("fly");
    assert_eq!(session.terminal_lines().len(), 2);

    assert_eq!(session.execute("clear"), "");
    assert!(session.terminal_lines().is_empty());
}

#[test]
fn test_execute_simulate_and_stop() {
    let mut session = populated_session();

    assert_eq!(session.execute("simulate"), "Simulation started with 2 bodies");
    assert!(session.is_simulating());
    assert_eq!(session.execute("stop"), "Simulation stopped");
    assert!(!session.is_simulating());
}

#[test]
fn test_execute_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.scene");
    let path = path.to_str().unwrap();
    let mut session = populated_session();

    assert!(session.execute(&format!("save {}", path)).starts_with("Scene saved to"));
    session.execute("rmobject ball");
    let message = session.execute(&format!("load {}", path));

    assert_eq!(message, format!("Scene loaded from {} (2 objects)", path));
    assert!(session.scene().contains_object("ball"));
}

#[test]
fn test_load_stops_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.scene");
    let mut session = populated_session();
    session.scene().save_to_file(&path).unwrap();
    session.arm_simulation().unwrap();

    session.load_scene(path.to_str().unwrap()).unwrap();

    assert!(!session.is_simulating());
    assert_eq!(session.physics().body_count(), 0);
}

#[test]
fn test_execute_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.scene");
    let mut session = populated_session();

    let message = session.execute(&format!("load {}", path.display()));

    assert!(message.starts_with("Failed to load scene! I/O error"));
    assert_eq!(session.scene().object_count(), 2);
}
