/// EditorSession - one open scene, its physics and the terminal
///
/// The session is the only place where the scene and the physics system meet:
/// it arms the simulation, drives it frame by frame, and keeps bodies and objects
/// consistent when objects are removed or a new scene is loaded.

use crate::error::{Error, Result};
use crate::physics::PhysicsSystem;
use crate::scene::Scene;
use super::command::{Command, CommandError};

pub struct EditorSession {
    scene: Scene,
    physics: PhysicsSystem,
    simulating: bool,
    /// Messages shown in the terminal, oldest first
    terminal: Vec<String>,
}

impl EditorSession {
    pub fn new(scene: Scene, physics: PhysicsSystem) -> Self {
        Self {
            scene,
            physics,
            simulating: false,
            terminal: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn physics(&self) -> &PhysicsSystem {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsSystem {
        &mut self.physics
    }

    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    pub fn terminal_lines(&self) -> &[String] {
        &self.terminal
    }

    // ===== SIMULATION =====

    /// Create bodies for the collidable objects and start stepping
    ///
    /// Re-arming while simulating rebuilds every body from the current scene.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` if the physics system has no world.
    pub fn arm_simulation(&mut self) -> Result<usize> {
        if !self.physics.is_initialized() {
            return Err(Error::InitializationFailed("Physics system has no world".to_string()));
        }
        let created = self.physics.arm(&self.scene);
        self.simulating = true;
        Ok(created)
    }

    /// Stop stepping and release the bodies; objects keep their simulated pose
    pub fn stop_simulation(&mut self) {
        if self.simulating {
            crate::engine_info!("iso::Editor", "Simulation stopped");
        }
        self.simulating = false;
        self.physics.clear_bodies();
    }

    /// Advance one frame
    ///
    /// While simulating: the delta is raised to at least `min_delta_time`, the
    /// world is stepped, static-body edits made in the scene are pushed to physics,
    /// then the simulated poses are written back onto the scene.
    pub fn frame(&mut self, delta_time: f32) {
        if !self.simulating {
            return;
        }
        let delta_time = delta_time.max(self.physics.config().min_delta_time);
        self.physics.update(delta_time);
        self.physics.sync_scene_to_physics(&self.scene);
        self.physics.sync_physics_to_scene(&mut self.scene);
    }

    // ===== OBJECTS =====

    /// Remove an object together with its physics body
    pub fn remove_object(&mut self, id: &str) -> bool {
        self.physics.remove_rigid_body(id);
        self.scene.remove_object(id)
    }

    /// Replace the scene from a file; a running simulation is stopped first
    pub fn load_scene(&mut self, path: &str) -> Result<()> {
        self.stop_simulation();
        self.scene.load_from_file(path)
    }

    // ===== TERMINAL =====

    /// Run one terminal line and return the message shown to the user
    ///
    /// The message is also appended to the terminal, except for `clear`, which
    /// empties it and returns an empty message.
    pub fn execute(&mut self, line: &str) -> String {
        crate::engine_debug!("iso::Editor", "> {}", line.trim());

        let message = match Command::parse(line) {
            Ok(Command::Clear) => {
                self.terminal.clear();
                return String::new();
            }
            Ok(command) => self.run(command),
            Err(CommandError::Empty) => return String::new(),
            Err(error) => error.to_string(),
        };

        self.terminal.push(message.clone());
        message
    }

    fn run(&mut self, command: Command) -> String {
        match command {
            Command::Clear => String::new(),
            Command::Echo(text) => text,
            Command::AddObject { id, model_path } => match self.scene.add_object(&id, &model_path) {
                Ok(()) => "Object added successfully!".to_string(),
                Err(error) => format!("Failed to add object! {}", error),
            },
            Command::RemoveObject { id } => {
                if self.remove_object(&id) {
                    "Object removed successfully!".to_string()
                } else {
                    "Failed to remove object!".to_string()
                }
            }
            Command::BgColor { r, g, b } => {
                self.scene.set_bg_color(r, g, b);
                format!("Background color set to {} {} {}", r, g, b)
            }
            Command::Alias { key, value } => {
                self.scene.add_path_alias(key, value);
                "Alias added successfully!".to_string()
            }
            Command::Save { path } => match self.scene.save_to_file(&path) {
                Ok(()) => format!("Scene saved to {}", path),
                Err(error) => format!("Failed to save scene! {}", error),
            },
            Command::Load { path } => match self.load_scene(&path) {
                Ok(()) => format!("Scene loaded from {} ({} objects)", path, self.scene.object_count()),
                Err(error) => format!("Failed to load scene! {}", error),
            },
            Command::Simulate => match self.arm_simulation() {
                Ok(count) => format!("Simulation started with {} bodies", count),
                Err(error) => format!("Failed to start simulation! {}", error),
            },
            Command::Stop => {
                self.stop_simulation();
                "Simulation stopped".to_string()
            }
        }
    }
}

#[cfg(test)]
#[path = "editor_session_tests.rs"]
mod tests;
