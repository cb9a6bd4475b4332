/*!
# ISO Engine

Scene persistence and runtime synchronization for the ISO scene editor.

This crate owns the editor's scene graph and everything that keeps it consistent:
placed objects, the binary scene file, the GPU resource de-duplication cache and
the bidirectional transform sync with a physics simulation. The collaborators it
talks to (GPU upload, asset importing, the physics solver) are expressed as traits;
backends implement them in separate crates.

## Architecture

- **ResourceManager**: cache from asset cache-key to uploaded mesh/texture handles
- **Scene**: owns `SceneObject`s, the path-alias table and the background color
- **SceneFile**: the `SCENE001`/`SCENE002` binary codec
- **PhysicsSystem**: physics bodies keyed by object id, synced with the scene
- **EditorSession**: frame driver and terminal command interpreter

Collaborator traits:

- **GraphicsDevice**: buffer/texture upload
- **AssetImporter**: node/mesh/primitive tree from a model file
- **PhysicsWorld**: rigid-body engine
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod asset;
pub mod resource;
pub mod scene;
pub mod physics;
pub mod editor;

// Main iso namespace module
pub mod iso {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // GPU upload contract
    pub mod graphics {
        pub use crate::graphics_device::*;
    }

    // Asset import contract
    pub mod asset {
        pub use crate::asset::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Physics sub-module
    pub mod physics {
        pub use crate::physics::*;
    }

    // Editor sub-module
    pub mod editor {
        pub use crate::editor::*;
    }
}

// Re-export math library at crate root
pub use glam;
