//! Editor module
//!
//! The terminal command language and the session that drives a scene and its
//! physics simulation frame by frame.

mod command;
mod editor_session;

pub use command::{Command, CommandError};
pub use editor_session::EditorSession;
